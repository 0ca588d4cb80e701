//! Sky flash that lights up when a rocket bursts

use crate::config::FlashConfig;
use crate::curves::lerp_f32;

/// Explicit flash state, owned by the firework system and handed to every
/// tick. Re-triggering restarts the decay from the peak.
#[derive(Debug, Clone)]
pub struct FlashState {
    peak: f32,
    duration: f64,
    triggered_at: Option<f64>,
}

impl FlashState {
    pub fn new(config: &FlashConfig) -> Self {
        Self {
            peak: config.peak,
            duration: config.duration,
            triggered_at: None,
        }
    }

    pub fn trigger(&mut self, now: f64) {
        self.triggered_at = Some(now);
    }

    /// Linear decay from `peak` to 0 over `duration` seconds
    pub fn intensity(&self, now: f64) -> f32 {
        let Some(start) = self.triggered_at else {
            return 0.0;
        };
        let age = (now - start).max(0.0);
        if age >= self.duration {
            return 0.0;
        }
        lerp_f32(self.peak, 0.0, (age / self.duration) as f32)
    }

    pub fn is_active(&self, now: f64) -> bool {
        self.intensity(now) > 0.0
    }

    pub fn reset(&mut self) {
        self.triggered_at = None;
    }
}

impl Default for FlashState {
    fn default() -> Self {
        Self::new(&FlashConfig::default())
    }
}
