//! Diya garden: a ring of lamps that can be lit one by one

use crate::config::LampConfig;
use log::debug;
use serde::Serialize;
use std::f32::consts::TAU;
use utsav_core::{Result, UtsavError, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lamp {
    pub index: usize,
    pub position: Vec3,
    pub lit: bool,
}

/// Result of toggling one lamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LampToggle {
    pub index: usize,
    pub lit: bool,
    /// Every lamp is lit after this toggle
    pub all_lit: bool,
}

pub struct LampRing {
    lamps: Vec<Lamp>,
}

impl LampRing {
    /// Lay `count` lamps evenly on a circle: `x = sin(θ)·r`, `z = cos(θ)·r`
    pub fn new(config: &LampConfig) -> Result<Self> {
        config.validate()?;
        let lamps = (0..config.count)
            .map(|index| {
                let angle = index as f32 / config.count as f32 * TAU;
                Lamp {
                    index,
                    position: Vec3::new(
                        angle.sin() * config.radius,
                        0.0,
                        angle.cos() * config.radius,
                    ),
                    lit: false,
                }
            })
            .collect();
        Ok(Self { lamps })
    }

    pub fn lamps(&self) -> &[Lamp] {
        &self.lamps
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.lamps.iter().map(|l| l.position).collect()
    }

    pub fn lit_count(&self) -> usize {
        self.lamps.iter().filter(|l| l.lit).count()
    }

    pub fn all_lit(&self) -> bool {
        self.lamps.iter().all(|l| l.lit)
    }

    pub fn toggle(&mut self, index: usize) -> Result<LampToggle> {
        let count = self.lamps.len();
        let lamp = self.lamps.get_mut(index).ok_or_else(|| {
            UtsavError::invalid(format!("lamp {index} does not exist (ring has {count})"))
        })?;
        lamp.lit = !lamp.lit;
        let lit = lamp.lit;
        let all_lit = self.all_lit();
        debug!("lamp {index} {}", if lit { "lit" } else { "snuffed" });
        Ok(LampToggle {
            index,
            lit,
            all_lit,
        })
    }
}

/// Point-light intensity of a lit flame at animation time `t`
pub fn flame_intensity(t: f64) -> f32 {
    1.4 + (t * 10.0).sin() as f32 * 0.3
}

/// Uniform scale of a lit flame at animation time `t`
pub fn flame_scale(t: f64) -> f32 {
    1.0 + (t * 12.0).sin() as f32 * 0.1
}
