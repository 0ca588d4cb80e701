//! Utsav Particles - rockets, fireworks, and sparkles
//!
//! Provides the per-frame effect core:
//! - `Projectile` — a rocket integrated until it crosses its apex
//! - `ParticleBurst` — a fixed cloud whose state is a closed-form function of age
//! - `EffectRegistry` — owns live entities, turns apexes into bursts, prunes expired ones
//! - `FlashState` — sky flash triggered by explosions
//! - `DrawBatcher` — GPU instance packing for instanced point drawing

pub mod burst;
pub mod config;
pub mod curves;
pub mod draw;
pub mod flash;
pub mod projectile;
pub mod rand;
pub mod registry;

use log::info;
use utsav_core::{EntityId, Result, Vec3};
use utsav_runtime::{EventBus, GameEvent, NullSink, RenderSink, RuntimeSystem, TimeSource};

pub use burst::{Particle, ParticleBurst};
pub use config::{
    BurstConfig, BurstPreset, EffectConfig, FlashConfig, ParticleBlendMode, RocketConfig,
};
pub use draw::{DrawBatcher, ParticleDrawData, ParticleInstance};
pub use flash::FlashState;
pub use projectile::{Flight, Projectile, ProjectileState};
pub use rand::{entropy_seed, ParticleRng, RandomSource, SequenceRng};
pub use registry::{EffectRegistry, Explosion, TickReport};

/// Rockets, bursts and the sky flash, driven once per frame as a `RuntimeSystem`
pub struct FireworkSystem<S: RenderSink = NullSink> {
    registry: EffectRegistry<ParticleRng, S>,
    flash: FlashState,
    batcher: DrawBatcher,
}

impl<S: RenderSink> FireworkSystem<S> {
    pub fn new(config: EffectConfig, seed: u32, sink: S) -> Result<Self> {
        let flash = FlashState::new(&config.flash);
        Ok(Self {
            registry: EffectRegistry::new(config, ParticleRng::new(seed), sink)?,
            flash,
            batcher: DrawBatcher::new(),
        })
    }

    pub fn registry(&self) -> &EffectRegistry<ParticleRng, S> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EffectRegistry<ParticleRng, S> {
        &mut self.registry
    }

    pub fn flash(&self) -> &FlashState {
        &self.flash
    }

    pub fn batcher(&self) -> &DrawBatcher {
        &self.batcher
    }

    /// Launch a rocket and announce it on the bus
    pub fn launch(&mut self, position: Vec3, events: &mut EventBus) -> Result<EntityId> {
        let id = self.registry.launch(position)?;
        events.push(GameEvent::RocketLaunched { id, position });
        Ok(id)
    }
}

impl<S: RenderSink> RuntimeSystem for FireworkSystem<S> {
    fn initialize(&mut self) -> Result<()> {
        let config = self.registry.config();
        info!(
            "[fireworks] ready: {} colors, {} particles per burst",
            config.rocket.palette.len(),
            config.firework.count
        );
        Ok(())
    }

    fn update(&mut self, clock: &dyn TimeSource, events: &mut EventBus) -> Result<()> {
        let now = clock.now();
        let report = self.registry.tick(now, clock.delta(), &mut self.flash);
        events.extend(report.events());
        self.batcher.pack(self.registry.bursts(), now);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.registry.clear();
        self.flash.reset();
        info!("[fireworks] shut down");
        Ok(())
    }

    fn name(&self) -> &str {
        "fireworks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utsav_runtime::{GameClock, RecordingSink};

    #[test]
    fn system_publishes_launch_explosion_and_expiry() {
        let mut system =
            FireworkSystem::new(EffectConfig::default(), 7, RecordingSink::new()).unwrap();
        let mut clock = GameClock::new();
        let mut bus = EventBus::new();
        system.initialize().unwrap();

        let rocket = system.launch(Vec3::new(0.0, -1.2, 0.0), &mut bus).unwrap();
        for _ in 0..(6 * 60) {
            clock.advance(1.0 / 60.0);
            system.update(&clock, &mut bus).unwrap();
        }

        let events = bus.drain();
        assert!(matches!(events[0], GameEvent::RocketLaunched { id, .. } if id == rocket));
        let burst = events
            .iter()
            .find_map(|e| match e {
                GameEvent::RocketExploded { id, burst, .. } if *id == rocket => Some(*burst),
                _ => None,
            })
            .expect("rocket should explode");
        assert!(events.contains(&GameEvent::BurstExpired { id: burst }));
        assert!(system.registry().is_idle());
        assert!(system.batcher().instance_data().is_empty());
    }

    #[test]
    fn batcher_tracks_live_bursts() {
        let mut system = FireworkSystem::new(EffectConfig::default(), 3, NullSink).unwrap();
        let mut clock = GameClock::new();
        let mut bus = EventBus::new();
        system.launch(Vec3::ZERO, &mut bus).unwrap();
        while system.registry().bursts().is_empty() {
            clock.advance(1.0 / 60.0);
            system.update(&clock, &mut bus).unwrap();
        }
        assert_eq!(system.batcher().instance_data().len(), 220);
        assert!(system.flash().is_active(clock.now()));

        system.shutdown().unwrap();
        assert!(system.registry().is_idle());
    }
}
