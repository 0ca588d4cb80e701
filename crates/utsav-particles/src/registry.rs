//! Owner of every live rocket and burst
//!
//! `tick` is the single authoritative per-frame update: rockets advance first
//! (and may spawn firework bursts), then bursts are pruned. Removals are
//! swept after each pass, so nothing is advanced twice or after removal.

use crate::burst::ParticleBurst;
use crate::config::{BurstPreset, EffectConfig};
use crate::flash::FlashState;
use crate::projectile::{Flight, Projectile};
use crate::rand::{ParticleRng, RandomSource};
use log::{debug, warn};
use serde::Serialize;
use utsav_core::{Color, EntityId, Result, UtsavError, Vec3};
use utsav_runtime::{GameEvent, NullSink, RenderSink, Visual};

/// A rocket that crossed its apex during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Explosion {
    pub rocket: EntityId,
    pub position: Vec3,
    pub burst: EntityId,
}

/// Membership changes produced by one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub explosions: Vec<Explosion>,
    pub expired: Vec<EntityId>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty() && self.expired.is_empty()
    }

    /// Events in the order they happened
    pub fn events(&self) -> Vec<GameEvent> {
        let mut events = Vec::with_capacity(self.explosions.len() + self.expired.len());
        for e in &self.explosions {
            events.push(GameEvent::RocketExploded {
                id: e.rocket,
                position: e.position,
                burst: e.burst,
            });
        }
        events.extend(self.expired.iter().map(|&id| GameEvent::BurstExpired { id }));
        events
    }
}

/// Spawns, advances, and retires rockets and bursts
pub struct EffectRegistry<R: RandomSource = ParticleRng, S: RenderSink = NullSink> {
    config: EffectConfig,
    palette: Vec<Color>,
    rng: R,
    sink: S,
    projectiles: Vec<Projectile>,
    bursts: Vec<ParticleBurst>,
}

impl<R: RandomSource, S: RenderSink> EffectRegistry<R, S> {
    /// Validate `config` once; every entity built later relies on it
    pub fn new(config: EffectConfig, rng: R, sink: S) -> Result<Self> {
        config.validate()?;
        let palette = config.rocket.colors()?;
        Ok(Self {
            config,
            palette,
            rng,
            sink,
            projectiles: Vec::new(),
            bursts: Vec::new(),
        })
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn bursts(&self) -> &[ParticleBurst] {
        &self.bursts
    }

    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id() == id)
    }

    /// Rockets first, then bursts
    pub fn visuals(&self) -> impl Iterator<Item = &dyn Visual> + '_ {
        self.projectiles
            .iter()
            .map(|p| p as &dyn Visual)
            .chain(self.bursts.iter().map(|b| b as &dyn Visual))
    }

    pub fn is_idle(&self) -> bool {
        self.projectiles.is_empty() && self.bursts.is_empty()
    }

    /// Register a new rocket at `position` and return its id
    pub fn launch(&mut self, position: Vec3) -> Result<EntityId> {
        require_finite("launch position", position)?;
        let projectile = Projectile::new(position, &self.config.rocket, &mut self.rng);
        let id = projectile.id();
        debug!(
            "launch {id} from ({:.2}, {:.2}, {:.2}), apex {:.2}",
            position.x,
            position.y,
            position.z,
            projectile.apex_height()
        );
        self.sink.insert(id, projectile.kind());
        self.projectiles.push(projectile);
        Ok(id)
    }

    /// Register a burst from one of the configured presets, born at `now`
    pub fn spawn_burst(
        &mut self,
        origin: Vec3,
        color: Color,
        preset: BurstPreset,
        now: f64,
    ) -> Result<EntityId> {
        require_finite("burst origin", origin)?;
        let burst = ParticleBurst::sample(
            origin,
            color,
            self.config.burst(preset),
            now,
            &mut self.rng,
        );
        Ok(self.register_burst(burst))
    }

    /// Advance every live entity once.
    ///
    /// Bursts spawned by this tick's explosions are born at `now` and, since
    /// lifetimes are positive, survive the prune that follows.
    pub fn tick(&mut self, now: f64, dt: f64, flash: &mut FlashState) -> TickReport {
        let mut report = TickReport::default();

        let mut apexes = Vec::new();
        for projectile in &mut self.projectiles {
            match projectile.advance(now, dt) {
                Ok(Flight::StillFlying) => {}
                Ok(Flight::Exploded { at }) => apexes.push((projectile.id(), at)),
                Err(err) => warn!("skipping spent rocket: {err}"),
            }
        }

        let sink = &mut self.sink;
        self.projectiles.retain(|p| {
            if p.has_exploded() {
                sink.remove(p.id());
                false
            } else {
                true
            }
        });

        for (rocket, position) in apexes {
            let color = self.rng.pick(&self.palette).copied().unwrap_or(Color::WHITE);
            let burst =
                ParticleBurst::sample(position, color, &self.config.firework, now, &mut self.rng);
            let burst = self.register_burst(burst);
            flash.trigger(now);
            debug!("rocket {rocket} burst into {burst} at y={:.2}", position.y);
            report.explosions.push(Explosion {
                rocket,
                position,
                burst,
            });
        }

        let sink = &mut self.sink;
        let expired = &mut report.expired;
        self.bursts.retain(|b| {
            if b.is_expired(now) {
                sink.remove(b.id());
                expired.push(b.id());
                false
            } else {
                true
            }
        });
        for id in &report.expired {
            debug!("burst {id} expired");
        }

        report
    }

    /// Drop every live entity (scene transition)
    pub fn clear(&mut self) {
        for p in self.projectiles.drain(..) {
            self.sink.remove(p.id());
        }
        for b in self.bursts.drain(..) {
            self.sink.remove(b.id());
        }
    }

    fn register_burst(&mut self, burst: ParticleBurst) -> EntityId {
        let id = burst.id();
        self.sink.insert(id, burst.kind());
        self.bursts.push(burst);
        id
    }
}

fn require_finite(what: &str, v: Vec3) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(UtsavError::invalid(format!("{what} must be finite, got {v:?}")))
    }
}
