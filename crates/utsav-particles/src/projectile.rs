//! Rockets: ascend from a launch pad, explode once at their apex

use crate::config::RocketConfig;
use crate::rand::RandomSource;
use utsav_core::{EntityId, Result, UtsavError, Vec3};
use utsav_runtime::{RenderState, Visual, VisualKind};

/// Flight phase of a rocket. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileState {
    Ascending,
    Exploded,
}

/// Outcome of one [`Projectile::advance`] step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flight {
    StillFlying,
    Exploded { at: Vec3 },
}

#[derive(Debug, Clone)]
pub struct Projectile {
    id: EntityId,
    position: Vec3,
    /// Displacement per reference frame
    velocity: Vec3,
    /// Converts seconds into reference frames
    time_scale: f32,
    apex_height: f32,
    state: ProjectileState,
    exploded_at: Option<f64>,
}

impl Projectile {
    /// Sample a rocket at `launch`.
    ///
    /// Direction is `(dx, 1, dz)` normalized with `dx, dz` uniform in
    /// `±drift/2`; the apex lies `apex_base + [0, apex_jitter)` above the launch
    /// height.
    pub fn new(launch: Vec3, config: &RocketConfig, rng: &mut impl RandomSource) -> Self {
        let dx = (rng.next_f32() - 0.5) * config.drift;
        let dz = (rng.next_f32() - 0.5) * config.drift;
        let velocity = Vec3::new(dx, 1.0, dz).normalized() * config.speed;
        let apex_height = launch.y + config.apex_base + rng.range(0.0, config.apex_jitter);

        Self {
            id: EntityId::new(),
            position: launch,
            velocity,
            time_scale: config.reference_fps,
            apex_height,
            state: ProjectileState::Ascending,
            exploded_at: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn apex_height(&self) -> f32 {
        self.apex_height
    }

    pub fn state(&self) -> ProjectileState {
        self.state
    }

    pub fn has_exploded(&self) -> bool {
        self.state == ProjectileState::Exploded
    }

    /// Animation time at which the apex was crossed
    pub fn exploded_at(&self) -> Option<f64> {
        self.exploded_at
    }

    /// Integrate `dt` seconds of flight (explicit Euler, scaled by elapsed
    /// time so the path does not depend on the frame rate).
    ///
    /// Returns `Exploded` exactly once, on the step that reaches the apex.
    /// Advancing a rocket that already exploded fails with `AlreadyExploded`.
    pub fn advance(&mut self, now: f64, dt: f64) -> Result<Flight> {
        if self.has_exploded() {
            return Err(UtsavError::AlreadyExploded(self.id));
        }

        let frames = dt.max(0.0) as f32 * self.time_scale;
        self.position += self.velocity * frames;

        if self.position.y >= self.apex_height {
            self.state = ProjectileState::Exploded;
            self.exploded_at = Some(now);
            return Ok(Flight::Exploded { at: self.position });
        }
        Ok(Flight::StillFlying)
    }
}

impl Visual for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> VisualKind {
        VisualKind::Rocket
    }

    fn render_state(&self, _now: f64) -> RenderState {
        RenderState::Rocket {
            position: self.position,
        }
    }
}
