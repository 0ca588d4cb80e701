//! Time-bounded particle clouds
//!
//! A burst never integrates anything. Each particle keeps the offset and
//! velocity it was born with, and its position at age `t` is derived as
//! `origin + offset + velocity * t - (0, gravity, 0) * t^2`.

use crate::config::{BurstConfig, ParticleBlendMode};
use crate::curves::fade;
use crate::rand::RandomSource;
use utsav_core::{Color, EntityId, Result, Vec3};
use utsav_runtime::{RenderState, Visual, VisualKind};

/// One point of a burst; immutable after construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    offset: Vec3,
    velocity: Vec3,
}

impl Particle {
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Position relative to the burst origin at age `t` seconds
    pub fn displacement(&self, t: f32, gravity: f32) -> Vec3 {
        self.offset + self.velocity * t - Vec3::new(0.0, gravity * t * t, 0.0)
    }
}

/// A cloud of particles that fades out and expires after `lifetime` seconds
#[derive(Debug, Clone)]
pub struct ParticleBurst {
    id: EntityId,
    origin: Vec3,
    color: Color,
    particles: Vec<Particle>,
    spawn_time: f64,
    lifetime: f64,
    gravity: f32,
    fade_exponent: f32,
    point_size: f32,
    blend_mode: ParticleBlendMode,
}

impl ParticleBurst {
    /// Sample a new burst at `origin`, born at animation time `now`.
    ///
    /// Fails with `InvalidArgument` if the config has no particles, a
    /// non-positive lifetime, or inverted ranges.
    pub fn new(
        origin: Vec3,
        color: Color,
        config: &BurstConfig,
        now: f64,
        rng: &mut impl RandomSource,
    ) -> Result<Self> {
        config.validate("burst")?;
        Ok(Self::sample(origin, color, config, now, rng))
    }

    /// Construction for configs that were validated up front
    pub(crate) fn sample(
        origin: Vec3,
        color: Color,
        config: &BurstConfig,
        now: f64,
        rng: &mut impl RandomSource,
    ) -> Self {
        let spread = config.spread_radians();
        let particles = (0..config.count)
            .map(|_| {
                let dir = rng.cone_up(spread);
                let radius = rng.range(config.offset_min, config.offset_max);
                let velocity = if config.uniform_speed {
                    dir * rng.range(config.horizontal_speed_min, config.horizontal_speed_max)
                } else {
                    let vx = rng.range(config.horizontal_speed_min, config.horizontal_speed_max);
                    let vy = rng.range(config.vertical_speed_min, config.vertical_speed_max);
                    let vz = rng.range(config.horizontal_speed_min, config.horizontal_speed_max);
                    Vec3::new(dir.x * vx, dir.y * vy, dir.z * vz)
                };
                Particle {
                    offset: dir * radius,
                    velocity,
                }
            })
            .collect();

        Self {
            id: EntityId::new(),
            origin,
            color,
            particles,
            spawn_time: now,
            lifetime: config.lifetime,
            gravity: config.gravity,
            fade_exponent: config.fade_exponent,
            point_size: config.point_size,
            blend_mode: config.blend_mode,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn spawn_time(&self) -> f64 {
        self.spawn_time
    }

    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn blend_mode(&self) -> ParticleBlendMode {
        self.blend_mode
    }

    /// Seconds since spawn, never negative
    pub fn age(&self, now: f64) -> f64 {
        (now - self.spawn_time).max(0.0)
    }

    /// `now - spawn_time >= lifetime`
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.spawn_time >= self.lifetime
    }

    /// Opacity in [0, 1], non-increasing in `now` and 0 at expiry
    pub fn opacity(&self, now: f64) -> f32 {
        fade((self.age(now) / self.lifetime) as f32, self.fade_exponent)
    }

    /// World-space particle positions at animation time `now`
    pub fn positions(&self, now: f64) -> impl Iterator<Item = Vec3> + '_ {
        let t = self.age(now) as f32;
        self.particles
            .iter()
            .map(move |p| self.origin + p.displacement(t, self.gravity))
    }
}

impl Visual for ParticleBurst {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> VisualKind {
        VisualKind::Burst {
            particles: self.particles.len(),
        }
    }

    fn render_state(&self, now: f64) -> RenderState {
        RenderState::Burst {
            origin: self.origin,
            color: self.color,
            opacity: self.opacity(now),
            points: self.positions(now).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand::{ParticleRng, SequenceRng};
    use utsav_core::UtsavError;

    fn sparkle_at(now: f64) -> ParticleBurst {
        let mut rng = ParticleRng::new(42);
        ParticleBurst::new(
            Vec3::new(1.0, 0.12, -2.0),
            Color::from_hex(0xffd966),
            &BurstConfig::sparkle(),
            now,
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn allocates_requested_particle_count() {
        let burst = sparkle_at(0.0);
        assert_eq!(burst.particles().len(), 64);
        assert_eq!(burst.kind(), VisualKind::Burst { particles: 64 });
    }

    #[test]
    fn particles_start_inside_the_upward_cone() {
        let burst = sparkle_at(0.0);
        let max_polar = BurstConfig::sparkle().spread_radians();
        for p in burst.particles() {
            let offset = p.offset();
            let r = offset.length();
            assert!((0.02 - 1e-4..0.08 + 1e-4).contains(&r));
            assert!(offset.y >= 0.0);
            assert!((offset.y / r).acos() <= max_polar + 1e-3);
            assert!(p.velocity().y >= 0.0);
        }
    }

    #[test]
    fn expiry_boundary() {
        let mut config = BurstConfig::sparkle();
        config.lifetime = 1.5;
        let mut rng = ParticleRng::new(1);
        let burst = ParticleBurst::new(Vec3::ZERO, Color::WHITE, &config, 2.0, &mut rng).unwrap();

        assert!(!burst.is_expired(2.0));
        assert!(!burst.is_expired(3.5 - 1e-9));
        assert!(burst.is_expired(3.5));
        assert!(burst.is_expired(10.0));
    }

    #[test]
    fn opacity_fades_monotonically_to_zero() {
        let burst = sparkle_at(1.0);
        assert!((burst.opacity(1.0) - 1.0).abs() < 1e-6);
        let mut last = burst.opacity(1.0);
        for step in 1..=50 {
            let now = 1.0 + burst.lifetime() * step as f64 / 50.0;
            let o = burst.opacity(now);
            assert!(o <= last);
            last = o;
        }
        assert_eq!(burst.opacity(1.0 + burst.lifetime()), 0.0);
    }

    #[test]
    fn positions_follow_closed_form() {
        let burst = sparkle_at(0.0);
        let t = 0.5_f32;
        let gravity = BurstConfig::sparkle().gravity;
        for (p, pos) in burst.particles().iter().zip(burst.positions(0.5)) {
            let expected = burst.origin() + p.offset() + p.velocity() * t
                - Vec3::new(0.0, gravity * t * t, 0.0);
            assert!(pos.distance(&expected) < 1e-5);
        }
    }

    #[test]
    fn positions_are_pure_in_time() {
        let burst = sparkle_at(0.0);
        let before: Vec<_> = burst.positions(0.3).collect();
        let _later: Vec<_> = burst.positions(0.9).collect();
        let again: Vec<_> = burst.positions(0.3).collect();
        assert_eq!(before, again);
    }

    #[test]
    fn deterministic_with_injected_source() {
        let config = BurstConfig::sparkle();
        let mut a = SequenceRng::new(vec![0.1, 0.5, 0.9, 0.3]);
        let mut b = SequenceRng::new(vec![0.1, 0.5, 0.9, 0.3]);
        let x = ParticleBurst::new(Vec3::ZERO, Color::WHITE, &config, 0.0, &mut a).unwrap();
        let y = ParticleBurst::new(Vec3::ZERO, Color::WHITE, &config, 0.0, &mut b).unwrap();
        assert_eq!(x.particles(), y.particles());
        assert_ne!(x.id(), y.id());
    }

    #[test]
    fn firework_particles_form_a_spherical_shell() {
        let config = BurstConfig::firework();
        let mut rng = ParticleRng::new(9);
        let burst = ParticleBurst::new(Vec3::ZERO, Color::WHITE, &config, 0.0, &mut rng).unwrap();
        let mut below = 0;
        for p in burst.particles() {
            let speed = p.velocity().length();
            assert!((6.0 - 1e-3..=24.0 + 1e-3).contains(&speed));
            if p.velocity().y < 0.0 {
                below += 1;
            }
        }
        // full sphere: some particles head downward
        assert!(below > 0);
    }

    #[test]
    fn uniform_speed_keeps_velocity_along_the_offset() {
        let config = BurstConfig {
            uniform_speed: true,
            ..BurstConfig::sparkle()
        };
        let mut rng = ParticleRng::new(21);
        let burst = ParticleBurst::new(Vec3::ZERO, Color::WHITE, &config, 0.0, &mut rng).unwrap();
        for p in burst.particles() {
            let dir = p.offset().normalized();
            let v = p.velocity().normalized();
            assert!(dir.distance(&v) < 1e-3);
        }
    }

    #[test]
    fn rejects_degenerate_configs() {
        let mut rng = ParticleRng::new(3);
        let mut config = BurstConfig::firework();
        config.lifetime = 0.0;
        let err = ParticleBurst::new(Vec3::ZERO, Color::WHITE, &config, 0.0, &mut rng);
        assert!(matches!(err, Err(UtsavError::InvalidArgument(_))));

        config.lifetime = 1.0;
        config.count = 0;
        let err = ParticleBurst::new(Vec3::ZERO, Color::WHITE, &config, 0.0, &mut rng);
        assert!(matches!(err, Err(UtsavError::InvalidArgument(_))));
    }

    #[test]
    fn render_state_carries_opacity_and_points() {
        let burst = sparkle_at(0.0);
        match burst.render_state(0.55) {
            RenderState::Burst {
                opacity, points, ..
            } => {
                assert_eq!(points.len(), 64);
                assert!(opacity > 0.0 && opacity < 1.0);
            }
            other => panic!("expected burst state, got {other:?}"),
        }
    }
}
