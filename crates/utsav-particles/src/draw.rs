//! Packs live bursts into one instance buffer for instanced point drawing

use crate::burst::ParticleBurst;
use crate::config::ParticleBlendMode;
use bytemuck::{Pod, Zeroable};
use utsav_core::EntityId;

/// GPU instance data, laid out to match the WGSL `ParticleInstance` struct
/// 32 bytes (2 rows of vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    /// World position + point size packed into vec4
    pub pos_size: [f32; 4], // xyz = position, w = size
    /// Burst color with alpha already multiplied by the fade
    pub color: [f32; 4], // rgba
}

/// Draw data for one burst, consumed by the renderer
pub struct ParticleDrawData<'a> {
    pub entity_id: EntityId,
    pub instances: &'a [ParticleInstance],
    pub blend_mode: ParticleBlendMode,
}

/// Reusable packing buffer; call [`DrawBatcher::pack`] once per frame after the tick
#[derive(Default)]
pub struct DrawBatcher {
    instance_buffer: Vec<ParticleInstance>,
    /// Per-burst instance ranges: (entity_id, start, count, blend_mode)
    instance_ranges: Vec<(EntityId, usize, usize, ParticleBlendMode)>,
}

impl DrawBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pack every burst's derived particle positions at animation time `now`
    pub fn pack(&mut self, bursts: &[ParticleBurst], now: f64) {
        self.instance_buffer.clear();
        self.instance_ranges.clear();

        for burst in bursts {
            let count = burst.particles().len();
            if count == 0 {
                continue;
            }
            let color = burst.color().with_opacity(burst.opacity(now)).to_array();
            let size = burst.point_size();
            let start = self.instance_buffer.len();
            self.instance_buffer
                .extend(burst.positions(now).map(|p| ParticleInstance {
                    pos_size: [p.x, p.y, p.z, size],
                    color,
                }));
            self.instance_ranges
                .push((burst.id(), start, count, burst.blend_mode()));
        }
    }

    /// Get the packed instance data
    pub fn instance_data(&self) -> &[ParticleInstance] {
        &self.instance_buffer
    }

    /// Raw bytes ready for a vertex buffer upload
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instance_buffer)
    }

    /// Iterate draw data for each packed burst
    pub fn draw_data(&self) -> Vec<ParticleDrawData<'_>> {
        self.instance_ranges
            .iter()
            .map(|(entity_id, start, count, blend_mode)| ParticleDrawData {
                entity_id: *entity_id,
                instances: &self.instance_buffer[*start..*start + *count],
                blend_mode: *blend_mode,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BurstConfig;
    use crate::rand::ParticleRng;
    use utsav_core::{Color, Vec3};

    #[test]
    fn particle_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
        assert_eq!(std::mem::align_of::<ParticleInstance>(), 4);
    }

    #[test]
    fn pack_produces_one_range_per_burst() {
        let mut rng = ParticleRng::new(8);
        let sparkle = ParticleBurst::new(
            Vec3::ZERO,
            Color::from_hex(0xff66aa),
            &BurstConfig::sparkle(),
            0.0,
            &mut rng,
        )
        .unwrap();
        let firework = ParticleBurst::new(
            Vec3::new(0.0, 5.0, 0.0),
            Color::WHITE,
            &BurstConfig::firework(),
            0.0,
            &mut rng,
        )
        .unwrap();

        let mut batcher = DrawBatcher::new();
        batcher.pack(&[sparkle, firework], 0.5);

        assert_eq!(batcher.instance_data().len(), 64 + 220);
        assert_eq!(batcher.instance_bytes().len(), (64 + 220) * 32);

        let draws = batcher.draw_data();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].instances.len(), 64);
        assert_eq!(draws[0].blend_mode, ParticleBlendMode::Additive);
        assert_eq!(draws[1].instances.len(), 220);
        assert_eq!(draws[1].blend_mode, ParticleBlendMode::Alpha);
        // 0.5 s into a 4.5 s linear fade
        assert!((draws[1].instances[0].color[3] - (1.0 - 0.5 / 4.5)).abs() < 1e-5);
    }

    #[test]
    fn repacking_replaces_previous_frame() {
        let mut rng = ParticleRng::new(8);
        let burst = ParticleBurst::new(
            Vec3::ZERO,
            Color::WHITE,
            &BurstConfig::sparkle(),
            0.0,
            &mut rng,
        )
        .unwrap();
        let mut batcher = DrawBatcher::new();
        batcher.pack(std::slice::from_ref(&burst), 0.1);
        batcher.pack(&[], 0.2);
        assert!(batcher.instance_data().is_empty());
        assert!(batcher.draw_data().is_empty());
    }
}
