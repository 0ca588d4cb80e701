//! Rangoli painting: rotationally symmetric petal strokes with undo
//!
//! A click at point `p` is decomposed around the canvas center into
//! `radius = |p|` and `base = atan2(p.z, p.x)`. A stroke of order N places one
//! petal at each angle `base + i * 2π/N`, all in one color, and is undone as a
//! unit.

use log::debug;
use std::f32::consts::TAU;
use utsav_core::{Color, EntityId, Result, UtsavError, Vec3};
use utsav_particles::RandomSource;
use utsav_runtime::{NullSink, RenderSink, RenderState, Visual, VisualKind};

/// One petal on the canvas; immutable once painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintedMark {
    id: EntityId,
    position: Vec3,
    rotation: f32,
    color: Color,
}

impl PaintedMark {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw in radians, equal to the petal's polar angle
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Visual for PaintedMark {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> VisualKind {
        VisualKind::Petal
    }

    fn render_state(&self, _now: f64) -> RenderState {
        RenderState::Petal {
            position: self.position,
            rotation: self.rotation,
            color: self.color,
        }
    }
}

/// The petals created by a single click
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Sequence number, counting every stroke ever painted
    pub number: usize,
    pub color: Color,
    pub marks: Vec<PaintedMark>,
}

/// Append-only stroke history with undo-by-stroke
pub struct SymmetryPainter<S: RenderSink = NullSink> {
    strokes: Vec<Stroke>,
    mark_height: f32,
    painted: usize,
    sink: S,
}

impl<S: RenderSink> SymmetryPainter<S> {
    pub fn new(mark_height: f32, sink: S) -> Self {
        Self {
            strokes: Vec::new(),
            mark_height,
            painted: 0,
            sink,
        }
    }

    /// Paint a stroke of `symmetry` petals around the canvas center.
    ///
    /// Rejects `symmetry == 0`, an empty palette, and non-finite points with
    /// `InvalidArgument`; the history is untouched in that case.
    pub fn paint(
        &mut self,
        point: Vec3,
        symmetry: u32,
        palette: &[Color],
        rng: &mut impl RandomSource,
    ) -> Result<&Stroke> {
        if symmetry == 0 {
            return Err(UtsavError::invalid(
                "symmetry order must be at least 1, got 0",
            ));
        }
        if !(point.x.is_finite() && point.z.is_finite()) {
            return Err(UtsavError::invalid(format!(
                "paint point must be finite, got {point:?}"
            )));
        }
        let Some(&color) = rng.pick(palette) else {
            return Err(UtsavError::invalid("palette must not be empty"));
        };

        let radius = point.planar_length();
        let base_angle = point.z.atan2(point.x);
        let step = TAU / symmetry as f32;

        let marks: Vec<PaintedMark> = (0..symmetry)
            .map(|i| {
                let angle = base_angle + i as f32 * step;
                PaintedMark {
                    id: EntityId::new(),
                    position: Vec3::new(
                        angle.cos() * radius,
                        self.mark_height,
                        angle.sin() * radius,
                    ),
                    rotation: angle,
                    color,
                }
            })
            .collect();

        for mark in &marks {
            self.sink.insert(mark.id, VisualKind::Petal);
        }

        self.painted += 1;
        debug!(
            "stroke {} painted: {} petals at r={radius:.2}",
            self.painted,
            marks.len()
        );
        self.strokes.push(Stroke {
            number: self.painted,
            color,
            marks,
        });
        Ok(&self.strokes[self.strokes.len() - 1])
    }

    /// Remove the most recent stroke; `None` if there is nothing to undo
    pub fn undo(&mut self) -> Option<Stroke> {
        let stroke = self.strokes.pop()?;
        for mark in &stroke.marks {
            self.sink.remove(mark.id);
        }
        debug!("stroke {} undone", stroke.number);
        Some(stroke)
    }

    /// Remove every stroke, returning how many petals were wiped
    pub fn clear(&mut self) -> usize {
        let mut wiped = 0;
        for stroke in self.strokes.drain(..) {
            for mark in &stroke.marks {
                self.sink.remove(mark.id);
            }
            wiped += stroke.marks.len();
        }
        debug!("canvas cleared: {wiped} petals");
        wiped
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// All petals in painting order
    pub fn marks(&self) -> impl Iterator<Item = &PaintedMark> + '_ {
        self.strokes.iter().flat_map(|s| s.marks.iter())
    }

    pub fn mark_count(&self) -> usize {
        self.strokes.iter().map(|s| s.marks.len()).sum()
    }

    pub fn visuals(&self) -> impl Iterator<Item = &dyn Visual> + '_ {
        self.marks().map(|m| m as &dyn Visual)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
