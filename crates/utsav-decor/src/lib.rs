//! Utsav Decor - persistent decorations
//!
//! - `SymmetryPainter` — rangoli strokes: one click, N rotationally symmetric petals
//! - `LampRing` — the diya garden, a ring of lamps toggled on and off

pub mod config;
pub mod lamps;
pub mod painter;

pub use config::{LampConfig, RangoliConfig};
pub use lamps::{flame_intensity, flame_scale, Lamp, LampRing, LampToggle};
pub use painter::{PaintedMark, Stroke, SymmetryPainter};
