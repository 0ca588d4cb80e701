//! Resolved pointer interactions handed to the scene controller

use utsav_core::Vec3;

/// An input action with its point of interaction already resolved by the
/// windowing/picking layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A launch pad was clicked
    LaunchPad { index: usize },
    /// The rangoli canvas was clicked at `point` (canvas center is the origin)
    CanvasClick { point: Vec3 },
    /// Remove the most recent stroke
    Undo,
    /// Wipe the rangoli canvas
    Clear,
    /// A diya was clicked
    LampClick { index: usize },
}
