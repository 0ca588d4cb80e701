//! Runtime system trait

use crate::clock::TimeSource;
use crate::event_bus::EventBus;
use utsav_core::Result;

/// A system that is ticked by the frame loop
///
/// Systems are updated in registration order, once per displayed frame, from
/// the single thread that owns the scene.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame with the frame clock
    fn update(&mut self, clock: &dyn TimeSource, events: &mut EventBus) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
