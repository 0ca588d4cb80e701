//! Utsav Runtime - Frame loop infrastructure
//!
//! Provides the building blocks the effect core is driven by:
//! - `GameClock` / `TimeSource` — monotonic elapsed time and per-frame delta
//! - `GameEvent` / `EventBus` — typed event queue for explosions, strokes, lamps
//! - `InputEvent` — resolved pointer interactions (launch pads, canvas, lamps)
//! - `RenderSink` / `Visual` — the seam to the external renderer
//! - `RuntimeSystem` — trait for systems ticked once per frame

mod clock;
mod event;
mod event_bus;
mod input;
mod render;
mod system;

pub use clock::{GameClock, TimeSource};
pub use event::GameEvent;
pub use event_bus::EventBus;
pub use input::InputEvent;
pub use render::{NullSink, RecordingSink, RenderSink, RenderState, SinkOp, Visual, VisualKind};
pub use system::RuntimeSystem;
