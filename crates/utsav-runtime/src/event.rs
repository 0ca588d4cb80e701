//! Game events published by the effect core

use serde::Serialize;
use utsav_core::{EntityId, Vec3};

/// Something noteworthy that happened during a frame.
///
/// Consumers (sound cues, UI overlays, logs) drain these from the [`EventBus`](crate::EventBus).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    RocketLaunched { id: EntityId, position: Vec3 },
    /// A rocket reached its apex; this is the crackle cue
    RocketExploded {
        id: EntityId,
        position: Vec3,
        burst: EntityId,
    },
    BurstSpawned { id: EntityId, origin: Vec3 },
    BurstExpired { id: EntityId },
    StrokePainted { stroke: usize, marks: usize },
    StrokeUndone { stroke: usize, marks: usize },
    CanvasCleared { marks: usize },
    LampToggled { index: usize, lit: bool },
    AllLampsLit,
    /// An input action was refused (bad pad index, invalid symmetry, ...)
    InputRejected { reason: String },
}
