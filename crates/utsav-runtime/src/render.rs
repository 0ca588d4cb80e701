//! Seam between the effect core and the external renderer
//!
//! The core never draws anything itself. Entity registries announce every
//! insertion and removal to a [`RenderSink`], keyed by [`EntityId`], and expose
//! their live entities as [`Visual`]s whose [`RenderState`] is derived on demand.

use std::collections::BTreeMap;
use utsav_core::{Color, EntityId, Vec3};

/// Which kind of primitive the renderer should allocate for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    /// Trail + point light following the rocket
    Rocket,
    /// Point cloud with a fixed particle count
    Burst { particles: usize },
    /// Emissive cone lying on the rangoli canvas
    Petal,
}

/// Render-ready state derived from an entity at a given time
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    Rocket {
        position: Vec3,
    },
    Burst {
        origin: Vec3,
        color: Color,
        opacity: f32,
        /// World-space particle positions
        points: Vec<Vec3>,
    },
    Petal {
        position: Vec3,
        /// Yaw around the vertical axis, in radians
        rotation: f32,
        color: Color,
    },
}

/// The closed set of drawable scene entities
pub trait Visual {
    fn id(&self) -> EntityId;

    fn kind(&self) -> VisualKind;

    /// Derive what the renderer should show at animation time `now`
    fn render_state(&self, now: f64) -> RenderState;
}

/// Registers and releases renderer primitives.
///
/// Each id is inserted once and removed at most once; the registries
/// guarantee this so renderer resources are never released twice.
pub trait RenderSink {
    fn insert(&mut self, id: EntityId, kind: VisualKind);

    fn remove(&mut self, id: EntityId);
}

/// Sink that discards everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn insert(&mut self, _id: EntityId, _kind: VisualKind) {}

    fn remove(&mut self, _id: EntityId) {}
}

/// One call made against a [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkOp {
    Insert(EntityId, VisualKind),
    Remove(EntityId),
}

/// Sink that keeps the live primitive set and a log of every call
#[derive(Debug, Default)]
pub struct RecordingSink {
    live: BTreeMap<EntityId, VisualKind>,
    ops: Vec<SinkOp>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> &BTreeMap<EntityId, VisualKind> {
        &self.live
    }

    pub fn ops(&self) -> &[SinkOp] {
        &self.ops
    }

    pub fn is_live(&self, id: EntityId) -> bool {
        self.live.contains_key(&id)
    }

    /// How many times `id` was removed
    pub fn removals(&self, id: EntityId) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SinkOp::Remove(removed) if *removed == id))
            .count()
    }

    /// Number of live primitives of a kind, ignoring burst sizes
    pub fn live_count(&self, matches: impl Fn(&VisualKind) -> bool) -> usize {
        self.live.values().filter(|k| matches(k)).count()
    }
}

impl RenderSink for RecordingSink {
    fn insert(&mut self, id: EntityId, kind: VisualKind) {
        if self.live.insert(id, kind).is_some() {
            log::warn!("render primitive {id} registered twice");
        }
        self.ops.push(SinkOp::Insert(id, kind));
    }

    fn remove(&mut self, id: EntityId) {
        if self.live.remove(&id).is_none() {
            log::warn!("render primitive {id} released but was not live");
        }
        self.ops.push(SinkOp::Remove(id));
    }
}
