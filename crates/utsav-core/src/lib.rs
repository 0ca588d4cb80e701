//! Utsav Core - Foundational types for the festival scene
//!
//! This crate provides the core types that all other Utsav crates depend on:
//! - `EntityId` - Unique identifiers for rockets, bursts, and painted marks
//! - `Vec3`, `Color` - Spatial and color types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{Result, UtsavError};
pub use id::EntityId;
pub use types::{Color, Vec3};
