//! Traversal bookkeeping for the cycle-free walk.
//!
//! This module defines the compound identity type and the `PathTracker` that tells open
//! ancestors apart from compounds visited earlier elsewhere.

/// Defines the `CompoundId` type.
pub mod id;
/// Defines the `PathTracker` and `VisitedRegistry` structures.
pub mod tracker;

pub use id::CompoundId;
pub use tracker::{PathTracker, Resolution, VisitedRegistry};
