//! # PlateKit
//!
//! Collision-aware print bed placement for continuous 3D printing.
//! Decides whether a queued job can be printed while finished prints
//! still occupy the bed, and searches for a placement offset when the
//! sliced position collides with them.
//!
//! The workspace splits into three crates, re-exported here:
//! [`platekit_core`] (box geometry and the machine model),
//! [`platekit_collision`] (the placement engine), and
//! [`platekit_settings`] (configuration). The [`policy`] module ties the
//! user's queue settings to the engine.

pub mod policy;

pub use platekit_collision::{condense_ranges, BedPlanner};
pub use platekit_core::{
    Axis, Bounds2d, Cuboid, Error, GantryOrientation, JobDimensions, JobError, MachineGeometry,
    Rectangle, Result, Span,
};
pub use platekit_settings::{Config, MachineSettings, MaterialCondition, QueueSettings};

pub use policy::{Availability, PlacementPolicy};
