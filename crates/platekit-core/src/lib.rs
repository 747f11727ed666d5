//! # PlateKit Core
//!
//! Core types for collision-aware print bed placement.
//! Provides the axis-aligned box primitives, the machine geometry model,
//! and the print-job dimension conversion used by the placement engine.

pub mod error;
pub mod geometry;
pub mod job;
pub mod machine;

pub use error::{Error, JobError, Result};
pub use geometry::{Axis, Bounds2d, Cuboid, Rectangle, Span};
pub use job::JobDimensions;
pub use machine::{GantryOrientation, MachineGeometry};
