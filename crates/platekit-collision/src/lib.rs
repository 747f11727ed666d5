//! # PlateKit Collision
//!
//! The placement engine: decides whether a print job's bounding box can
//! be printed on a bed that still holds earlier prints, and searches for
//! a translation offset when it cannot. Collision tests account for the
//! moving parts of the machine (print head and gantry bar), not just the
//! object itself.

pub mod planner;
pub mod search;

pub use planner::BedPlanner;
pub use search::condense_ranges;
