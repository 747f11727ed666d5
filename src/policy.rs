//! Print queue placement policy.
//!
//! Bridges the user's queue settings and the placement engine: the host's
//! queue asks whether the next job may start, records each finished job,
//! and clears the bookkeeping when the bed is emptied. Hooking these
//! calls up to print events is the host's business; the material
//! compatibility condition is carried as a flag here and enforced by the
//! host as well.

use tracing::debug;

use platekit_collision::BedPlanner;
use platekit_core::{Cuboid, JobDimensions, Result};
use platekit_settings::{Config, QueueSettings};

/// Outcome of an availability check for a queued job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Availability {
    /// Whether the job may start now.
    pub available: bool,
    /// Offset to apply before printing. Zero unless a repositioning
    /// search was needed.
    pub offset: (f64, f64),
}

impl Availability {
    fn no() -> Self {
        Availability {
            available: false,
            offset: (0.0, 0.0),
        }
    }

    fn at(offset: (f64, f64)) -> Self {
        Availability {
            available: true,
            offset,
        }
    }
}

/// Decides whether queued jobs may start on the current bed.
#[derive(Debug, Clone)]
pub struct PlacementPolicy {
    queue: QueueSettings,
    planner: BedPlanner,
}

impl PlacementPolicy {
    pub fn new(config: &Config) -> Self {
        PlacementPolicy {
            queue: config.queue,
            planner: BedPlanner::new(config.machine.to_geometry()),
        }
    }

    pub fn planner(&self) -> &BedPlanner {
        &self.planner
    }

    pub fn queue_settings(&self) -> QueueSettings {
        self.queue
    }

    /// Replace the queue flags at runtime. Persisting them is the
    /// caller's job, via [`Config::save_to_file`].
    pub fn set_queue_settings(&mut self, queue: QueueSettings) {
        self.queue = queue;
    }

    /// Whether the job may start now, and at which offset.
    ///
    /// Without continuous printing the bed must be empty. With it, the
    /// job must print collision-free where it was sliced, or (if
    /// repositioning is enabled) wherever the offset search places it.
    pub fn check_available(&self, job: &JobDimensions) -> Result<Availability> {
        if !self.queue.continuous_printing {
            return Ok(Availability {
                available: self.planner.current_objects().is_empty(),
                offset: (0.0, 0.0),
            });
        }

        let cuboid = job.to_cuboid()?;
        if self.planner.printjob_collision(&cuboid) {
            return Ok(Availability::at((0.0, 0.0)));
        }
        if !self.queue.reposition {
            return Ok(Availability::no());
        }
        match self.planner.find_offset(&cuboid) {
            Some(offset) => {
                debug!(dx = offset.0, dy = offset.1, "job repositioned");
                Ok(Availability::at(offset))
            }
            None => Ok(Availability::no()),
        }
    }

    /// Whether the job would collide if started at its sliced position.
    pub fn job_collides(&self, job: &JobDimensions) -> Result<bool> {
        let cuboid = job.to_cuboid()?;
        Ok(!self.planner.printjob_collision(&cuboid))
    }

    /// Record a finished job as occupying the bed.
    pub fn add_printjob(&mut self, job: &JobDimensions) -> Result<()> {
        let cuboid = job.to_cuboid()?;
        self.add_printed_object(cuboid);
        Ok(())
    }

    /// Record an already-converted box as occupying the bed.
    pub fn add_printed_object(&mut self, object: Cuboid) {
        self.planner.add_printed_object(object);
    }

    /// Forget all tracked jobs after the bed has been emptied.
    pub fn clear_printjobs(&mut self) {
        self.planner.clear_objects();
    }
}
