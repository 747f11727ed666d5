//! Bed state and collision testing.

use platekit_core::geometry::{Bounds2d, Cuboid, Rectangle, Span};
use platekit_core::machine::{GantryOrientation, MachineGeometry};

use crate::search::condense_ranges;

/// The placement engine.
///
/// Owns the machine's static geometry and the list of objects currently
/// occupying the bed. The list grows by [`add_printed_object`] after each
/// finished job and is only emptied wholesale by [`clear_objects`] when
/// the bed is physically cleared; cloning the planner deep-copies it, so
/// clones never share state.
///
/// [`add_printed_object`]: BedPlanner::add_printed_object
/// [`clear_objects`]: BedPlanner::clear_objects
#[derive(Debug, Clone)]
pub struct BedPlanner {
    machine: MachineGeometry,
    current_objects: Vec<Cuboid>,
}

impl BedPlanner {
    pub fn new(machine: MachineGeometry) -> Self {
        BedPlanner {
            machine,
            current_objects: Vec::new(),
        }
    }

    pub fn machine(&self) -> &MachineGeometry {
        &self.machine
    }

    /// Objects currently occupying the bed, in insertion order.
    pub fn current_objects(&self) -> &[Cuboid] {
        &self.current_objects
    }

    /// Record an object, like a finished print job, to be considered in
    /// future placement decisions. The caller is trusted to supply a box
    /// already known to fit.
    pub fn add_printed_object(&mut self, object: Cuboid) {
        self.current_objects.push(object);
    }

    /// Forget all tracked objects after the bed has been emptied.
    pub fn clear_objects(&mut self) {
        self.current_objects.clear();
    }

    /// Collision boxes for the machine's moving parts when printing the
    /// given object.
    ///
    /// The head sweep is the full horizontal area the print head can
    /// occupy while printing any point of the object. The gantry sweep is
    /// the volume the bar can occupy: its footprint swept across the
    /// object's extent on the travel axis, from the gantry height all the
    /// way up, since the rail spans the machine's full height above that
    /// threshold.
    pub fn moving_parts(&self, object: &dyn Bounds2d) -> (Rectangle, Cuboid) {
        let head = &self.machine.printhead;
        let head_sweep = Rectangle::new(
            object.x() + head.x,
            object.y() + head.y,
            object.max_x() + head.max_x,
            object.max_y() + head.max_y,
        );

        let gantry = &self.machine.gantry;
        let gantry_sweep = match self.machine.gantry_orientation {
            GantryOrientation::AlongX => Cuboid::new(
                gantry.x,
                object.y() + gantry.y,
                self.machine.gantry_height,
                gantry.max_x,
                object.max_y() + gantry.max_y,
                f64::INFINITY,
            ),
            GantryOrientation::AlongY => Cuboid::new(
                object.x() + gantry.x,
                gantry.y,
                self.machine.gantry_height,
                object.max_x() + gantry.max_x,
                gantry.max_y,
                f64::INFINITY,
            ),
        };
        (head_sweep, gantry_sweep)
    }

    /// Whether the object lies fully inside the build volume (not merely
    /// overlapping it).
    pub fn fits_in_printer(&self, object: &Cuboid) -> bool {
        self.machine.printbed.intersection(object) == *object
    }

    /// Whether this object can be printed without collisions.
    ///
    /// True only if the object is inside the bed and no occupied object
    /// comes within padding of the candidate's volume, of the head sweep
    /// (against the occupied object's footprint), or of the gantry sweep.
    pub fn printjob_collision(&self, object: &Cuboid) -> bool {
        if !self.fits_in_printer(object) {
            return false;
        }

        let (head_sweep, gantry_sweep) = self.moving_parts(object);
        let padding = self.machine.padding;
        self.current_objects.iter().all(|occupied| {
            !object.collides_with(occupied, padding)
                && !head_sweep.collides_with(&occupied.projection(), padding)
                && !gantry_sweep.collides_with(occupied, padding)
        })
    }

    /// The offset that centers the object on the bed's horizontal extent.
    pub fn get_centering_offset(&self, object: &dyn Bounds2d) -> (f64, f64) {
        let bed = &self.machine.printbed;
        (
            bed.width() / 2.0 - object.width() / 2.0 - object.x(),
            bed.height() / 2.0 - object.height() / 2.0 - object.y(),
        )
    }

    /// Stripes across the gantry's travel axis that the bar can never
    /// enter while objects taller than the gantry height stand on the
    /// bed. Each stripe is widened by the bar footprint and the padding
    /// margin; overlapping or bordering stripes are merged.
    ///
    /// With a `size_hint` (the candidate's own footprint), stripes closer
    /// together than the hint's extent on the travel axis are merged too:
    /// no object of that size could fit between them anyway.
    pub fn get_gantry_collisions(&self, size_hint: Option<&dyn Bounds2d>) -> Vec<Rectangle> {
        let travel = self.machine.gantry_orientation.travel_axis();
        let min_space = size_hint.map_or(0.0, |object| object.range(travel).length());

        let gantry = self.machine.gantry.range(travel);
        let padding = self.machine.padding;
        let mut ranges = Vec::new();
        for occupied in &self.current_objects {
            if occupied.max_z + padding > self.machine.gantry_height {
                let span = occupied.range(travel);
                // The bar approaches from either side, so pad the lower
                // edge with the bar's leading extent and the upper edge
                // with its trailing extent.
                ranges.push(Span::new(
                    span.min - gantry.max - padding,
                    span.max - gantry.min + padding,
                ));
            }
        }

        let lane = self
            .machine
            .gantry
            .range(self.machine.gantry_orientation.bar_axis());
        condense_ranges(ranges, min_space)
            .into_iter()
            .map(|range| match self.machine.gantry_orientation {
                GantryOrientation::AlongX => Rectangle::from_spans(lane, range),
                GantryOrientation::AlongY => Rectangle::from_spans(range, lane),
            })
            .collect()
    }
}
