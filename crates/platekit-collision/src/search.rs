//! Offset search.
//!
//! When a job collides at its sliced position, the planner looks for a
//! translation that clears everything on the bed. The search is a greedy
//! center-outward heuristic, not an exhaustive one: candidate offsets
//! along the axis parallel to the gantry come from the edges of existing
//! objects, and for each of them a sweep along the perpendicular axis
//! grows an exclusion offset until either nothing collides or the bed
//! runs out. A valid placement the ordering never visits is missed.

use tracing::{debug, trace};

use platekit_core::geometry::{Bounds2d, Cuboid, Rectangle, Span};

use crate::planner::BedPlanner;

/// Consolidate ranges so that none of them overlap or border each other.
///
/// Ranges whose gap is at most `min_space` are merged as well. The input
/// may be unsorted; the output is sorted, pairwise disjoint, and keeps
/// gaps larger than `min_space`.
pub fn condense_ranges(mut ranges: Vec<Span>, min_space: f64) -> Vec<Span> {
    if ranges.is_empty() {
        return ranges;
    }
    ranges.sort_by(|a, b| a.min.total_cmp(&b.min).then(a.max.total_cmp(&b.max)));

    let mut condensed: Vec<Span> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match condensed.last_mut() {
            Some(last) if range.min <= last.max + min_space => {
                if range.max > last.max {
                    last.max = range.max;
                }
            }
            _ => condensed.push(range),
        }
    }
    condensed
}

/// All boxes in `obstacles` that the target currently overlaps.
fn colliding_with<'a>(target: &Rectangle, obstacles: &'a [Rectangle]) -> Vec<&'a Rectangle> {
    obstacles
        .iter()
        .filter(|obstacle| target.collides_with(obstacle, 0.0))
        .collect()
}

impl BedPlanner {
    /// Search for an offset at which the object can be printed.
    ///
    /// Returns the `(dx, dy)` translation to apply to the job, `(0, 0)`
    /// if it already fits where it is, or `None` if no spot was found.
    /// The two failure causes (object larger than the bed, bed too
    /// crowded) are not distinguished.
    pub fn find_offset(&self, object: &Cuboid) -> Option<(f64, f64)> {
        if self.printjob_collision(object) {
            // Fits without any offset
            return Some((0.0, 0.0));
        }

        let bed = self.machine().printbed;
        if object.width() > bed.width()
            || object.height() > bed.height()
            || object.z_height() > bed.z_height()
        {
            debug!(
                width = object.width(),
                height = object.height(),
                z_height = object.z_height(),
                "object exceeds the build volume, no offset can help"
            );
            return None;
        }

        let mut object = *object;
        let mut footprint = object.projection();
        let mut centering = (0.0, 0.0);
        if !self.fits_in_printer(&object) {
            // Out of bed bounds, but small enough that centering fixes
            // the horizontal part.
            centering = self.get_centering_offset(&footprint);
            footprint = footprint.translate(centering.0, centering.1);
            object = object.translate(centering.0, centering.1, 0.0);
            if !self.fits_in_printer(&object) {
                // Still outside: the Z axis is the blocker.
                return None;
            }
        }

        if self.printjob_collision(&object) {
            // Only centering was needed
            return Some(centering);
        }

        let (head_sweep, _) = self.moving_parts(&footprint);
        // The actual area required to print the object, head and padding
        // included.
        let needed_space = head_sweep.grow(self.machine().padding);

        let gantry_blocked = self.get_gantry_collisions(Some(&footprint));
        let object_boxes: Vec<Rectangle> = self
            .current_objects()
            .iter()
            .map(|occupied| occupied.projection())
            .collect();
        let side_offsets = self.side_offsets(&footprint, &needed_space, &object_boxes);

        let offset =
            self.iterate_offsets(&footprint, &needed_space, &gantry_blocked, &object_boxes, &side_offsets);
        match offset {
            Some((dx, dy)) => Some((dx + centering.0, dy + centering.1)),
            None => {
                debug!("offset search exhausted all candidates");
                None
            }
        }
    }

    /// Candidate offsets along the axis parallel to the gantry, sorted
    /// from the middle out. Derived from the edges of existing objects;
    /// edges whose offset would push the object off the bed are skipped,
    /// and zero is always tried first. Upper edges below the starting
    /// space are skipped too: the opposing edge is always closer.
    fn side_offsets(
        &self,
        object: &Rectangle,
        space: &Rectangle,
        boxes: &[Rectangle],
    ) -> Vec<f64> {
        let axis = self.machine().gantry_orientation.bar_axis();
        let object_span = object.range(axis);
        let space_span = space.range(axis);
        let printer = self.machine().printbed.range(axis);

        let mut offsets = vec![0.0];
        for occupied in boxes {
            let span = occupied.range(axis);
            if span.max > space_span.min {
                let offset = span.max - space_span.min;
                if object_span.max + offset <= printer.max {
                    offsets.push(offset);
                }
            }
            if span.min < space_span.max {
                let offset = span.min - space_span.max;
                if object_span.min + offset >= printer.min {
                    offsets.push(offset);
                }
            }
        }
        // Middle-out order; on equal magnitude the positive direction is
        // tried first.
        offsets.sort_by(|a, b| a.abs().total_cmp(&b.abs()).then(b.total_cmp(a)));
        offsets.dedup();
        offsets
    }

    /// Run the sweep once per candidate side offset; the first success
    /// wins.
    fn iterate_offsets(
        &self,
        object: &Rectangle,
        needed_space: &Rectangle,
        gantry_blocked: &[Rectangle],
        objects: &[Rectangle],
        side_offsets: &[f64],
    ) -> Option<(f64, f64)> {
        let side_axis = self.machine().gantry_orientation.bar_axis();
        for &side in side_offsets {
            let (dx, dy) = side_axis.offset(side);
            trace!(side, "sweeping at side offset");
            if let Some((sx, sy)) = self.sweep(
                &object.translate(dx, dy),
                &needed_space.translate(dx, dy),
                gantry_blocked,
                objects,
            ) {
                return Some((sx + dx, sy + dy));
            }
        }
        None
    }

    /// The innermost search: scan along the axis perpendicular to the
    /// gantry, each round growing the offset just enough to clear every
    /// obstacle collided with so far. The exclusion zone only ever grows,
    /// so the offset is monotone on each side; iteration ends at the
    /// first collision-free position or once both directions would leave
    /// the bed.
    fn sweep(
        &self,
        object: &Rectangle,
        space: &Rectangle,
        gantry_blocked: &[Rectangle],
        objects: &[Rectangle],
    ) -> Option<(f64, f64)> {
        let axis = self.machine().gantry_orientation.travel_axis();
        let printer = self.machine().printbed.range(axis);
        let head = self.machine().printhead.range(axis);
        let padding = self.machine().padding;
        let space_span = space.range(axis);
        let object_span = object.range(axis);

        // Where to move the space's upper edge down to, and its lower
        // edge up to, to clear everything seen so far.
        let mut next_min_pos = space_span.max;
        let mut next_max_pos = space_span.min;
        let mut offset = 0.0;

        let mut colliding = colliding_with(space, objects);
        let mut gantry_colliding = colliding_with(object, gantry_blocked);
        while !colliding.is_empty() || !gantry_colliding.is_empty() {
            for obstacle in &colliding {
                let span = obstacle.range(axis);
                if span.min < next_min_pos {
                    next_min_pos = span.min;
                }
                if span.max > next_max_pos {
                    next_max_pos = span.max;
                }
            }
            for stripe in &gantry_colliding {
                let span = stripe.range(axis);
                // Stripes are compared against the object's edges, not
                // the needed space's; shift them over before mixing.
                let min = span.min + head.max + padding;
                let max = span.max + head.min - padding;
                if min < next_min_pos {
                    next_min_pos = min;
                }
                if max > next_max_pos {
                    next_max_pos = max;
                }
            }

            let neg_offset = next_min_pos - space_span.max;
            let pos_offset = next_max_pos - space_span.min;
            let reached_end_min = object_span.min + neg_offset < printer.min;
            let reached_end_max = object_span.max + pos_offset > printer.max;
            if (pos_offset <= -neg_offset || reached_end_min) && !reached_end_max {
                offset = pos_offset;
            } else if !reached_end_min {
                offset = neg_offset;
            } else {
                // Reached both ends without success
                return None;
            }

            let (dx, dy) = axis.offset(offset);
            colliding = colliding_with(&space.translate(dx, dy), objects);
            gantry_colliding = colliding_with(&object.translate(dx, dy), gantry_blocked);
        }

        Some(axis.offset(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platekit_core::machine::{
        gantry_from_clearances, GantryOrientation, MachineGeometry,
    };

    fn spans(pairs: &[(f64, f64)]) -> Vec<Span> {
        pairs.iter().map(|&(min, max)| Span::new(min, max)).collect()
    }

    #[test]
    fn test_condense_ranges() {
        let uncondensed = spans(&[
            (-2.0, 0.0),
            (-1.0, 0.0),
            (4.0, 10.0),
            (5.0, 8.0),
            (9.0, 12.0),
            (13.0, 18.0),
        ]);
        assert_eq!(
            condense_ranges(uncondensed.clone(), 0.0),
            spans(&[(-2.0, 0.0), (4.0, 12.0), (13.0, 18.0)])
        );
        assert_eq!(
            condense_ranges(uncondensed, 1.0),
            spans(&[(-2.0, 0.0), (4.0, 18.0)])
        );
    }

    #[test]
    fn test_condense_ranges_is_order_independent() {
        let expected = spans(&[(-2.0, 0.0), (4.0, 12.0), (13.0, 18.0)]);
        let base = [
            (-2.0, 0.0),
            (-1.0, 0.0),
            (4.0, 10.0),
            (5.0, 8.0),
            (9.0, 12.0),
            (13.0, 18.0),
        ];
        // A few permutations stand in for a full shuffle.
        let orders: [[usize; 6]; 4] = [
            [5, 4, 3, 2, 1, 0],
            [2, 5, 0, 3, 1, 4],
            [4, 0, 5, 1, 3, 2],
            [1, 3, 5, 0, 2, 4],
        ];
        for order in orders {
            let shuffled: Vec<Span> =
                order.iter().map(|&i| Span::new(base[i].0, base[i].1)).collect();
            assert_eq!(condense_ranges(shuffled, 0.0), expected);
        }
    }

    #[test]
    fn test_condense_ranges_is_idempotent() {
        let once = condense_ranges(
            spans(&[(4.0, 10.0), (-2.0, 0.0), (9.0, 12.0), (13.0, 18.0)]),
            2.0,
        );
        let twice = condense_ranges(once.clone(), 2.0);
        assert_eq!(once, twice);
        // Output is sorted and keeps gaps larger than min_space.
        for pair in once.windows(2) {
            assert!(pair[1].min > pair[0].max + 2.0);
        }
    }

    #[test]
    fn test_condense_ranges_trivial_inputs() {
        assert_eq!(condense_ranges(Vec::new(), 0.0), Vec::new());
        assert_eq!(
            condense_ranges(spans(&[(5.0, 10.0)]), 0.0),
            spans(&[(5.0, 10.0)])
        );
    }

    /// The reference machine used throughout the scenario tests: 500 mm
    /// by 1000 mm bed, an asymmetric print head, and a 60.5 mm wide
    /// gantry bar that clears objects below 84 mm.
    fn planner(orientation: GantryOrientation) -> BedPlanner {
        let printbed = Cuboid::new(0.0, 0.0, 0.0, 500.0, 1000.0, 500.0);
        let machine = MachineGeometry {
            printbed,
            printhead: Rectangle::new(-80.0, -49.9, 26.0, 72.0),
            gantry: gantry_from_clearances(&printbed, 28.5, 32.0, orientation),
            gantry_orientation: orientation,
            gantry_height: 84.0,
            padding: 5.0,
        };
        BedPlanner::new(machine)
    }

    #[test]
    fn test_side_offsets_against_object_edges() {
        let cy = planner(GantryOrientation::AlongY);
        let cx = planner(GantryOrientation::AlongX);
        let objects = [
            Rectangle::new(0.0, 0.0, 10.0, 10.0),
            // Too far out to keep the object on the bed
            Rectangle::new(100.0, 100.0, 150.0, 180.0),
            Rectangle::new(120.0, 150.0, 150.0, 200.0),
            Rectangle::new(170.0, 430.0, 330.0, 570.0),
            Rectangle::new(310.0, 560.0, 400.0, 650.0),
            Rectangle::new(410.0, 700.0, 490.0, 900.0),
        ];

        // Object constructed in the bed center
        let object = Rectangle::new(235.0, 454.9, 319.0, 523.0);
        let (head_sweep, _) = cy.moving_parts(&object);
        let space = head_sweep.grow(cy.machine().padding);
        assert_eq!(space, Rectangle::new(150.0, 400.0, 350.0, 600.0));

        // Middle-out order, positive first on equal magnitude.
        assert_eq!(
            cx.side_offsets(&object, &space, &objects),
            vec![0.0, -40.0, 180.0, -180.0, -230.0]
        );
        assert_eq!(
            cy.side_offsets(&object, &space, &objects),
            vec![0.0, -40.0, 170.0, -170.0, 250.0, -450.0]
        );
    }

    #[test]
    fn test_side_offsets_deduplicates_shared_edges() {
        let cy = planner(GantryOrientation::AlongY);
        let object = Rectangle::new(235.0, 454.9, 319.0, 523.0);
        let (head_sweep, _) = cy.moving_parts(&object);
        let space = head_sweep.grow(cy.machine().padding);
        // Two objects sharing the same upper edge produce one candidate.
        let objects = [
            Rectangle::new(0.0, 600.0, 100.0, 700.0),
            Rectangle::new(200.0, 650.0, 300.0, 700.0),
        ];
        let offsets = cy.side_offsets(&object, &space, &objects);
        assert_eq!(offsets, vec![0.0, 300.0]);
    }
}
