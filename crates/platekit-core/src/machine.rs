//! Machine geometry model.
//!
//! Describes the parts of the printer that matter for placement: the bed
//! volume, the print head footprint, and the gantry bar. Constructed once
//! from configuration and read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Cuboid, Rectangle, Span};

/// Which horizontal axis the gantry bar runs parallel to.
///
/// A bar along X sweeps the bed by moving in Y, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GantryOrientation {
    #[serde(rename = "x")]
    AlongX,
    #[serde(rename = "y")]
    AlongY,
}

impl GantryOrientation {
    /// The axis the bar is parallel to. Candidate side offsets are
    /// searched along this axis.
    pub fn bar_axis(self) -> Axis {
        match self {
            GantryOrientation::AlongX => Axis::X,
            GantryOrientation::AlongY => Axis::Y,
        }
    }

    /// The axis the bar moves along while printing. The offset sweep
    /// scans this axis.
    pub fn travel_axis(self) -> Axis {
        self.bar_axis().perpendicular()
    }
}

impl std::fmt::Display for GantryOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GantryOrientation::AlongX => write!(f, "x"),
            GantryOrientation::AlongY => write!(f, "y"),
        }
    }
}

/// Static geometry of the machine, in bed coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineGeometry {
    /// The legal build volume. The min corner is normally the machine
    /// origin.
    pub printbed: Cuboid,
    /// Footprint of the print head as viewed from above, relative to the
    /// nozzle at (0, 0). May extend in all four directions.
    pub printhead: Rectangle,
    /// Footprint of the gantry bar as viewed from above. Spans the full
    /// bed extent on the bar axis; relative to the nozzle on the travel
    /// axis.
    pub gantry: Rectangle,
    pub gantry_orientation: GantryOrientation,
    /// Z coordinate below which the gantry can pass over a printed
    /// object. Anything taller blocks the bar's whole lane.
    pub gantry_height: f64,
    /// Minimum clearance kept between any two boxes, in mm.
    pub padding: f64,
}

/// Build the gantry footprint from its configured clearances.
///
/// `xy_min` and `xy_max` are the bar's extent behind and ahead of the
/// nozzle on the travel axis; on the bar axis the footprint covers the
/// whole bed.
pub fn gantry_from_clearances(
    printbed: &Cuboid,
    xy_min: f64,
    xy_max: f64,
    orientation: GantryOrientation,
) -> Rectangle {
    use crate::geometry::Bounds2d;

    let lane = printbed.range(orientation.bar_axis());
    let travel = Span::new(-xy_min, xy_max);
    match orientation {
        GantryOrientation::AlongX => Rectangle::from_spans(lane, travel),
        GantryOrientation::AlongY => Rectangle::from_spans(travel, lane),
    }
}
