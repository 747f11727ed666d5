//! Print job dimensions.
//!
//! Slicers record the printed object's bounding box in the G-code
//! metadata, but any of the six values may be missing. Conversion to a
//! [`Cuboid`] fails with a domain error before the placement engine is
//! ever called, so the engine itself only sees well-formed boxes.

use serde::{Deserialize, Serialize};

use crate::error::JobError;
use crate::geometry::Cuboid;

/// Object bounding box as reported by G-code metadata.
///
/// Field names follow the metadata keys (`MinX` .. `MaxZ`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobDimensions {
    pub min_x: Option<f64>,
    pub min_y: Option<f64>,
    pub min_z: Option<f64>,
    pub max_x: Option<f64>,
    pub max_y: Option<f64>,
    pub max_z: Option<f64>,
}

impl JobDimensions {
    /// Parse dimensions out of a JSON metadata blob. Unknown keys are
    /// ignored; known keys may still be absent or null.
    pub fn from_metadata_json(metadata: &str) -> Result<Self, JobError> {
        Ok(serde_json::from_str(metadata)?)
    }

    /// The space the object occupies, as a normalized box.
    pub fn to_cuboid(&self) -> Result<Cuboid, JobError> {
        let field = |value: Option<f64>, name: &'static str| {
            value.ok_or(JobError::MissingDimension { field: name })
        };
        Ok(Cuboid::new(
            field(self.min_x, "MinX")?,
            field(self.min_y, "MinY")?,
            field(self.min_z, "MinZ")?,
            field(self.max_x, "MaxX")?,
            field(self.max_y, "MaxY")?,
            field(self.max_z, "MaxZ")?,
        ))
    }
}

impl From<Cuboid> for JobDimensions {
    fn from(cuboid: Cuboid) -> Self {
        JobDimensions {
            min_x: Some(cuboid.x),
            min_y: Some(cuboid.y),
            min_z: Some(cuboid.z),
            max_x: Some(cuboid.max_x),
            max_y: Some(cuboid.max_y),
            max_z: Some(cuboid.max_z),
        }
    }
}
