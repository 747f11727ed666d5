//! Error types for PlateKit core.
//!
//! The geometry and placement math itself is total and never fails;
//! errors only arise at the edges, when converting externally supplied
//! job metadata into boxes.

use thiserror::Error;

/// Errors raised while turning print job metadata into geometry.
#[derive(Error, Debug)]
pub enum JobError {
    /// The slicer metadata does not contain one of the six bounding box
    /// values.
    #[error("missing print dimension '{field}' in G-code metadata")]
    MissingDimension {
        /// The metadata key that was absent.
        field: &'static str,
    },

    /// The metadata blob could not be parsed at all.
    #[error("invalid G-code metadata: {0}")]
    InvalidMetadata(#[from] serde_json::Error),
}

/// Main error type for PlateKit.
#[derive(Error, Debug)]
pub enum Error {
    /// Print job metadata error
    #[error(transparent)]
    Job(#[from] JobError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_error_display() {
        let err = JobError::MissingDimension { field: "MaxZ" };
        assert_eq!(
            err.to_string(),
            "missing print dimension 'MaxZ' in G-code metadata"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = JobError::MissingDimension { field: "MinX" }.into();
        assert!(matches!(err, Error::Job(_)));
    }
}
