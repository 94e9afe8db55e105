//! Error types for patch reconstruction.
//!
//! ## Purpose
//!
//! This module defines the single error enum shared by every layer of the
//! crate. Configuration and shape problems are detected during plan
//! resolution, before any prediction is submitted; model failures are carried
//! through unchanged.
//!
//! ## Key concepts
//!
//! * **Fail-fast**: a case either reconstructs completely or aborts with an
//!   error; a half-reconstructed volume is never returned.
//! * **No retries**: errors are not transient; the pipeline is a
//!   deterministic batch computation, not a service.

// External dependencies
use thiserror::Error;

/// Errors produced during configuration, planning, or reconstruction.
#[derive(Debug, Error)]
pub enum RepatchError {
    /// The input container could not be interpreted as a volume.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid combination of configured values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A patch axis index does not exist on the volume.
    #[error("axis {axis} is out of bounds for a volume of rank {rank}")]
    AxisOutOfBounds {
        /// The axis index as configured (possibly negative).
        axis: isize,
        /// Rank of the volume the axis was resolved against.
        rank: usize,
    },

    /// A shape has the wrong number of axes.
    #[error("{context} must have rank {expected}, got {actual}")]
    RankMismatch {
        /// What was being checked.
        context: &'static str,
        /// Required rank.
        expected: usize,
        /// Observed rank.
        actual: usize,
    },

    /// A shape disagrees with the expected extents.
    #[error("shape mismatch in {context}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// What was being checked.
        context: &'static str,
        /// Required extents.
        expected: Vec<usize>,
        /// Observed extents.
        actual: Vec<usize>,
    },

    /// The model adapter failed; the source is carried unchanged and the
    /// batch is never retried.
    #[error("model invocation failed: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepatchError {
    /// Wrap a model adapter failure.
    pub fn model(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RepatchError::Model(err.into())
    }
}
