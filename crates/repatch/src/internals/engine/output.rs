//! Reconstruction output.

// External dependencies
use ndarray::ArrayD;

/// A reconstructed volume together with run counters.
#[derive(Debug, Clone)]
pub struct RepatchResult<T> {
    /// The reconstructed volume, trimmed back to the input extents on the
    /// patch axes.
    pub output: ArrayD<T>,
    /// Number of overlap repetitions blended into the output.
    pub repetitions: usize,
    /// Patches submitted to the model across all repetitions.
    pub patches_predicted: usize,
    /// Anchors dropped by the empty-patch filter across all repetitions.
    pub patches_skipped: usize,
    /// Model invocations across all repetitions.
    pub batches: usize,
}
