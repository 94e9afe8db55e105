//! Running-average overlap blending.
//!
//! ## Purpose
//!
//! This module folds one repetition's accumulator into the running output
//! volume. The incremental form keeps memory flat in the number of
//! repetitions while matching the arithmetic mean of all accumulators seen
//! so far.
//!
//! ## Invariants
//!
//! * After folding `n` accumulators the running volume equals their
//!   elementwise arithmetic mean, up to float rounding of the incremental
//!   update.

// External dependencies
use ndarray::{ArrayD, Zip};
use num_traits::Float;

/// Fold `accumulator` into `running`, which holds the mean of `completed`
/// accumulators already.
pub fn blend_running_mean<T: Float>(
    running: &mut ArrayD<T>,
    accumulator: &ArrayD<T>,
    completed: usize,
) {
    debug_assert_eq!(running.shape(), accumulator.shape());
    let weight = T::one() / T::from(completed + 1).unwrap();
    Zip::from(running)
        .and(accumulator)
        .for_each(|r, &a| *r = *r + weight * (a - *r));
}
