//! Prediction quality utilities.
//!
//! ## Purpose
//!
//! This module provides the two post-reconstruction utilities commonly
//! needed for segmentation-style outputs: thresholding a soft prediction
//! into a binary mask, and scoring a mask against a reference with the Dice
//! coefficient.

// External dependencies
use ndarray::ArrayD;
use num_traits::Float;

// Internal dependencies
use crate::internals::primitives::errors::RepatchError;

/// Binarize a volume: values strictly greater than `threshold` become one,
/// everything else zero.
pub fn threshold_binarize<T: Float>(volume: &ArrayD<T>, threshold: T) -> ArrayD<T> {
    volume.mapv(|v| if v > threshold { T::one() } else { T::zero() })
}

/// Dice coefficient between the non-zero masks of two equally shaped
/// volumes: `2 |A ∩ B| / (|A| + |B|)`.
///
/// Two empty masks score 1.
pub fn dice_coefficient<T: Float>(a: &ArrayD<T>, b: &ArrayD<T>) -> Result<T, RepatchError> {
    if a.shape() != b.shape() {
        return Err(RepatchError::ShapeMismatch {
            context: "dice operands",
            expected: a.shape().to_vec(),
            actual: b.shape().to_vec(),
        });
    }

    let mut intersection = 0usize;
    let mut members = 0usize;
    for (&va, &vb) in a.iter().zip(b.iter()) {
        let in_a = va != T::zero();
        let in_b = vb != T::zero();
        members += usize::from(in_a) + usize::from(in_b);
        if in_a && in_b {
            intersection += 1;
        }
    }

    if members == 0 {
        return Ok(T::one());
    }
    Ok(T::from(2 * intersection).unwrap() / T::from(members).unwrap())
}
