//! Zero padding and exact trimming.
//!
//! ## Purpose
//!
//! This module widens a volume with zeros so border patches stay full-sized,
//! and removes exactly those widths again after stitching. Padding and trim
//! take the same `(before, after)` widths per axis, so a pad followed by a
//! trim with the same widths is an exact round trip.

// External dependencies
use ndarray::{ArrayD, ArrayViewD, IxDyn, SliceInfoElem};
use num_traits::Float;

fn interior(shape: &[usize], pad: &[(usize, usize)]) -> Vec<SliceInfoElem> {
    shape
        .iter()
        .zip(pad)
        .map(|(&extent, &(before, after))| SliceInfoElem::Slice {
            start: before as isize,
            end: Some((extent - after) as isize),
            step: 1,
        })
        .collect()
}

/// Zero-pad a volume by `(before, after)` widths per axis.
pub fn pad_volume<T: Float>(volume: &ArrayViewD<'_, T>, pad: &[(usize, usize)]) -> ArrayD<T> {
    debug_assert_eq!(volume.ndim(), pad.len());
    let shape: Vec<usize> = volume
        .shape()
        .iter()
        .zip(pad)
        .map(|(&extent, &(before, after))| extent + before + after)
        .collect();
    let mut padded = ArrayD::zeros(IxDyn(&shape));
    let info = interior(&shape, pad);
    padded.slice_mut(info.as_slice()).assign(volume);
    padded
}

/// Remove the `(before, after)` widths added by [`pad_volume`].
///
/// `pad` must hold the widths the volume was padded with; widths larger than
/// the volume are a caller bug.
pub fn trim_volume<T: Float>(volume: &ArrayD<T>, pad: &[(usize, usize)]) -> ArrayD<T> {
    debug_assert_eq!(volume.ndim(), pad.len());
    let info = interior(volume.shape(), pad);
    volume.slice(info.as_slice()).to_owned()
}
