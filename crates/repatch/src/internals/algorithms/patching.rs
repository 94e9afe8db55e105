//! Patch gather and scatter.
//!
//! ## Purpose
//!
//! This module moves voxels between the padded volume frames and patch
//! batches: `gather_patches` extracts the input patches at a set of anchors
//! into a batch stacked on a new leading axis, and `scatter_patches` writes
//! a predicted batch back into the stitching accumulator at the same
//! anchors.
//!
//! ## Design notes
//!
//! * **Centered occupancy**: a patch of extent `e` at anchor `a` covers
//!   `[a - half_before(e), a + half_after(e))`; gather and scatter share one
//!   slice builder so the two frames can never disagree on it.
//! * **Center crop**: models may predict patches wider than the configured
//!   output extent (e.g. valid-convolution heads fed full input patches);
//!   the centered sub-patch is kept and the margin discarded.
//!
//! ## Invariants
//!
//! * Anchors come from the grid generator for the same plan and frame;
//!   gather performs no bounds checks of its own.
//! * Scatter validates the predicted batch shape before writing anything.
//! * Insert regions of distinct anchors in one repetition never overlap, so
//!   scatter order within a batch does not matter.
//!
//! ## Non-goals
//!
//! * This module does not blend repetitions (handled by
//!   `algorithms::blending`).

// External dependencies
use ndarray::{ArrayD, Axis, IxDyn, SliceInfoElem};
use num_traits::Float;

// Internal dependencies
use crate::internals::math::plan::{half_before, PatchPlan};
use crate::internals::primitives::errors::RepatchError;

fn full_slice(rank: usize) -> Vec<SliceInfoElem> {
    vec![
        SliceInfoElem::Slice {
            start: 0,
            end: None,
            step: 1,
        };
        rank
    ]
}

/// Centered occupancy of a patch: `[anchor - half_before, anchor + half_after)`
/// on the given axes, the full extent elsewhere.
pub fn centered_slice(
    rank: usize,
    axes: &[usize],
    extents: &[usize],
    anchor: &[usize],
) -> Vec<SliceInfoElem> {
    let mut info = full_slice(rank);
    for (i, &ax) in axes.iter().enumerate() {
        let start = anchor[i] - half_before(extents[i]);
        info[ax] = SliceInfoElem::Slice {
            start: start as isize,
            end: Some((start + extents[i]) as isize),
            step: 1,
        };
    }
    info
}

/// Shape of one gathered patch: patch extents on the patch axes, the source
/// frame's full extent elsewhere.
pub fn patch_shape(plan: &PatchPlan, frame_shape: &[usize]) -> Vec<usize> {
    let mut shape = frame_shape.to_vec();
    for (i, &ax) in plan.patch_axes.iter().enumerate() {
        shape[ax] = plan.input_extents[i];
    }
    shape
}

/// Extract the patches at `anchors` (a flat coordinate buffer) into a batch
/// stacked on a new leading axis.
pub fn gather_patches<T: Float>(
    frame: &ArrayD<T>,
    anchors: &[usize],
    plan: &PatchPlan,
) -> ArrayD<T> {
    let axes = plan.patch_axes.len();
    let count = anchors.len() / axes;

    let mut batch_shape = Vec::with_capacity(plan.rank + 1);
    batch_shape.push(count);
    batch_shape.extend(patch_shape(plan, frame.shape()));

    let mut batch = ArrayD::zeros(IxDyn(&batch_shape));
    for (b, anchor) in anchors.chunks_exact(axes).enumerate() {
        let info = centered_slice(plan.rank, &plan.patch_axes, &plan.input_extents, anchor);
        batch
            .index_axis_mut(Axis(0), b)
            .assign(&frame.slice(info.as_slice()));
    }
    batch
}

/// Write a predicted batch into the accumulator, centered at `anchors` on
/// the output axes.
///
/// The batch must keep its leading axis length and all non-output axis
/// extents; per output axis, predictions wider than the configured output
/// extent are center-cropped and narrower ones rejected.
pub fn scatter_patches<T: Float>(
    accumulator: &mut ArrayD<T>,
    predicted: &ArrayD<T>,
    anchors: &[usize],
    plan: &PatchPlan,
) -> Result<(), RepatchError> {
    let axes = plan.output_axes.len();
    let count = anchors.len() / axes;

    if predicted.ndim() != plan.rank + 1 {
        return Err(RepatchError::RankMismatch {
            context: "predicted batch",
            expected: plan.rank + 1,
            actual: predicted.ndim(),
        });
    }
    if predicted.shape()[0] != count {
        return Err(RepatchError::ShapeMismatch {
            context: "predicted batch size",
            expected: vec![count],
            actual: vec![predicted.shape()[0]],
        });
    }

    // Center crop per output axis, computed once per batch.
    let mut crop = full_slice(plan.rank);
    for (i, &ax) in plan.output_axes.iter().enumerate() {
        let produced = predicted.shape()[1 + ax];
        let target = plan.output_extents[i];
        if produced < target {
            return Err(RepatchError::ShapeMismatch {
                context: "predicted patch extent",
                expected: vec![target],
                actual: vec![produced],
            });
        }
        let margin = (produced - target) / 2;
        crop[ax] = SliceInfoElem::Slice {
            start: margin as isize,
            end: Some((margin + target) as isize),
            step: 1,
        };
    }
    for ax in 0..plan.rank {
        if plan.output_axes.contains(&ax) {
            continue;
        }
        if predicted.shape()[1 + ax] != accumulator.shape()[ax] {
            return Err(RepatchError::ShapeMismatch {
                context: "predicted patch",
                expected: accumulator.shape().to_vec(),
                actual: predicted.shape()[1..].to_vec(),
            });
        }
    }

    for (b, anchor) in anchors.chunks_exact(axes).enumerate() {
        let patch = predicted.index_axis(Axis(0), b);
        let cropped = patch.slice(crop.as_slice());
        let info = centered_slice(plan.rank, &plan.output_axes, &plan.output_extents, anchor);
        accumulator.slice_mut(info.as_slice()).assign(&cropped);
    }
    Ok(())
}
