//! Empty-patch filtering.
//!
//! ## Purpose
//!
//! This module drops anchors whose input patch is entirely zero. Volumes
//! with large background regions (typical for medical imaging) then skip
//! most model invocations; with models that map zero input to zero output,
//! the reconstruction is unchanged because skipped regions stay at the
//! accumulator's zero initialization.

// External dependencies
use ndarray::ArrayD;
use num_traits::Float;

// Internal dependencies
use crate::internals::algorithms::patching::centered_slice;
use crate::internals::math::plan::PatchPlan;
use crate::internals::primitives::corners::CornerSet;

/// Keep only the anchors whose input patch holds at least one non-zero
/// voxel. Anchor order is preserved.
pub fn retain_nonempty<T: Float>(
    frame: &ArrayD<T>,
    anchors: &CornerSet,
    plan: &PatchPlan,
) -> CornerSet {
    let mut kept = CornerSet::with_capacity(anchors.axes(), anchors.len());
    for anchor in anchors.iter() {
        let info = centered_slice(plan.rank, &plan.patch_axes, &plan.input_extents, anchor);
        let patch = frame.slice(info.as_slice());
        if patch.iter().any(|&v| v != T::zero()) {
            kept.push(anchor);
        }
    }
    kept
}
