//! Anchor grid generation.
//!
//! ## Purpose
//!
//! This module generates the anchor grid for one overlap repetition: per
//! patch axis, the valid anchor positions; across axes, their row-major
//! cartesian product. The grid is materialized as an explicit
//! [`CornerSet`] so the emptiness filter and the batcher can slice it
//! without re-deriving geometry.
//!
//! ## Key concepts
//!
//! * **Validity band**: an anchor is valid when the whole input patch fits,
//!   `anchor - half_before >= 0` and `anchor + half_after <= frame extent`.
//!   Both bounds are inclusive on the anchor.
//! * **Repetition offsets**: repetition `k` shifts the band start by an
//!   integer-linspace offset in `[0, extent - 1]`, producing staggered grids
//!   whose averages smooth patch seams.
//!
//! ## Invariants
//!
//! * Anchor order is row-major over the patch axes (last axis fastest) and
//!   deterministic for a fixed plan, frame, and repetition.
//! * Frames too small to fit a single patch yield an empty grid, not an
//!   error.

// Internal dependencies
use crate::internals::math::plan::{half_after, half_before, PatchPlan};
use crate::internals::primitives::corners::CornerSet;

/// Grid shift per repetition: an integer linspace over `[0, extent - 1]`.
///
/// A single repetition gets offset 0; with more, the first offset is 0 and
/// the last is `extent - 1`.
pub fn repetition_offsets(extent: usize, overlaps: usize) -> Vec<usize> {
    debug_assert!(extent > 0 && overlaps > 0);
    if overlaps == 1 {
        return vec![0];
    }
    (0..overlaps)
        .map(|k| k * (extent - 1) / (overlaps - 1))
        .collect()
}

/// Generate the anchor grid for one repetition over a frame shape.
///
/// Per patch axis, anchors start at `half_before(extent) + offset` and
/// advance by the plan's stride while the patch still fits. The result is
/// their row-major cartesian product.
pub fn corner_grid(plan: &PatchPlan, frame_shape: &[usize], repetition: usize) -> CornerSet {
    let axes = plan.patch_axes.len();
    let mut per_axis: Vec<Vec<usize>> = Vec::with_capacity(axes);

    for (i, &ax) in plan.patch_axes.iter().enumerate() {
        let extent = plan.input_extents[i];
        let offset = repetition_offsets(extent, plan.overlaps)[repetition];
        let frame = frame_shape[ax];
        let first = half_before(extent) + offset;
        let tail = half_after(extent);

        let mut anchors = Vec::new();
        if frame >= tail {
            let last = frame - tail;
            let mut anchor = first;
            while anchor <= last {
                anchors.push(anchor);
                anchor += plan.strides[i];
            }
        }
        per_axis.push(anchors);
    }

    let total: usize = per_axis.iter().map(|a| a.len()).product();
    let mut grid = CornerSet::with_capacity(axes, total);
    if total == 0 {
        return grid;
    }

    // Row-major odometer over the per-axis anchor lists.
    let mut cursor = vec![0usize; axes];
    let mut anchor = vec![0usize; axes];
    for _ in 0..total {
        for i in 0..axes {
            anchor[i] = per_axis[i][cursor[i]];
        }
        grid.push(&anchor);
        for i in (0..axes).rev() {
            cursor[i] += 1;
            if cursor[i] < per_axis[i].len() {
                break;
            }
            cursor[i] = 0;
        }
    }
    grid
}
