//! Patch geometry resolution.
//!
//! ## Purpose
//!
//! This module turns a reconstruction configuration plus a concrete volume
//! shape into a fully resolved [`PatchPlan`]: which axes are tiled, the patch
//! extents on those axes, the grid strides, the padding widths for the input
//! and output frames, and the accumulator shape. Everything downstream (grid
//! generation, gather/scatter, padding) reads geometry exclusively from the
//! plan.
//!
//! ## Design notes
//!
//! * **Fail-fast**: every configuration and shape problem is detected here,
//!   before a single patch is extracted or predicted.
//! * **Halving rule**: a patch of extent `e` covers
//!   `[anchor - e/2, anchor + (e - e/2))`, so odd extents place the extra
//!   voxel after the anchor. [`half_before`] and [`half_after`] are the only
//!   place this rounding is written down.
//! * **Negative axes**: axis indices count from the end when negative, so
//!   the same configuration works across volume ranks that share trailing
//!   layout (e.g. `[-4, -3, -2]` for channels-last volumes).
//!
//! ## Key concepts
//!
//! * **Patch axes**: the axes of the volume that are tiled. Non-patch axes
//!   (batch, channel) ride along whole.
//! * **Strides**: anchor spacing per patch axis, equal to the output patch
//!   extent on that axis so inserted regions tile without overlap.
//! * **Frames**: the padded input frame and the padded output frame share
//!   anchor coordinates; padding widths per axis pair are identical.
//!
//! ## Invariants
//!
//! * Output patch extents never exceed their paired input extents.
//! * Every anchor valid in the input frame has an in-bounds insert region in
//!   the output frame.
//!
//! ## Non-goals
//!
//! * This module does not generate anchors (handled by `math::grid`).

// Internal dependencies
use crate::internals::primitives::errors::RepatchError;

// ============================================================================
// Halving Rule
// ============================================================================

/// Patch coverage before the anchor: `floor(extent / 2)`.
#[inline]
pub fn half_before(extent: usize) -> usize {
    extent / 2
}

/// Patch coverage from the anchor on: `ceil(extent / 2)`.
#[inline]
pub fn half_after(extent: usize) -> usize {
    extent - extent / 2
}

// ============================================================================
// Axis Resolution
// ============================================================================

/// Resolve a possibly negative axis index against a volume rank.
pub fn resolve_axis(axis: isize, rank: usize) -> Result<usize, RepatchError> {
    let resolved = if axis < 0 { axis + rank as isize } else { axis };
    if resolved < 0 || resolved >= rank as isize {
        return Err(RepatchError::AxisOutOfBounds { axis, rank });
    }
    Ok(resolved as usize)
}

fn resolve_axes(axes: &[isize], rank: usize) -> Result<Vec<usize>, RepatchError> {
    let mut resolved = Vec::with_capacity(axes.len());
    for &axis in axes {
        let ax = resolve_axis(axis, rank)?;
        if resolved.contains(&ax) {
            return Err(RepatchError::InvalidConfig(format!(
                "patch axes must be distinct, axis {} resolves to {} which is already tiled",
                axis, ax
            )));
        }
        resolved.push(ax);
    }
    Ok(resolved)
}

// ============================================================================
// Patch Plan
// ============================================================================

/// Resolved patch geometry for one volume shape.
///
/// All axis indices are resolved to non-negative positions and all extents
/// are validated; downstream layers may index with them without re-checking.
#[derive(Debug, Clone)]
pub struct PatchPlan {
    /// Rank of the volume.
    pub rank: usize,
    /// Resolved tiled axes of the input volume, in configuration order.
    pub patch_axes: Vec<usize>,
    /// Resolved tiled axes of the output volume, paired with `patch_axes`.
    pub output_axes: Vec<usize>,
    /// Input patch extent per patch axis.
    pub input_extents: Vec<usize>,
    /// Output patch extent per output axis.
    pub output_extents: Vec<usize>,
    /// Anchor spacing per patch axis.
    pub strides: Vec<usize>,
    /// (before, after) zero-padding widths per input volume axis.
    pub input_pad: Vec<(usize, usize)>,
    /// (before, after) trim widths per output volume axis.
    pub output_pad: Vec<(usize, usize)>,
    /// Shape of the stitching accumulator (padded output frame).
    pub accumulator_shape: Vec<usize>,
    /// Number of shifted grid repetitions to average.
    pub overlaps: usize,
    /// Patches per model invocation.
    pub batch_size: usize,
    /// Whether the volume borders are zero-padded.
    pub pad_borders: bool,
    /// Whether all-background patches are skipped.
    pub check_empty_patch: bool,
}

impl PatchPlan {
    /// Resolve a configuration against a concrete volume shape.
    ///
    /// Checks axis bounds, shape ranks, and extent compatibility; any
    /// problem aborts the case before prediction starts.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        volume_shape: &[usize],
        input_patch_shape: &[usize],
        output_patch_shape: &[usize],
        patch_axes: &[isize],
        output_patch_axes: &[isize],
        patch_overlaps: usize,
        batch_size: usize,
        pad_borders: bool,
        check_empty_patch: bool,
    ) -> Result<Self, RepatchError> {
        let rank = volume_shape.len();

        if patch_axes.is_empty() {
            return Err(RepatchError::InvalidConfig(
                "at least one patch axis is required".to_string(),
            ));
        }
        if patch_axes.len() != output_patch_axes.len() {
            return Err(RepatchError::InvalidConfig(format!(
                "patch_dimensions and output_patch_dimensions must have the same length, got {} and {}",
                patch_axes.len(),
                output_patch_axes.len()
            )));
        }
        if patch_overlaps == 0 {
            return Err(RepatchError::InvalidConfig(
                "patch_overlaps must be at least 1".to_string(),
            ));
        }
        if batch_size == 0 {
            return Err(RepatchError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if input_patch_shape.len() != rank {
            return Err(RepatchError::RankMismatch {
                context: "input patch shape",
                expected: rank,
                actual: input_patch_shape.len(),
            });
        }
        if output_patch_shape.len() != rank {
            return Err(RepatchError::RankMismatch {
                context: "output patch shape",
                expected: rank,
                actual: output_patch_shape.len(),
            });
        }

        let axes = resolve_axes(patch_axes, rank)?;
        let output_axes = resolve_axes(output_patch_axes, rank)?;

        let mut input_extents = Vec::with_capacity(axes.len());
        let mut strides = Vec::with_capacity(axes.len());
        for &ax in &axes {
            let extent = input_patch_shape[ax];
            if extent == 0 {
                return Err(RepatchError::InvalidConfig(format!(
                    "input patch extent on axis {} must be at least 1",
                    ax
                )));
            }
            input_extents.push(extent);
            // Anchors advance by the output extent on the paired axis so
            // inserted regions tile the output frame without overlap.
            let stride = output_patch_shape[ax];
            if stride == 0 {
                return Err(RepatchError::InvalidConfig(format!(
                    "output patch extent on axis {} must be at least 1",
                    ax
                )));
            }
            strides.push(stride);
        }

        let mut output_extents = Vec::with_capacity(output_axes.len());
        for &ax in &output_axes {
            let extent = output_patch_shape[ax];
            if extent == 0 {
                return Err(RepatchError::InvalidConfig(format!(
                    "output patch extent on axis {} must be at least 1",
                    ax
                )));
            }
            output_extents.push(extent);
        }

        for (i, (&ie, &oe)) in input_extents.iter().zip(&output_extents).enumerate() {
            if oe > ie {
                return Err(RepatchError::InvalidConfig(format!(
                    "output patch extent {} exceeds input patch extent {} on patch axis pair {}",
                    oe, ie, i
                )));
            }
        }

        let mut input_pad = vec![(0, 0); rank];
        for (i, &ax) in axes.iter().enumerate() {
            let extent = input_extents[i];
            input_pad[ax] = (half_before(extent), half_after(extent));
        }

        // The output frame is padded by the paired input extent, not the
        // output extent: anchors carry over between frames unchanged, and the
        // insert region of any valid anchor then fits because the output
        // extent never exceeds the input extent.
        let mut output_pad = vec![(0, 0); rank];
        for (i, &ax) in output_axes.iter().enumerate() {
            let extent = input_extents[i];
            output_pad[ax] = (half_before(extent), half_after(extent));
        }

        let mut accumulator_shape = output_patch_shape.to_vec();
        for (i, &ax) in output_axes.iter().enumerate() {
            accumulator_shape[ax] = volume_shape[axes[i]];
        }
        if pad_borders {
            for (ax, &(before, after)) in output_pad.iter().enumerate() {
                accumulator_shape[ax] += before + after;
            }
        }

        Ok(PatchPlan {
            rank,
            patch_axes: axes,
            output_axes,
            input_extents,
            output_extents,
            strides,
            input_pad,
            output_pad,
            accumulator_shape,
            overlaps: patch_overlaps,
            batch_size,
            pad_borders,
            check_empty_patch,
        })
    }
}
