//! Anchor coordinate storage.
//!
//! ## Purpose
//!
//! This module stores the anchor (patch center) coordinates of one grid
//! repetition as a flat row-major buffer with a per-anchor coordinate count,
//! so batches can be carved out of it as plain slices without allocating
//! per-patch vectors.

/// Flat, row-major list of patch anchor coordinates.
///
/// Each anchor occupies `axes` consecutive values, one per patch axis, in
/// patch axis order. Anchor order is the generation order of the grid and is
/// never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CornerSet {
    coords: Vec<usize>,
    axes: usize,
}

impl CornerSet {
    /// Create an empty set for anchors of `axes` coordinates each.
    pub fn new(axes: usize) -> Self {
        debug_assert!(axes > 0, "anchors need at least one patch axis");
        Self {
            coords: Vec::new(),
            axes,
        }
    }

    /// Create an empty set with room for `anchors` anchors.
    pub fn with_capacity(axes: usize, anchors: usize) -> Self {
        debug_assert!(axes > 0, "anchors need at least one patch axis");
        Self {
            coords: Vec::with_capacity(axes * anchors),
            axes,
        }
    }

    /// Append one anchor.
    pub fn push(&mut self, anchor: &[usize]) {
        debug_assert_eq!(anchor.len(), self.axes);
        self.coords.extend_from_slice(anchor);
    }

    /// Number of coordinates per anchor.
    pub fn axes(&self) -> usize {
        self.axes
    }

    /// Number of anchors in the set.
    pub fn len(&self) -> usize {
        self.coords.len() / self.axes
    }

    /// Whether the set holds no anchors.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Iterate over anchors as coordinate slices.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.coords.chunks_exact(self.axes)
    }

    /// The whole set as one flat coordinate buffer (row-major).
    pub fn as_flat(&self) -> &[usize] {
        &self.coords
    }
}
