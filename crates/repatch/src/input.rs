//! Input abstractions for patch reconstruction.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction for input volumes, allowing
//! the `reconstruct` method to accept any `ndarray` container of any rank
//! (owned arrays, views, shared arrays) through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: inputs are viewed, not copied; the engine
//!   copies only when it pads.
//! * **Rank erasure**: fixed-rank arrays are converted to dynamic rank once
//!   at the boundary, so the engine code handles one array type.
//!
//! ## Invariants
//!
//! * The returned view covers the whole container; no reshaping happens
//!   here.
//!
//! ## Non-goals
//!
//! * This module does not read volumes from disk; callers own I/O and
//!   format decoding.

// External dependencies
use ndarray::{ArrayBase, ArrayD, ArrayViewD, Data, Dimension, IxDyn};
use num_traits::Float;

// Internal dependencies
use crate::internals::primitives::errors::RepatchError;

/// Trait for types that can be used as input volumes.
pub trait VolumeInput<T: Float> {
    /// View the container as a dynamic-rank volume.
    fn as_volume_view(&self) -> Result<ArrayViewD<'_, T>, RepatchError>;
}

impl<T: Float, S, D> VolumeInput<T> for ArrayBase<S, D>
where
    S: Data<Elem = T>,
    D: Dimension,
{
    fn as_volume_view(&self) -> Result<ArrayViewD<'_, T>, RepatchError> {
        Ok(self.view().into_dyn())
    }
}

/// Build an owned volume from a shape and a flat row-major buffer.
pub fn volume_from_parts<T: Float>(
    shape: &[usize],
    data: Vec<T>,
) -> Result<ArrayD<T>, RepatchError> {
    ArrayD::from_shape_vec(IxDyn(shape), data).map_err(|e| {
        RepatchError::InvalidInput(format!("volume buffer does not match shape: {}", e))
    })
}
