//! Model adapters.
//!
//! ## Purpose
//!
//! This module defines the prediction capability injected into the
//! reconstruction engine: a batch of input patches in, a batch of predicted
//! patches out. Inference backends (ONNX sessions, Torch modules, remote
//! services) live behind this trait; the engine never learns which one it is
//! talking to.
//!
//! ## Design notes
//!
//! * **Composition over inheritance**: the engine holds a `&impl PatchModel`
//!   for the duration of one case; there is no registry and no downcasting.
//! * **Batch axis**: patches arrive stacked on a new leading axis and must
//!   come back the same way, with the leading length preserved.
//! * **Error propagation**: a failed prediction aborts the whole case; the
//!   engine performs no retries.
//!
//! ## Non-goals
//!
//! * This module does not load weights or manage inference sessions.

// External dependencies
use ndarray::ArrayD;
use num_traits::Float;

// Internal dependencies
use crate::internals::primitives::errors::RepatchError;

/// Opaque patch prediction capability.
///
/// Implementations must preserve the leading batch axis and be deterministic
/// for fixed weights.
pub trait PatchModel<T: Float> {
    /// Predict a batch of output patches from a batch of input patches.
    fn predict(&self, batch: ArrayD<T>) -> Result<ArrayD<T>, RepatchError>;
}

/// Model backed by a plain closure.
pub struct FnModel<F> {
    predict: F,
}

impl<F> FnModel<F> {
    /// Wrap a closure as a model.
    pub fn new(predict: F) -> Self {
        Self { predict }
    }
}

impl<T, F> PatchModel<T> for FnModel<F>
where
    T: Float,
    F: Fn(ArrayD<T>) -> Result<ArrayD<T>, RepatchError>,
{
    fn predict(&self, batch: ArrayD<T>) -> Result<ArrayD<T>, RepatchError> {
        (self.predict)(batch)
    }
}

/// Stub model returning its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityModel;

impl<T: Float> PatchModel<T> for IdentityModel {
    fn predict(&self, batch: ArrayD<T>) -> Result<ArrayD<T>, RepatchError> {
        Ok(batch)
    }
}

/// Stub model filling every predicted patch with a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct ConstantModel<T> {
    value: T,
}

impl<T: Float> ConstantModel<T> {
    /// Create a model predicting `value` everywhere.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Float> PatchModel<T> for ConstantModel<T> {
    fn predict(&self, batch: ArrayD<T>) -> Result<ArrayD<T>, RepatchError> {
        let value = self.value;
        Ok(batch.mapv(|_| value))
    }
}
