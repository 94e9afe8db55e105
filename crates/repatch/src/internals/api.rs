//! High-level API for patch reconstruction.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for patch
//! reconstruction. It implements a fluent builder pattern for configuring
//! patch geometry, overlap averaging, and batching, and produces an
//! immutable [`RepatchEngine`].
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters
//!   except the input patch shape.
//! * **Validated**: Parameter combinations are checked when `.build()` is
//!   called; volume-dependent checks run at reconstruction time.
//! * **Immutable**: The built engine never changes; one engine serves any
//!   number of cases.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`RepatchBuilder`] via `Repatch::new()`.
//! 2. Chain configuration methods (`.input_patch_shape()`,
//!    `.patch_overlaps()`, etc.).
//! 3. Call `.build()` to validate and obtain a [`RepatchEngine`].
//! 4. Call `.reconstruct(&volume, &model)` per case.

// Publicly re-exported types
pub use crate::input::VolumeInput;
pub use crate::internals::adapters::model::{ConstantModel, FnModel, IdentityModel, PatchModel};
pub use crate::internals::engine::executor::{RepatchConfig, RepatchEngine};
pub use crate::internals::engine::output::RepatchResult;
pub use crate::internals::evaluation::dice::{dice_coefficient, threshold_binarize};
pub use crate::internals::primitives::errors::RepatchError;

// ============================================================================
// Entry Point
// ============================================================================

/// Entry point for configuring a reconstruction engine.
#[derive(Debug, Clone, Copy)]
pub struct Repatch;

impl Repatch {
    /// Create a new reconstruction builder with default parameters.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> RepatchBuilder {
        RepatchBuilder::default()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for the patch reconstruction engine.
#[derive(Debug, Clone)]
pub struct RepatchBuilder {
    input_patch_shape: Option<Vec<usize>>,
    output_patch_shape: Option<Vec<usize>>,
    patch_dimensions: Vec<isize>,
    output_patch_dimensions: Option<Vec<isize>>,
    patch_overlaps: usize,
    pad_borders: bool,
    check_empty_patch: bool,
    batch_size: usize,
}

impl Default for RepatchBuilder {
    /// Create a new reconstruction builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * patch_dimensions: `[-4, -3, -2]` (spatial axes of a channels-last
    ///   volume)
    /// * output_patch_shape: the input patch shape
    /// * output_patch_dimensions: the input patch dimensions
    /// * patch_overlaps: 1
    /// * pad_borders: true
    /// * check_empty_patch: true
    /// * batch_size: 32
    fn default() -> Self {
        Self {
            input_patch_shape: None,
            output_patch_shape: None,
            patch_dimensions: vec![-4, -3, -2],
            output_patch_dimensions: None,
            patch_overlaps: 1,
            pad_borders: true,
            check_empty_patch: true,
            batch_size: 32,
        }
    }
}

impl RepatchBuilder {
    /// Set the full-rank shape of the patches fed to the model (required).
    pub fn input_patch_shape(mut self, shape: &[usize]) -> Self {
        self.input_patch_shape = Some(shape.to_vec());
        self
    }

    /// Set the full-rank shape of the patches the model predicts.
    pub fn output_patch_shape(mut self, shape: &[usize]) -> Self {
        self.output_patch_shape = Some(shape.to_vec());
        self
    }

    /// Set the tiled axes of the input volume (negative indices count from
    /// the end).
    pub fn patch_dimensions(mut self, axes: &[isize]) -> Self {
        self.patch_dimensions = axes.to_vec();
        self
    }

    /// Set the tiled axes of the output volume.
    pub fn output_patch_dimensions(mut self, axes: &[isize]) -> Self {
        self.output_patch_dimensions = Some(axes.to_vec());
        self
    }

    /// Set the number of shifted grid repetitions to average.
    pub fn patch_overlaps(mut self, overlaps: usize) -> Self {
        self.patch_overlaps = overlaps;
        self
    }

    /// Set whether volume borders are zero-padded.
    pub fn pad_borders(mut self, enabled: bool) -> Self {
        self.pad_borders = enabled;
        self
    }

    /// Set whether all-zero patches are skipped.
    pub fn check_empty_patch(mut self, enabled: bool) -> Self {
        self.check_empty_patch = enabled;
        self
    }

    /// Set the number of patches per model invocation.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and build the engine.
    ///
    /// Checks everything that can be checked without a volume; axis
    /// resolution and extent compatibility run per case at reconstruction
    /// time.
    pub fn build(self) -> Result<RepatchEngine, RepatchError> {
        let input_patch_shape = self.input_patch_shape.ok_or_else(|| {
            RepatchError::InvalidConfig("input_patch_shape is required".to_string())
        })?;
        if input_patch_shape.is_empty() {
            return Err(RepatchError::InvalidConfig(
                "input_patch_shape must not be empty".to_string(),
            ));
        }

        let output_patch_shape = self
            .output_patch_shape
            .unwrap_or_else(|| input_patch_shape.clone());
        if output_patch_shape.len() != input_patch_shape.len() {
            return Err(RepatchError::InvalidConfig(format!(
                "output_patch_shape rank {} does not match input_patch_shape rank {}",
                output_patch_shape.len(),
                input_patch_shape.len()
            )));
        }

        if self.patch_dimensions.is_empty() {
            return Err(RepatchError::InvalidConfig(
                "patch_dimensions must not be empty".to_string(),
            ));
        }
        let output_patch_dimensions = self
            .output_patch_dimensions
            .unwrap_or_else(|| self.patch_dimensions.clone());
        if output_patch_dimensions.len() != self.patch_dimensions.len() {
            return Err(RepatchError::InvalidConfig(format!(
                "patch_dimensions and output_patch_dimensions must have the same length, got {} and {}",
                self.patch_dimensions.len(),
                output_patch_dimensions.len()
            )));
        }

        if self.patch_overlaps == 0 {
            return Err(RepatchError::InvalidConfig(
                "patch_overlaps must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(RepatchError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }

        Ok(RepatchEngine::new(RepatchConfig {
            input_patch_shape,
            output_patch_shape,
            patch_dimensions: self.patch_dimensions,
            output_patch_dimensions,
            patch_overlaps: self.patch_overlaps,
            pad_borders: self.pad_borders,
            check_empty_patch: self.check_empty_patch,
            batch_size: self.batch_size,
        }))
    }
}
