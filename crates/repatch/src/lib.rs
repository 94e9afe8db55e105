//! Sliding-window patch reconstruction for volumetric model inference.
//!
//! `repatch` tiles a large N-dimensional volume into overlapping patches,
//! runs an opaque prediction model over them in batches, and stitches the
//! predicted patches back into a full-size output volume. It handles border
//! padding, shifted overlap grids with running-average blending, skipping of
//! all-background patches, and models whose output patches are narrower than
//! their input patches.
//!
//! # Example
//!
//! ```
//! use ndarray::Array4;
//! use repatch::prelude::*;
//!
//! // A single-channel 8x8x8 volume with one bright voxel.
//! let mut volume = Array4::<f64>::zeros((8, 8, 8, 1));
//! volume[[4, 4, 4, 0]] = 1.0;
//!
//! let engine = Repatch::new()
//!     .input_patch_shape(&[4, 4, 4, 1])
//!     .patch_dimensions(&[0, 1, 2])
//!     .build()?;
//!
//! // An identity model reproduces the volume exactly.
//! let result = engine.reconstruct(&volume, &IdentityModel)?;
//! assert_eq!(result.output.shape(), &[8, 8, 8, 1]);
//! assert_eq!(result.output[[4, 4, 4, 0]], 1.0);
//! # Ok::<(), RepatchError>(())
//! ```
//!
//! The crate is organized in strict layers; see [`internals`] for the module
//! tree and [`prelude`] for the flattened public surface.

/// Input volume abstractions.
pub mod input;

/// Layered implementation modules.
pub mod internals;

/// Flattened public surface.
pub mod prelude {
    pub use crate::input::{volume_from_parts, VolumeInput};
    pub use crate::internals::api::{
        dice_coefficient, threshold_binarize, ConstantModel, FnModel, IdentityModel, PatchModel,
        Repatch, RepatchBuilder, RepatchConfig, RepatchEngine, RepatchError, RepatchResult,
    };
}
