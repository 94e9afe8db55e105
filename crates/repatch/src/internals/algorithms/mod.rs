//! Layer 3: Algorithms
//!
//! ## Purpose
//!
//! This layer provides the voxel-moving core of the reconstruction: gather
//! and scatter between volume frames and patch batches, the empty-patch
//! filter, and the running-average blend across overlap repetitions.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Running-average blending across overlap repetitions.
pub mod blending;

/// Empty-patch filtering.
pub mod emptiness;

/// Patch gather and scatter.
pub mod patching;
