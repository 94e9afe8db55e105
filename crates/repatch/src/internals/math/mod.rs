//! Layer 2: Math
//!
//! ## Purpose
//!
//! This layer provides the patch geometry: resolving a configuration against
//! a concrete volume shape, generating anchor grids for each overlap
//! repetition, and the zero-pad/trim pair that keeps border patches
//! full-sized.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Anchor grid generation per overlap repetition.
pub mod grid;

/// Zero padding and exact trimming.
pub mod padding;

/// Patch geometry resolution and validation.
pub mod plan;
