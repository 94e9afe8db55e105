//! Internal module tree.
//!
//! ## Purpose
//!
//! This module organizes the crate into strict layers; each layer depends
//! only on the layers below it. External users normally go through
//! [`crate::prelude`], but every layer is public for integration work and
//! testing.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Layer 7: fluent builder API.
pub mod api;

/// Layer 6: model adapters.
pub mod adapters;

/// Layer 5: reconstruction engine.
pub mod engine;

/// Layer 4: prediction quality measures.
pub mod evaluation;

/// Layer 3: patch gather/scatter, filtering, and blending.
pub mod algorithms;

/// Layer 2: patch geometry.
pub mod math;

/// Layer 1: shared primitives.
pub mod primitives;
