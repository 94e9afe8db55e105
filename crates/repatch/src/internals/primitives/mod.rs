//! Layer 1: Primitives
//!
//! ## Purpose
//!
//! This layer provides the shared building blocks of the crate: the error
//! enum used everywhere and the flat anchor coordinate container the grid
//! and batching layers operate on.
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
//! Layer 1: Primitives ← You are here
//! ```

/// Flat anchor coordinate storage.
pub mod corners;

/// Error types shared across all layers.
pub mod errors;
