//! Layer 4: Evaluation
//!
//! ## Purpose
//!
//! This layer provides quality measures for reconstructed volumes:
//! thresholding soft predictions into binary masks and Dice scoring against
//! a reference mask.
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Mask binarization and Dice scoring.
pub mod dice;
