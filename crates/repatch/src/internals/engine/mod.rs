//! Layer 5: Engine
//!
//! ## Purpose
//!
//! This layer provides the reconstruction driver: the state machine that
//! pads, tiles, batches, predicts, stitches, blends, and trims one case at a
//! time, and the result type it returns.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Reconstruction driver and configuration.
pub mod executor;

/// Reconstruction result type.
pub mod output;
