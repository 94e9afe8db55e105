//! Layer 6: Adapters
//!
//! ## Purpose
//!
//! This layer provides the model adapters: the trait the engine invokes for
//! batch prediction and the closure/stub implementations used for wiring and
//! testing.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
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

/// Model trait and built-in adapters.
pub mod model;
