//! Crate-level scenario tests.
//!
//! These tests drive whole flows through the [`Dispatcher`](crate::dispatch::Dispatcher)
//! rather than calling modules directly:
//! - **Integration tests**: walking, gathering, fighting, banking and trading
//! - **Determinism tests**: same seed and inputs give identical states
//! - **Property tests**: inventory and pathfinding invariants under random input
//!
//! # Test Structure
//!
//! - `integration.rs`: End-to-end flows on small hand-built worlds
//! - `determinism.rs`: Seeded sessions, replays and save/resume
//! - `properties.rs`: `proptest` invariants
//! - `helpers.rs`: World builders and dispatch shortcuts

mod determinism;
mod helpers;

// Re-export for convenience
pub use helpers::*;
