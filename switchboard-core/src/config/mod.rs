//! Configuration types
//!
//! Board-level configuration applied through the wrappers at start-up.

pub mod board;

pub use board::*;
