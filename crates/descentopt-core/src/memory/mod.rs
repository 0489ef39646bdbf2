//! Memory management for optimization runs.
//!
//! Every run owns exactly one [`GradientWorkspace`], allocated from the
//! starting point and reused by every iteration.

pub mod workspace;

pub use workspace::GradientWorkspace;
