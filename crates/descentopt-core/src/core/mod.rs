//! Core types: scalars, errors and the smooth function abstraction.

pub mod error;
pub mod quadratic;
pub mod smooth_function;
pub mod types;

// Re-export commonly used items
pub use error::{FunctionError, OptimizerError, OptimizerResult, Result};
pub use quadratic::Quadratic;
pub use smooth_function::{CountingFunction, FnFunction, SmoothFunction};
pub use types::{DMatrix, DVector, Scalar};
