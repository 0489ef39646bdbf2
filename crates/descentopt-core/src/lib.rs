//! Core traits and types for steepest-descent optimization.
//!
//! This crate provides the building blocks of an unconstrained minimizer:
//! the smooth function abstraction, the reusable iteration workspace, the
//! analytic and finite-difference gradient strategies, and the Armijo
//! backtracking line search. The driver loop lives in `descentopt-optim`.
//!
//! # Key Concepts
//!
//! - **Smooth functions**: differentiable maps ℝⁿ → ℝ, evaluated point-wise
//! - **Gradient workspace**: the six buffers mutated by every iteration
//! - **Steepest descent**: the direction d = −∇f(x)
//! - **Armijo rule**: backtracking until f decreases by a fraction σ of the
//!   first-order prediction
//!
//! # Modules
//!
//! - [`core`]: scalars, errors, the `SmoothFunction` trait and `Quadratic`
//! - [`memory`]: the per-run `GradientWorkspace`
//! - [`optimization`]: gradient strategies, line search, callbacks, results
//! - `persistence`: JSON storage of quadratic forms (feature `serde`)

pub mod core;
pub mod memory;
pub mod optimization;

#[cfg(feature = "serde")]
pub mod persistence;

// Re-export commonly used modules at the crate root
pub use crate::core::{error, quadratic, smooth_function, types};
pub use error::{FunctionError, OptimizerError, OptimizerResult, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use descentopt_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        error::{FunctionError, OptimizerError, OptimizerResult, Result},
        quadratic::Quadratic,
        smooth_function::{CountingFunction, FnFunction, SmoothFunction},
        types::{inf_norm, DMatrix, DVector, Scalar},
    };
    pub use crate::memory::GradientWorkspace;
    pub use crate::optimization::{
        analytic_gradient, compute_gradient, finite_difference_gradient,
        steepest_descent_direction, ArmijoLineSearch, ArmijoParams, GradientMethod,
        HistoryCallback, IterationInfo, LineSearchResult, NoOpCallback, OptimizationCallback,
        OptimizationResult, OptimizationSummary, PrintProgressCallback, TerminationReason,
    };
    #[cfg(feature = "serde")]
    pub use crate::persistence::{
        load_quadratic, read_quadratic, save_quadratic, write_quadratic, PersistenceError,
    };
}
