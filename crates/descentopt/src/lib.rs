//! # DescentOpt
//!
//! Unconstrained minimization of smooth functions ℝⁿ → ℝ by steepest descent
//! with Armijo backtracking.
//!
//! This crate re-exports the building blocks of `descentopt-core` and the
//! driver of `descentopt-optim` behind a single dependency.
//!
//! ## Quick Start
//!
//! ```rust
//! use descentopt::prelude::*;
//!
//! let q = DMatrix::from_row_slice(2, 2, &[2.0, 0.5, 0.5, 1.0]);
//! let f = Quadratic::new(q).unwrap();
//!
//! let result = minimize(
//!     &f,
//!     DVector::from_vec(vec![1.0, 1.0]),
//!     ArmijoParams::new(1.0, 0.5, 0.1),
//!     MinimizeOptions::new().with_analytic_gradient(true),
//! )
//! .unwrap();
//!
//! assert!(result.converged);
//! assert!(result.gradient_norm <= 1e-4);
//! ```
//!
//! ## Gradients
//!
//! Functions that know their derivative implement
//! [`SmoothFunction::gradient_into`](descentopt_core::smooth_function::SmoothFunction::gradient_into)
//! and report `has_analytic_gradient() == true`. Every other function is
//! differentiated numerically by central differences with h = 1e-4, at a
//! cost of 2n evaluations per gradient.

pub use descentopt_core;
pub use descentopt_optim;
pub use nalgebra;

pub use descentopt_core::{FunctionError, OptimizerError, OptimizerResult};
pub use descentopt_optim::{minimize, MinimizeOptions, SteepestDescent, SteepestDescentConfig};

/// Commonly used items.
pub mod prelude {
    pub use descentopt_core::prelude::*;
    pub use descentopt_optim::{
        minimize, MinimizeOptions, SteepestDescent, SteepestDescentConfig,
    };
}
