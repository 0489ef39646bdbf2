//! DescentOpt Optimization - the steepest-descent driver.
//!
//! This crate runs the convergence loop on top of the building blocks of
//! `descentopt-core`: gradient evaluation, the infinity-norm termination test,
//! the antigradient direction and the Armijo line search.
//!
//! # Examples
//!
//! ```rust
//! use descentopt_core::prelude::*;
//! use descentopt_optim::{SteepestDescent, SteepestDescentConfig};
//!
//! let f = Quadratic::<f64>::identity(2).unwrap();
//! let optimizer = SteepestDescent::new(
//!     SteepestDescentConfig::new()
//!         .with_analytic_gradient()
//!         .with_max_iterations(500)
//!         .with_gradient_tolerance(1e-8),
//! );
//!
//! let result = optimizer.optimize(&f, DVector::from_vec(vec![3.0, -1.0])).unwrap();
//! assert!(result.converged);
//! ```

pub mod minimize;
pub mod steepest_descent;

// Re-export main items for convenience
pub use minimize::{minimize, MinimizeOptions};
pub use steepest_descent::{SteepestDescent, SteepestDescentConfig};
