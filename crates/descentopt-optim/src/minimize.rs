//! One-call entry point for unconstrained minimization.

use crate::steepest_descent::{SteepestDescent, SteepestDescentConfig};
use descentopt_core::{
    core::{
        error::OptimizerResult,
        smooth_function::SmoothFunction,
        types::{DVector, Scalar},
    },
    optimization::{
        gradient::GradientMethod, line_search::ArmijoParams, optimizer::OptimizationResult,
    },
};

/// Run options of [`minimize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinimizeOptions {
    /// Use the exact gradient of the function instead of finite differences
    pub use_analytic_gradient: bool,
    /// Print progress every 100 iterations
    pub verbose: bool,
}

impl MinimizeOptions {
    /// Finite differences, no output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the analytic gradient is used.
    pub fn with_analytic_gradient(mut self, enabled: bool) -> Self {
        self.use_analytic_gradient = enabled;
        self
    }

    /// Sets whether progress is printed.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Minimizes `function` by steepest descent from `x0`.
///
/// Uses the default tolerance (1e-4 on the gradient infinity norm) and
/// iteration budget (10000). The returned result carries the final point
/// together with the termination reason and iteration count.
///
/// # Example
///
/// ```rust
/// use descentopt_core::prelude::*;
/// use descentopt_optim::{minimize, MinimizeOptions};
///
/// let f = Quadratic::<f64>::identity(3).unwrap();
/// let result = minimize(
///     &f,
///     DVector::from_vec(vec![1.0, -2.0, 0.5]),
///     ArmijoParams::new(1.0, 0.5, 0.1),
///     MinimizeOptions::new().with_analytic_gradient(true),
/// )
/// .unwrap();
///
/// assert_eq!(result.termination_reason, TerminationReason::Converged);
/// assert!(result.point.amax() < 1e-3);
/// ```
pub fn minimize<T, F>(
    function: &F,
    x0: DVector<T>,
    params: ArmijoParams<T>,
    options: MinimizeOptions,
) -> OptimizerResult<OptimizationResult<T>>
where
    T: Scalar,
    F: SmoothFunction<T> + ?Sized,
{
    let method = if options.use_analytic_gradient {
        GradientMethod::Analytic
    } else {
        GradientMethod::FiniteDifference
    };

    let config = SteepestDescentConfig::new()
        .with_armijo(params)
        .with_gradient_method(method)
        .with_verbose(options.verbose);

    SteepestDescent::new(config).optimize(function, x0)
}
