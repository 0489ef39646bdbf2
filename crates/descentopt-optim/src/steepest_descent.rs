//! Steepest descent with Armijo backtracking.
//!
//! This module implements the optimization driver. Each iteration:
//! 1. Computes the gradient at the current iterate (analytic or finite difference)
//! 2. Stops with `Converged` if ‖∇f(x)‖∞ ≤ ε
//! 3. Sets the direction to the antigradient, d = −∇f(x)
//! 4. Moves x along d with an Armijo line search
//!
//! After `max_iterations` steps without convergence the run stops with
//! `MaxIterations`. Both outcomes return the final iterate.
//!
//! # Features
//!
//! - **Gradient strategy**: tagged choice between the exact gradient of the
//!   function and central finite differences
//! - **Workspace reuse**: one allocation per run, no allocation per iteration
//!   beyond what the function itself does
//! - **Progress reporting**: callbacks observe every iteration; the
//!   `verbose` flag prints every `report_every` iterations

use descentopt_core::{
    core::{
        error::{OptimizerError, OptimizerResult},
        smooth_function::SmoothFunction,
        types::{all_finite, inf_norm, DVector, Scalar},
    },
    memory::workspace::GradientWorkspace,
    optimization::{
        callback::{
            IterationInfo, NoOpCallback, OptimizationCallback, OptimizationSummary,
            PrintProgressCallback,
        },
        gradient::{compute_gradient, steepest_descent_direction, GradientMethod},
        line_search::{ArmijoLineSearch, ArmijoParams},
        optimizer::{OptimizationResult, TerminationReason},
    },
    FunctionError,
};
use num_traits::Float;
use std::time::Instant;

/// Configuration for the steepest descent optimizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteepestDescentConfig<T>
where
    T: Scalar,
{
    /// Armijo line search parameters
    pub armijo: ArmijoParams<T>,

    /// How gradients are computed
    pub gradient_method: GradientMethod,

    /// Convergence tolerance on the gradient infinity norm
    pub gradient_tolerance: T,

    /// Maximum number of descent steps
    pub max_iterations: usize,

    /// Perturbation h used by finite differences
    pub finite_difference_step: T,

    /// Print progress to stdout
    pub verbose: bool,

    /// Progress reporting cadence, in iterations
    pub report_every: usize,
}

impl<T> Default for SteepestDescentConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            armijo: ArmijoParams::default(),
            gradient_method: GradientMethod::FiniteDifference,
            gradient_tolerance: T::DEFAULT_GRADIENT_TOLERANCE,
            max_iterations: 10_000,
            finite_difference_step: T::DEFAULT_FINITE_DIFFERENCE_STEP,
            verbose: false,
            report_every: 100,
        }
    }
}

impl<T> SteepestDescentConfig<T>
where
    T: Scalar,
{
    /// Creates a new configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Armijo parameters.
    pub fn with_armijo(mut self, armijo: ArmijoParams<T>) -> Self {
        self.armijo = armijo;
        self
    }

    /// Sets the gradient strategy.
    pub fn with_gradient_method(mut self, method: GradientMethod) -> Self {
        self.gradient_method = method;
        self
    }

    /// Uses the exact gradient provided by the function.
    pub fn with_analytic_gradient(self) -> Self {
        self.with_gradient_method(GradientMethod::Analytic)
    }

    /// Uses central finite differences.
    pub fn with_finite_differences(self) -> Self {
        self.with_gradient_method(GradientMethod::FiniteDifference)
    }

    /// Sets the gradient tolerance.
    pub fn with_gradient_tolerance(mut self, tol: T) -> Self {
        self.gradient_tolerance = tol;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Sets the finite-difference perturbation.
    pub fn with_finite_difference_step(mut self, step: T) -> Self {
        self.finite_difference_step = step;
        self
    }

    /// Enables or disables progress output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the progress reporting cadence.
    pub fn with_report_every(mut self, every: usize) -> Self {
        self.report_every = every;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::InvalidConfiguration` for invalid Armijo
    /// parameters, a non-positive tolerance or perturbation, or a zero
    /// reporting cadence.
    pub fn validate(&self) -> OptimizerResult<()> {
        self.armijo.validate()?;

        if !(self.gradient_tolerance > T::zero()) {
            return Err(OptimizerError::invalid_configuration(
                "Gradient tolerance must be positive",
                "gradient_tolerance",
                self.gradient_tolerance.to_string(),
            ));
        }

        if !(self.finite_difference_step > T::zero())
            || !<T as Float>::is_finite(self.finite_difference_step)
        {
            return Err(OptimizerError::invalid_configuration(
                "Finite-difference step must be positive and finite",
                "finite_difference_step",
                self.finite_difference_step.to_string(),
            ));
        }

        if self.report_every == 0 {
            return Err(OptimizerError::invalid_configuration(
                "Reporting cadence must be at least 1",
                "report_every",
                "0",
            ));
        }

        Ok(())
    }
}

/// Steepest descent optimizer.
#[derive(Debug, Clone)]
pub struct SteepestDescent<T>
where
    T: Scalar,
{
    config: SteepestDescentConfig<T>,
}

impl<T> SteepestDescent<T>
where
    T: Scalar,
{
    /// Creates a new optimizer with the given configuration.
    pub fn new(config: SteepestDescentConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &SteepestDescentConfig<T> {
        &self.config
    }

    /// Minimizes `function` starting from `x0`.
    ///
    /// Progress is printed when the configuration is verbose.
    pub fn optimize<F>(&self, function: &F, x0: DVector<T>) -> OptimizerResult<OptimizationResult<T>>
    where
        F: SmoothFunction<T> + ?Sized,
    {
        if self.config.verbose {
            let mut printer = PrintProgressCallback::new(self.config.report_every);
            self.optimize_with_callback(function, x0, &mut printer)
        } else {
            self.optimize_with_callback(function, x0, &mut NoOpCallback)
        }
    }

    /// Minimizes `function` starting from `x0`, reporting to `callback`.
    ///
    /// # Arguments
    ///
    /// * `function` - The function to minimize
    /// * `x0` - Starting point; its length fixes the dimension of the run
    /// * `callback` - Observer notified at start, every iteration and end
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if the configuration is invalid or the
    ///   analytic strategy is requested for a function without one
    /// - `Function(DimensionMismatch)` if `x0` disagrees with the function
    /// - `LineSearchFailed` / `InvalidSearchDirection` from the line search
    pub fn optimize_with_callback<F>(
        &self,
        function: &F,
        x0: DVector<T>,
        callback: &mut dyn OptimizationCallback<T>,
    ) -> OptimizerResult<OptimizationResult<T>>
    where
        F: SmoothFunction<T> + ?Sized,
    {
        let config = &self.config;
        config.validate()?;

        if config.gradient_method == GradientMethod::Analytic && !function.has_analytic_gradient() {
            return Err(OptimizerError::invalid_configuration(
                "Function does not provide an analytic gradient",
                "gradient_method",
                "Analytic",
            ));
        }
        if let Some(n) = function.dimension() {
            FunctionError::check_dimension(n, x0.len())?;
        }

        let start_time = Instant::now();
        let mut workspace = GradientWorkspace::new(x0);
        let evaluations_per_gradient = self.evaluations_per_gradient(workspace.dimension());
        let mut value = function.evaluate(workspace.point())?;
        let mut function_evaluations = 1;
        let mut gradient_evaluations = 0;

        callback.on_optimization_start();

        let mut termination_reason = TerminationReason::MaxIterations;
        let mut iterations = config.max_iterations;
        let mut gradient_norm = None;

        for iteration in 0..config.max_iterations {
            let norm = self.gradient_norm(function, &mut workspace)?;
            gradient_evaluations += 1;
            function_evaluations += evaluations_per_gradient;

            callback.on_iteration(&IterationInfo {
                iteration,
                value,
                gradient_norm: norm,
            });

            if norm <= config.gradient_tolerance {
                termination_reason = TerminationReason::Converged;
                iterations = iteration;
                gradient_norm = Some(norm);
                break;
            }

            steepest_descent_direction(&mut workspace);
            let step = ArmijoLineSearch::search(function, &mut workspace, value, &config.armijo)?;
            function_evaluations += step.function_evaluations;
            value = step.new_value;
        }

        // The cap was hit: the last gradient belongs to the previous iterate
        let gradient_norm = match gradient_norm {
            Some(norm) => norm,
            None => {
                gradient_evaluations += 1;
                function_evaluations += evaluations_per_gradient;
                self.gradient_norm(function, &mut workspace)?
            }
        };

        callback.on_optimization_end(&OptimizationSummary {
            iterations,
            value,
            gradient_norm,
            termination_reason,
        });

        Ok(OptimizationResult::new(
            workspace.into_point(),
            value,
            gradient_norm,
            iterations,
            start_time.elapsed(),
            termination_reason,
        )
        .with_function_evaluations(function_evaluations)
        .with_gradient_evaluations(gradient_evaluations))
    }

    /// Computes the gradient into the workspace and returns its infinity norm.
    ///
    /// A non-finite gradient yields an infinite norm so that it can never
    /// pass the tolerance test.
    fn gradient_norm<F>(&self, function: &F, workspace: &mut GradientWorkspace<T>) -> OptimizerResult<T>
    where
        F: SmoothFunction<T> + ?Sized,
    {
        let gradient = compute_gradient(
            function,
            workspace,
            self.config.gradient_method,
            self.config.finite_difference_step,
        )?;

        if all_finite(gradient) {
            Ok(inf_norm(gradient))
        } else {
            Ok(<T as Float>::infinity())
        }
    }

    /// Function evaluations spent by one gradient computation in dimension `n`.
    fn evaluations_per_gradient(&self, n: usize) -> usize {
        match self.config.gradient_method {
            GradientMethod::Analytic => 0,
            GradientMethod::FiniteDifference => 2 * n,
        }
    }
}

impl<T> Default for SteepestDescent<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self::new(SteepestDescentConfig::default())
    }
}
