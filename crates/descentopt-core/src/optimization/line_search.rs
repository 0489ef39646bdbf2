//! Armijo backtracking line search.
//!
//! Given the current point x, its gradient g and a descent direction d with
//! ⟨g, d⟩ < 0, the search tries the steps s, βs, β²s, ... and accepts the
//! first multiplier m for which the sufficient decrease condition holds:
//!
//! f(x + m·s·d) − f(x) ≤ m · s · σ · ⟨g, d⟩
//!
//! # Parameters
//!
//! - **s** (`initial_step`): initial step scale, s > 0
//! - **β** (`contraction`): backtracking factor, 0 < β < 1
//! - **σ** (`sufficient_decrease`): Armijo constant, 0 < σ < 1, conventionally < 0.5
//!
//! # Termination
//!
//! For a smooth function and a strict descent direction the decrease
//! f(x + m·s·d) − f(x) behaves like m·s·⟨g, d⟩ + O(m²), so the condition
//! holds for every small enough m, whatever β ∈ (0, 1). The loop is
//! unbounded by default and guarded in two ways: a direction with
//! ⟨g, d⟩ ≥ 0 is rejected up front, and the search stops once the trial
//! step no longer moves any coordinate of x. Callers may additionally cap
//! the number of contractions with `max_backtracks`.
//!
//! # Example
//!
//! ```rust
//! use descentopt_core::prelude::*;
//!
//! let f = Quadratic::<f64>::identity(2).unwrap();
//! let mut ws = GradientWorkspace::new(DVector::from_vec(vec![1.0, -1.0]));
//! analytic_gradient(&f, &mut ws).unwrap();
//! steepest_descent_direction(&mut ws);
//!
//! let value = f.evaluate(ws.point()).unwrap();
//! let params = ArmijoParams::new(1.0, 0.5, 0.1);
//! let result = ArmijoLineSearch::search(&f, &mut ws, value, &params).unwrap();
//! assert!(result.new_value < value);
//! ```

use crate::{
    core::{
        error::{OptimizerError, OptimizerResult},
        smooth_function::SmoothFunction,
        types::Scalar,
    },
    memory::workspace::GradientWorkspace,
};
use num_traits::Float;

/// Result of one Armijo line search.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSearchResult<T>
where
    T: Scalar,
{
    /// The accepted step length m·s
    pub step_size: T,

    /// The function value at the accepted point
    pub new_value: T,

    /// Number of function evaluations performed
    pub function_evaluations: usize,

    /// Number of contractions applied before acceptance
    pub backtracks: usize,
}

/// Parameters (s, β, σ) of the Armijo rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmijoParams<T>
where
    T: Scalar,
{
    /// Initial step scale s > 0
    pub initial_step: T,

    /// Contraction factor β ∈ (0, 1) applied after each rejected step
    pub contraction: T,

    /// Sufficient decrease parameter σ ∈ (0, 1)
    pub sufficient_decrease: T,

    /// Optional cap on the number of contractions, `None` by default
    pub max_backtracks: Option<usize>,
}

impl<T> Default for ArmijoParams<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            initial_step: T::one(),
            contraction: <T as Scalar>::from_f64(0.5),
            sufficient_decrease: <T as Scalar>::from_f64(0.1),
            max_backtracks: None,
        }
    }
}

impl<T> ArmijoParams<T>
where
    T: Scalar,
{
    /// Creates parameters from the triple (s, β, σ) without a contraction cap.
    pub fn new(initial_step: T, contraction: T, sufficient_decrease: T) -> Self {
        Self {
            initial_step,
            contraction,
            sufficient_decrease,
            ..Self::default()
        }
    }

    /// Sets the maximum number of contractions.
    pub fn with_max_backtracks(mut self, max_backtracks: usize) -> Self {
        self.max_backtracks = Some(max_backtracks);
        self
    }

    /// Removes the contraction budget.
    pub fn without_backtrack_limit(mut self) -> Self {
        self.max_backtracks = None;
        self
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `OptimizerError::InvalidConfiguration` unless s > 0 is finite,
    /// 0 < β < 1 and 0 < σ < 1.
    pub fn validate(&self) -> OptimizerResult<()> {
        if !(self.initial_step > T::zero()) || !<T as Float>::is_finite(self.initial_step) {
            return Err(OptimizerError::invalid_configuration(
                "Initial step must be positive and finite",
                "initial_step",
                self.initial_step.to_string(),
            ));
        }

        if !(self.contraction > T::zero() && self.contraction < T::one()) {
            return Err(OptimizerError::invalid_configuration(
                "Contraction factor must be in (0, 1)",
                "contraction",
                self.contraction.to_string(),
            ));
        }

        if !(self.sufficient_decrease > T::zero() && self.sufficient_decrease < T::one()) {
            return Err(OptimizerError::invalid_configuration(
                "Sufficient decrease parameter must be in (0, 1)",
                "sufficient_decrease",
                self.sufficient_decrease.to_string(),
            ));
        }

        Ok(())
    }
}

/// Armijo backtracking along the workspace direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArmijoLineSearch;

impl ArmijoLineSearch {
    /// Searches along d from x and moves x to the accepted point.
    ///
    /// `current_value` must be f(x). On success the workspace iterate holds
    /// the accepted candidate; the gradient and direction are untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidSearchDirection` if ⟨g, d⟩ is not strictly negative
    /// - `LineSearchFailed` if the trial step became too small to move x, or
    ///   if `max_backtracks` contractions are exhausted; the iterate is left
    ///   unchanged
    /// - propagated function errors
    pub fn search<T, F>(
        function: &F,
        workspace: &mut GradientWorkspace<T>,
        current_value: T,
        params: &ArmijoParams<T>,
    ) -> OptimizerResult<LineSearchResult<T>>
    where
        T: Scalar,
        F: SmoothFunction<T> + ?Sized,
    {
        let slope = workspace.g.dot(&workspace.d);
        if !(slope < T::zero()) {
            return Err(OptimizerError::InvalidSearchDirection);
        }

        let target_slope = slope * params.initial_step * params.sufficient_decrease;
        let mut multiplier = T::one();
        let mut backtracks = 0;
        let mut function_evaluations = 0;

        loop {
            let step = multiplier * params.initial_step;
            workspace.x_predictor.copy_from(&workspace.x);
            workspace.x_predictor.axpy(step, &workspace.d, T::one());

            // Smaller steps round to the same point
            if workspace.x_predictor == workspace.x {
                return Err(OptimizerError::line_search_failed(
                    "step too small to move the iterate",
                    backtracks,
                    <T as Scalar>::to_f64(step),
                    <T as Scalar>::to_f64(current_value),
                ));
            }

            let candidate_value = function.evaluate(&workspace.x_predictor)?;
            function_evaluations += 1;

            if candidate_value - current_value <= multiplier * target_slope {
                workspace.accept_predictor();
                return Ok(LineSearchResult {
                    step_size: step,
                    new_value: candidate_value,
                    function_evaluations,
                    backtracks,
                });
            }

            if params.max_backtracks.is_some_and(|max| backtracks >= max) {
                return Err(OptimizerError::line_search_failed(
                    "sufficient decrease not reached",
                    backtracks,
                    <T as Scalar>::to_f64(step),
                    <T as Scalar>::to_f64(current_value),
                ));
            }

            multiplier *= params.contraction;
            backtracks += 1;
        }
    }
}
