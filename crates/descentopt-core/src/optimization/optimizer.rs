//! Optimization outcome types.
//!
//! A run ends in exactly one of two terminal states:
//!
//! - **Converged**: the gradient infinity norm dropped to the tolerance,
//!   ‖∇f(x)‖∞ ≤ ε, before the iterate was moved again
//! - **MaxIterations**: the iteration budget was exhausted
//!
//! Neither is an error. In both cases the final iterate is returned to the
//! caller inside an [`OptimizationResult`].

use crate::core::types::{DVector, Scalar};
use std::time::Duration;

/// Reason a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Gradient infinity norm at or below the tolerance
    Converged,
    /// Maximum iteration count exhausted without convergence
    MaxIterations,
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult<T>
where
    T: Scalar,
{
    /// The final iterate
    pub point: DVector<T>,

    /// The function value at the final iterate
    pub value: T,

    /// Infinity norm of the gradient at the final iterate
    pub gradient_norm: T,

    /// Number of completed descent steps
    pub iterations: usize,

    /// Total number of function evaluations
    pub function_evaluations: usize,

    /// Total number of gradient computations
    pub gradient_evaluations: usize,

    /// Wall-clock time elapsed during optimization
    pub duration: Duration,

    /// Why the run stopped
    pub termination_reason: TerminationReason,

    /// True if the run stopped on the gradient tolerance
    pub converged: bool,
}

impl<T> OptimizationResult<T>
where
    T: Scalar,
{
    /// Creates a new optimization result.
    pub fn new(
        point: DVector<T>,
        value: T,
        gradient_norm: T,
        iterations: usize,
        duration: Duration,
        termination_reason: TerminationReason,
    ) -> Self {
        Self {
            point,
            value,
            gradient_norm,
            iterations,
            function_evaluations: 0,
            gradient_evaluations: 0,
            duration,
            termination_reason,
            converged: termination_reason == TerminationReason::Converged,
        }
    }

    /// Sets the function evaluation count.
    pub fn with_function_evaluations(mut self, count: usize) -> Self {
        self.function_evaluations = count;
        self
    }

    /// Sets the gradient evaluation count.
    pub fn with_gradient_evaluations(mut self, count: usize) -> Self {
        self.gradient_evaluations = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_convergence_flag() {
        let result = OptimizationResult::new(
            DVector::from_vec(vec![0.0]),
            0.0,
            0.0,
            3,
            Duration::ZERO,
            TerminationReason::Converged,
        )
        .with_function_evaluations(10)
        .with_gradient_evaluations(4);

        assert!(result.converged);
        assert_eq!(result.function_evaluations, 10);
        assert_eq!(result.gradient_evaluations, 4);

        let result = OptimizationResult::new(
            DVector::from_vec(vec![1.0]),
            1.0,
            2.0,
            50,
            Duration::ZERO,
            TerminationReason::MaxIterations,
        );
        assert!(!result.converged);
    }
}
