//! Smooth function interface for optimization algorithms.
//!
//! This module provides the trait that every objective minimized by the
//! library implements, together with two generic adapters:
//! - [`FnFunction`] turns any closure `Fn(&DVector<T>) -> T` into a function
//! - [`CountingFunction`] counts evaluations for testing and debugging
//!
//! The quadratic form xᵀQx lives in [`quadratic`](crate::core::quadratic).
//!
//! # Design Philosophy
//!
//! Only the value is mandatory. An analytic gradient is an optional
//! capability: a function advertises it through
//! [`SmoothFunction::has_analytic_gradient`], and all other functions are
//! differentiated by central finite differences.

use crate::core::{
    error::{FunctionError, Result},
    types::{DVector, Scalar},
};
use std::cell::Cell;
use std::fmt::{self, Debug};

/// Trait for differentiable scalar-valued functions of a real vector.
///
/// This is the main trait that the optimizer uses to evaluate the objective.
pub trait SmoothFunction<T>: Debug
where
    T: Scalar,
{
    /// Evaluates the function at a point.
    ///
    /// # Errors
    ///
    /// Returns `FunctionError::DimensionMismatch` if the function has a fixed
    /// dimension and `x` has a different length.
    fn evaluate(&self, x: &DVector<T>) -> Result<T>;

    /// Returns the fixed input dimension, or `None` if any length is accepted.
    fn dimension(&self) -> Option<usize> {
        None
    }

    /// Whether [`gradient_into`](Self::gradient_into) is available.
    fn has_analytic_gradient(&self) -> bool {
        false
    }

    /// Writes the exact gradient at `x` into `gradient`.
    ///
    /// # Default Implementation
    ///
    /// Returns `NotImplemented`. Override together with
    /// [`has_analytic_gradient`](Self::has_analytic_gradient).
    fn gradient_into(&self, _x: &DVector<T>, _gradient: &mut DVector<T>) -> Result<()> {
        Err(FunctionError::not_implemented(
            "analytic gradient not provided by this function",
        ))
    }
}

impl<T, F> SmoothFunction<T> for &F
where
    T: Scalar,
    F: SmoothFunction<T> + ?Sized,
{
    fn evaluate(&self, x: &DVector<T>) -> Result<T> {
        (**self).evaluate(x)
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }

    fn has_analytic_gradient(&self) -> bool {
        (**self).has_analytic_gradient()
    }

    fn gradient_into(&self, x: &DVector<T>, gradient: &mut DVector<T>) -> Result<()> {
        (**self).gradient_into(x, gradient)
    }
}

/// A smooth function backed by a user-supplied closure.
///
/// The closure is trusted to be smooth; its gradient is obtained by finite
/// differences.
///
/// # Example
///
/// ```rust
/// use descentopt_core::prelude::*;
///
/// let f = FnFunction::new(|x: &DVector<f64>| x.dot(x)).with_dimension(2);
/// let value = f.evaluate(&DVector::from_vec(vec![1.0, 2.0])).unwrap();
/// assert_eq!(value, 5.0);
/// ```
#[derive(Clone)]
pub struct FnFunction<F> {
    function: F,
    dimension: Option<usize>,
}

impl<F> FnFunction<F> {
    /// Wraps a closure accepting vectors of any length.
    pub fn new(function: F) -> Self {
        Self {
            function,
            dimension: None,
        }
    }

    /// Restricts the function to inputs of length `dimension`.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }
}

impl<F> Debug for FnFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFunction")
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl<T, F> SmoothFunction<T> for FnFunction<F>
where
    T: Scalar,
    F: Fn(&DVector<T>) -> T,
{
    fn evaluate(&self, x: &DVector<T>) -> Result<T> {
        if let Some(n) = self.dimension {
            FunctionError::check_dimension(n, x.len())?;
        }
        Ok((self.function)(x))
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

/// Wrapper to count function evaluations for testing and debugging.
#[derive(Debug)]
pub struct CountingFunction<F> {
    /// The underlying function
    pub inner: F,
    evaluations: Cell<usize>,
    gradient_evaluations: Cell<usize>,
}

impl<F> CountingFunction<F> {
    /// Creates a new counting wrapper around a function.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            evaluations: Cell::new(0),
            gradient_evaluations: Cell::new(0),
        }
    }

    /// Number of calls to `evaluate` since creation or the last reset.
    pub fn evaluations(&self) -> usize {
        self.evaluations.get()
    }

    /// Number of calls to `gradient_into` since creation or the last reset.
    pub fn gradient_evaluations(&self) -> usize {
        self.gradient_evaluations.get()
    }

    /// Resets all counters to zero.
    pub fn reset_counts(&self) {
        self.evaluations.set(0);
        self.gradient_evaluations.set(0);
    }
}

impl<T, F> SmoothFunction<T> for CountingFunction<F>
where
    T: Scalar,
    F: SmoothFunction<T>,
{
    fn evaluate(&self, x: &DVector<T>) -> Result<T> {
        self.evaluations.set(self.evaluations.get() + 1);
        self.inner.evaluate(x)
    }

    fn dimension(&self) -> Option<usize> {
        self.inner.dimension()
    }

    fn has_analytic_gradient(&self) -> bool {
        self.inner.has_analytic_gradient()
    }

    fn gradient_into(&self, x: &DVector<T>, gradient: &mut DVector<T>) -> Result<()> {
        self.gradient_evaluations
            .set(self.gradient_evaluations.get() + 1);
        self.inner.gradient_into(x, gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fn_function_any_dimension() {
        let f = FnFunction::new(|x: &DVector<f64>| x.iter().sum::<f64>());
        assert_eq!(SmoothFunction::<f64>::dimension(&f), None);
        assert_relative_eq!(f.evaluate(&DVector::from_vec(vec![1.0, 2.0])).unwrap(), 3.0);
        assert_relative_eq!(f.evaluate(&DVector::from_vec(vec![1.0])).unwrap(), 1.0);
    }

    #[test]
    fn test_fn_function_fixed_dimension() {
        let f = FnFunction::new(|x: &DVector<f64>| x.norm_squared()).with_dimension(3);
        let err = f.evaluate(&DVector::zeros(2)).unwrap_err();
        assert_eq!(err, FunctionError::dimension_mismatch(3, 2));
    }

    #[test]
    fn test_default_gradient_is_not_implemented() {
        let f = FnFunction::new(|x: &DVector<f64>| x.norm_squared());
        assert!(!SmoothFunction::<f64>::has_analytic_gradient(&f));

        let mut g = DVector::zeros(2);
        let err = f.gradient_into(&DVector::zeros(2), &mut g).unwrap_err();
        assert!(matches!(err, FunctionError::NotImplemented { .. }));
    }

    #[test]
    fn test_counting_function() {
        let f = CountingFunction::new(FnFunction::new(|x: &DVector<f64>| x.norm_squared()));
        let x = DVector::from_vec(vec![1.0, 1.0]);

        f.evaluate(&x).unwrap();
        f.evaluate(&x).unwrap();
        assert_eq!(f.evaluations(), 2);

        f.reset_counts();
        assert_eq!(f.evaluations(), 0);
    }

    #[test]
    fn test_reference_forwarding() {
        let f = FnFunction::new(|x: &DVector<f64>| 2.0 * x[0]).with_dimension(1);
        let by_ref: &dyn SmoothFunction<f64> = &f;
        assert_eq!(by_ref.dimension(), Some(1));
        assert_relative_eq!((&by_ref).evaluate(&DVector::from_vec(vec![3.0])).unwrap(), 6.0);
    }
}
