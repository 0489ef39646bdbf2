//! Positive-definite quadratic forms.
//!
//! [`Quadratic`] represents f(x) = xᵀQx for a symmetric positive-definite
//! matrix Q. It is the one function variant shipped with the library that
//! provides an exact gradient, ∇f(x) = 2Qx.
//!
//! # Construction
//!
//! Q must be symmetric up to rounding, and positive definiteness is verified
//! once by attempting a Cholesky factorization. The factorization only reads
//! the lower triangle, so symmetry is checked first. A matrix that fails
//! either test never yields an instance.

use crate::core::{
    error::{FunctionError, Result},
    smooth_function::SmoothFunction,
    types::{DMatrix, DVector, Scalar},
};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::Cholesky;
use num_traits::Float;

/// The quadratic form f(x) = xᵀQx with Q symmetric positive definite.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadratic<T>
where
    T: Scalar,
{
    q: DMatrix<T>,
}

impl<T> Quadratic<T>
where
    T: Scalar,
{
    /// Creates a quadratic form from its matrix.
    ///
    /// # Errors
    ///
    /// Returns `FunctionError::InvalidInput` if `q` is empty, not square,
    /// contains non-finite entries, is not symmetric, or is not positive
    /// definite.
    pub fn new(q: DMatrix<T>) -> Result<Self> {
        if q.nrows() == 0 {
            return Err(FunctionError::invalid_input("matrix is empty"));
        }
        if !q.is_square() {
            return Err(FunctionError::invalid_input(format!(
                "matrix is not square ({}x{})",
                q.nrows(),
                q.ncols()
            )));
        }
        if q.iter().any(|&v| !<T as Float>::is_finite(v)) {
            return Err(FunctionError::invalid_input("matrix has non-finite entries"));
        }
        let tolerance = T::EPSILON * <T as Scalar>::from_f64(100.0);
        if !q.relative_eq(&q.transpose(), tolerance, tolerance) {
            return Err(FunctionError::invalid_input("matrix is not symmetric"));
        }
        if Cholesky::new(q.clone()).is_none() {
            return Err(FunctionError::invalid_input("matrix not positive definite"));
        }

        Ok(Self { q })
    }

    /// Creates f(x) = ‖x‖² on ℝⁿ.
    ///
    /// # Errors
    ///
    /// Returns `FunctionError::InvalidInput` if `n == 0`.
    pub fn identity(n: usize) -> Result<Self> {
        Self::new(DMatrix::identity(n, n))
    }

    /// Returns the defining matrix Q.
    pub fn matrix(&self) -> &DMatrix<T> {
        &self.q
    }

    /// Consumes the function and returns Q.
    pub fn into_matrix(self) -> DMatrix<T> {
        self.q
    }

    /// Returns n, the size of Q.
    pub fn size(&self) -> usize {
        self.q.nrows()
    }
}

impl<T> SmoothFunction<T> for Quadratic<T>
where
    T: Scalar,
{
    fn evaluate(&self, x: &DVector<T>) -> Result<T> {
        FunctionError::check_dimension(self.size(), x.len())?;
        let qx = &self.q * x;
        Ok(x.dot(&qx))
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.size())
    }

    fn has_analytic_gradient(&self) -> bool {
        true
    }

    fn gradient_into(&self, x: &DVector<T>, gradient: &mut DVector<T>) -> Result<()> {
        FunctionError::check_dimension(self.size(), x.len())?;
        FunctionError::check_dimension(self.size(), gradient.len())?;
        // gradient = 2 Q x
        gradient.gemv(<T as Scalar>::from_f64(2.0), &self.q, x, T::zero());
        Ok(())
    }
}

impl<T> AbsDiffEq for Quadratic<T>
where
    T: Scalar,
{
    type Epsilon = T;

    fn default_epsilon() -> T {
        <T as AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.q.shape() == other.q.shape() && self.q.abs_diff_eq(&other.q, epsilon)
    }
}

impl<T> RelativeEq for Quadratic<T>
where
    T: Scalar,
{
    fn default_max_relative() -> T {
        <T as RelativeEq>::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.q.shape() == other.q.shape() && self.q.relative_eq(&other.q, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spd_3x3() -> DMatrix<f64> {
        DMatrix::from_row_slice(
            3,
            3,
            &[
                2.25144, 0.94941, -0.972442, //
                0.94941, 2.51176, 1.57232, //
                -0.972442, 1.57232, 2.2813,
            ],
        )
    }

    #[test]
    fn test_positive_definite_accepted() {
        let f = Quadratic::new(spd_3x3()).unwrap();
        assert_eq!(f.size(), 3);
        assert_eq!(f.dimension(), Some(3));
    }

    #[test]
    fn test_indefinite_rejected() {
        let q = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -1.0]);
        let err = Quadratic::new(q).unwrap_err();
        assert_eq!(err, FunctionError::invalid_input("matrix not positive definite"));
    }

    #[test]
    fn test_negative_definite_rejected() {
        let q = -spd_3x3();
        assert!(matches!(
            Quadratic::new(q),
            Err(FunctionError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_asymmetric_rejected() {
        // Lower triangle alone is positive definite, but xᵀQx is indefinite
        let q = DMatrix::from_row_slice(2, 2, &[1.0, 10.0, 0.0, 1.0]);
        let err = Quadratic::new(q).unwrap_err();
        assert_eq!(err, FunctionError::invalid_input("matrix is not symmetric"));

        let f = Quadratic::new(DMatrix::from_row_slice(2, 2, &[1.0, 10.0, 0.0, 1.0]).transpose());
        assert!(f.is_err());
    }

    #[test]
    fn test_singular_rejected() {
        let q = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        assert!(Quadratic::new(q).is_err());
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(Quadratic::<f64>::new(DMatrix::zeros(0, 0)).is_err());
        assert!(Quadratic::new(DMatrix::<f64>::identity(2, 3)).is_err());

        let mut q = DMatrix::<f64>::identity(2, 2);
        q[(1, 1)] = f64::NAN;
        assert!(Quadratic::new(q).is_err());
    }

    #[test]
    fn test_evaluate() {
        let f = Quadratic::<f64>::identity(3).unwrap();
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        assert_relative_eq!(f.evaluate(&x).unwrap(), 14.0);

        let f = Quadratic::new(DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0])).unwrap();
        let x = DVector::from_vec(vec![1.0, -1.0]);
        // 2 - 1 - 1 + 3
        assert_relative_eq!(f.evaluate(&x).unwrap(), 3.0);
    }

    #[test]
    fn test_evaluate_dimension_mismatch() {
        let f = Quadratic::<f64>::identity(3).unwrap();
        let err = f.evaluate(&DVector::zeros(2)).unwrap_err();
        assert_eq!(err, FunctionError::dimension_mismatch(3, 2));
    }

    #[test]
    fn test_analytic_gradient() {
        let f = Quadratic::new(spd_3x3()).unwrap();
        let x = DVector::from_vec(vec![1.0, 1.0, 1.0]);
        let mut g = DVector::zeros(3);
        f.gradient_into(&x, &mut g).unwrap();

        let expected = spd_3x3() * &x * 2.0;
        for i in 0..3 {
            assert_relative_eq!(g[i], expected[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_approximate_equality() {
        let f = Quadratic::new(spd_3x3()).unwrap();
        let mut perturbed = spd_3x3();
        perturbed[(0, 0)] += 1e-12;
        let g = Quadratic::new(perturbed).unwrap();

        assert_ne!(f, g);
        assert_relative_eq!(f, g, epsilon = 1e-10);
        assert!(!f.abs_diff_eq(&Quadratic::identity(3).unwrap(), 1e-10));
        assert!(!f.abs_diff_eq(&Quadratic::identity(2).unwrap(), 1e-10));
    }

    #[test]
    fn test_gradient_buffer_mismatch() {
        let f = Quadratic::<f64>::identity(3).unwrap();
        let mut g = DVector::zeros(4);
        assert!(f.gradient_into(&DVector::zeros(3), &mut g).is_err());
    }
}
