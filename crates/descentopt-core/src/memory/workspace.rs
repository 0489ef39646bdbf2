//! Pre-allocated workspace for steepest descent.
//!
//! This module provides the buffer bundle mutated by every iteration: the
//! current iterate, the line-search candidate, the gradient, the two
//! finite-difference scratch vectors and the descent direction. All six
//! vectors are allocated once, from the starting point, and keep the same
//! length for the lifetime of the workspace.

use crate::core::{
    error::{FunctionError, Result},
    types::{DVector, Scalar},
};

/// Mutable iteration state of one optimization run.
///
/// A workspace is exclusively owned by the run that created it. When the run
/// ends, [`into_point`](Self::into_point) hands the final iterate to the
/// caller without copying.
#[derive(Debug, Clone)]
pub struct GradientWorkspace<T>
where
    T: Scalar,
{
    /// Current iterate
    pub(crate) x: DVector<T>,
    /// Candidate point under test during the line search
    pub(crate) x_predictor: DVector<T>,
    /// Gradient at `x`
    pub(crate) g: DVector<T>,
    /// Forward perturbation scratch for finite differences
    pub(crate) x_plus_dx: DVector<T>,
    /// Backward perturbation scratch for finite differences
    pub(crate) x_minus_dx: DVector<T>,
    /// Descent direction
    pub(crate) d: DVector<T>,
}

impl<T> GradientWorkspace<T>
where
    T: Scalar,
{
    /// Creates a workspace sized from, and positioned at, `x0`.
    pub fn new(x0: DVector<T>) -> Self {
        let n = x0.len();
        Self {
            x_predictor: x0.clone(),
            x_plus_dx: x0.clone(),
            x_minus_dx: x0.clone(),
            g: DVector::zeros(n),
            d: DVector::zeros(n),
            x: x0,
        }
    }

    /// Dimension n shared by every buffer.
    pub fn dimension(&self) -> usize {
        self.x.len()
    }

    /// Current iterate.
    pub fn point(&self) -> &DVector<T> {
        &self.x
    }

    /// Gradient computed by the last gradient evaluation.
    pub fn gradient(&self) -> &DVector<T> {
        &self.g
    }

    /// Descent direction computed by the last direction update.
    pub fn direction(&self) -> &DVector<T> {
        &self.d
    }

    /// Moves the iterate to `x0` so the buffers can serve another run.
    ///
    /// # Errors
    ///
    /// Returns `FunctionError::DimensionMismatch` if `x0` does not have the
    /// workspace dimension.
    pub fn reset(&mut self, x0: &DVector<T>) -> Result<()> {
        FunctionError::check_dimension(self.dimension(), x0.len())?;
        self.x.copy_from(x0);
        self.x_predictor.copy_from(x0);
        self.x_plus_dx.copy_from(x0);
        self.x_minus_dx.copy_from(x0);
        self.g.fill(T::zero());
        self.d.fill(T::zero());
        Ok(())
    }

    /// Replaces the iterate by the accepted line-search candidate.
    pub(crate) fn accept_predictor(&mut self) {
        std::mem::swap(&mut self.x, &mut self.x_predictor);
    }

    /// Ends the run, transferring ownership of the final iterate.
    pub fn into_point(self) -> DVector<T> {
        self.x
    }
}
