//! Gradient strategies and the steepest-descent direction.
//!
//! Two interchangeable strategies fill the gradient buffer of a
//! [`GradientWorkspace`]:
//!
//! - **Analytic**: delegates to [`SmoothFunction::gradient_into`], exact and
//!   available only for functions that provide it (e.g. `Quadratic`).
//! - **Finite difference**: central differences for any smooth function,
//!
//!   ∂f/∂xᵢ ≈ (f(x + h eᵢ) − f(x − h eᵢ)) / 2h
//!
//!   costing 2n evaluations per gradient.

use crate::{
    core::{
        error::{FunctionError, Result},
        smooth_function::SmoothFunction,
        types::{DVector, Scalar},
    },
    memory::workspace::GradientWorkspace,
};

/// How the optimizer obtains the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GradientMethod {
    /// Exact gradient supplied by the function
    Analytic,
    /// Central finite differences
    #[default]
    FiniteDifference,
}

/// Computes the gradient at the workspace iterate into its gradient buffer.
///
/// `step` is the finite-difference perturbation h and is ignored by the
/// analytic strategy.
pub fn compute_gradient<'a, T, F>(
    function: &F,
    workspace: &'a mut GradientWorkspace<T>,
    method: GradientMethod,
    step: T,
) -> Result<&'a DVector<T>>
where
    T: Scalar,
    F: SmoothFunction<T> + ?Sized,
{
    match method {
        GradientMethod::Analytic => analytic_gradient(function, workspace),
        GradientMethod::FiniteDifference => finite_difference_gradient(function, workspace, step),
    }
}

/// Writes the exact gradient at the workspace iterate.
///
/// # Errors
///
/// Returns `FunctionError::NotImplemented` if the function has no analytic
/// gradient.
pub fn analytic_gradient<'a, T, F>(
    function: &F,
    workspace: &'a mut GradientWorkspace<T>,
) -> Result<&'a DVector<T>>
where
    T: Scalar,
    F: SmoothFunction<T> + ?Sized,
{
    let GradientWorkspace { x, g, .. } = workspace;
    function.gradient_into(x, g)?;
    Ok(&workspace.g)
}

/// Writes a central finite-difference gradient at the workspace iterate.
///
/// Both perturbation buffers start equal to x and are restored after every
/// coordinate, so each partial derivative perturbs exactly one coordinate.
pub fn finite_difference_gradient<'a, T, F>(
    function: &F,
    workspace: &'a mut GradientWorkspace<T>,
    step: T,
) -> Result<&'a DVector<T>>
where
    T: Scalar,
    F: SmoothFunction<T> + ?Sized,
{
    let GradientWorkspace {
        x,
        g,
        x_plus_dx,
        x_minus_dx,
        ..
    } = workspace;

    FunctionError::check_dimension(x.len(), g.len())?;
    x_plus_dx.copy_from(x);
    x_minus_dx.copy_from(x);
    let two_h = step + step;

    for i in 0..x.len() {
        x_plus_dx[i] += step;
        x_minus_dx[i] -= step;

        let f_plus = function.evaluate(x_plus_dx)?;
        let f_minus = function.evaluate(x_minus_dx)?;
        g[i] = (f_plus - f_minus) / two_h;

        x_plus_dx[i] = x[i];
        x_minus_dx[i] = x[i];
    }

    Ok(&workspace.g)
}

/// Sets the descent direction to the antigradient, d = −g.
pub fn steepest_descent_direction<T>(workspace: &mut GradientWorkspace<T>)
where
    T: Scalar,
{
    let GradientWorkspace { g, d, .. } = workspace;
    d.copy_from(g);
    d.neg_mut();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        quadratic::Quadratic,
        smooth_function::{CountingFunction, FnFunction},
        types::DMatrix,
    };
    use approx::assert_relative_eq;

    fn quadratic() -> Quadratic<f64> {
        Quadratic::new(DMatrix::from_row_slice(2, 2, &[3.0, 1.0, 1.0, 2.0])).unwrap()
    }

    #[test]
    fn test_analytic_matches_finite_difference() {
        let f = quadratic();
        let x0 = DVector::from_vec(vec![0.7, -1.3]);

        let mut ws = GradientWorkspace::new(x0.clone());
        let analytic = analytic_gradient(&f, &mut ws).unwrap().clone();

        let mut ws = GradientWorkspace::new(x0);
        let fd = finite_difference_gradient(&f, &mut ws, 1e-4).unwrap();

        for i in 0..2 {
            assert_relative_eq!(analytic[i], fd[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_finite_difference_evaluation_count() {
        let f = CountingFunction::new(quadratic());
        let mut ws = GradientWorkspace::new(DVector::from_vec(vec![1.0, 1.0]));

        finite_difference_gradient(&f, &mut ws, 1e-4).unwrap();
        assert_eq!(f.evaluations(), 4);
        assert_eq!(f.gradient_evaluations(), 0);
    }

    #[test]
    fn test_perturbation_buffers_restored() {
        let f = FnFunction::new(|x: &DVector<f64>| x[0] * x[1] + x[2].powi(2));
        let x0 = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let mut ws = GradientWorkspace::new(x0.clone());

        let g = finite_difference_gradient(&f, &mut ws, 1e-4).unwrap().clone();
        assert_relative_eq!(g[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(g[1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(g[2], 6.0, epsilon = 1e-6);

        assert_eq!(ws.x_plus_dx, x0);
        assert_eq!(ws.x_minus_dx, x0);
        assert_eq!(ws.point(), &x0);
    }

    #[test]
    fn test_compute_gradient_dispatch() {
        let f = FnFunction::new(|x: &DVector<f64>| x.norm_squared());
        let mut ws = GradientWorkspace::new(DVector::from_vec(vec![1.0]));

        assert!(compute_gradient(&f, &mut ws, GradientMethod::FiniteDifference, 1e-4).is_ok());
        let err = compute_gradient(&f, &mut ws, GradientMethod::Analytic, 1e-4).unwrap_err();
        assert!(matches!(err, FunctionError::NotImplemented { .. }));
    }

    #[test]
    fn test_steepest_descent_direction() {
        let f = quadratic();
        let mut ws = GradientWorkspace::new(DVector::from_vec(vec![1.0, 2.0]));
        analytic_gradient(&f, &mut ws).unwrap();
        steepest_descent_direction(&mut ws);

        assert_eq!(ws.direction(), &(-ws.gradient()));
        assert!(ws.gradient().dot(ws.direction()) < 0.0);
    }
}
