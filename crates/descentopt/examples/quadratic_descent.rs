//! Example: steepest descent on an ill-conditioned quadratic form
//!
//! Minimizes f(x) = xᵀQx for a 3×3 positive-definite Q, once with the exact
//! gradient and once with central finite differences, then stores Q on disk
//! and checks that the reloaded function behaves identically.

use descentopt::prelude::*;
use std::error::Error;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    println!("Steepest Descent with Armijo Backtracking");
    println!("=========================================\n");

    let q = DMatrix::from_row_slice(
        3,
        3,
        &[
            2.25144, 0.94941, -0.972442, //
            0.94941, 2.51176, 1.57232, //
            -0.972442, 1.57232, 2.2813,
        ],
    );
    let f = Quadratic::new(q)?;
    let x0 = DVector::from_vec(vec![1.0, 1.0, 1.0]);
    let params = ArmijoParams::new(1.0, 0.5, 0.1);

    println!("Q = {}", f.matrix());
    println!("f(x0) = {:.6}\n", f.evaluate(&x0)?);

    for analytic in [true, false] {
        let label = if analytic { "analytic" } else { "finite differences" };
        println!("--- Gradient: {} ---", label);

        let result = minimize(
            &f,
            x0.clone(),
            params,
            MinimizeOptions::new()
                .with_analytic_gradient(analytic)
                .with_verbose(true),
        )?;

        println!("Termination:          {:?}", result.termination_reason);
        println!("Iterations:           {}", result.iterations);
        println!("Function evaluations: {}", result.function_evaluations);
        println!(
            "Final point:          [{:.6}, {:.6}, {:.6}]",
            result.point[0], result.point[1], result.point[2]
        );
        println!("Final value:          {:.3e}", result.value);
        println!("Gradient inf-norm:    {:.3e}", result.gradient_norm);
        println!("Elapsed:              {:?}\n", result.duration);
    }

    let path = std::env::temp_dir().join("descentopt-quadratic.json");
    save_quadratic(&f, &path)?;
    let loaded: Quadratic<f64> = load_quadratic(&path)?;
    std::fs::remove_file(&path)?;

    println!("Stored and reloaded Q via {}", path.display());
    println!(
        "f(x0) before: {:.12}, after: {:.12}",
        f.evaluate(&x0)?,
        loaded.evaluate(&x0)?
    );

    Ok(())
}
