//! File round trips for stored quadratic forms.

#![cfg(feature = "serde")]

use descentopt_core::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("descentopt-core-{}-{}.json", name, std::process::id()))
}

fn ill_conditioned_3x3() -> Quadratic<f64> {
    Quadratic::new(DMatrix::from_row_slice(
        3,
        3,
        &[
            2.25144, 0.94941, -0.972442, //
            0.94941, 2.51176, 1.57232, //
            -0.972442, 1.57232, 2.2813,
        ],
    ))
    .unwrap()
}

#[test]
fn test_save_then_load_preserves_function() {
    let f = ill_conditioned_3x3();
    let path = temp_path("round-trip");

    save_quadratic(&f, &path).unwrap();
    let loaded: Quadratic<f64> = load_quadratic(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, f);

    let probes = [
        DVector::from_vec(vec![1.0, 1.0, 1.0]),
        DVector::from_vec(vec![-0.3, 2.5, 1e-3]),
        DVector::from_vec(vec![0.287, -0.325, 0.346]),
        DVector::zeros(3),
    ];
    for x in &probes {
        assert_eq!(loaded.evaluate(x).unwrap(), f.evaluate(x).unwrap());
    }
}

#[test]
fn test_save_overwrites_existing_file() {
    let path = temp_path("overwrite");

    save_quadratic(&ill_conditioned_3x3(), &path).unwrap();
    save_quadratic(&Quadratic::<f64>::identity(2).unwrap(), &path).unwrap();
    let loaded: Quadratic<f64> = load_quadratic(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.size(), 2);
    assert_eq!(loaded, Quadratic::identity(2).unwrap());
}

#[test]
fn test_load_revalidates_matrix() {
    let path = temp_path("indefinite");
    std::fs::write(
        &path,
        r#"{ "dimension": 2, "rows": [[1.0, 2.0], [2.0, 1.0]] }"#,
    )
    .unwrap();

    let err = load_quadratic::<f64, _>(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();

    match err {
        PersistenceError::Invalid(FunctionError::InvalidInput { reason }) => {
            assert_eq!(reason, "matrix not positive definite");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_loaded_function_minimizes_like_saved() {
    let f = ill_conditioned_3x3();
    let path = temp_path("descent");
    save_quadratic(&f, &path).unwrap();
    let loaded: Quadratic<f64> = load_quadratic(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let x0 = DVector::from_vec(vec![1.0, 1.0, 1.0]);
    let params = ArmijoParams::default();

    let mut saved_ws = GradientWorkspace::new(x0.clone());
    let mut loaded_ws = GradientWorkspace::new(x0.clone());
    let mut saved_value = f.evaluate(&x0).unwrap();
    let mut loaded_value = loaded.evaluate(&x0).unwrap();

    for _ in 0..10 {
        analytic_gradient(&f, &mut saved_ws).unwrap();
        steepest_descent_direction(&mut saved_ws);
        saved_value = ArmijoLineSearch::search(&f, &mut saved_ws, saved_value, &params)
            .unwrap()
            .new_value;

        analytic_gradient(&loaded, &mut loaded_ws).unwrap();
        steepest_descent_direction(&mut loaded_ws);
        loaded_value = ArmijoLineSearch::search(&loaded, &mut loaded_ws, loaded_value, &params)
            .unwrap()
            .new_value;
    }

    assert_eq!(loaded_value, saved_value);
    assert_eq!(loaded_ws.point(), saved_ws.point());
}
