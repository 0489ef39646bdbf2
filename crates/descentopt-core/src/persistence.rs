//! Storage of quadratic forms.
//!
//! A [`Quadratic`] is stored as a JSON document holding its dimension and the
//! rows of Q:
//!
//! ```json
//! { "dimension": 2, "rows": [[2.0, 1.0], [1.0, 3.0]] }
//! ```
//!
//! Floats are written with shortest round-trip formatting and parsed with
//! `serde_json`'s exact float parser, so every entry is restored bit for bit.
//! Loading always goes through [`Quadratic::new`], which re-checks positive
//! definiteness.

use crate::core::{
    error::FunctionError,
    quadratic::Quadratic,
    types::{DMatrix, Scalar},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while storing or loading a quadratic form.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed document.
    #[error("Format error: {0}")]
    Format(#[from] serde_json::Error),

    /// Well-formed document describing an invalid quadratic form.
    #[error("Invalid quadratic form: {0}")]
    Invalid(#[from] FunctionError),
}

/// Result type alias for persistence operations.
pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

#[derive(Debug, Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
struct QuadraticRecord<T> {
    dimension: usize,
    rows: Vec<Vec<T>>,
}

impl<T: Scalar> QuadraticRecord<T> {
    fn from_quadratic(function: &Quadratic<T>) -> Self {
        let q = function.matrix();
        Self {
            dimension: function.size(),
            rows: q
                .row_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
        }
    }

    fn into_quadratic(self) -> PersistenceResult<Quadratic<T>> {
        let n = self.dimension;
        FunctionError::check_dimension(n, self.rows.len())?;
        for row in &self.rows {
            FunctionError::check_dimension(n, row.len())?;
        }

        let q = DMatrix::from_fn(n, n, |i, j| self.rows[i][j]);
        Ok(Quadratic::new(q)?)
    }
}

/// Writes `function` to `writer`.
pub fn write_quadratic<T, W>(function: &Quadratic<T>, writer: W) -> PersistenceResult<()>
where
    T: Scalar + Serialize + DeserializeOwned,
    W: Write,
{
    serde_json::to_writer_pretty(writer, &QuadraticRecord::from_quadratic(function))?;
    Ok(())
}

/// Reads a quadratic form from `reader`.
///
/// # Errors
///
/// - `Format` if the document is not a quadratic record
/// - `Invalid` if the rows do not form an n×n matrix or Q is not positive definite
pub fn read_quadratic<T, R>(reader: R) -> PersistenceResult<Quadratic<T>>
where
    T: Scalar + Serialize + DeserializeOwned,
    R: Read,
{
    let record: QuadraticRecord<T> = serde_json::from_reader(reader)?;
    record.into_quadratic()
}

/// Saves `function` to the file at `path`, replacing any existing content.
pub fn save_quadratic<T, P>(function: &Quadratic<T>, path: P) -> PersistenceResult<()>
where
    T: Scalar + Serialize + DeserializeOwned,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write_quadratic(function, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Loads a quadratic form from the file at `path`.
pub fn load_quadratic<T, P>(path: P) -> PersistenceResult<Quadratic<T>>
where
    T: Scalar + Serialize + DeserializeOwned,
    P: AsRef<Path>,
{
    read_quadratic(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Quadratic<f64> {
        Quadratic::new(DMatrix::from_row_slice(
            2,
            2,
            &[2.0, 0.1 + 0.2, 0.1 + 0.2, 3.0 / 7.0 + 1.0],
        ))
        .unwrap()
    }

    #[test]
    fn test_round_trip_in_memory() {
        let f = sample();
        let mut buffer = Vec::new();
        write_quadratic(&f, &mut buffer).unwrap();

        let loaded: Quadratic<f64> = read_quadratic(buffer.as_slice()).unwrap();
        assert_eq!(loaded, f);
    }

    #[test]
    fn test_document_layout() {
        let mut buffer = Vec::new();
        write_quadratic(&Quadratic::<f64>::identity(2).unwrap(), &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["dimension"], 2);
        assert_eq!(value["rows"][0][0], 1.0);
        assert_eq!(value["rows"][0][1], 0.0);
    }

    #[test]
    fn test_load_rejects_indefinite() {
        let doc = r#"{ "dimension": 2, "rows": [[1.0, 0.0], [0.0, -1.0]] }"#;
        let err = read_quadratic::<f64, _>(doc.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Invalid(FunctionError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_load_rejects_ragged_rows() {
        let doc = r#"{ "dimension": 2, "rows": [[1.0, 0.0], [0.0]] }"#;
        let err = read_quadratic::<f64, _>(doc.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Invalid(FunctionError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));

        let doc = r#"{ "dimension": 3, "rows": [[1.0, 0.0], [0.0, 1.0]] }"#;
        assert!(read_quadratic::<f64, _>(doc.as_bytes()).is_err());
    }

    #[test]
    fn test_load_rejects_malformed_document() {
        let err = read_quadratic::<f64, _>("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, PersistenceError::Format(_)));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("descentopt-core-missing-quadratic.json");
        let _ = std::fs::remove_file(&path);
        let err = load_quadratic::<f64, _>(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
    }
}
