//! Error types for function evaluation and optimization.
//!
//! This module defines the error types used throughout the library for
//! function construction, evaluation and the optimization loop itself.
//! Reaching the iteration budget is not an error: it is reported through
//! [`TerminationReason`](crate::optimization::optimizer::TerminationReason).

use thiserror::Error;

/// Errors that can occur while constructing or evaluating a smooth function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    /// The input supplied to a constructor is not acceptable.
    ///
    /// This error occurs, for instance, when a quadratic form is built from a
    /// matrix that is not positive definite. No instance is produced.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of why the input is invalid
        reason: String,
    },

    /// Dimension mismatch between a vector and the function or workspace.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Method or feature not implemented.
    ///
    /// Used for optional capabilities, such as an analytic gradient, that a
    /// particular function does not provide.
    #[error("Feature not implemented: {feature}")]
    NotImplemented {
        /// Name of the unimplemented feature
        feature: String,
    },
}

impl FunctionError {
    /// Create an InvalidInput error with a custom reason.
    pub fn invalid_input<S: Into<String>>(reason: S) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create a NotImplemented error for a specific feature.
    pub fn not_implemented<S: Into<String>>(feature: S) -> Self {
        Self::NotImplemented {
            feature: feature.into(),
        }
    }

    /// Checks that `actual` equals `expected`.
    pub fn check_dimension(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::dimension_mismatch(expected, actual))
        }
    }
}

/// Errors that can occur during optimization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    /// Line search failed to find an acceptable step.
    ///
    /// This error occurs when the backtracking loop exhausts its contraction
    /// budget without satisfying the sufficient decrease condition.
    #[error("Line search failed: {reason}")]
    LineSearchFailed {
        /// Description of why the line search failed
        reason: String,
        /// Number of contractions attempted
        iterations: usize,
        /// Last step size tried
        last_step_size: f64,
        /// Function value at the starting point
        initial_value: f64,
    },

    /// Invalid optimizer configuration.
    ///
    /// This error occurs when the optimizer is configured with invalid
    /// parameters (e.g., a contraction factor outside (0, 1)).
    #[error("Invalid optimizer configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// Propagated function error.
    #[error("Function evaluation failed: {0}")]
    Function(#[from] FunctionError),

    /// Invalid search direction.
    ///
    /// This error occurs when the search direction is not a descent direction,
    /// i.e. the directional derivative is not strictly negative.
    #[error("Invalid search direction: not a descent direction")]
    InvalidSearchDirection,
}

impl OptimizerError {
    /// Create a LineSearchFailed error with detailed context.
    pub fn line_search_failed<S: Into<String>>(
        reason: S,
        iterations: usize,
        last_step_size: f64,
        initial_value: f64,
    ) -> Self {
        Self::LineSearchFailed {
            reason: reason.into(),
            iterations,
            last_step_size,
            initial_value,
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for operations that can produce FunctionError.
pub type Result<T> = std::result::Result<T, FunctionError>;

/// Result type alias for optimizer operations.
pub type OptimizerResult<T> = std::result::Result<T, OptimizerError>;
