//! Optimization building blocks: gradients, line search, callbacks and results.

pub mod callback;
pub mod gradient;
pub mod line_search;
pub mod optimizer;

// Re-export key items
pub use callback::{
    HistoryCallback, IterationInfo, NoOpCallback, OptimizationCallback, OptimizationSummary,
    PrintProgressCallback,
};
pub use gradient::{
    analytic_gradient, compute_gradient, finite_difference_gradient, steepest_descent_direction,
    GradientMethod,
};
pub use line_search::{ArmijoLineSearch, ArmijoParams, LineSearchResult};
pub use optimizer::{OptimizationResult, TerminationReason};
