//! Callback support for optimization algorithms.
//!
//! Callbacks observe a run: they receive the iteration index, the function
//! value and the gradient infinity norm, but they cannot alter control flow.

use crate::core::types::Scalar;
use crate::optimization::optimizer::TerminationReason;

/// Snapshot passed to callbacks at every iteration.
///
/// The values describe the iterate before the step of that iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationInfo<T: Scalar> {
    /// Zero-based iteration index
    pub iteration: usize,

    /// Function value at the current iterate
    pub value: T,

    /// Gradient infinity norm at the current iterate
    pub gradient_norm: T,
}

/// Final state passed to callbacks when a run ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationSummary<T: Scalar> {
    /// Number of completed descent steps
    pub iterations: usize,

    /// Function value at the final iterate
    pub value: T,

    /// Gradient infinity norm at the final iterate
    pub gradient_norm: T,

    /// Why the run stopped
    pub termination_reason: TerminationReason,
}

/// Trait for optimization callbacks.
///
/// Callbacks can be used for progress output, recording or visualization.
pub trait OptimizationCallback<T: Scalar> {
    /// Called at the start of optimization.
    fn on_optimization_start(&mut self) {}

    /// Called once per iteration, after the gradient is known.
    fn on_iteration(&mut self, info: &IterationInfo<T>) {
        let _ = info;
    }

    /// Called at the end of optimization.
    fn on_optimization_end(&mut self, summary: &OptimizationSummary<T>) {
        let _ = summary;
    }
}

/// A no-op callback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl<T: Scalar> OptimizationCallback<T> for NoOpCallback {}

/// A callback that prints progress to stdout.
#[derive(Debug, Clone)]
pub struct PrintProgressCallback {
    print_every: usize,
}

impl PrintProgressCallback {
    /// Create a new progress printing callback.
    ///
    /// A cadence of zero is treated as one.
    pub fn new(print_every: usize) -> Self {
        Self {
            print_every: print_every.max(1),
        }
    }

    /// Reporting cadence in iterations.
    pub fn print_every(&self) -> usize {
        self.print_every
    }
}

impl<T: Scalar> OptimizationCallback<T> for PrintProgressCallback {
    fn on_optimization_start(&mut self) {
        println!("Starting optimization...");
    }

    fn on_iteration(&mut self, info: &IterationInfo<T>) {
        if info.iteration % self.print_every == 0 {
            println!(
                "Iteration {}: value = {}, gradient inf-norm = {}",
                info.iteration, info.value, info.gradient_norm
            );
        }
    }

    fn on_optimization_end(&mut self, summary: &OptimizationSummary<T>) {
        println!(
            "Optimization finished after {} iterations ({:?}). Final value: {}, gradient inf-norm: {}",
            summary.iterations, summary.termination_reason, summary.value, summary.gradient_norm
        );
    }
}

/// A callback that records every iteration.
#[derive(Debug, Clone)]
pub struct HistoryCallback<T: Scalar> {
    /// Recorded iterations, in order
    pub iterations: Vec<IterationInfo<T>>,

    /// Summary of the finished run, if any
    pub summary: Option<OptimizationSummary<T>>,
}

impl<T: Scalar> HistoryCallback<T> {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            iterations: Vec::new(),
            summary: None,
        }
    }

    /// Function values in iteration order.
    pub fn values(&self) -> Vec<T> {
        self.iterations.iter().map(|info| info.value).collect()
    }
}

impl<T: Scalar> Default for HistoryCallback<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> OptimizationCallback<T> for HistoryCallback<T> {
    fn on_optimization_start(&mut self) {
        self.iterations.clear();
        self.summary = None;
    }

    fn on_iteration(&mut self, info: &IterationInfo<T>) {
        self.iterations.push(*info);
    }

    fn on_optimization_end(&mut self, summary: &OptimizationSummary<T>) {
        self.summary = Some(*summary);
    }
}
