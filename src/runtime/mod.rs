/// Experiment runtime.
///
/// Sits above the scheme and simulator layers and handles:
///   - lazy planning of runs from a seed
///   - parallel simulation of distinct error configurations
///   - shot sampling and histogram aggregation
///
/// Architecture:
///   CorrectionScheme + RunMode → plan → Circuit per configuration →
///   Simulator → Distribution → shots → RunReport
pub mod executor;
pub mod histogram;
pub mod report;

pub use executor::{plan, run, CancelToken, ExperimentConfig, Plan, PlannedRun, DEFAULT_SHOTS, PLAN_CHUNK};
pub use histogram::Histogram;
pub use report::RunReport;
