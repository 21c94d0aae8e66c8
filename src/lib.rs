//! # bell-qec
//!
//! Bell-pair error correction circuits with exact state-vector simulation.
//!
//! ## Quick Start
//!
//! ```rust
//! use bell_qec::{CancelToken, CorrectionScheme, ExperimentConfig, RunMode};
//!
//! // Every single-error configuration of the three-qubit repetition code
//! let config = ExperimentConfig::new(CorrectionScheme::Repetition, RunMode::Exhaustive)
//!     .with_shots(100)
//!     .with_seed(7);
//!
//! let report = bell_qec::runtime::run(&config, &CancelToken::new()).unwrap();
//!
//! // Every error was corrected: the Bell pair always reads 00
//! assert_eq!(report.counts.get("00"), 81 * 100);
//! ```

pub mod circuit;
pub mod cli;
pub mod core;
pub mod error;
pub mod qec;
pub mod runtime;

pub use circuit::{Circuit, CircuitBuilder, Gate};
pub use core::{Distribution, ErrorType, ErrorWeights, Simulator};
pub use error::{QecError, Result};
pub use qec::{CorrectionScheme, ErrorAssignment, RunMode, SiteError};
pub use runtime::{CancelToken, ExperimentConfig, Histogram, RunReport};
