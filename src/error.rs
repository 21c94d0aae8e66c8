/// Error type shared across circuit construction, simulation and the runner.
///
/// Configuration errors (`InvalidSite`, `InvalidSiteFormat`, `UnknownGate`,
/// `InvalidWeights`) are raised while resolving a run, before any state
/// vector is allocated. `NormViolation` signals a simulator bug and is not
/// recoverable.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QecError {
    /// Error site outside `0 ..= ancillas_per_group` for the active scheme.
    #[error("site {site} is out of range for logical qubit {group}: expected 0..={max}")]
    InvalidSite { group: usize, site: usize, max: usize },

    /// Error site that is not a non-negative integer.
    #[error("invalid error site '{0}': expected a non-negative integer")]
    InvalidSiteFormat(String),

    /// `--error` given with the wrong number of coordinates.
    #[error("expected 4 error coordinates <site_1> <gate_1> <site_2> <gate_2>, got {0}")]
    ErrorArity(usize),

    /// Error gate letter other than `i`, `x` or `z`.
    #[error("unknown error gate '{0}': expected one of i, x, z")]
    UnknownGate(String),

    /// Unknown correction scheme name.
    #[error("unknown correction scheme '{0}': expected no_correction, simple, repetition_simple or shor")]
    UnknownScheme(String),

    /// Weight vector that cannot be normalized into a distribution.
    #[error("invalid error weights: {0}")]
    InvalidWeights(String),

    /// Cancellation observed at a configuration boundary.
    #[error("simulation cancelled")]
    Cancelled,

    /// State vector lost unit norm during simulation.
    #[error("state vector norm drifted to {norm:.12} (expected 1)")]
    NormViolation { norm: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QecError {
    /// True for errors caused by user-supplied run configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidSite { .. }
                | Self::InvalidSiteFormat(_)
                | Self::ErrorArity(_)
                | Self::UnknownGate(_)
                | Self::UnknownScheme(_)
                | Self::InvalidWeights(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, QecError>;
