/// Error configurations to simulate.
///
/// Three ways to pick them, in order of precedence:
///   - Fixed: one explicit assignment
///   - Exhaustive: every `(site, error)` pair on both logical qubits
///   - Probabilistic: `iterations` random draws from [`ErrorWeights`]
///
/// Randomness always comes from a caller-supplied RNG.
use super::assignment::{ErrorAssignment, SiteError};
use super::scheme::CorrectionScheme;
use crate::core::{ErrorType, ErrorTypeSampler, ErrorWeights};
use crate::error::Result;
use rand::Rng;
use std::fmt;
use tracing::warn;

// ── Exhaustive ────────────────────────────────────────────────────────────

/// Every single-site error on one logical qubit, site-major.
fn site_errors(scheme: CorrectionScheme) -> Vec<SiteError> {
    (0..scheme.error_sites())
        .flat_map(|site| ErrorType::ALL.map(|error| SiteError::new(site, error)))
        .collect()
}

/// All `(3k)^2` assignments for a scheme with `k` error sites.
pub fn exhaustive(scheme: CorrectionScheme) -> Vec<ErrorAssignment> {
    let singles = site_errors(scheme);
    singles
        .iter()
        .flat_map(|&first| singles.iter().map(move |&second| ErrorAssignment::new(first, second)))
        .collect()
}

pub fn configuration_count(scheme: CorrectionScheme) -> usize {
    let per_group = ErrorType::ALL.len() * scheme.error_sites();
    per_group * per_group
}

// ── Probabilistic ─────────────────────────────────────────────────────────

/// Draws random assignments: per logical qubit a uniform site and a weighted
/// error type.
#[derive(Debug, Clone)]
pub struct ErrorSampler {
    sites: usize,
    errors: ErrorTypeSampler,
}

impl ErrorSampler {
    pub fn new(scheme: CorrectionScheme, weights: &ErrorWeights) -> Result<Self> {
        Ok(Self { sites: scheme.error_sites(), errors: weights.sampler()? })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ErrorAssignment {
        let first = SiteError::new(rng.gen_range(0..self.sites), self.errors.sample(rng));
        let second = SiteError::new(rng.gen_range(0..self.sites), self.errors.sample(rng));
        ErrorAssignment::new(first, second)
    }
}

// ── Run mode ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    Fixed(ErrorAssignment),
    Exhaustive,
    Probabilistic { iterations: usize, weights: ErrorWeights },
}

impl RunMode {
    /// Pick the mode from command-line style inputs.
    ///
    /// An explicit assignment wins over `try_all`, which wins over random
    /// sampling. Inputs that lose are logged and otherwise ignored. Weights
    /// are only validated when they are used.
    pub fn resolve(
        fixed: Option<ErrorAssignment>,
        try_all: bool,
        iterations: Option<usize>,
        weights: Option<[f64; 3]>,
    ) -> Result<Self> {
        if let Some(assignment) = fixed {
            if try_all {
                warn!("--try-all ignored: an explicit error was given");
            }
            Self::warn_unused_sampling(iterations, weights);
            return Ok(Self::Fixed(assignment));
        }
        if try_all {
            Self::warn_unused_sampling(iterations, weights);
            return Ok(Self::Exhaustive);
        }
        let weights = match weights {
            Some([i, x, z]) => ErrorWeights::new(i, x, z)?,
            None => ErrorWeights::uniform(),
        };
        Ok(Self::Probabilistic { iterations: iterations.unwrap_or(1), weights })
    }

    fn warn_unused_sampling(iterations: Option<usize>, weights: Option<[f64; 3]>) {
        if let Some(iterations) = iterations {
            warn!(iterations, "--iterations ignored outside probabilistic mode");
        }
        if let Some(weights) = weights {
            warn!(?weights, "--probabilities ignored outside probabilistic mode");
        }
    }

    /// Number of runs this mode plans for `scheme`.
    pub fn run_count(&self, scheme: CorrectionScheme) -> usize {
        match self {
            Self::Fixed(_) => 1,
            Self::Exhaustive => configuration_count(scheme),
            Self::Probabilistic { iterations, .. } => *iterations,
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(a)                              => write!(f, "fixed {a}"),
            Self::Exhaustive                            => write!(f, "exhaustive"),
            Self::Probabilistic { iterations, weights } => write!(f, "probabilistic x{iterations} ({weights})"),
        }
    }
}
