/// Single-qubit error operators and the weights used to sample them.
///
/// | Error      | Operator | Effect on the prepared states     |
/// |------------|----------|-----------------------------------|
/// | Identity   | I        | none                              |
/// | BitFlip    | X        | |0⟩ ↔ |1⟩, leaves |+⟩ unchanged  |
/// | PhaseFlip  | Z        | |+⟩ ↔ |−⟩, leaves |0⟩ unchanged  |
///
/// Errors are applied deterministically: the enumerator decides which error
/// lands where, and the simulator applies it as an ordinary gate.
use super::gates::{apply_phase_flip, apply_x, identity, pauli_x, pauli_z, Matrix2x2};
use super::state::StateVector;
use crate::error::{QecError, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

// ── ErrorType ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorType {
    Identity,
    BitFlip,
    PhaseFlip,
}

impl ErrorType {
    /// All error types in enumeration order.
    pub const ALL: [ErrorType; 3] = [ErrorType::Identity, ErrorType::BitFlip, ErrorType::PhaseFlip];

    /// Gate letter used on the command line and in error keys.
    pub fn letter(&self) -> char {
        match self {
            Self::Identity  => 'i',
            Self::BitFlip   => 'x',
            Self::PhaseFlip => 'z',
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// The Pauli operator of this error.
    pub fn matrix(&self) -> Matrix2x2 {
        match self {
            Self::Identity  => identity(),
            Self::BitFlip   => pauli_x(),
            Self::PhaseFlip => pauli_z(),
        }
    }

    /// Apply this error to `qubit` in `state`.
    pub fn apply(&self, state: &mut StateVector, qubit: usize) {
        match self {
            Self::Identity  => {}
            Self::BitFlip   => apply_x(state, qubit),
            Self::PhaseFlip => apply_phase_flip(state, qubit),
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for ErrorType {
    type Err = QecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i" => Ok(Self::Identity),
            "x" => Ok(Self::BitFlip),
            "z" => Ok(Self::PhaseFlip),
            _   => Err(QecError::UnknownGate(s.to_string())),
        }
    }
}

// ── ErrorWeights ───────────────────────────────────────────────────────────

/// Relative weights `(p_i, p_x, p_z)` for sampling an [`ErrorType`].
///
/// Weights are normalized on construction; they need not sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorWeights {
    identity: f64,
    bit_flip: f64,
    phase_flip: f64,
}

impl ErrorWeights {
    pub fn new(identity: f64, bit_flip: f64, phase_flip: f64) -> Result<Self> {
        let weights = [identity, bit_flip, phase_flip];
        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(QecError::InvalidWeights(format!(
                "weight {w} is not a finite non-negative number"
            )));
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(QecError::InvalidWeights("weights sum to zero".to_string()));
        }
        Ok(Self {
            identity: identity / total,
            bit_flip: bit_flip / total,
            phase_flip: phase_flip / total,
        })
    }

    /// Equal probability for each error type.
    pub fn uniform() -> Self {
        let third = 1.0 / 3.0;
        Self {
            identity: third,
            bit_flip: third,
            phase_flip: third,
        }
    }

    /// Normalized probability of `error`.
    pub fn probability(&self, error: ErrorType) -> f64 {
        match error {
            ErrorType::Identity  => self.identity,
            ErrorType::BitFlip   => self.bit_flip,
            ErrorType::PhaseFlip => self.phase_flip,
        }
    }

    /// Sampler over [`ErrorType::ALL`] with these weights.
    pub fn sampler(&self) -> Result<ErrorTypeSampler> {
        let probs = ErrorType::ALL.map(|e| self.probability(e));
        let index = WeightedIndex::new(probs)
            .map_err(|e| QecError::InvalidWeights(e.to_string()))?;
        Ok(ErrorTypeSampler { index })
    }
}

impl Default for ErrorWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

impl fmt::Display for ErrorWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "i={:.3} x={:.3} z={:.3}",
            self.identity, self.bit_flip, self.phase_flip
        )
    }
}

/// Draws [`ErrorType`]s according to a fixed set of [`ErrorWeights`].
#[derive(Debug, Clone)]
pub struct ErrorTypeSampler {
    index: WeightedIndex<f64>,
}

impl ErrorTypeSampler {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ErrorType {
        ErrorType::ALL[self.index.sample(rng)]
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gates::{apply_single_qubit_gate, hadamard};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_letters() {
        assert_eq!("i".parse::<ErrorType>().unwrap(), ErrorType::Identity);
        assert_eq!("X".parse::<ErrorType>().unwrap(), ErrorType::BitFlip);
        assert_eq!(" z ".parse::<ErrorType>().unwrap(), ErrorType::PhaseFlip);
    }

    #[test]
    fn test_parse_rejects_unknown_letter() {
        for bad in ["y", "", "xz", "1"] {
            match bad.parse::<ErrorType>() {
                Err(QecError::UnknownGate(g)) => assert_eq!(g, bad),
                other => panic!("expected UnknownGate for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_letter_round_trip() {
        for e in ErrorType::ALL {
            assert_eq!(e.to_string().parse::<ErrorType>().unwrap(), e);
        }
    }

    #[test]
    fn test_apply_matches_matrix() {
        for e in ErrorType::ALL {
            let mut a = StateVector::new(2);
            apply_single_qubit_gate(&mut a, &hadamard(), 1);
            apply_single_qubit_gate(&mut a, &hadamard(), 0);
            let mut b = a.clone();
            e.apply(&mut a, 1);
            apply_single_qubit_gate(&mut b, &e.matrix(), 1);
            assert_eq!(a.amplitudes, b.amplitudes, "mismatch for {e:?}");
        }
    }

    #[test]
    fn test_bit_flip_leaves_plus_unchanged() {
        let mut state = StateVector::new(1);
        apply_single_qubit_gate(&mut state, &hadamard(), 0);
        let before = state.amplitudes.clone();
        ErrorType::BitFlip.apply(&mut state, 0);
        assert_eq!(state.amplitudes, before);
    }

    #[test]
    fn test_weights_are_normalized() {
        let w = ErrorWeights::new(2.0, 1.0, 1.0).unwrap();
        assert!((w.probability(ErrorType::Identity) - 0.5).abs() < 1e-12);
        assert!((w.probability(ErrorType::BitFlip) - 0.25).abs() < 1e-12);
        assert!((w.probability(ErrorType::PhaseFlip) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_weights_reject_invalid() {
        assert!(matches!(ErrorWeights::new(0.0, 0.0, 0.0), Err(QecError::InvalidWeights(_))));
        assert!(matches!(ErrorWeights::new(-1.0, 1.0, 1.0), Err(QecError::InvalidWeights(_))));
        assert!(matches!(ErrorWeights::new(f64::NAN, 1.0, 1.0), Err(QecError::InvalidWeights(_))));
    }

    #[test]
    fn test_sampler_honours_zero_weights() {
        let sampler = ErrorWeights::new(0.0, 1.0, 0.0).unwrap().sampler().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(sampler.sample(&mut rng), ErrorType::BitFlip);
        }
    }

    #[test]
    fn test_uniform_sampler_hits_every_type() {
        let sampler = ErrorWeights::uniform().sampler().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [0usize; 3];
        for _ in 0..3000 {
            let e = sampler.sample(&mut rng);
            seen[ErrorType::ALL.iter().position(|x| *x == e).unwrap()] += 1;
        }
        for count in seen {
            assert!(count > 800 && count < 1200, "unbalanced sampling: {seen:?}");
        }
    }
}
