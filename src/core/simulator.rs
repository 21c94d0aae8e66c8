/// Exact state-vector execution of a [`Circuit`].
///
/// `Simulator` wraps the state vector behind a chainable gate API and adds:
///   - whole-circuit execution with a unit-norm check at the end
///   - readout as an exact [`Distribution`] over the measured qubits, every
///     other qubit traced out
///   - shot sampling from that distribution with a caller-supplied RNG
///
/// Measurements do not collapse the state. The correction circuits only
/// measure at the very end, so the pre-measurement distribution is the
/// outcome distribution.
use super::gates::{self, apply_cnot, apply_single_qubit_gate, apply_toffoli};
use super::noise::ErrorType;
use super::state::StateVector;
use crate::circuit::{Circuit, Gate};
use crate::error::{QecError, Result};
use crate::runtime::Histogram;
use rand::distributions::{Distribution as _, WeightedIndex};
use rand::Rng;

/// Probabilities below this are treated as numerical noise.
const PROBABILITY_FLOOR: f64 = 1e-12;

pub struct Simulator {
    pub state: StateVector,
}

impl Simulator {
    /// Create a simulator for `num_qubits` qubits, initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self { state: StateVector::new(num_qubits) }
    }

    pub fn num_qubits(&self) -> usize {
        self.state.num_qubits
    }

    // ── Gates ─────────────────────────────────────────────────────────────

    pub fn h(&mut self, qubit: usize) -> &mut Self {
        apply_single_qubit_gate(&mut self.state, &gates::hadamard(), qubit);
        self
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> &mut Self {
        apply_cnot(&mut self.state, control, target);
        self
    }

    pub fn toffoli(&mut self, control0: usize, control1: usize, target: usize) -> &mut Self {
        apply_toffoli(&mut self.state, control0, control1, target);
        self
    }

    pub fn error(&mut self, qubit: usize, error: ErrorType) -> &mut Self {
        error.apply(&mut self.state, qubit);
        self
    }

    /// Apply one circuit instruction. Barriers, error slots and
    /// measurements leave the state untouched.
    ///
    /// Debug builds check the unit norm after every instruction; release
    /// builds only check once per circuit in [`Simulator::execute`].
    pub fn apply(&mut self, gate: &Gate) -> &mut Self {
        match gate {
            Gate::H(q)                                   => self.h(*q),
            Gate::Cnot { control, target }               => self.cnot(*control, *target),
            Gate::Toffoli { control0, control1, target } => self.toffoli(*control0, *control1, *target),
            Gate::Error { qubit, error }                 => self.error(*qubit, *error),
            Gate::ErrorSlot { .. } | Gate::Measure { .. } | Gate::Barrier => self,
        };
        debug_assert!(
            self.state.is_normalized(),
            "state lost unit norm after {}",
            gate.mnemonic()
        );
        self
    }

    // ── Readout ───────────────────────────────────────────────────────────

    /// Probabilities of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.amplitudes.iter().map(|a| a.norm_sq()).collect()
    }

    /// Fail with [`QecError::NormViolation`] if the state lost unit norm.
    pub fn check_norm(&self) -> Result<()> {
        if self.state.is_normalized() {
            Ok(())
        } else {
            Err(QecError::NormViolation { norm: self.state.total_probability() })
        }
    }

    /// Joint distribution of `qubits` in the current state.
    pub fn distribution(&self, qubits: &[usize]) -> Distribution {
        Distribution::new(self.state.marginal_distribution(qubits))
    }

    /// Run `circuit` from |0...0⟩ and return its readout distribution.
    pub fn execute(circuit: &Circuit) -> Result<Distribution> {
        let mut sim = Simulator::new(circuit.num_qubits());
        for gate in circuit.gates() {
            sim.apply(gate);
        }
        sim.check_norm()?;
        Ok(sim.distribution(&circuit.readout_qubits()))
    }
}

// ── Distribution ──────────────────────────────────────────────────────────

/// Exact outcome distribution over `num_bits` classical bits.
///
/// Index `k` holds the probability that bit `j` reads bit `j` of `k`.
/// Bitstrings are written with the highest classical bit first, so for two
/// bits the label is `c1 c0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    num_bits: usize,
    probs: Vec<f64>,
}

impl Distribution {
    /// Build from raw probabilities, clamping numerical noise to zero.
    pub fn new(probs: Vec<f64>) -> Self {
        assert!(probs.len().is_power_of_two(), "distribution length must be 2^n");
        let num_bits = probs.len().trailing_zeros() as usize;
        let probs = probs
            .into_iter()
            .map(|p| if p < PROBABILITY_FLOOR { 0.0 } else { p })
            .collect();
        Self { num_bits, probs }
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Bitstring label of outcome `index`.
    pub fn label(&self, index: usize) -> String {
        format!("{:0>width$b}", index, width = self.num_bits)
    }

    /// Probability of the outcome written as `bitstring`; zero if unknown.
    pub fn probability(&self, bitstring: &str) -> f64 {
        if bitstring.len() != self.num_bits {
            return 0.0;
        }
        usize::from_str_radix(bitstring, 2)
            .ok()
            .and_then(|i| self.probs.get(i).copied())
            .unwrap_or(0.0)
    }

    /// Outcomes with non-zero probability, in index order.
    pub fn outcomes(&self) -> Vec<(String, f64)> {
        self.probs
            .iter()
            .enumerate()
            .filter(|(_, &p)| p > 0.0)
            .map(|(i, &p)| (self.label(i), p))
            .collect()
    }

    /// True if a single outcome carries all the probability mass.
    pub fn is_deterministic(&self) -> bool {
        self.probs.iter().filter(|&&p| p > 0.0).count() == 1
    }

    /// Draw `shots` outcomes.
    pub fn sample<R: Rng + ?Sized>(&self, shots: u64, rng: &mut R) -> Result<Histogram> {
        let index = WeightedIndex::new(&self.probs).map_err(|_| QecError::NormViolation {
            norm: self.probs.iter().sum(),
        })?;
        let mut counts = vec![0u64; self.probs.len()];
        for _ in 0..shots {
            counts[index.sample(rng)] += 1;
        }
        let mut histogram = Histogram::new();
        for (i, count) in counts.into_iter().enumerate() {
            if count > 0 {
                histogram.record(self.label(i), count);
            }
        }
        Ok(histogram)
    }
}
