/// Quantum state vector representation.
///
/// An n-qubit register has 2^n basis states, one complex amplitude each.
/// Qubit 0 is the least-significant bit of the basis index.
/// The vector must satisfy the normalization constraint: Σ|αᵢ|² = 1
use super::complex::Complex;

/// Largest register the simulator will allocate (16 GiB of amplitudes).
pub const MAX_QUBITS: usize = 30;

/// Tolerance for the unit-norm invariant.
pub const NORM_TOLERANCE: f64 = 1e-9;

#[derive(Clone)]
pub struct StateVector {
    pub num_qubits: usize,
    pub amplitudes: Vec<Complex>,
}

impl StateVector {
    /// Create a new state vector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        assert!(num_qubits >= 1, "at least one qubit required");
        assert!(num_qubits <= MAX_QUBITS, "num_qubits > {MAX_QUBITS} is not supported");

        let dim = 1 << num_qubits;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::one();

        Self {
            num_qubits,
            amplitudes,
        }
    }

    /// Dimension of the state space: 2^n
    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Probability of measuring basis state at index `i`: |αᵢ|²
    #[inline(always)]
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes[index].norm_sq()
    }

    /// Total probability (≈ 1.0 for any state reachable by unitary gates).
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sq()).sum()
    }

    /// True if the total probability is within [`NORM_TOLERANCE`] of one.
    pub fn is_normalized(&self) -> bool {
        (self.total_probability() - 1.0).abs() < NORM_TOLERANCE
    }

    /// Check if this qubit's bit is set in basis state index `basis_idx`.
    #[inline(always)]
    pub fn qubit_bit(basis_idx: usize, qubit: usize) -> bool {
        (basis_idx >> qubit) & 1 == 1
    }

    /// Joint distribution of `qubits`, every other qubit traced out.
    ///
    /// Entry `k` of the result is the probability that `qubits[j]` reads bit
    /// `j` of `k` for every `j`.
    pub fn marginal_distribution(&self, qubits: &[usize]) -> Vec<f64> {
        assert!(
            qubits.iter().all(|&q| q < self.num_qubits),
            "marginal qubit out of range"
        );
        let mut probs = vec![0.0; 1 << qubits.len()];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sq();
            if p == 0.0 {
                continue;
            }
            let outcome = qubits
                .iter()
                .enumerate()
                .fold(0usize, |acc, (j, &q)| acc | (((i >> q) & 1) << j));
            probs[outcome] += p;
        }
        probs
    }
}
