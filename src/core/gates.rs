/// Quantum gate definitions and application logic.
///
/// Single-qubit gates are 2×2 complex matrices applied pairwise: every basis
/// state with the target bit clear is paired with its partner that has the
/// bit set, and the matrix is applied to each pair, O(2^n) per gate.
///
/// Controlled-X gates of any arity are permutations of the amplitude array
/// and are applied as swaps.
use super::complex::Complex;
use super::state::StateVector;
use std::f64::consts::FRAC_1_SQRT_2;

/// A 2×2 complex unitary matrix representing a single-qubit gate.
/// Row-major: matrix[row][col]
pub type Matrix2x2 = [[Complex; 2]; 2];

// ── Standard Gate Matrices ─────────────────────────────────────────────────

/// Hadamard gate: H = (1/√2) * [[1, 1], [1, -1]]
pub fn hadamard() -> Matrix2x2 {
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    let neg_h = Complex::new(-FRAC_1_SQRT_2, 0.0);
    [
        [h, h],
        [h, neg_h],
    ]
}

/// Pauli-X gate (bit flip): X = [[0, 1], [1, 0]]
pub fn pauli_x() -> Matrix2x2 {
    [
        [Complex::zero(), Complex::one()],
        [Complex::one(),  Complex::zero()],
    ]
}

/// Pauli-Z gate (phase flip): Z = [[1, 0], [0, -1]]
pub fn pauli_z() -> Matrix2x2 {
    [
        [Complex::one(),  Complex::zero()],
        [Complex::zero(), Complex::new(-1.0, 0.0)],
    ]
}

/// Identity gate.
pub fn identity() -> Matrix2x2 {
    [
        [Complex::one(),  Complex::zero()],
        [Complex::zero(), Complex::one()],
    ]
}

// ── Gate Application ───────────────────────────────────────────────────────

/// Apply a single-qubit gate to `target` qubit in the state vector.
pub fn apply_single_qubit_gate(state: &mut StateVector, gate: &Matrix2x2, target: usize) {
    assert!(target < state.num_qubits, "target qubit out of range");

    let dim = state.dim();
    let target_mask = 1 << target;
    for i0 in 0..dim {
        if i0 & target_mask != 0 {
            continue;
        }
        let i1 = i0 | target_mask;
        let a0 = state.amplitudes[i0];
        let a1 = state.amplitudes[i1];
        state.amplitudes[i0] = gate[0][0] * a0 + gate[0][1] * a1;
        state.amplitudes[i1] = gate[1][0] * a0 + gate[1][1] * a1;
    }
}

/// Apply a phase flip to `target`: negate every amplitude with the bit set.
///
/// Equivalent to `apply_single_qubit_gate(state, &pauli_z(), target)` but
/// touches half the amplitudes.
pub fn apply_phase_flip(state: &mut StateVector, target: usize) {
    assert!(target < state.num_qubits, "target qubit out of range");

    let target_mask = 1 << target;
    for (i, amp) in state.amplitudes.iter_mut().enumerate() {
        if i & target_mask != 0 {
            *amp = -*amp;
        }
    }
}

/// Flip `target` on every basis state where all bits of `control_mask` are set.
fn apply_controlled_x(state: &mut StateVector, control_mask: usize, target: usize) {
    let target_mask = 1 << target;
    for i in 0..state.dim() {
        if (i & control_mask == control_mask) && (i & target_mask == 0) {
            state.amplitudes.swap(i, i | target_mask);
        }
    }
}

/// Apply Pauli-X to `target` (no controls).
pub fn apply_x(state: &mut StateVector, target: usize) {
    assert!(target < state.num_qubits, "target qubit out of range");
    apply_controlled_x(state, 0, target);
}

/// Apply CNOT: flips `target` when `control` is |1⟩.
pub fn apply_cnot(state: &mut StateVector, control: usize, target: usize) {
    assert!(control < state.num_qubits, "control qubit out of range");
    assert!(target < state.num_qubits, "target qubit out of range");
    assert_ne!(control, target, "control and target must be different qubits");

    apply_controlled_x(state, 1 << control, target);
}

/// Apply Toffoli (CCNOT): flips `target` when both controls are |1⟩.
///
/// The correction circuits use it as a majority vote: with the two copies of
/// a qubit as controls, the data qubit is flipped only when both copies
/// disagree with the expected value.
pub fn apply_toffoli(state: &mut StateVector, control0: usize, control1: usize, target: usize) {
    assert!(control0 < state.num_qubits);
    assert!(control1 < state.num_qubits);
    assert!(target < state.num_qubits);
    assert!(control0 != control1 && control0 != target && control1 != target);

    apply_controlled_x(state, (1 << control0) | (1 << control1), target);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nearly_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn test_x_gate_flips_qubit() {
        let mut state = StateVector::new(1);
        apply_single_qubit_gate(&mut state, &pauli_x(), 0);
        assert!(nearly_eq(state.probability(0), 0.0));
        assert!(nearly_eq(state.probability(1), 1.0));
    }

    #[test]
    fn test_apply_x_matches_matrix() {
        let mut a = StateVector::new(3);
        let mut b = StateVector::new(3);
        apply_single_qubit_gate(&mut a, &hadamard(), 0);
        apply_single_qubit_gate(&mut b, &hadamard(), 0);
        apply_single_qubit_gate(&mut a, &pauli_x(), 2);
        apply_x(&mut b, 2);
        assert_eq!(a.amplitudes, b.amplitudes);
    }

    #[test]
    fn test_hadamard_twice_is_identity() {
        let mut state = StateVector::new(1);
        let h = hadamard();
        apply_single_qubit_gate(&mut state, &h, 0);
        assert!(nearly_eq(state.probability(0), 0.5));
        apply_single_qubit_gate(&mut state, &h, 0);
        assert!(nearly_eq(state.probability(0), 1.0));
    }

    #[test]
    fn test_phase_flip_matches_pauli_z() {
        let mut a = StateVector::new(2);
        let mut b = StateVector::new(2);
        for q in 0..2 {
            apply_single_qubit_gate(&mut a, &hadamard(), q);
            apply_single_qubit_gate(&mut b, &hadamard(), q);
        }
        apply_single_qubit_gate(&mut a, &pauli_z(), 1);
        apply_phase_flip(&mut b, 1);
        assert_eq!(a.amplitudes, b.amplitudes);
    }

    #[test]
    fn test_phase_flip_on_plus_is_detected_by_hadamard() {
        // H Z H = X: |+⟩ → |−⟩ reads as |1⟩ in the X basis
        let mut state = StateVector::new(1);
        apply_single_qubit_gate(&mut state, &hadamard(), 0);
        apply_phase_flip(&mut state, 0);
        apply_single_qubit_gate(&mut state, &hadamard(), 0);
        assert!(nearly_eq(state.probability(1), 1.0));
    }

    #[test]
    fn test_identity_is_noop() {
        let mut state = StateVector::new(1);
        apply_single_qubit_gate(&mut state, &hadamard(), 0);
        let before = state.amplitudes.clone();
        apply_single_qubit_gate(&mut state, &identity(), 0);
        assert_eq!(state.amplitudes, before);
    }

    #[test]
    fn test_bell_state_creation() {
        let mut state = StateVector::new(2);
        apply_single_qubit_gate(&mut state, &hadamard(), 0);
        apply_cnot(&mut state, 0, 1);

        assert!(nearly_eq(state.probability(0b00), 0.5));
        assert!(nearly_eq(state.probability(0b01), 0.0));
        assert!(nearly_eq(state.probability(0b10), 0.0));
        assert!(nearly_eq(state.probability(0b11), 0.5));
    }

    #[test]
    fn test_toffoli_gate() {
        let mut state = StateVector::new(3);
        apply_x(&mut state, 1);
        apply_x(&mut state, 2);
        apply_toffoli(&mut state, 1, 2, 0);
        assert!(nearly_eq(state.probability(0b111), 1.0));
    }

    #[test]
    fn test_toffoli_needs_both_controls() {
        let mut state = StateVector::new(3);
        apply_x(&mut state, 1);
        apply_toffoli(&mut state, 1, 2, 0);
        assert!(nearly_eq(state.probability(0b010), 1.0));
    }

    #[test]
    #[should_panic(expected = "control and target must be different qubits")]
    fn test_cnot_rejects_same_qubit() {
        let mut state = StateVector::new(2);
        apply_cnot(&mut state, 1, 1);
    }
}
