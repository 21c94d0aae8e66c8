/// Circuit-as-data model.
///
/// A [`Circuit`] is an immutable, ordered list of [`Gate`]s over a register
/// described by a [`RegisterLayout`]. It is produced once per
/// (scheme, error assignment) pair by a [`CircuitBuilder`] and then only
/// read: the simulator executes it, the CLI prints it.
pub mod gate;
pub mod layout;

pub use gate::Gate;
pub use layout::{Qubit, QubitRole, RegisterLayout, LOGICAL_QUBITS};

use crate::core::ErrorType;

// ── Circuit ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    layout: RegisterLayout,
    gates: Vec<Gate>,
}

impl Circuit {
    pub fn layout(&self) -> &RegisterLayout {
        &self.layout
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn num_qubits(&self) -> usize {
        self.layout.num_qubits()
    }

    /// Number of unitary gates (errors, barriers and measurements excluded).
    pub fn gate_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_gate()).count()
    }

    pub fn measure_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_measurement()).count()
    }

    /// Number of concrete (non-identity) injected errors.
    pub fn error_count(&self) -> usize {
        self.gates
            .iter()
            .filter(|g| matches!(g, Gate::Error { error, .. } if !error.is_identity()))
            .count()
    }

    /// Measured qubits ordered by classical bit, or the data qubits if the
    /// circuit has no measurements.
    pub fn readout_qubits(&self) -> Vec<usize> {
        let mut measured: Vec<(usize, usize)> = self
            .gates
            .iter()
            .filter_map(|g| match g {
                Gate::Measure { qubit, clbit } => Some((*clbit, *qubit)),
                _ => None,
            })
            .collect();
        if measured.is_empty() {
            return self.layout.data_qubits();
        }
        measured.sort_unstable();
        measured.into_iter().map(|(_, q)| q).collect()
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.num_qubits();
        let labels: Vec<String> = (0..n).map(|q| self.layout.label(q)).collect();
        writeln!(f, "QREG {n}  // {}", labels.join(" "))?;
        for gate in &self.gates {
            writeln!(f, "{}", gate.render(|q| labels[q].clone()))?;
        }
        Ok(())
    }
}

// ── CircuitBuilder ────────────────────────────────────────────────────────

/// Accumulates gates for one circuit. Indices are checked against the layout
/// as they are added.
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    layout: RegisterLayout,
    gates: Vec<Gate>,
}

impl CircuitBuilder {
    pub fn new(layout: RegisterLayout) -> Self {
        Self { layout, gates: Vec::new() }
    }

    pub fn layout(&self) -> &RegisterLayout {
        &self.layout
    }

    /// Unitary gates added so far.
    pub fn gate_count(&self) -> usize {
        self.gates.iter().filter(|g| g.is_gate()).count()
    }

    fn push(&mut self, gate: Gate) -> &mut Self {
        let n = self.layout.num_qubits();
        assert!(
            gate.qubits().iter().all(|&q| q < n),
            "{} references a qubit outside the {n}-qubit register",
            gate.mnemonic()
        );
        self.gates.push(gate);
        self
    }

    pub fn h(&mut self, qubit: usize) -> &mut Self {
        self.push(Gate::H(qubit))
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> &mut Self {
        assert_ne!(control, target, "control and target must be different qubits");
        self.push(Gate::Cnot { control, target })
    }

    pub fn toffoli(&mut self, control0: usize, control1: usize, target: usize) -> &mut Self {
        assert!(control0 != control1 && control0 != target && control1 != target);
        self.push(Gate::Toffoli { control0, control1, target })
    }

    /// Inject `error` on `qubit`. Identity errors are recorded too so the
    /// printed circuit shows every site that was considered.
    pub fn error(&mut self, qubit: usize, error: ErrorType) -> &mut Self {
        self.push(Gate::Error { qubit, error })
    }

    pub fn error_slot(&mut self, group: usize, qubits: Vec<usize>) -> &mut Self {
        self.push(Gate::ErrorSlot { group, qubits })
    }

    pub fn measure(&mut self, qubit: usize, clbit: usize) -> &mut Self {
        self.push(Gate::Measure { qubit, clbit })
    }

    pub fn barrier(&mut self) -> &mut Self {
        self.gates.push(Gate::Barrier);
        self
    }

    pub fn build(self) -> Circuit {
        Circuit { layout: self.layout, gates: self.gates }
    }
}
