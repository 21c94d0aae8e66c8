/// Circuit instructions.
///
/// One enum variant per operation, qubit indices as `usize` into the
/// register described by [`RegisterLayout`](super::RegisterLayout).
/// `Barrier` and `ErrorSlot` have no quantum effect: the first separates
/// circuit stages when printed, the second marks where errors are injected
/// in a symbolic (printed) circuit.
use crate::core::ErrorType;

#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    // ── Single-qubit gates ──────────────────────────────────────────────
    H(usize),

    // ── Controlled gates ────────────────────────────────────────────────
    Cnot    { control: usize, target: usize },
    Toffoli { control0: usize, control1: usize, target: usize },

    // ── Errors ──────────────────────────────────────────────────────────
    /// Injected error operator.
    Error { qubit: usize, error: ErrorType },
    /// Placeholder for "one error somewhere on these qubits".
    ErrorSlot { group: usize, qubits: Vec<usize> },

    // ── Readout ─────────────────────────────────────────────────────────
    Measure { qubit: usize, clbit: usize },

    Barrier,
}

impl Gate {
    /// Mnemonic name used in printed circuits.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::H(_)              => "H",
            Self::Cnot { .. }       => "CNOT",
            Self::Toffoli { .. }    => "CCX",
            Self::Error { .. }      => "ERR",
            Self::ErrorSlot { .. }  => "ERR",
            Self::Measure { .. }    => "MEASURE",
            Self::Barrier           => "BARRIER",
        }
    }

    /// True if this instruction is a unitary gate of the correction network.
    pub fn is_gate(&self) -> bool {
        matches!(self, Self::H(_) | Self::Cnot { .. } | Self::Toffoli { .. })
    }

    pub fn is_measurement(&self) -> bool {
        matches!(self, Self::Measure { .. })
    }

    /// Qubit indices touched by this instruction, controls first.
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Self::H(q)                                        => vec![*q],
            Self::Cnot { control, target }                    => vec![*control, *target],
            Self::Toffoli { control0, control1, target }      => vec![*control0, *control1, *target],
            Self::Error { qubit, .. } | Self::Measure { qubit, .. } => vec![*qubit],
            Self::ErrorSlot { qubits, .. }                    => qubits.clone(),
            Self::Barrier                                     => vec![],
        }
    }

    /// Render with qubit names produced by `label`.
    pub fn render(&self, label: impl Fn(usize) -> String) -> String {
        match self {
            Self::Error { qubit, error } => format!("ERR({error}) {}", label(*qubit)),
            Self::ErrorSlot { group, qubits } => {
                let names: Vec<String> = qubits.iter().map(|q| label(*q)).collect();
                format!("ERR[{}] {}", group + 1, names.join(" "))
            }
            Self::Measure { qubit, clbit } => format!("MEASURE {} -> c{clbit}", label(*qubit)),
            Self::Barrier => "BARRIER".to_string(),
            gate => {
                let names: Vec<String> = gate.qubits().into_iter().map(label).collect();
                format!("{} {}", gate.mnemonic(), names.join(" "))
            }
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(|q| q.to_string()))
    }
}
