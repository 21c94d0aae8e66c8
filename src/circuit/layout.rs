//! Register layout shared by every correction scheme.
//!
//! ```text
//! index 0          data qubit of logical qubit 0
//! index 1          data qubit of logical qubit 1
//! 2 .. 2+k         ancillas of logical qubit 0
//! 2+k .. 2+2k      ancillas of logical qubit 1
//! ```
//!
//! `k` is the number of ancillas per logical qubit. Within a logical qubit,
//! site 0 is the data qubit and site `s ≥ 1` is ancilla `s - 1`.

/// Number of logical qubits in the Bell pair.
pub const LOGICAL_QUBITS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QubitRole {
    Data,
    Ancilla,
}

/// A physical qubit: register index, role and owning logical qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Qubit {
    pub index: usize,
    pub role: QubitRole,
    pub group: usize,
    /// Site within the logical qubit (0 = data).
    pub site: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterLayout {
    ancillas_per_group: usize,
}

impl RegisterLayout {
    pub fn new(ancillas_per_group: usize) -> Self {
        Self { ancillas_per_group }
    }

    pub fn ancillas_per_group(&self) -> usize {
        self.ancillas_per_group
    }

    /// Total register size: 2 data qubits plus every ancilla.
    pub fn num_qubits(&self) -> usize {
        LOGICAL_QUBITS * (1 + self.ancillas_per_group)
    }

    /// Register index of the data qubit of `group`.
    pub fn data(&self, group: usize) -> usize {
        assert!(group < LOGICAL_QUBITS, "logical qubit {group} out of range");
        group
    }

    /// Register index of ancilla `i` of `group`.
    pub fn ancilla(&self, group: usize, i: usize) -> usize {
        assert!(group < LOGICAL_QUBITS, "logical qubit {group} out of range");
        assert!(i < self.ancillas_per_group, "ancilla {i} out of range");
        LOGICAL_QUBITS + group * self.ancillas_per_group + i
    }

    /// Register index of `site` within `group` (0 = data qubit).
    pub fn site(&self, group: usize, site: usize) -> usize {
        match site {
            0 => self.data(group),
            s => self.ancilla(group, s - 1),
        }
    }

    /// Data qubit indices in logical-qubit order.
    pub fn data_qubits(&self) -> Vec<usize> {
        (0..LOGICAL_QUBITS).map(|g| self.data(g)).collect()
    }

    /// Describe register index `index`.
    pub fn qubit(&self, index: usize) -> Qubit {
        assert!(index < self.num_qubits(), "qubit {index} out of range");
        if index < LOGICAL_QUBITS {
            return Qubit { index, role: QubitRole::Data, group: index, site: 0 };
        }
        let offset = index - LOGICAL_QUBITS;
        let group = offset / self.ancillas_per_group;
        let i = offset % self.ancillas_per_group;
        Qubit { index, role: QubitRole::Ancilla, group, site: i + 1 }
    }

    /// Display label: `q<group>` for data qubits, `a<group>.<i>` for ancillas.
    pub fn label(&self, index: usize) -> String {
        let q = self.qubit(index);
        match q.role {
            QubitRole::Data    => format!("q{}", q.group),
            QubitRole::Ancilla => format!("a{}.{}", q.group, q.site - 1),
        }
    }
}
