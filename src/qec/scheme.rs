/// Correction schemes for a two-logical-qubit Bell pair.
///
/// Every scheme emits three gate segments per logical qubit into a
/// [`CircuitBuilder`]: `encode` before the noise, `correct` and `decode`
/// after it. The full circuit is
///
/// ```text
/// H(q0) → encode → errors → correct → decode → CNOT(q0, q1) → readout
/// ```
///
/// Readout is in the Bell basis (`CNOT(q0, q1)`, `H(q0)`, measure), so a
/// clean |Φ+⟩ reads `00` with certainty.
///
/// Logical qubit 0 sits in |+⟩ when the errors land and logical qubit 1 in
/// |0⟩. Only phase flips disturb the first and only bit flips the second,
/// which is what lets the one-ancilla and two-ancilla schemes work.
use super::assignment::{ErrorAssignment, SiteError};
use crate::circuit::{Circuit, CircuitBuilder, RegisterLayout, LOGICAL_QUBITS};
use crate::error::{QecError, Result};
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

// ── Scheme ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CorrectionScheme {
    /// Bare data qubits, no ancillas.
    #[value(name = "no_correction")]
    NoCorrection,
    /// One ancilla per logical qubit; corrects a data-qubit flip.
    #[value(name = "simple")]
    SimpleParity,
    /// Three-qubit repetition code with a Toffoli majority vote.
    #[value(name = "repetition_simple")]
    Repetition,
    /// Nine-qubit Shor code.
    #[value(name = "shor")]
    Shor,
}

impl CorrectionScheme {
    pub const ALL: [CorrectionScheme; 4] = [
        CorrectionScheme::NoCorrection,
        CorrectionScheme::SimpleParity,
        CorrectionScheme::Repetition,
        CorrectionScheme::Shor,
    ];

    /// Command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoCorrection => "no_correction",
            Self::SimpleParity => "simple",
            Self::Repetition   => "repetition_simple",
            Self::Shor         => "shor",
        }
    }

    pub fn ancillas_per_group(&self) -> usize {
        match self {
            Self::NoCorrection => 0,
            Self::SimpleParity => 1,
            Self::Repetition   => 2,
            Self::Shor         => 8,
        }
    }

    /// Number of sites per logical qubit that errors may hit.
    ///
    /// The simple parity scheme only models errors on the data qubit.
    pub fn error_sites(&self) -> usize {
        match self {
            Self::NoCorrection | Self::SimpleParity => 1,
            Self::Repetition | Self::Shor => self.ancillas_per_group() + 1,
        }
    }

    pub fn layout(&self) -> RegisterLayout {
        RegisterLayout::new(self.ancillas_per_group())
    }

    /// Register view of logical qubit `group`.
    pub fn logical_qubit(&self, group: usize) -> LogicalQubit {
        let layout = self.layout();
        LogicalQubit {
            group,
            data: layout.data(group),
            ancillas: (0..layout.ancillas_per_group())
                .map(|i| layout.ancilla(group, i))
                .collect(),
            basis: PreparedBasis::of_group(group),
        }
    }

    // ── Segments ──────────────────────────────────────────────────────────

    /// Gates run before the noise.
    pub fn encode(&self, b: &mut CircuitBuilder, lq: &LogicalQubit) {
        match self {
            Self::NoCorrection | Self::SimpleParity | Self::Repetition => {}
            Self::Shor => {
                let a = &lq.ancillas;
                b.cnot(lq.data, a[2]).cnot(lq.data, a[5]);
                for [leader, _, _] in shor_blocks(lq) {
                    b.h(leader);
                }
                for [leader, c0, c1] in shor_blocks(lq) {
                    b.cnot(leader, c0).cnot(leader, c1);
                }
            }
        }
    }

    /// Place `error` on the qubit named by its site.
    pub fn inject(&self, b: &mut CircuitBuilder, lq: &LogicalQubit, error: SiteError) -> Result<()> {
        if error.site >= self.error_sites() {
            return Err(QecError::InvalidSite {
                group: lq.group,
                site: error.site,
                max: self.error_sites() - 1,
            });
        }
        b.error(lq.site(error.site), error.error);
        Ok(())
    }

    /// Syndrome extraction and recovery.
    pub fn correct(&self, b: &mut CircuitBuilder, lq: &LogicalQubit) {
        let d = lq.data;
        let rotate = lq.basis == PreparedBasis::Plus;
        match self {
            Self::NoCorrection => {}
            Self::SimpleParity => {
                let a = lq.ancillas[0];
                if rotate {
                    b.h(d);
                }
                b.cnot(d, a).cnot(a, d);
                if rotate {
                    b.h(d);
                }
            }
            Self::Repetition => {
                let (a0, a1) = (lq.ancillas[0], lq.ancillas[1]);
                if rotate {
                    b.h(d);
                }
                b.cnot(d, a0).cnot(d, a1).toffoli(a0, a1, d);
                if rotate {
                    b.h(d);
                }
            }
            Self::Shor => {
                for [leader, c0, c1] in shor_blocks(lq) {
                    b.cnot(leader, c0).cnot(leader, c1);
                }
                for [leader, c0, c1] in shor_blocks(lq) {
                    b.toffoli(c0, c1, leader);
                }
            }
        }
    }

    /// Gates that fold the code back onto the data qubit.
    pub fn decode(&self, b: &mut CircuitBuilder, lq: &LogicalQubit) {
        if let Self::Shor = self {
            let a = &lq.ancillas;
            for [leader, _, _] in shor_blocks(lq) {
                b.h(leader);
            }
            b.cnot(lq.data, a[2]).cnot(lq.data, a[5]).toffoli(a[2], a[5], lq.data);
        }
    }

    // ── Circuits ──────────────────────────────────────────────────────────

    /// Bell circuit with `assignment` injected and Bell-basis readout.
    pub fn circuit(&self, assignment: &ErrorAssignment) -> Result<Circuit> {
        self.concrete(assignment, true)
    }

    /// Same as [`circuit`](Self::circuit) but stopping once the Bell pair is
    /// formed, so the data qubits hold the state itself.
    pub fn state_circuit(&self, assignment: &ErrorAssignment) -> Result<Circuit> {
        self.concrete(assignment, false)
    }

    /// Printable circuit with one symbolic error slot per logical qubit.
    pub fn symbolic_circuit(&self) -> Circuit {
        let (mut b, groups) = self.open();
        for lq in &groups {
            let sites = (0..self.error_sites()).map(|s| lq.site(s)).collect();
            b.error_slot(lq.group, sites);
        }
        self.finish(b, &groups, true)
    }

    fn concrete(&self, assignment: &ErrorAssignment, measure: bool) -> Result<Circuit> {
        let (mut b, groups) = self.open();
        for lq in &groups {
            self.inject(&mut b, lq, assignment.get(lq.group))?;
        }
        Ok(self.finish(b, &groups, measure))
    }

    /// Bell preparation and encoding, up to where the noise goes.
    fn open(&self) -> (CircuitBuilder, Vec<LogicalQubit>) {
        let groups: Vec<LogicalQubit> = (0..LOGICAL_QUBITS).map(|g| self.logical_qubit(g)).collect();
        let mut b = CircuitBuilder::new(self.layout());

        b.h(groups[0].data).barrier();
        let before = b.gate_count();
        for lq in &groups {
            self.encode(&mut b, lq);
        }
        if b.gate_count() > before {
            b.barrier();
        }
        (b, groups)
    }

    /// Recovery, Bell pair formation and optional Bell-basis readout.
    fn finish(&self, mut b: CircuitBuilder, groups: &[LogicalQubit], measure: bool) -> Circuit {
        let (q0, q1) = (groups[0].data, groups[1].data);
        b.barrier();
        for lq in groups {
            self.correct(&mut b, lq);
            self.decode(&mut b, lq);
        }
        b.barrier().cnot(q0, q1);
        if measure {
            b.barrier().cnot(q0, q1).h(q0).measure(q0, 0).measure(q1, 1);
        }
        b.build()
    }
}

/// `[leader, copy, copy]` for each of the three Shor blocks.
fn shor_blocks(lq: &LogicalQubit) -> [[usize; 3]; 3] {
    let a = &lq.ancillas;
    [[lq.data, a[0], a[1]], [a[2], a[3], a[4]], [a[5], a[6], a[7]]]
}

impl fmt::Display for CorrectionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CorrectionScheme {
    type Err = QecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name() == s.trim())
            .ok_or_else(|| QecError::UnknownScheme(s.to_string()))
    }
}

// ── Logical qubits ────────────────────────────────────────────────────────

/// State the data qubit of a logical qubit is in while noise acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreparedBasis {
    /// |+⟩: immune to bit flips.
    Plus,
    /// |0⟩: immune to phase flips.
    Zero,
}

impl PreparedBasis {
    pub fn of_group(group: usize) -> Self {
        if group == 0 { Self::Plus } else { Self::Zero }
    }
}

/// Register indices owned by one logical qubit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalQubit {
    pub group: usize,
    pub data: usize,
    pub ancillas: Vec<usize>,
    pub basis: PreparedBasis,
}

impl LogicalQubit {
    /// Register index of `site` (0 = data qubit).
    pub fn site(&self, site: usize) -> usize {
        match site {
            0 => self.data,
            s => self.ancillas[s - 1],
        }
    }
}
