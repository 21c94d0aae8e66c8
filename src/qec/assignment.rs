/// Concrete error configurations.
///
/// An [`ErrorAssignment`] holds exactly one [`SiteError`] per logical qubit,
/// so at most one non-identity error lands on each. Its `Display` form
/// `[(s1, e1), (s2, e2)]` keys the per-error breakdown of a run.
use super::scheme::CorrectionScheme;
use crate::circuit::LOGICAL_QUBITS;
use crate::core::ErrorType;
use crate::error::{QecError, Result};
use std::fmt;
use tracing::warn;

/// One error on one site of a logical qubit. Site 0 is the data qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteError {
    pub site: usize,
    pub error: ErrorType,
}

impl SiteError {
    pub fn new(site: usize, error: ErrorType) -> Self {
        Self { site, error }
    }

    /// Identity on the data qubit.
    pub fn clean() -> Self {
        Self::new(0, ErrorType::Identity)
    }

    /// Parse `site` and `gate` as given on the command line, checking the
    /// site against the ancillas of `scheme`.
    pub fn parse(group: usize, site: &str, gate: &str, scheme: CorrectionScheme) -> Result<Self> {
        let site_index: usize = site
            .trim()
            .parse()
            .map_err(|_| QecError::InvalidSiteFormat(site.to_string()))?;
        let max = scheme.ancillas_per_group();
        if site_index > max {
            return Err(QecError::InvalidSite { group, site: site_index, max });
        }
        Ok(Self::new(site_index, gate.parse()?))
    }
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.site, self.error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorAssignment {
    errors: [SiteError; LOGICAL_QUBITS],
}

impl ErrorAssignment {
    pub fn new(first: SiteError, second: SiteError) -> Self {
        Self { errors: [first, second] }
    }

    /// No error on either logical qubit.
    pub fn identity() -> Self {
        Self::new(SiteError::clean(), SiteError::clean())
    }

    /// Error placed on logical qubit `group`.
    pub fn get(&self, group: usize) -> SiteError {
        self.errors[group]
    }

    /// `(group, error)` pairs in group order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, SiteError)> + '_ {
        self.errors.iter().copied().enumerate()
    }

    pub fn is_identity(&self) -> bool {
        self.iter().all(|(_, e)| e.error.is_identity())
    }

    /// Parse `<site_1> <gate_1> <site_2> <gate_2>`.
    ///
    /// Sites may name any qubit of the logical qubit (`0 ..= ancillas`).
    pub fn parse<S: AsRef<str>>(coords: &[S], scheme: CorrectionScheme) -> Result<Self> {
        let [s1, g1, s2, g2] = coords else {
            return Err(QecError::ErrorArity(coords.len()));
        };
        Ok(Self::new(
            SiteError::parse(0, s1.as_ref(), g1.as_ref(), scheme)?,
            SiteError::parse(1, s2.as_ref(), g2.as_ref(), scheme)?,
        ))
    }

    /// Fit this assignment to the error sites `scheme` simulates.
    ///
    /// Simple parity only models data-qubit errors; an ancilla site is moved
    /// onto the data qubit. Any other out-of-range site is rejected.
    pub fn resolve_for(self, scheme: CorrectionScheme) -> Result<Self> {
        let mut errors = self.errors;
        for (group, e) in errors.iter_mut().enumerate() {
            let max = scheme.ancillas_per_group();
            if e.site > max {
                return Err(QecError::InvalidSite { group, site: e.site, max });
            }
            if e.site >= scheme.error_sites() {
                warn!(
                    group,
                    site = e.site,
                    error = %e.error,
                    "{scheme} models data-qubit errors only, moving error to site 0"
                );
                e.site = 0;
            }
        }
        Ok(Self { errors })
    }
}

impl fmt::Display for ErrorAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.errors[0], self.errors[1])
    }
}
