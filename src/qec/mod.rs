/// Quantum error correction on top of the circuit model.
///
///   - `scheme`: the four correction schemes and full Bell circuit assembly
///   - `assignment`: where errors land, parsed and validated per scheme
///   - `enumerator`: exhaustive, random and fixed error configurations
pub mod assignment;
pub mod enumerator;
pub mod scheme;

pub use assignment::{ErrorAssignment, SiteError};
pub use enumerator::{configuration_count, exhaustive, ErrorSampler, RunMode};
pub use scheme::{CorrectionScheme, LogicalQubit, PreparedBasis};
