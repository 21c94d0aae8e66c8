pub mod complex;
pub mod gates;
pub mod noise;
pub mod simulator;
pub mod state;

pub use complex::Complex;
pub use gates::Matrix2x2;
pub use noise::{ErrorType, ErrorTypeSampler, ErrorWeights};
pub use simulator::{Distribution, Simulator};
pub use state::StateVector;
