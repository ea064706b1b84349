//! Acoustic tube model.

pub mod junctions;
pub mod network;
pub mod sections;

pub use junctions::{reflection_coefficient, JunctionCoefficients};
pub use network::TubeNetwork;
