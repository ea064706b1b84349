//! Control frames, their interpolation and utterance assembly.

pub mod frame;
pub mod interpolator;
pub mod utterance;

pub use frame::VocalTractCtrl;
pub use interpolator::ControlInterpolator;
pub use utterance::{ArticulationTable, ArticulatoryUnit, Utterance};
