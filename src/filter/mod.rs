//! Low-order filters used by the tube boundaries and the excitation paths.

pub mod aperture;
pub mod bandpass;
pub mod fir;
pub mod throat;
