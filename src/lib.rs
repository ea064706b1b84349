#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod control;
pub mod error;
pub mod filter;
pub mod noise;
pub mod oscillator;
pub mod output;
pub mod resampler;
pub mod tube;
pub mod utils;
pub mod vocal_tract;

pub use config::{SynthConfig, TractParams, VoiceParams, VoiceType, Waveform};
pub use control::{ArticulationTable, ArticulatoryUnit, Utterance, VocalTractCtrl};
pub use error::{Error, Result};
pub use output::OutputBuffer;
pub use vocal_tract::VocalTract;

use crate::tube::sections::OROPHARYNX_SECTIONS;
use crate::utils::rint;
use crate::utils::units::speed_of_sound;

/// Rates derived from the tract length.
///
/// The simulation rate is chosen so that sound travels one tube section per
/// sample, rounded so that a whole number of samples fits in a control period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TractRates {
    /// Control frame rate in Hz
    pub control_rate: f64,
    /// Simulation samples per control frame
    pub control_period: usize,
    /// Simulation sample rate in Hz
    pub sample_rate: f64,
    pub nyquist: f64,
    /// Tube length in cm after rounding the sample rate
    pub actual_tube_length: f64,
}

impl TractRates {
    pub fn new(tract_length: f64, temperature: f64, control_rate: f64) -> Result<Self> {
        if !(tract_length > 0.0) {
            return Err(Error::invalid_config(
                "tractLength",
                alloc::format!("must be positive, got {tract_length}"),
            ));
        }

        let c = speed_of_sound(temperature);
        let sections = OROPHARYNX_SECTIONS as f64;
        let control_period = rint((c * sections * 100.0) / (tract_length * control_rate));
        if !(control_period >= 1.0) {
            return Err(Error::invalid_config(
                "tractLength",
                "tract is too long for the control rate",
            ));
        }

        let control_period = control_period as usize;
        let sample_rate = control_rate * control_period as f64;

        Ok(Self {
            control_rate,
            control_period,
            sample_rate,
            nyquist: sample_rate / 2.0,
            actual_tube_length: (c * sections * 100.0) / sample_rate,
        })
    }

    /// Duration of one control period in milliseconds.
    pub fn control_period_ms(&self) -> f64 {
        1000.0 / self.control_rate
    }
}
