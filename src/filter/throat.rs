//! Throat bypass: sound radiated through the tissue of the neck.

use crate::error::{Error, Result};
use crate::utils::units::amplitude;

/// One-pole lowpass applied to the raw glottal pulse, scaled by the throat gain.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Throat {
    ta0: f64,
    tb1: f64,
    gain: f64,
    y: f64,
}

impl Throat {
    /// `cutoff` in Hz, `volume` on the 0..60 dB scale.
    pub fn new(cutoff: f64, volume: f64, sample_rate: f64) -> Result<Self> {
        let ta0 = (cutoff * 2.0) / sample_rate;
        if !(ta0 > 0.0 && ta0 < 1.0) {
            return Err(Error::invalid_config(
                "throatCutoff",
                alloc::format!(
                    "cutoff {cutoff} Hz gives coefficient {ta0}, must lie in (0, 1)"
                ),
            ));
        }

        Ok(Self {
            ta0,
            tb1: 1.0 - ta0,
            gain: amplitude(volume),
            y: 0.0,
        })
    }

    pub fn reset(&mut self) {
        self.y = 0.0;
    }

    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.ta0 * input + self.tb1 * self.y;
        self.y = output;
        output * self.gain
    }
}
