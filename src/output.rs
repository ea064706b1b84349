//! Output sample buffer handed to the caller after synthesis.

use alloc::vec::Vec;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::utils::units::amplitude;

/// Headroom left below full scale when normalizing.
pub const OUTPUT_SCALE: f64 = 0.95;

/// Append-only buffer of converted samples.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    peak: f64,
}

impl OutputBuffer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
            peak: 0.0,
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.peak = 0.0;
    }

    #[inline]
    pub fn push(&mut self, sample: f64) {
        let magnitude = sample.abs();
        if magnitude > self.peak {
            self.peak = magnitude;
        }
        self.samples.push(sample as f32);
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Largest absolute sample value pushed so far.
    pub fn peak(&self) -> f64 {
        self.peak
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Samples scaled so the peak sits at `OUTPUT_SCALE * amplitude(volume)`.
    ///
    /// `volume` is on the 0..60 dB scale. A silent buffer stays silent.
    pub fn normalized(&self, volume: f64) -> Vec<f32> {
        if self.peak == 0.0 {
            return alloc::vec![0.0; self.samples.len()];
        }

        let scale = OUTPUT_SCALE / self.peak * amplitude(volume);
        self.samples
            .iter()
            .map(|sample| (*sample as f64 * scale) as f32)
            .collect()
    }

    /// Normalized samples as 16-bit PCM.
    pub fn to_pcm16(&self, volume: f64) -> Vec<i16> {
        self.normalized(volume)
            .iter()
            .map(|sample| (*sample as f64 * i16::MAX as f64).round() as i16)
            .collect()
    }
}
