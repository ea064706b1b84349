//! Two-pole bandpass shaping the frication noise.

#[allow(unused_imports)]
use num_traits::float::Float;

use core::f64::consts::PI;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BandpassFilter {
    alpha: f64,
    beta: f64,
    gamma: f64,
    xn1: f64,
    xn2: f64,
    yn1: f64,
    yn2: f64,
}

impl BandpassFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.xn1 = 0.0;
        self.xn2 = 0.0;
        self.yn1 = 0.0;
        self.yn2 = 0.0;
    }

    /// Sets centre frequency and bandwidth, both in Hz.
    #[inline]
    pub fn update(&mut self, center_frequency: f64, bandwidth: f64, sample_rate: f64) {
        let tan_value = (PI * bandwidth / sample_rate).tan();
        let cos_value = (2.0 * PI * center_frequency / sample_rate).cos();
        self.beta = (1.0 - tan_value) / (2.0 * (1.0 + tan_value));
        self.gamma = (0.5 + self.beta) * cos_value;
        self.alpha = (0.5 - self.beta) / 2.0;
    }

    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output =
            2.0 * ((self.alpha * (input - self.xn2)) + (self.gamma * self.yn1) - (self.beta * self.yn2));
        self.xn2 = self.xn1;
        self.xn1 = input;
        self.yn2 = self.yn1;
        self.yn1 = output;
        output
    }
}
