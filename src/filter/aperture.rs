//! Boundary filters at the open ends of the tube (mouth and nostrils).
//!
//! Both filters are parameterized by an aperture coefficient in (0, 1)
//! derived from a cutoff frequency. The reflection filter is a one-pole
//! lowpass applied to the wave reflected back into the tube; the radiation
//! filter is its complementary highpass applied to the transmitted wave.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::error::{Error, Result};

/// Aperture coefficient `(nyquist - cutoff) / nyquist`, which must lie in (0, 1).
pub fn aperture_coefficient(name: &'static str, cutoff: f64, nyquist: f64) -> Result<f64> {
    let coefficient = (nyquist - cutoff) / nyquist;
    if coefficient > 0.0 && coefficient < 1.0 {
        Ok(coefficient)
    } else {
        Err(Error::invalid_config(
            name,
            alloc::format!("cutoff {cutoff} Hz must lie strictly between 0 and {nyquist} Hz"),
        ))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReflectionFilter {
    a10: f64,
    b11: f64,
    y: f64,
}

impl ReflectionFilter {
    pub fn new(coefficient: f64) -> Self {
        let b11 = -coefficient;
        Self {
            a10: 1.0 - b11.abs(),
            b11,
            y: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.y = 0.0;
    }

    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.a10 * input - self.b11 * self.y;
        self.y = output;
        output
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RadiationFilter {
    a20: f64,
    a21: f64,
    b21: f64,
    x: f64,
    y: f64,
}

impl RadiationFilter {
    pub fn new(coefficient: f64) -> Self {
        Self {
            a20: coefficient,
            a21: -coefficient,
            b21: -coefficient,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }

    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.a20 * input + self.a21 * self.x - self.b21 * self.y;
        self.x = input;
        self.y = output;
        output
    }
}
