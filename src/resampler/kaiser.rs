//! Kaiser-windowed sinc kernel for the rate converter.

use alloc::vec::Vec;

#[allow(unused_imports)]
use num_traits::float::Float;

use core::f64::consts::PI;

use crate::error::{Error, Result};

/// Convergence threshold of the I₀ series, relative to the running sum.
pub const IZERO_EPSILON: f64 = 1e-21;

/// Zeroth-order modified Bessel function of the first kind.
///
/// Sums the power series `Σ ((x/2)^k / k!)²` until a term drops below
/// `IZERO_EPSILON` times the sum.
pub fn bessel_i0(x: f64) -> f64 {
    let half_x = x / 2.0;
    let mut sum = 1.0;
    let mut u = 1.0;
    let mut n = 1.0;

    loop {
        let temp = half_x / n;
        n += 1.0;
        u *= temp * temp;
        sum += u;
        if u < IZERO_EPSILON * sum {
            break;
        }
    }

    sum
}

/// Lowpass impulse response sampled at `resolution` points per zero crossing,
/// with the per-point slope used for linear interpolation between them.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTable {
    pub h: Vec<f64>,
    pub delta_h: Vec<f64>,
}

impl FilterTable {
    /// Designs one wing of a windowed-sinc lowpass.
    ///
    /// `cutoff` is relative to the Nyquist frequency of the slower side of the
    /// conversion, `beta` is the Kaiser window parameter.
    pub fn windowed_sinc(
        zero_crossings: usize,
        resolution: usize,
        cutoff: f64,
        beta: f64,
    ) -> Result<Self> {
        if !(beta > 0.0) {
            return Err(Error::degenerate("Kaiser window beta must be positive"));
        }
        if !(cutoff > 0.0 && cutoff <= 1.0) {
            return Err(Error::degenerate("sinc cutoff must lie in (0, 1]"));
        }
        if zero_crossings == 0 || resolution == 0 {
            return Err(Error::degenerate("sinc kernel needs at least one zero crossing"));
        }

        let length = zero_crossings * resolution;
        let step = PI / resolution as f64;
        let i_beta = 1.0 / bessel_i0(beta);

        let h: Vec<f64> = (0..length)
            .map(|i| {
                let sinc = if i == 0 {
                    cutoff
                } else {
                    let y = i as f64 * step;
                    (y * cutoff).sin() / y
                };
                let t = i as f64 / length as f64;
                sinc * bessel_i0(beta * (1.0 - t * t).max(0.0).sqrt()) * i_beta
            })
            .collect();

        let delta_h = (0..length)
            .map(|i| if i + 1 < length { h[i + 1] - h[i] } else { -h[i] })
            .collect();

        Ok(Self { h, delta_h })
    }

    pub fn len(&self) -> usize {
        self.h.len()
    }

    pub fn is_empty(&self) -> bool {
        self.h.is_empty()
    }

    /// Kernel value at `index` plus `fraction` of the way to the next point.
    #[inline]
    pub fn interpolate(&self, index: usize, fraction: f64) -> f64 {
        self.h[index] + self.delta_h[index] * fraction
    }
}
