//! Linear-phase FIR lowpass with a maximally flat magnitude response.
//!
//! Used as the anti-aliasing filter of the oversampling glottal oscillator.
//! The design follows the Herrmann/Kaiser maximally flat procedure: the cutoff
//! is approximated by a rational number, the magnitude response is evaluated
//! at `np` points and converted to taps with an inverse DFT.

use alloc::vec;
use alloc::vec::Vec;

#[allow(unused_imports)]
use num_traits::float::Float;

use core::f64::consts::PI;

use crate::error::{Error, Result};

/// Centre of the transition band as a fraction of the sample rate.
pub const FIR_BETA: f64 = 0.2;

/// Width of the transition band as a fraction of the sample rate.
pub const FIR_GAMMA: f64 = 0.1;

/// Coefficients smaller than this are trimmed from the ends of the kernel.
pub const FIR_CUTOFF: f64 = 0.00000001;

const LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct FirFilter {
    data: Vec<f64>,
    coefficients: Vec<f64>,
    ptr: usize,
}

impl FirFilter {
    pub fn new(beta: f64, gamma: f64, cutoff: f64) -> Result<Self> {
        let mut half = maximally_flat(beta, gamma)?;
        trim(&mut half, cutoff);

        // Mirror the half kernel around its centre tap.
        let centre = half.len() - 1;
        let num_taps = 2 * half.len() - 1;
        let coefficients = (0..num_taps).map(|i| half[i.abs_diff(centre)]).collect();

        Ok(Self {
            data: vec![0.0; num_taps],
            coefficients,
            ptr: 0,
        })
    }

    pub fn reset(&mut self) {
        self.data.fill(0.0);
        self.ptr = 0;
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Stores a sample without computing an output (the decimated phase).
    #[inline]
    pub fn push(&mut self, input: f64) {
        self.data[self.ptr] = input;
        self.ptr = self.decrement(self.ptr);
    }

    /// Stores a sample and returns the filter output.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let num_taps = self.coefficients.len();
        self.data[self.ptr] = input;

        let mut output = 0.0;
        let mut index = self.ptr;
        for coefficient in self.coefficients.iter() {
            output += self.data[index] * coefficient;
            index = (index + 1) % num_taps;
        }

        self.ptr = self.decrement(self.ptr);
        output
    }

    #[inline]
    fn decrement(&self, ptr: usize) -> usize {
        let num_taps = self.coefficients.len();
        (ptr + num_taps - 1) % num_taps
    }
}

/// Computes the centre tap followed by one half of a maximally flat lowpass.
pub fn maximally_flat(beta: f64, gamma: f64) -> Result<Vec<f64>> {
    if beta <= 0.0 || beta >= 0.5 {
        return Err(Error::degenerate("FIR cutoff must lie between 0 and Nyquist"));
    }

    let beta_minimum = f64::min(2.0 * beta, 1.0 - 2.0 * beta);
    if gamma <= 0.0 || gamma >= beta_minimum {
        return Err(Error::degenerate(
            "FIR transition band does not fit inside the stop band",
        ));
    }

    let nt = (1.0 / (4.0 * gamma * gamma)) as usize;
    if nt > 160 {
        return Err(Error::degenerate("FIR transition band is too narrow"));
    }

    let ac = (1.0 + (2.0 * PI * beta).cos()) / 2.0;
    let approximation = rational_approximation(ac, nt)
        .ok_or(Error::degenerate("FIR cutoff has no rational approximation"))?;
    let np = approximation.denominator;
    let nt = approximation.order;
    let numerator = approximation.numerator.max(1);
    let n = 2 * np - 1;

    // Magnitude response at np points.
    let mut a = vec![0.0; np];
    a[0] = 1.0;
    let ll = nt.saturating_sub(numerator);
    for (i, a_i) in a.iter_mut().enumerate().skip(1) {
        let x = (1.0 - (2.0 * PI * i as f64 / n as f64).cos()) / 2.0;
        let mut y = x;
        let mut sum = 1.0;
        for j in 1..=ll {
            let mut z = y;
            for jj in 1..numerator {
                z *= 1.0 + (j as f64 / jj as f64);
            }
            y *= x;
            sum += z;
        }
        *a_i = sum * (1.0 - x).powi(numerator as i32);
    }

    // Weighting coefficients by an np-point inverse DFT.
    let coefficients = (0..np)
        .map(|i| {
            let mut coefficient = a[0] / 2.0;
            for (j, a_j) in a.iter().enumerate().skip(1) {
                let m = (i * j) % n;
                coefficient += (2.0 * PI * m as f64 / n as f64).cos() * a_j;
            }
            coefficient * 2.0 / n as f64
        })
        .collect();

    Ok(coefficients)
}

/// Drops trailing coefficients whose magnitude is below `cutoff`.
fn trim(coefficients: &mut Vec<f64>, cutoff: f64) {
    if let Some(last) = coefficients.iter().rposition(|c| c.abs() >= cutoff.abs()) {
        coefficients.truncate(last + 1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RationalApproximation {
    numerator: usize,
    denominator: usize,
    order: usize,
}

/// Finds the fraction with denominator in `order..=2*order` closest to `number`.
fn rational_approximation(number: f64, order: usize) -> Option<RationalApproximation> {
    if order == 0 {
        return None;
    }

    let fractional_part = (number - number.trunc()).abs();
    let order_maximum = usize::min(2 * order, LIMIT);

    let mut minimum_error = 1.0;
    let mut modulus = 0;
    let mut denominator = 0;
    for i in order..=order_maximum {
        let ps = i as f64 * fractional_part;
        let ip = (ps + 0.5) as usize;
        let error = ((ps - ip as f64) / i as f64).abs();
        if error < minimum_error {
            minimum_error = error;
            modulus = ip;
            denominator = i;
        }
    }
    if denominator == 0 {
        return None;
    }

    let numerator = (number.abs() as usize) * denominator + modulus;
    if numerator == denominator {
        return Some(RationalApproximation {
            numerator: order_maximum,
            denominator: order_maximum,
            order: order_maximum,
        });
    }

    Some(RationalApproximation {
        numerator,
        denominator,
        order: denominator - 1,
    })
}
