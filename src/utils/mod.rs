//! Utility functions and small containers shared by the DSP blocks.

pub mod double_buffer;
pub mod ring_buffer;
pub mod units;

#[allow(unused_imports)]
use num_traits::float::Float;

/// Rounds to the nearest integer, ties to even (C `rint` in the default rounding mode).
#[inline]
pub fn rint(x: f64) -> f64 {
    let rounded = x.round();
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x * 0.5).round()
    } else {
        rounded
    }
}

/// Linear interpolation between two table values.
#[inline]
pub fn lerp(a: f64, b: f64, fraction: f64) -> f64 {
    a + (b - a) * fraction
}
