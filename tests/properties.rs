//! Property tests for the unit conversions and junction math

use proptest::prelude::*;

use trm_dsp::tube::sections::FRICATION_TAPS;
use trm_dsp::tube::{reflection_coefficient, JunctionCoefficients};
use trm_dsp::utils::rint;
use trm_dsp::utils::units::{amplitude, frequency, PITCH_BASE};

#[test]
fn amplitude_limits() {
    assert_eq!(amplitude(0.0), 0.0);
    assert_eq!(amplitude(-20.0), 0.0);
    assert_eq!(amplitude(60.0), 1.0);
    assert_eq!(amplitude(75.0), 1.0);
    assert!((amplitude(40.0) - 0.1).abs() < 1e-15);
}

#[test]
fn middle_c() {
    assert_eq!(frequency(0.0), PITCH_BASE * 2.0_f64.powf(3.0 / 12.0));
    assert!((frequency(0.0) - 261.6255653005986).abs() < 1e-9);
    assert!((frequency(-3.0) - 220.0).abs() < 1e-12);
}

#[test]
fn rint_ties_to_even() {
    assert_eq!(rint(2.5), 2.0);
    assert_eq!(rint(3.5), 4.0);
    assert_eq!(rint(-2.5), -2.0);
    assert_eq!(rint(79.17), 79.0);
    assert_eq!(rint(163.84), 164.0);
}

proptest! {
    #[test]
    fn reflection_coefficient_is_bounded(a in 0.01f64..10.0, b in 0.01f64..10.0) {
        let coefficient = reflection_coefficient(a, b);
        prop_assert!(coefficient > -1.0 && coefficient < 1.0);
    }

    #[test]
    fn amplitude_is_monotonic(a in -100.0f64..100.0, b in -100.0f64..100.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(amplitude(low) <= amplitude(high));
        prop_assert!((0.0..=1.0).contains(&amplitude(a)));
    }

    #[test]
    fn octave_doubles_frequency(pitch in -48.0f64..48.0) {
        let ratio = frequency(pitch + 12.0) / frequency(pitch);
        prop_assert!((ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn frication_taps_carry_the_level(position in 0.0f64..7.0, level in 0.0f64..1.0) {
        let mut coefficients = JunctionCoefficients::default();
        coefficients.set_frication_taps(position, level);

        let total: f64 = coefficients.frication_taps.iter().sum();
        prop_assert!((total - level).abs() < 1e-12);

        let active = coefficients.frication_taps.iter().filter(|tap| **tap != 0.0).count();
        prop_assert!(active <= 2);
        prop_assert_eq!(coefficients.frication_taps.len(), FRICATION_TAPS);
    }
}
