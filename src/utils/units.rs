//! Conversions between control units and linear signal values.

#[allow(unused_imports)]
use num_traits::float::Float;

/// Top of the volume scale in dB. Every level in a control frame lives on 0..VOL_MAX.
pub const VOL_MAX: f64 = 60.0;

/// Frequency the pitch scale is anchored on, in Hz.
pub const PITCH_BASE: f64 = 220.0;

/// Semitones between `PITCH_BASE` and pitch 0 (middle C).
pub const PITCH_OFFSET: f64 = 3.0;

/// Converts a level on the 0..60 dB volume scale to a linear amplitude.
///
/// The scale is shifted by `VOL_MAX`, so 60 dB is full amplitude and 0 dB
/// (60 dB of attenuation) or less is silence. In between the usual
/// `10^(dB/20)` law applies, making the mapping non-decreasing.
#[inline]
pub fn amplitude(decibel_level: f64) -> f64 {
    let attenuation = decibel_level - VOL_MAX;

    if attenuation <= -VOL_MAX {
        0.0
    } else if attenuation >= 0.0 {
        1.0
    } else {
        10.0_f64.powf(attenuation / 20.0)
    }
}

/// Converts a pitch in semitones relative to middle C to a frequency in Hz.
#[inline]
pub fn frequency(pitch: f64) -> f64 {
    PITCH_BASE * 2.0_f64.powf((pitch + PITCH_OFFSET) / 12.0)
}

/// Speed of sound in air in m/s at the given temperature in °C.
#[inline]
pub fn speed_of_sound(temperature: f64) -> f64 {
    331.4 + 0.6 * temperature
}
