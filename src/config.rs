//! Voice and tract configuration.
//!
//! [`VoiceParams`] describes the speaker (tract length, glottal pulse shape,
//! nasal geometry) and [`TractParams`] the physical and DSP constants of the
//! simulation. Both are fixed for the duration of a synthesis run; changing
//! them requires a new `init`.
//!
//! The serde representation uses the flat, camel-cased option names of the
//! configuration surface, so a [`SynthConfig`] can be read straight from a
//! JSON object such as `{"tractLength": 15.0, "waveform": "sine"}`.

use alloc::string::String;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::tube::sections::NASAL_SECTIONS;
use crate::utils::units::{amplitude, VOL_MAX};

/// Output sample rates supported by the rate converter front end.
pub const OUTPUT_RATE_LOW: u32 = 22050;
pub const OUTPUT_RATE_HIGH: u32 = 44100;

/// Initial state of the noise generator.
pub const DEFAULT_NOISE_SEED: f64 = 0.7892347;

/// Glottal excitation waveform.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    /// Rosenberg-style glottal pulse.
    #[default]
    Pulse,
    /// Pure sine tone.
    Sine,
}

/// Built-in voice identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceType {
    Male,
    Female,
    Child,
    Baby,
}

/// Per-voice physical constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceParams {
    /// Nominal tract length in cm.
    pub tract_length: f64,
    /// Glottal pulse rise time in percent of the period.
    pub glottal_pulse_rise: f64,
    /// Shortest glottal pulse fall time in percent (reached at full amplitude).
    pub glottal_pulse_fall_min: f64,
    /// Longest glottal pulse fall time in percent (reached at zero amplitude).
    pub glottal_pulse_fall_max: f64,
    /// Offset in semitones added to the pitch of every control frame.
    pub reference_pitch: f64,
    /// Amount of pulsed noise mixed into the glottal pulse, in percent.
    pub breathiness: f64,
    /// Nasal section radii in cm. Entry 0 is the velum port; it is replaced by
    /// the velum opening of the current control frame on every update.
    pub nose_radii: [f64; NASAL_SECTIONS],
    /// Radius of the mouth and nostril apertures in cm.
    pub aperture_radius: f64,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self::male()
    }
}

impl VoiceParams {
    pub fn preset(voice: VoiceType) -> Self {
        match voice {
            VoiceType::Male => Self::male(),
            VoiceType::Female => Self::female(),
            VoiceType::Child => Self::child(),
            VoiceType::Baby => Self::baby(),
        }
    }

    pub fn male() -> Self {
        Self {
            tract_length: 17.5,
            glottal_pulse_rise: 40.0,
            glottal_pulse_fall_min: 24.0,
            glottal_pulse_fall_max: 24.0,
            reference_pitch: -12.0,
            breathiness: 0.5,
            nose_radii: NOSE_RADII,
            aperture_radius: APERTURE_RADIUS,
        }
    }

    pub fn female() -> Self {
        Self {
            tract_length: 15.0,
            glottal_pulse_rise: 32.0,
            glottal_pulse_fall_min: 16.0,
            glottal_pulse_fall_max: 32.0,
            reference_pitch: 0.0,
            breathiness: 1.5,
            nose_radii: NOSE_RADII,
            aperture_radius: APERTURE_RADIUS,
        }
    }

    pub fn child() -> Self {
        Self {
            tract_length: 12.5,
            glottal_pulse_rise: 24.0,
            glottal_pulse_fall_min: 16.0,
            glottal_pulse_fall_max: 32.0,
            reference_pitch: 4.0,
            breathiness: 2.5,
            nose_radii: NOSE_RADII,
            aperture_radius: APERTURE_RADIUS,
        }
    }

    pub fn baby() -> Self {
        Self {
            tract_length: 7.5,
            glottal_pulse_rise: 24.0,
            glottal_pulse_fall_min: 16.0,
            glottal_pulse_fall_max: 32.0,
            reference_pitch: 10.0,
            breathiness: 3.0,
            nose_radii: NOSE_RADII,
            aperture_radius: APERTURE_RADIUS,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tract_length > 0.0) {
            return Err(Error::invalid_config(
                "tractLength",
                alloc::format!("must be positive, got {}", self.tract_length),
            ));
        }
        if !(self.glottal_pulse_rise > 0.0 && self.glottal_pulse_rise < 100.0) {
            return Err(Error::invalid_config(
                "glottalPulseRise",
                "must lie in (0, 100) percent",
            ));
        }
        if !(self.glottal_pulse_fall_min >= 0.0
            && self.glottal_pulse_fall_min <= self.glottal_pulse_fall_max)
        {
            return Err(Error::invalid_config(
                "glottalPulseFallMin",
                "must be non-negative and not exceed glottalPulseFallMax",
            ));
        }
        if self.glottal_pulse_rise + self.glottal_pulse_fall_max > 100.0 {
            return Err(Error::invalid_config(
                "glottalPulseFallMax",
                "rise and fall must fit in one period",
            ));
        }
        if !(0.0..=100.0).contains(&self.breathiness) {
            return Err(Error::invalid_config(
                "breathiness",
                "must lie in [0, 100] percent",
            ));
        }
        if self.nose_radii[1..].iter().any(|radius| !(*radius > 0.0)) {
            return Err(Error::invalid_config("noseRadii", "radii must be positive"));
        }
        if !(self.aperture_radius > 0.0) {
            return Err(Error::invalid_config(
                "apertureRadius",
                "must be positive",
            ));
        }

        Ok(())
    }
}

const NOSE_RADII: [f64; NASAL_SECTIONS] = [1.35, 1.35, 1.96, 1.91, 1.3, 0.73];
const APERTURE_RADIUS: f64 = 3.05;

/// Global physical and DSP constants of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TractParams {
    /// Ambient temperature in °C, sets the speed of sound.
    pub temperature: f64,
    /// Tube wall loss in percent per section.
    pub loss_factor: f64,
    /// Mouth radiation cutoff in Hz.
    pub mouth_coef: f64,
    /// Nose radiation cutoff in Hz.
    pub nose_coef: f64,
    /// Throat lowpass cutoff in Hz.
    pub throat_cutoff: f64,
    /// Throat bypass level on the 0..60 dB scale.
    pub throat_volume: f64,
    pub waveform: Waveform,
    /// Modulate aspiration and frication noise with the glottal pulse.
    #[serde(deserialize_with = "on_off")]
    pub noise_modulation: bool,
    /// Glottal level in dB at which noise is fully pulse-modulated.
    pub mix_offset: f64,
    /// Master output level on the 0..60 dB scale, applied when normalizing.
    pub volume: f64,
    /// Output sample rate in Hz.
    pub output_rate: u32,
    /// Control frame rate in Hz.
    pub control_rate: f64,
    /// Initial state of the noise generator, in (0, 1).
    pub noise_seed: f64,
    /// Run the glottal oscillator at twice the simulation rate.
    pub oversample: bool,
    /// Limit per-sample parameter changes to the default maxima.
    pub clamp_deltas: bool,
}

impl Default for TractParams {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            loss_factor: 0.8,
            mouth_coef: 5000.0,
            nose_coef: 5000.0,
            throat_cutoff: 1500.0,
            throat_volume: 6.0,
            waveform: Waveform::Pulse,
            noise_modulation: true,
            mix_offset: 48.0,
            volume: VOL_MAX,
            output_rate: OUTPUT_RATE_LOW,
            control_rate: 250.0,
            noise_seed: DEFAULT_NOISE_SEED,
            oversample: true,
            clamp_deltas: false,
        }
    }
}

impl TractParams {
    /// Checks the parameters that do not depend on the derived sample rate.
    ///
    /// The aperture and throat coefficients are checked at `init`, once the
    /// simulation rate is known.
    pub fn validate(&self) -> Result<()> {
        if !(crate::utils::units::speed_of_sound(self.temperature) > 0.0) {
            return Err(Error::invalid_config(
                "temperature",
                "speed of sound must be positive",
            ));
        }
        if !(0.0..100.0).contains(&self.loss_factor) {
            return Err(Error::invalid_config(
                "lossFactor",
                "must lie in [0, 100) percent",
            ));
        }
        if !(amplitude(self.mix_offset) > 0.0) {
            return Err(Error::invalid_config(
                "mixOffset",
                "must be above 0 dB on the volume scale",
            ));
        }
        if self.output_rate != OUTPUT_RATE_LOW && self.output_rate != OUTPUT_RATE_HIGH {
            return Err(Error::invalid_config(
                "outputRate",
                alloc::format!(
                    "must be {OUTPUT_RATE_LOW} or {OUTPUT_RATE_HIGH}, got {}",
                    self.output_rate
                ),
            ));
        }
        if !(self.control_rate > 0.0) {
            return Err(Error::invalid_config("controlRate", "must be positive"));
        }
        if !(self.noise_seed > 0.0 && self.noise_seed < 1.0) {
            return Err(Error::invalid_config("noiseSeed", "must lie in (0, 1)"));
        }

        Ok(())
    }

    /// Damping applied to every travelling wave per section.
    pub fn damping_factor(&self) -> f64 {
        1.0 - self.loss_factor / 100.0
    }

    /// Scale that maps the glottal amplitude to the pure/pulsed noise crossfade.
    pub fn crossmix_factor(&self) -> f64 {
        1.0 / amplitude(self.mix_offset)
    }
}

/// Complete synthesizer configuration in the flat option namespace.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthConfig {
    #[serde(flatten)]
    pub voice: VoiceParams,
    #[serde(flatten)]
    pub tract: TractParams,
}

impl SynthConfig {
    pub fn validate(&self) -> Result<()> {
        self.voice.validate()?;
        self.tract.validate()
    }
}

/// Accepts `true`/`false` as well as the words `on`/`off`.
fn on_off<'de, D>(deserializer: D) -> core::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Toggle {
        Flag(bool),
        Word(String),
    }

    match Toggle::deserialize(deserializer)? {
        Toggle::Flag(flag) => Ok(flag),
        Toggle::Word(word) => match word.as_str() {
            "on" => Ok(true),
            "off" => Ok(false),
            other => Err(serde::de::Error::custom(alloc::format!(
                "expected 'on' or 'off', got '{other}'"
            ))),
        },
    }
}
