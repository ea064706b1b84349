//! Synthesis engine.
//!
//! [`VocalTract`] owns every stage of the model and runs them sample by
//! sample: control interpolation, excitation, tube propagation, the throat
//! bypass and the output rate converter.

use crate::config::{SynthConfig, TractParams, VoiceParams, Waveform};
use crate::control::frame::VocalTractCtrl;
use crate::control::interpolator::ControlInterpolator;
use crate::control::utterance::Utterance;
use crate::error::{Error, Result};
use crate::filter::aperture::aperture_coefficient;
use crate::filter::bandpass::BandpassFilter;
use crate::filter::throat::Throat;
use crate::noise::noise_filter::NoiseFilter;
use crate::noise::noise_source::NoiseSource;
use crate::oscillator::glottal_source::WavetableGlottalSource;
use crate::output::OutputBuffer;
use crate::resampler::RateConverter;
use crate::tube::TubeNetwork;
use crate::utils::units::{amplitude, frequency};
use crate::TractRates;

/// Scale of the excitation entering the tube and the throat.
pub const TUBE_INPUT_SCALE: f64 = 0.125;

#[derive(Debug, Clone, PartialEq)]
pub struct VocalTract {
    voice: VoiceParams,
    tract: TractParams,
    rates: TractRates,

    crossmix_factor: f64,
    breathiness_factor: f64,

    interpolator: ControlInterpolator,
    glottal_source: WavetableGlottalSource,
    noise_source: NoiseSource,
    noise_filter: NoiseFilter,
    bandpass: BandpassFilter,
    throat: Throat,
    tube: TubeNetwork,
    rate_converter: RateConverter,

    output: OutputBuffer,
}

impl VocalTract {
    pub fn new(voice: VoiceParams, tract: TractParams) -> Result<Self> {
        voice.validate()?;
        tract.validate()?;

        let rates = TractRates::new(voice.tract_length, tract.temperature, tract.control_rate)?;

        let mouth_aperture = aperture_coefficient("mouthCoef", tract.mouth_coef, rates.nyquist)?;
        let nose_aperture = aperture_coefficient("noseCoef", tract.nose_coef, rates.nyquist)?;
        let throat = Throat::new(tract.throat_cutoff, tract.throat_volume, rates.sample_rate)?;
        let glottal_source = WavetableGlottalSource::new(
            tract.waveform,
            &voice,
            rates.sample_rate,
            tract.oversample,
        )?;
        let rate_converter = RateConverter::new(rates.sample_rate, tract.output_rate as f64)?;

        log::debug!(
            "tract length {} cm (actual {:.3} cm), sample rate {} Hz, control period {} samples",
            voice.tract_length,
            rates.actual_tube_length,
            rates.sample_rate,
            rates.control_period
        );
        log::debug!(
            "output rate {} Hz, converter ratio {:.5}, pad {}",
            tract.output_rate,
            rate_converter.ratio(),
            rate_converter.pad_size()
        );

        let mut vocal_tract = Self {
            crossmix_factor: tract.crossmix_factor(),
            breathiness_factor: voice.breathiness / 100.0,
            interpolator: ControlInterpolator::new(rates.control_period, tract.clamp_deltas),
            glottal_source,
            noise_source: NoiseSource::new(tract.noise_seed),
            noise_filter: NoiseFilter::new(),
            bandpass: BandpassFilter::new(),
            throat,
            tube: TubeNetwork::new(&voice, tract.damping_factor(), mouth_aperture, nose_aperture),
            rate_converter,
            output: OutputBuffer::new(tract.output_rate),
            voice,
            tract,
            rates,
        };
        vocal_tract.reset();

        Ok(vocal_tract)
    }

    pub fn from_config(config: &SynthConfig) -> Result<Self> {
        Self::new(config.voice.clone(), config.tract.clone())
    }

    /// Rebuilds every derived table from the stored parameters and resets.
    pub fn init(&mut self) -> Result<()> {
        *self = Self::new(self.voice.clone(), self.tract.clone())?;
        Ok(())
    }

    /// Replaces the voice and tract parameters and reinitializes.
    ///
    /// On error the engine keeps its previous configuration.
    pub fn configure(&mut self, voice: VoiceParams, tract: TractParams) -> Result<()> {
        *self = Self::new(voice, tract)?;
        Ok(())
    }

    /// Returns all signal state to its initial value.
    pub fn reset(&mut self) {
        self.interpolator.reset();
        self.glottal_source.reset();
        self.noise_source.reset();
        self.noise_filter.reset();
        self.bandpass.reset();
        self.throat.reset();
        self.tube.reset();
        self.rate_converter.reset();
        self.output.clear();
    }

    pub fn rates(&self) -> &TractRates {
        &self.rates
    }

    pub fn voice(&self) -> &VoiceParams {
        &self.voice
    }

    pub fn tract(&self) -> &TractParams {
        &self.tract
    }

    pub fn tube(&self) -> &TubeNetwork {
        &self.tube
    }

    pub fn interpolator(&self) -> &ControlInterpolator {
        &self.interpolator
    }

    /// Runs one control period heading for `target`.
    pub fn synthesize_control_period(&mut self, target: &VocalTractCtrl) -> Result<()> {
        self.check_frame(target)?;
        self.run_control_period(target);
        Ok(())
    }

    /// Synthesizes a whole utterance and drains the rate converter.
    ///
    /// Every unit is validated before the first sample is produced.
    pub fn synthesize(&mut self, utterance: &Utterance) -> Result<()> {
        utterance.validate()?;
        for unit in utterance.iter() {
            self.check_frame(&unit.ctrl)?;
        }

        let control_period_ms = self.rates.control_period_ms();
        for unit in utterance.iter() {
            for _ in 0..unit.repeat_count(control_period_ms) {
                self.run_control_period(&unit.ctrl);
            }
        }
        self.flush();

        log::info!(
            "synthesized {} units: {} samples at {} Hz, peak {:.4}",
            utterance.len(),
            self.output.len(),
            self.output.sample_rate(),
            self.output.peak()
        );

        Ok(())
    }

    /// Converts the samples still held by the rate converter.
    pub fn flush(&mut self) {
        let before = self.output.len();
        self.rate_converter.flush(&mut self.output);
        log::trace!("flushed {} samples", self.output.len() - before);
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    /// Hands the output to the caller, leaving an empty buffer behind.
    pub fn take_output(&mut self) -> OutputBuffer {
        core::mem::replace(&mut self.output, OutputBuffer::new(self.tract.output_rate))
    }

    /// Output scaled by the configured master volume.
    pub fn normalized_output(&self) -> alloc::vec::Vec<f32> {
        self.output.normalized(self.tract.volume)
    }

    /// Validates a frame against the voice and the simulation rate.
    ///
    /// The glottal frequency, reference pitch included, must stay below the
    /// simulation Nyquist frequency.
    fn check_frame(&self, ctrl: &VocalTractCtrl) -> Result<()> {
        ctrl.validate()?;

        let f0 = frequency(ctrl.glot_pitch + self.voice.reference_pitch);
        if !(f0 < self.rates.nyquist) {
            return Err(Error::invalid_config(
                "glotPitch",
                alloc::format!(
                    "pitch {} gives {f0} Hz, must stay below {} Hz",
                    ctrl.glot_pitch,
                    self.rates.nyquist
                ),
            ));
        }

        Ok(())
    }

    fn run_control_period(&mut self, target: &VocalTractCtrl) {
        self.interpolator.set_target(target);
        for _ in 0..self.rates.control_period {
            self.synthesize_sample();
            self.interpolator.step();
        }
    }

    #[inline]
    fn synthesize_sample(&mut self) {
        let ctrl = *self.interpolator.current();

        let f0 = frequency(ctrl.glot_pitch + self.voice.reference_pitch);
        let ax = amplitude(ctrl.glot_vol);
        let ah1 = amplitude(ctrl.asp_vol);

        self.tube.update_coefficients(&ctrl, &self.voice);
        self.bandpass
            .update(ctrl.fric_cf, ctrl.fric_bw, self.rates.sample_rate);

        let lp_noise = self.noise_filter.process(self.noise_source.next_sample());

        if self.tract.waveform == Waveform::Pulse {
            self.glottal_source.update(ax);
        }
        let pulse = self.glottal_source.next_sample(f0);

        let pulsed_noise = lp_noise * pulse;
        let breathiness = self.breathiness_factor;
        let pulse = ax * (pulse * (1.0 - breathiness) + pulsed_noise * breathiness);

        let signal = if self.tract.noise_modulation {
            let crossmix = (ax * self.crossmix_factor).min(1.0);
            pulsed_noise * crossmix + lp_noise * (1.0 - crossmix)
        } else {
            lp_noise
        };

        let frication = self.bandpass.process(signal);
        let sample = self
            .tube
            .process((pulse + ah1 * signal) * TUBE_INPUT_SCALE, frication)
            + self.throat.process(pulse * TUBE_INPUT_SCALE);

        self.rate_converter.data_fill(sample, &mut self.output);
    }
}
