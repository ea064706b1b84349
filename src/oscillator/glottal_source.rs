//! Wavetable glottal pulse oscillator.
//!
//! The table holds one period of the glottal flow: a cubic rise over
//! `rise` percent of the period, a quadratic fall over up to `fall_max`
//! percent, and a closed phase for the rest. Louder phonation closes the
//! glottis faster, so [`WavetableGlottalSource::update`] shortens the fall
//! towards `fall_min` as the amplitude grows.
//!
//! With oversampling enabled the table is read at twice the simulation rate,
//! filtered by a maximally flat FIR and decimated.

use alloc::vec;
use alloc::vec::Vec;

#[allow(unused_imports)]
use num_traits::float::Float;

use core::f64::consts::PI;

use crate::config::{VoiceParams, Waveform};
use crate::error::Result;
use crate::filter::fir::{FirFilter, FIR_BETA, FIR_CUTOFF, FIR_GAMMA};
use crate::utils::{lerp, rint};

pub const TABLE_LENGTH: usize = 512;

const OVERSAMPLE: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct WavetableGlottalSource {
    table: Vec<f64>,
    waveform: Waveform,

    // Pulse shape, in table positions.
    table_div1: usize,
    table_div2: usize,
    tn_delta: usize,

    basic_increment: f64,
    position: f64,
    last_amplitude: Option<f64>,

    fir: Option<FirFilter>,
}

impl WavetableGlottalSource {
    pub fn new(
        waveform: Waveform,
        voice: &VoiceParams,
        sample_rate: f64,
        oversample: bool,
    ) -> Result<Self> {
        let rise = voice.glottal_pulse_rise;
        let fall_min = voice.glottal_pulse_fall_min;
        let fall_max = voice.glottal_pulse_fall_max;
        let length = TABLE_LENGTH as f64;

        let table_div1 = rint(length * (rise / 100.0)) as usize;
        let table_div2 = (rint(length * ((rise + fall_max) / 100.0)) as usize).min(TABLE_LENGTH);
        let tn_delta = rint(length * ((fall_max - fall_min) / 100.0)) as usize;

        let (basic_increment, fir) = if oversample {
            let fir = FirFilter::new(FIR_BETA, FIR_GAMMA, FIR_CUTOFF)?;
            (length / (OVERSAMPLE as f64 * sample_rate), Some(fir))
        } else {
            (length / sample_rate, None)
        };

        let mut source = Self {
            table: vec![0.0; TABLE_LENGTH],
            waveform,
            table_div1,
            table_div2,
            tn_delta,
            basic_increment,
            position: 0.0,
            last_amplitude: None,
            fir,
        };
        source.init_table();

        Ok(source)
    }

    fn init_table(&mut self) {
        match self.waveform {
            Waveform::Pulse => {
                let div1 = self.table_div1;
                let div2 = self.table_div2;

                for (i, sample) in self.table[..div1].iter_mut().enumerate() {
                    let x = i as f64 / div1 as f64;
                    let x2 = x * x;
                    *sample = 3.0 * x2 - 2.0 * x2 * x;
                }

                let tn_length = (div2 - div1) as f64;
                for (j, sample) in self.table[div1..div2].iter_mut().enumerate() {
                    let x = j as f64 / tn_length;
                    *sample = 1.0 - x * x;
                }

                self.table[div2..].fill(0.0);
            }
            Waveform::Sine => {
                for (i, sample) in self.table.iter_mut().enumerate() {
                    *sample = (i as f64 / TABLE_LENGTH as f64 * 2.0 * PI).sin();
                }
            }
        }
    }

    /// Rewinds the oscillator and clears the anti-aliasing filter.
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.last_amplitude = None;
        self.init_table();
        if let Some(fir) = self.fir.as_mut() {
            fir.reset();
        }
    }

    pub fn table(&self) -> &[f64] {
        &self.table
    }

    /// Reshapes the falling edge of the pulse for a glottal amplitude in 0..1.
    ///
    /// Has no effect on the sine table or when the amplitude is unchanged.
    pub fn update(&mut self, amplitude: f64) {
        if self.waveform != Waveform::Pulse || self.last_amplitude == Some(amplitude) {
            return;
        }
        self.last_amplitude = Some(amplitude);

        let div1 = self.table_div1;
        let shortening = rint(amplitude * self.tn_delta as f64) as usize;
        let new_div2 = self.table_div2.saturating_sub(shortening).max(div1);
        let new_tn_length = (new_div2 - div1) as f64;

        for (j, sample) in self.table[div1..new_div2].iter_mut().enumerate() {
            let x = j as f64 / new_tn_length;
            *sample = 1.0 - x * x;
        }
        self.table[new_div2..self.table_div2].fill(0.0);
    }

    /// Returns the next sample for a fundamental `frequency` in Hz.
    #[inline]
    pub fn next_sample(&mut self, frequency: f64) -> f64 {
        match self.fir.as_mut() {
            Some(fir) => {
                // Only the second of the two oversampled values is kept.
                let first = Self::read(&self.table, &mut self.position, frequency, self.basic_increment);
                fir.push(first);
                let second = Self::read(&self.table, &mut self.position, frequency, self.basic_increment);
                fir.process(second)
            }
            None => Self::read(&self.table, &mut self.position, frequency, self.basic_increment),
        }
    }

    #[inline]
    fn read(table: &[f64], position: &mut f64, frequency: f64, increment: f64) -> f64 {
        let length = TABLE_LENGTH as f64;
        *position = (*position + frequency * increment) % length;

        let lower = *position as usize;
        let upper = (lower + 1) % TABLE_LENGTH;
        lerp(table[lower], table[upper], *position - lower as f64)
    }
}
