//! Band-limited sample rate converter.
//!
//! Converts the tube simulation rate to the requested output rate by
//! convolving the input with a Kaiser-windowed sinc whose position between
//! input samples is tracked by a fixed-point [`TimeRegister`]. Input is
//! collected in a circular buffer and converted in blocks, keeping `pad`
//! samples of look-ahead and history around the block.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::error::{Error, Result};
use crate::output::OutputBuffer;
use crate::utils::rint;
use crate::utils::ring_buffer::RingBuffer;

use super::kaiser::FilterTable;
use super::time_register::{TimeRegister, FRACTION_RANGE, L_RANGE, M_BITS, M_RANGE};

/// Zero crossings of the sinc on each side of its centre.
pub const ZERO_CROSSINGS: usize = 13;

pub const FILTER_LENGTH: usize = ZERO_CROSSINGS * L_RANGE;

/// Lowpass cutoff relative to the Nyquist frequency of the slower rate.
pub const LP_CUTOFF: f64 = 11.0 / 13.0;

pub const KAISER_BETA: f64 = 5.658;

pub const BUFFER_SIZE: usize = 1024;

const M_MASK: u32 = (M_RANGE as u32) - 1;

#[derive(Debug, Clone, PartialEq)]
pub struct RateConverter {
    input_rate: f64,
    output_rate: f64,
    ratio: f64,
    gain: f64,

    filter: FilterTable,
    buffer: RingBuffer<BUFFER_SIZE>,

    pad: usize,
    fill_size: usize,
    fill_counter: usize,
    empty_ptr: usize,

    time_register: TimeRegister,
    time_increment: u32,
    filter_increment: usize,
    phase_increment: u32,
}

impl RateConverter {
    pub fn new(input_rate: f64, output_rate: f64) -> Result<Self> {
        if !(input_rate > 0.0 && input_rate.is_finite()) {
            return Err(Error::invalid_config(
                "sampleRate",
                "input sample rate must be positive",
            ));
        }
        if !(output_rate > 0.0 && output_rate.is_finite()) {
            return Err(Error::invalid_config(
                "outputRate",
                "output sample rate must be positive",
            ));
        }

        let ratio = output_rate / input_rate;
        let time_increment = rint(FRACTION_RANGE as f64 / ratio);
        if !(time_increment >= 1.0 && time_increment <= u32::MAX as f64 / 2.0) {
            return Err(Error::invalid_config(
                "outputRate",
                "conversion ratio is out of range",
            ));
        }
        let time_increment = time_increment as u32;
        let rounded_ratio = FRACTION_RANGE as f64 / time_increment as f64;

        let (pad, filter_increment, phase_increment, gain) = if ratio >= 1.0 {
            (ZERO_CROSSINGS, L_RANGE, 0, 1.0)
        } else {
            let pad = (ZERO_CROSSINGS as f64 / rounded_ratio) as usize + 1;
            let phase_increment = rint(ratio * FRACTION_RANGE as f64) as u32;
            (pad, 0, phase_increment.max(1), ratio)
        };

        if 2 * pad >= BUFFER_SIZE {
            return Err(Error::invalid_config(
                "outputRate",
                "downsampling ratio needs a longer conversion buffer",
            ));
        }

        let filter = FilterTable::windowed_sinc(ZERO_CROSSINGS, L_RANGE, LP_CUTOFF, KAISER_BETA)?;

        log::debug!(
            "rate converter {} Hz -> {} Hz, ratio {:.5}, pad {}",
            input_rate,
            output_rate,
            ratio,
            pad
        );

        let mut converter = Self {
            input_rate,
            output_rate,
            ratio,
            gain,
            filter,
            buffer: RingBuffer::new(),
            pad,
            fill_size: BUFFER_SIZE - 2 * pad,
            fill_counter: 0,
            empty_ptr: 0,
            time_register: TimeRegister::new(),
            time_increment,
            filter_increment,
            phase_increment,
        };
        converter.reset();

        Ok(converter)
    }

    pub fn reset(&mut self) {
        self.buffer.reset(self.pad);
        self.fill_counter = 0;
        self.empty_ptr = 0;
        self.time_register = TimeRegister::new();
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn input_rate(&self) -> f64 {
        self.input_rate
    }

    pub fn output_rate(&self) -> f64 {
        self.output_rate
    }

    /// Input samples kept on either side of a converted block.
    pub fn pad_size(&self) -> usize {
        self.pad
    }

    pub fn filter(&self) -> &FilterTable {
        &self.filter
    }

    /// Queues one input sample, converting a block once enough have arrived.
    #[inline]
    pub fn data_fill(&mut self, sample: f64, output: &mut OutputBuffer) {
        self.buffer.push(sample);
        self.fill_counter += 1;
        if self.fill_counter >= self.fill_size {
            self.data_empty(output);
            self.fill_counter = 0;
        }
    }

    /// Converts every buffered sample that has `pad` samples of look-ahead.
    pub fn data_empty(&mut self, output: &mut OutputBuffer) {
        let fill_ptr = self.buffer.write_position();
        let mut end_ptr = (fill_ptr + BUFFER_SIZE - self.pad) % BUFFER_SIZE;
        if end_ptr < self.empty_ptr {
            end_ptr += BUFFER_SIZE;
        }

        while self.empty_ptr < end_ptr {
            let left = self.time_register;
            let right = left.mirrored();

            let sample = if self.ratio >= 1.0 {
                self.upsample_wing(left, -1) + self.upsample_wing(right, 1)
            } else {
                self.downsample_wing(left, -1) + self.downsample_wing(right, 1)
            };
            output.push(sample * self.gain);

            self.time_register.advance(self.time_increment);
            self.empty_ptr += self.time_register.take_integer();
            if self.empty_ptr >= BUFFER_SIZE {
                self.empty_ptr -= BUFFER_SIZE;
                end_ptr -= BUFFER_SIZE;
            }
        }
    }

    /// Pads the input with silence and converts what is left in the buffer.
    pub fn flush(&mut self, output: &mut OutputBuffer) {
        for _ in 0..2 * self.pad {
            self.data_fill(0.0, output);
        }
        self.data_empty(output);
    }

    /// One wing of the convolution when the output rate is the faster one.
    ///
    /// The left wing (`step` -1) starts at the current sample and walks back,
    /// the right wing (`step` 1) starts one sample ahead and walks forward.
    #[inline]
    fn upsample_wing(&self, register: TimeRegister, step: isize) -> f64 {
        let interpolation = register.interpolation();
        let mut offset = if step < 0 { 0 } else { 1 };
        let mut filter_index = register.filter_index();
        let mut sum = 0.0;

        while filter_index < FILTER_LENGTH {
            sum += self.buffer.read(self.empty_ptr, offset)
                * self.filter.interpolate(filter_index, interpolation);
            offset += step;
            filter_index += self.filter_increment;
        }

        sum
    }

    /// One wing of the convolution when the output rate is the slower one.
    ///
    /// The kernel is stretched to the output rate by stepping through the
    /// table `ratio` times as fast.
    #[inline]
    fn downsample_wing(&self, register: TimeRegister, step: isize) -> f64 {
        let mut offset = if step < 0 { 0 } else { 1 };
        let mut phase = rint(register.fraction as f64 * self.ratio) as u32;
        let mut sum = 0.0;

        loop {
            let filter_index = (phase >> M_BITS) as usize;
            if filter_index >= FILTER_LENGTH {
                break;
            }
            let interpolation = (phase & M_MASK) as f64 / M_RANGE as f64;
            sum += self.buffer.read(self.empty_ptr, offset)
                * self.filter.interpolate(filter_index, interpolation);
            offset += step;
            phase += self.phase_increment;
        }

        sum
    }
}
