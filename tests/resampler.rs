//! Tests for the sample rate converter


use std::f64::consts::PI;

use trm_dsp::error::Error;
use trm_dsp::output::OutputBuffer;
use trm_dsp::resampler::kaiser::{bessel_i0, FilterTable};
use trm_dsp::resampler::rate_converter::{
    RateConverter, FILTER_LENGTH, KAISER_BETA, LP_CUTOFF, ZERO_CROSSINGS,
};
use trm_dsp::resampler::time_register::{TimeRegister, FRACTION_RANGE, L_RANGE};
use trm_dsp::utils::ring_buffer::RingBuffer;

fn convert(input_rate: f64, output_rate: f64, input: &[f64]) -> OutputBuffer {
    let mut converter = RateConverter::new(input_rate, output_rate).unwrap();
    let mut output = OutputBuffer::new(output_rate as u32);
    for sample in input {
        converter.data_fill(*sample, &mut output);
    }
    converter.flush(&mut output);
    output
}

#[test]
fn bessel_series() {
    assert_eq!(bessel_i0(0.0), 1.0);
    assert!((bessel_i0(1.0) - 1.266_065_877_752_008_4).abs() < 1e-14);
    assert!((bessel_i0(KAISER_BETA) - bessel_i0(-KAISER_BETA)).abs() < 1e-12);
}

#[test]
fn sinc_kernel() {
    let table = FilterTable::windowed_sinc(ZERO_CROSSINGS, L_RANGE, LP_CUTOFF, KAISER_BETA).unwrap();

    assert_eq!(table.len(), FILTER_LENGTH);
    assert!((table.h[0] - 11.0 / 13.0).abs() < 1e-12);
    assert!(table.h.iter().all(|h| h.abs() <= table.h[0]));

    for i in 0..FILTER_LENGTH - 1 {
        assert_eq!(table.delta_h[i], table.h[i + 1] - table.h[i]);
    }
    assert_eq!(table.delta_h[FILTER_LENGTH - 1], -table.h[FILTER_LENGTH - 1]);

    // Window tapers towards the edge of the table without reaching zero.
    let edge = table.h[FILTER_LENGTH - 1];
    assert!(edge != 0.0);
    assert!(edge.abs() < 1e-5, "edge tap {edge}");
}

#[test]
fn sinc_design_errors() {
    for (cutoff, beta) in [(LP_CUTOFF, 0.0), (LP_CUTOFF, -1.0), (0.0, KAISER_BETA), (1.5, KAISER_BETA)] {
        assert!(matches!(
            FilterTable::windowed_sinc(ZERO_CROSSINGS, L_RANGE, cutoff, beta),
            Err(Error::DegenerateFilterDesign(_))
        ));
    }
    assert!(FilterTable::windowed_sinc(0, L_RANGE, LP_CUTOFF, KAISER_BETA).is_err());
}

#[test]
fn time_register_fields() {
    let mut register = TimeRegister::new();
    register.advance(FRACTION_RANGE);
    assert_eq!(register, TimeRegister { integer: 1, fraction: 0 });

    register.advance(FRACTION_RANGE + FRACTION_RANGE / 2);
    assert_eq!(register.integer, 2);
    assert_eq!(register.fraction, 0x8000);
    assert_eq!(register.filter_index(), 128);
    assert_eq!(register.take_integer(), 2);
    assert_eq!(register.integer, 0);

    let register = TimeRegister { integer: 0, fraction: 0x0080 };
    assert_eq!(register.interpolation(), 0.5);
    assert_eq!(register.mirrored().fraction, 0xFF7F);
    assert_eq!(TimeRegister::new().mirrored().fraction, 0xFFFF);
}

#[test]
fn ring_buffer_wraps() {
    let mut buffer = RingBuffer::<4>::new();
    assert_eq!(buffer.capacity(), 4);

    for sample in 1..=6 {
        buffer.push(sample as f64);
    }
    assert_eq!(buffer.write_position(), 2);
    assert_eq!(buffer.peek_back(0), 6.0);
    assert_eq!(buffer.peek_back(3), 3.0);
    assert_eq!(buffer.peek_back(4), 6.0);

    assert_eq!(buffer.read(0, -1), 4.0);
    assert_eq!(buffer.read(3, 2), 6.0);

    buffer.reset(5);
    assert_eq!(buffer.write_position(), 1);
    assert_eq!(buffer.peek_back(0), 0.0);
}

#[test]
fn identity_at_unit_ratio() {
    let mut input = vec![0.0; 100];
    input[0] = 1.0;

    let converter = RateConverter::new(22050.0, 22050.0).unwrap();
    assert_eq!(converter.ratio(), 1.0);
    assert_eq!(converter.pad_size(), ZERO_CROSSINGS);

    let output = convert(22050.0, 22050.0, &input);
    let samples = output.samples();
    assert_eq!(samples.len(), input.len() + 2 * ZERO_CROSSINGS);

    let (peak_index, peak) = samples
        .iter()
        .enumerate()
        .fold((0, 0.0_f32), |best, (i, s)| if s.abs() > best.1.abs() { (i, *s) } else { best });

    // Delayed by the pad, scaled by the kernel's centre tap.
    assert_eq!(peak_index, ZERO_CROSSINGS);
    assert!((peak as f64 - 11.0 / 13.0).abs() < 1e-6);
    assert!((output.peak() - peak as f64).abs() < 1e-6);
}

#[test]
fn unity_dc_gain() {
    let input = vec![1.0; 3000];

    for (input_rate, output_rate) in [
        (22050.0, 22050.0),
        (19750.0, 22050.0),
        (19750.0, 44100.0),
        (23000.0, 22050.0),
        (46250.0, 22050.0),
    ] {
        let output = convert(input_rate, output_rate, &input);
        let samples = output.samples();
        let settled = &samples[200..samples.len() / 2];
        for sample in settled {
            assert!(
                (*sample as f64 - 1.0).abs() < 2e-3,
                "{input_rate} -> {output_rate}: {sample}"
            );
        }
    }
}

#[test]
fn output_length_follows_ratio() {
    let input = vec![0.0; 10000];

    for (input_rate, output_rate) in [(19750.0, 22050.0), (23000.0, 22050.0), (19750.0, 44100.0)] {
        let converter = RateConverter::new(input_rate, output_rate).unwrap();
        let padded = (input.len() + 2 * converter.pad_size()) as f64;
        let expected = padded * output_rate / input_rate;

        let output = convert(input_rate, output_rate, &input);
        assert!(
            (output.len() as f64 - expected).abs() < 3.0,
            "{input_rate} -> {output_rate}: {} samples, expected {expected}",
            output.len()
        );
    }
}

#[test]
fn downsampling_pad() {
    assert_eq!(RateConverter::new(23000.0, 22050.0).unwrap().pad_size(), 14);
    assert_eq!(RateConverter::new(46250.0, 22050.0).unwrap().pad_size(), 28);
}

#[test]
fn invalid_rates() {
    assert!(matches!(
        RateConverter::new(0.0, 22050.0),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        RateConverter::new(19750.0, 0.0),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(RateConverter::new(f64::NAN, 22050.0).is_err());
}

#[test]
fn reset_restarts_conversion() {
    let input: Vec<f64> = (0..2000).map(|n| (n as f64 * 0.05).sin()).collect();
    let mut converter = RateConverter::new(19750.0, 22050.0).unwrap();

    let mut first = OutputBuffer::new(22050);
    input.iter().for_each(|x| converter.data_fill(*x, &mut first));
    converter.flush(&mut first);

    converter.reset();
    let mut second = OutputBuffer::new(22050);
    input.iter().for_each(|x| converter.data_fill(*x, &mut second));
    converter.flush(&mut second);

    assert_eq!(first, second);
}

#[test]
fn upsampled_sine() {
    let input_rate = 19750.0;
    let output_rate = 44100.0;
    let frequency = 440.0;

    let input: Vec<f64> = (0..input_rate as usize)
        .map(|n| 0.5 * (2.0 * PI * frequency * n as f64 / input_rate).sin())
        .collect();
    let output = convert(input_rate, output_rate, &input);

    let settled = &output.samples()[1000..40000];
    let peak = settled.iter().fold(0.0_f32, |peak, s| peak.max(s.abs()));
    assert!((peak - 0.5).abs() < 0.01, "peak {peak}");

    wav_writer::write("resampler/sine_440.wav", output.samples(), output_rate as u32).ok();
}
