//! Tests for the glottal oscillator

mod modulation;

use trm_dsp::config::{VoiceParams, Waveform};
use trm_dsp::oscillator::glottal_source::{WavetableGlottalSource, TABLE_LENGTH};

const SAMPLE_RATE: f64 = 23000.0;

fn rising_zero_crossings(samples: &[f64], level: f64) -> usize {
    samples
        .windows(2)
        .filter(|pair| pair[0] < level && pair[1] >= level)
        .count()
}

#[test]
fn pulse_table_shape() {
    let voice = VoiceParams::female();
    let source = WavetableGlottalSource::new(Waveform::Pulse, &voice, SAMPLE_RATE, false).unwrap();
    let table = source.table();

    assert_eq!(table.len(), TABLE_LENGTH);

    // 32 % rise, 32 % fall, closed for the rest.
    let div1 = 164;
    let div2 = 328;
    assert_eq!(table[0], 0.0);
    assert_eq!(table[div1], 1.0);
    assert!(table[..div1].windows(2).all(|pair| pair[1] > pair[0]));
    assert!(table[div1..div2].windows(2).all(|pair| pair[1] < pair[0]));
    assert!(table[div2..].iter().all(|sample| *sample == 0.0));
}

#[test]
fn louder_pulses_close_faster() {
    let voice = VoiceParams::female();
    let mut source =
        WavetableGlottalSource::new(Waveform::Pulse, &voice, SAMPLE_RATE, false).unwrap();

    let open = |table: &[f64]| table.iter().filter(|sample| **sample > 0.0).count();
    let full_fall = open(source.table());

    source.update(0.0);
    assert_eq!(open(source.table()), full_fall);

    source.update(1.0);
    let short_fall = open(source.table());
    // Fall shrinks from 32 % to 16 % of the table.
    assert_eq!(full_fall - short_fall, 82);

    source.update(0.5);
    let half_fall = open(source.table());
    assert!(half_fall > short_fall && half_fall < full_fall);

    source.reset();
    assert_eq!(open(source.table()), full_fall);
}

#[test]
fn fixed_fall_voice_ignores_amplitude() {
    let voice = VoiceParams::male();
    let mut source =
        WavetableGlottalSource::new(Waveform::Pulse, &voice, SAMPLE_RATE, false).unwrap();
    let table = source.table().to_vec();

    source.update(1.0);
    assert_eq!(source.table(), &table[..]);
}

#[test]
fn sine_frequency() {
    let voice = VoiceParams::default();
    let frequency = 130.0;

    for oversample in [false, true] {
        let mut source =
            WavetableGlottalSource::new(Waveform::Sine, &voice, SAMPLE_RATE, oversample).unwrap();
        let samples: Vec<f64> = (0..SAMPLE_RATE as usize)
            .map(|_| source.next_sample(frequency))
            .collect();

        let crossings = rising_zero_crossings(&samples, 0.0) as f64;
        assert!(
            (crossings - frequency).abs() <= 1.0,
            "oversample {oversample}: {crossings} crossings"
        );

        let peak = samples[1000..].iter().fold(0.0_f64, |peak, s| peak.max(s.abs()));
        assert!((peak - 1.0).abs() < 0.01, "oversample {oversample}: peak {peak}");
    }
}

#[test]
fn pulse_frequency() {
    let voice = VoiceParams::female();
    let frequency = 220.0;
    let mut source = WavetableGlottalSource::new(Waveform::Pulse, &voice, SAMPLE_RATE, true).unwrap();
    source.update(1.0);

    let samples: Vec<f64> = (0..SAMPLE_RATE as usize)
        .map(|_| source.next_sample(frequency))
        .collect();

    let crossings = rising_zero_crossings(&samples, 0.5) as f64;
    assert!((crossings - frequency).abs() <= 1.0, "{crossings} pulses");
}

#[test]
fn huge_increment_wraps_in_one_step() {
    let voice = VoiceParams::female();

    for oversample in [false, true] {
        let mut source =
            WavetableGlottalSource::new(Waveform::Pulse, &voice, SAMPLE_RATE, oversample).unwrap();
        for frequency in [1.0e12, 9.0e19, 3.5e25] {
            let sample = source.next_sample(frequency);
            assert!(sample.is_finite(), "{frequency} Hz gave {sample}");
        }
    }
}

#[test]
fn glottal_sweep() {
    let voice = VoiceParams::female();
    let duration = 2.0;
    let mut source = WavetableGlottalSource::new(Waveform::Pulse, &voice, SAMPLE_RATE, true).unwrap();
    let mut wav_data = Vec::new();

    let samples = (duration * SAMPLE_RATE) as usize;
    for n in 0..samples {
        let modulation = modulation::ramp_up(n, samples);
        source.update(modulation);
        wav_data.push(source.next_sample(100.0 + 200.0 * modulation) as f32);
    }

    assert!(wav_data.iter().all(|sample| sample.is_finite()));
    wav_writer::write("oscillator/glottal_sweep.wav", &wav_data, SAMPLE_RATE as u32).ok();
}
