//! Renders a short vowel sequence to a 16-bit WAV file.
//!
//! Usage: `cargo run --example render_utterance [config.json] [output.wav]`

use std::error::Error;

use hound::{SampleFormat, WavSpec, WavWriter};
use simple_logger::SimpleLogger;

use trm_dsp::{ArticulationTable, ArticulatoryUnit, SynthConfig, Utterance, VocalTract, VocalTractCtrl};

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .unwrap();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => serde_json::from_str::<SynthConfig>(&std::fs::read_to_string(path)?)?,
        None => SynthConfig::default(),
    };
    let output_path = args.next().unwrap_or_else(|| String::from("out/render_utterance.wav"));

    let table = vowel_table();
    let mut utterance = Utterance::new();
    for name in ["h", "aa", "iy", "uw", "m", "aa"] {
        if let Err(error) = utterance.push_lookup(&table, name) {
            log::warn!("skipping unit: {error}");
        }
    }

    let mut tract = VocalTract::from_config(&config)?;
    tract.synthesize(&utterance)?;
    let output = tract.take_output();

    if let Some(parent) = std::path::Path::new(&output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let spec = WavSpec {
        channels: 1,
        sample_rate: output.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&output_path, spec)?;
    for sample in output.to_pcm16(config.tract.volume) {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    log::info!(
        "wrote {:.2} s to {}",
        output.duration_secs(),
        output_path
    );

    Ok(())
}

fn vowel_table() -> ArticulationTable {
    let voiced = |radii: [f64; 7], velum: f64| VocalTractCtrl {
        glot_vol: 60.0,
        radii,
        velum,
        ..Default::default()
    };

    let mut table = ArticulationTable::new();
    table.insert(
        "aa",
        ArticulatoryUnit::new(voiced([0.65, 0.65, 0.65, 1.31, 1.23, 1.31, 1.67], 0.1), 180.0, 40.0),
    );
    table.insert(
        "iy",
        ArticulatoryUnit::new(voiced([1.29, 1.67, 1.91, 1.99, 0.63, 0.29, 0.58], 0.1), 160.0, 40.0),
    );
    table.insert(
        "uw",
        ArticulatoryUnit::new(voiced([0.8, 1.4, 1.6, 1.4, 0.9, 0.64, 0.35], 0.1), 160.0, 40.0),
    );
    table.insert(
        "m",
        ArticulatoryUnit::new(voiced([0.8, 0.89, 0.99, 0.81, 0.76, 1.05, 0.1], 1.5), 90.0, 30.0),
    );
    table.insert(
        "h",
        ArticulatoryUnit::new(
            VocalTractCtrl {
                asp_vol: 50.0,
                radii: [0.8, 0.89, 0.99, 0.81, 0.76, 1.05, 1.23],
                ..Default::default()
            },
            60.0,
            20.0,
        ),
    );
    table
}
