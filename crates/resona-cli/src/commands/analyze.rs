//! Analyze a measurement recording against a room description.

use crate::room_file::load_room;
use anyhow::Context;
use clap::{Args, ValueEnum};
use resona_engine::{
    AnalysisOptions, DEFAULT_IMPULSE_THRESHOLD, MeasurementMode, SweepParams, analyze,
};
use resona_io::read_wav;
use resona_room::FrequencyBand;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// The recording captured a played exponential sweep
    Ess,
    /// The recording captured a clap or balloon burst
    Impulse,
    /// The file already is an impulse response
    Raw,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Measurement WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Room description TOML file
    #[arg(short, long)]
    room: PathBuf,

    /// How the recording was excited
    #[arg(long, value_enum, default_value = "raw")]
    mode: Mode,

    /// Sweep start frequency in Hz (ESS mode)
    #[arg(long, default_value = "20.0")]
    sweep_start_hz: f32,

    /// Sweep end frequency in Hz (ESS mode)
    #[arg(long, default_value = "20000.0")]
    sweep_end_hz: f32,

    /// Sweep duration in seconds (ESS mode)
    #[arg(long, default_value = "3.0")]
    sweep_duration: f32,

    /// Peak threshold for impulse detection (impulse mode)
    #[arg(long, default_value_t = DEFAULT_IMPULSE_THRESHOLD)]
    threshold: f32,

    /// Analyze the broadband decay instead of octave bands
    #[arg(long)]
    broadband: bool,

    /// Ignore the air-absorption correction in the predictions
    #[arg(long)]
    no_air_absorption: bool,

    /// Write the full analysis as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let (samples, sample_rate) = read_wav(&args.input)
        .with_context(|| format!("failed to load '{}'", args.input.display()))?;
    let room = load_room(&args.room)?;

    let mode = match args.mode {
        Mode::Ess => MeasurementMode::Ess(
            SweepParams::new(sample_rate)
                .with_range(args.sweep_start_hz, args.sweep_end_hz)
                .with_duration(args.sweep_duration),
        ),
        Mode::Impulse => MeasurementMode::Impulse {
            threshold: args.threshold,
        },
        Mode::Raw => MeasurementMode::Raw,
    };

    let options = AnalysisOptions {
        filter_by_band: !args.broadband,
        use_air_absorption: !args.no_air_absorption,
        ..AnalysisOptions::default()
    };

    let analysis = analyze(&samples, sample_rate, &mode, &room, &options)?;

    println!(
        "{}: {:.1} m3, measured over {:.2} s of audio at {} Hz",
        analysis.room.name,
        analysis.room.room_volume_m3,
        samples.len() as f32 / sample_rate as f32,
        sample_rate
    );
    println!(
        "{:<10} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "band", "measured", "edt", "t30", "sabine", "eyring"
    );
    for band in FrequencyBand::ALL {
        println!(
            "{:<10} {:>9} {:>9} {:>9} {:>8.2}s {:>8.2}s",
            band.label(),
            fmt_opt(analysis.measured_rt60_seconds[&band]),
            fmt_opt(analysis.edt_seconds[&band]),
            fmt_opt(analysis.t30_seconds[&band]),
            analysis.sabine_rt60_seconds[&band],
            analysis.eyring_rt60_seconds[&band],
        );
    }
    println!(
        "{:<10} {:>9} {:>9} {:>9} {:>8.2}s {:>8.2}s",
        "average",
        fmt_opt(analysis.average_measured_rt60_seconds),
        "",
        "",
        analysis.average_sabine_rt60_seconds,
        analysis.average_eyring_rt60_seconds,
    );
    println!("quality: {}", analysis.quality_text);

    for warning in &analysis.warnings {
        eprintln!("warning: {warning}");
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&analysis)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

fn fmt_opt(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{v:.2}s"),
        None => "-".to_string(),
    }
}
