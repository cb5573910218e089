//! Generate the measurement sweep and its inverse filter.

use clap::Args;
use resona_engine::{SweepParams, synthesize_inverse, synthesize_sweep};
use resona_io::write_wav;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    /// Sample rate in Hz
    #[arg(long, default_value = "44100")]
    sample_rate: u32,

    /// Sweep start frequency in Hz
    #[arg(long, default_value = "20.0")]
    start_hz: f32,

    /// Sweep end frequency in Hz
    #[arg(long, default_value = "20000.0")]
    end_hz: f32,

    /// Sweep duration in seconds
    #[arg(long, default_value = "3.0")]
    duration: f32,

    /// Output path for the sweep
    #[arg(long, default_value = "sweep.wav")]
    sweep_out: PathBuf,

    /// Output path for the inverse filter
    #[arg(long, default_value = "inverse.wav")]
    inverse_out: PathBuf,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let params = SweepParams::new(args.sample_rate)
        .with_range(args.start_hz, args.end_hz)
        .with_duration(args.duration);

    let sweep = synthesize_sweep(&params);
    write_wav(&args.sweep_out, &sweep, args.sample_rate)?;
    println!(
        "wrote {} ({} samples, {:.0} Hz - {:.0} Hz over {} s)",
        args.sweep_out.display(),
        sweep.len(),
        args.start_hz,
        args.end_hz,
        args.duration
    );

    let inverse = synthesize_inverse(&params);
    write_wav(&args.inverse_out, &inverse, args.sample_rate)?;
    println!("wrote {} ({} samples)", args.inverse_out.display(), inverse.len());

    Ok(())
}
