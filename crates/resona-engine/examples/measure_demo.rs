//! Demonstrates the full measurement pipeline on synthetic audio.
//!
//! Run with: cargo run --example measure_demo -p resona-engine

use resona_engine::{AnalysisOptions, MeasurementMode, analyze};
use resona_room::material::presets;
use resona_room::{FrequencyBand, RoomModel, Surface};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let room = RoomModel::new("demo room", 5.0, 7.0, 3.0)?.with_surfaces(vec![
        Surface::new("floor", 35.0, presets::wood_floor())?,
        Surface::new("walls", 72.0, presets::plaster())?,
        Surface::new("ceiling", 35.0, presets::plaster())?,
    ]);

    // Synthesize an impulse response with a 0.6 s reverberation time:
    // noise with an exponential envelope that drops 60 dB over 0.6 s.
    let sample_rate = 44100u32;
    let rt60 = 0.6f32;
    let k = 1000.0f32.ln() / rt60;
    let mut state = 0x2545F491u32;
    let ir: Vec<f32> = (0..sample_rate as usize * 2)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state as f32 / u32::MAX as f32) * 2.0 - 1.0;
            noise * (-k * i as f32 / sample_rate as f32).exp()
        })
        .collect();

    let analysis = analyze(
        &ir,
        sample_rate,
        &MeasurementMode::Raw,
        &room,
        &AnalysisOptions::default(),
    )?;

    println!("room: {} ({:.0} m3)", analysis.room.name, analysis.room.room_volume_m3);
    for band in FrequencyBand::ALL {
        println!(
            "{:>7}: measured {:?} s, sabine {:.2} s, eyring {:.2} s",
            band.label(),
            analysis.measured_rt60_seconds[&band],
            analysis.sabine_rt60_seconds[&band],
            analysis.eyring_rt60_seconds[&band],
        );
    }
    println!("quality: {}", analysis.quality_text);
    Ok(())
}
