//! Model-only prediction from a room description.

use crate::room_file::load_room;
use clap::Args;
use resona_room::{FrequencyBand, eyring_rt60, sabine_rt60};
use std::path::PathBuf;

#[derive(Args)]
pub struct PredictArgs {
    /// Room description TOML file
    #[arg(value_name = "ROOM")]
    room: PathBuf,

    /// Ignore the air-absorption correction
    #[arg(long)]
    no_air_absorption: bool,
}

pub fn run(args: PredictArgs) -> anyhow::Result<()> {
    let room = load_room(&args.room)?;
    let air = !args.no_air_absorption;

    println!(
        "{}: {:.1} x {:.1} x {:.1} m, {:.1} m3, {:.1} m2 boundary",
        room.name(),
        room.width_m(),
        room.length_m(),
        room.height_m(),
        room.volume_m3(),
        room.total_surface_area_m2()
    );
    println!("{:<10} {:>10} {:>10}", "band", "sabine", "eyring");

    let mut sabine_sum = 0.0;
    let mut eyring_sum = 0.0;
    for band in FrequencyBand::ALL {
        let sab = sabine_rt60(&room, band, air);
        let eyr = eyring_rt60(&room, band, air);
        sabine_sum += sab;
        eyring_sum += eyr;
        println!("{:<10} {:>9.2}s {:>9.2}s", band.label(), sab, eyr);
    }
    let n = FrequencyBand::ALL.len() as f32;
    println!("{:<10} {:>9.2}s {:>9.2}s", "average", sabine_sum / n, eyring_sum / n);

    Ok(())
}
