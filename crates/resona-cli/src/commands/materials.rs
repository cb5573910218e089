//! List the built-in absorption material presets.

use clap::Args;
use resona_room::FrequencyBand;
use resona_room::material::presets;

#[derive(Args)]
pub struct MaterialsArgs {}

pub fn run(_args: MaterialsArgs) -> anyhow::Result<()> {
    print!("{:<16}", "material");
    for band in FrequencyBand::ALL {
        print!(" {:>7}", band.label());
    }
    println!();

    for material in presets::all() {
        print!("{:<16}", material.name());
        for band in FrequencyBand::ALL {
            print!(" {:>7.2}", material.alpha(band));
        }
        println!();
    }
    Ok(())
}
