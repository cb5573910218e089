//! TOML room descriptions.
//!
//! A room file names the geometry and climate, then lists surfaces that
//! reference either a preset material or one defined inline:
//!
//! ```toml
//! name = "Living room"
//! width_m = 5.0
//! length_m = 7.0
//! height_m = 3.0
//! temperature_c = 21.0
//! humidity_pct = 45.0
//!
//! [[surfaces]]
//! name = "floor"
//! area_m2 = 35.0
//! material = "carpet"
//!
//! [[surfaces]]
//! name = "walls"
//! area_m2 = 72.0
//! material = "bookshelves"
//!
//! [materials.bookshelves]
//! absorption = [0.30, 0.35, 0.35, 0.30, 0.25, 0.20]
//! ```

use anyhow::Context;
use resona_room::material::presets;
use resona_room::{AcousticMaterial, RoomError, RoomModel, Surface};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RoomFile {
    name: String,
    width_m: f32,
    length_m: f32,
    height_m: f32,
    temperature_c: Option<f32>,
    humidity_pct: Option<f32>,
    #[serde(default)]
    surfaces: Vec<SurfaceEntry>,
    #[serde(default)]
    materials: BTreeMap<String, MaterialEntry>,
}

#[derive(Debug, Deserialize)]
struct SurfaceEntry {
    name: String,
    area_m2: f32,
    material: String,
}

#[derive(Debug, Deserialize)]
struct MaterialEntry {
    /// Per-band coefficients in ascending band order, 125 Hz to 4 kHz.
    absorption: [f32; 6],
}

/// Loads and validates a room description from a TOML file.
pub fn load_room(path: &Path) -> anyhow::Result<RoomModel> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read room file '{}'", path.display()))?;
    let file: RoomFile = toml::from_str(&text)
        .with_context(|| format!("failed to parse room file '{}'", path.display()))?;

    let mut room = RoomModel::new(file.name.as_str(), file.width_m, file.length_m, file.height_m)?;
    if file.temperature_c.is_some() || file.humidity_pct.is_some() {
        room = room.with_climate(
            file.temperature_c.unwrap_or(20.0),
            file.humidity_pct.unwrap_or(50.0),
        )?;
    }

    let mut surfaces = Vec::with_capacity(file.surfaces.len());
    for entry in &file.surfaces {
        let material = resolve_material(&entry.material, &file.materials)?;
        surfaces.push(Surface::new(entry.name.as_str(), entry.area_m2, material)?);
    }
    Ok(room.with_surfaces(surfaces))
}

fn resolve_material(
    name: &str,
    inline: &BTreeMap<String, MaterialEntry>,
) -> anyhow::Result<AcousticMaterial> {
    if let Some(entry) = inline.get(name) {
        return Ok(AcousticMaterial::new(name, entry.absorption)?);
    }
    if let Some(material) = presets::by_name(name) {
        return Ok(material);
    }
    Err(RoomError::UnknownMaterial(name.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resona_room::FrequencyBand;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_room(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_room_with_presets_and_inline_materials() {
        let file = write_room(
            r#"
name = "Living room"
width_m = 5.0
length_m = 7.0
height_m = 3.0
humidity_pct = 45.0

[[surfaces]]
name = "floor"
area_m2 = 35.0
material = "carpet"

[[surfaces]]
name = "walls"
area_m2 = 72.0
material = "bookshelves"

[materials.bookshelves]
absorption = [0.30, 0.35, 0.35, 0.30, 0.25, 0.20]
"#,
        );

        let room = load_room(file.path()).unwrap();
        assert_eq!(room.name(), "Living room");
        assert_eq!(room.surfaces().len(), 2);
        assert_eq!(room.humidity_pct(), 45.0);
        assert_eq!(room.temperature_c(), 20.0);
        let shelves = room.surfaces()[1].material();
        assert_eq!(shelves.alpha(FrequencyBand::Hz125), 0.30);
    }

    #[test]
    fn minimal_room_needs_only_geometry() {
        let file = write_room(
            r#"
name = "Bare"
width_m = 4.0
length_m = 4.0
height_m = 2.5
"#,
        );
        let room = load_room(file.path()).unwrap();
        assert!(room.surfaces().is_empty());
        room.validate().unwrap();
    }

    #[test]
    fn unknown_material_is_an_error() {
        let file = write_room(
            r#"
name = "Bad"
width_m = 4.0
length_m = 4.0
height_m = 2.5

[[surfaces]]
name = "floor"
area_m2 = 16.0
material = "unobtainium"
"#,
        );
        let err = load_room(file.path()).unwrap_err();
        assert!(err.to_string().contains("unobtainium"));
    }

    #[test]
    fn invalid_geometry_is_an_error() {
        let file = write_room(
            r#"
name = "Flat"
width_m = 4.0
length_m = 4.0
height_m = 0.0
"#,
        );
        assert!(load_room(file.path()).is_err());
    }
}
