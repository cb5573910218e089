//! Absorption materials.
//!
//! An [`AcousticMaterial`] maps every octave band to an absorption
//! coefficient. The mapping is total by construction: the constructor takes
//! a six-element table indexed in band order, so a material can never be
//! missing a band.

use crate::band::FrequencyBand;
use crate::error::RoomError;
use serde::{Deserialize, Serialize};

/// Absorption coefficient used when a room supplies no surfaces.
pub const DEFAULT_ABSORPTION: f32 = 0.1;

/// A named absorption profile over the six octave bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcousticMaterial {
    name: String,
    /// Coefficients in band order (125 Hz .. 4 kHz).
    absorption: [f32; 6],
}

impl AcousticMaterial {
    /// Creates a material from a per-band coefficient table.
    ///
    /// The table is indexed in [`FrequencyBand::ALL`] order. Every
    /// coefficient must lie in [0, 1].
    pub fn new(name: impl Into<String>, absorption: [f32; 6]) -> Result<Self, RoomError> {
        let name = name.into();
        for (i, &alpha) in absorption.iter().enumerate() {
            if !(0.0..=1.0).contains(&alpha) || !alpha.is_finite() {
                return Err(RoomError::AbsorptionOutOfRange {
                    material: name,
                    band: FrequencyBand::ALL[i],
                    alpha,
                });
            }
        }
        Ok(Self { name, absorption })
    }

    /// The fallback material: α = 0.1 in every band.
    pub fn default_material() -> Self {
        Self {
            name: "default".to_string(),
            absorption: [DEFAULT_ABSORPTION; 6],
        }
    }

    /// Material name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absorption coefficient at the given band.
    pub fn alpha(&self, band: FrequencyBand) -> f32 {
        self.absorption[band.index()]
    }
}

/// Preset absorption profiles for common building materials.
///
/// Coefficients are octave-band values from published absorption tables,
/// rounded to two digits.
pub mod presets {
    use super::AcousticMaterial;

    macro_rules! preset {
        ($fn_name:ident, $name:literal, $alphas:expr, $doc:literal) => {
            #[doc = $doc]
            pub fn $fn_name() -> AcousticMaterial {
                // Table values are all within [0, 1]; unwrap cannot fire.
                AcousticMaterial::new($name, $alphas).unwrap()
            }
        };
    }

    preset!(
        concrete,
        "concrete",
        [0.01, 0.01, 0.02, 0.02, 0.02, 0.03],
        "Sealed concrete."
    );
    preset!(
        brick,
        "brick",
        [0.03, 0.03, 0.03, 0.04, 0.05, 0.07],
        "Unglazed brick."
    );
    preset!(
        plaster,
        "plaster",
        [0.14, 0.10, 0.06, 0.05, 0.04, 0.03],
        "Plaster on lath."
    );
    preset!(
        wood_floor,
        "wood_floor",
        [0.15, 0.11, 0.10, 0.07, 0.06, 0.07],
        "Wood boards on joists."
    );
    preset!(
        carpet,
        "carpet",
        [0.02, 0.06, 0.14, 0.37, 0.60, 0.65],
        "Heavy carpet on concrete."
    );
    preset!(
        glass,
        "glass",
        [0.35, 0.25, 0.18, 0.12, 0.07, 0.04],
        "Ordinary window glass."
    );
    preset!(
        curtain,
        "curtain",
        [0.14, 0.35, 0.55, 0.72, 0.70, 0.65],
        "Heavy velour, draped to half area."
    );
    preset!(
        acoustic_panel,
        "acoustic_panel",
        [0.15, 0.75, 0.90, 0.95, 0.90, 0.85],
        "Porous absorber panel, 50 mm."
    );

    /// All presets, for listings.
    pub fn all() -> Vec<AcousticMaterial> {
        vec![
            concrete(),
            brick(),
            plaster(),
            wood_floor(),
            carpet(),
            glass(),
            curtain(),
            acoustic_panel(),
            AcousticMaterial::default_material(),
        ]
    }

    /// Look a preset up by name.
    pub fn by_name(name: &str) -> Option<AcousticMaterial> {
        all().into_iter().find(|m| m.name() == name)
    }
}
