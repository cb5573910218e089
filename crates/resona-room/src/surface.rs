//! Room surfaces.

use crate::band::FrequencyBand;
use crate::error::RoomError;
use crate::material::AcousticMaterial;
use serde::{Deserialize, Serialize};

/// A named surface of known area covered by one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    name: String,
    area_m2: f32,
    material: AcousticMaterial,
}

impl Surface {
    /// Creates a surface. The area must be positive and finite.
    pub fn new(
        name: impl Into<String>,
        area_m2: f32,
        material: AcousticMaterial,
    ) -> Result<Self, RoomError> {
        let name = name.into();
        if !(area_m2 > 0.0) || !area_m2.is_finite() {
            return Err(RoomError::InvalidSurfaceArea {
                surface: name,
                area: area_m2,
            });
        }
        Ok(Self {
            name,
            area_m2,
            material,
        })
    }

    /// Surface name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Surface area in square meters.
    pub fn area_m2(&self) -> f32 {
        self.area_m2
    }

    /// The covering material.
    pub fn material(&self) -> &AcousticMaterial {
        &self.material
    }

    /// Equivalent absorption area at the given band: `area * alpha`.
    pub fn absorption_area(&self, band: FrequencyBand) -> f32 {
        self.area_m2 * self.material.alpha(band)
    }
}
