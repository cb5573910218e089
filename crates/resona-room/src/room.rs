//! The room model.

use crate::error::RoomError;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

fn default_temperature() -> f32 {
    20.0
}

fn default_humidity() -> f32 {
    50.0
}

/// A rectangular room with a list of absorbing surfaces and climate data.
///
/// The model is a value object: construct it, hand it to the engine, and the
/// engine snapshots it into the analysis result. Rooms deserialized from
/// files must pass [`RoomModel::validate`] before use; the constructors
/// validate eagerly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomModel {
    name: String,
    width_m: f32,
    length_m: f32,
    height_m: f32,
    #[serde(default)]
    surfaces: Vec<Surface>,
    #[serde(default = "default_temperature")]
    temperature_c: f32,
    #[serde(default = "default_humidity")]
    humidity_pct: f32,
}

impl RoomModel {
    /// Creates a room with the given dimensions, default climate
    /// (20 C, 50 % RH) and no surfaces.
    pub fn new(
        name: impl Into<String>,
        width_m: f32,
        length_m: f32,
        height_m: f32,
    ) -> Result<Self, RoomError> {
        let room = Self {
            name: name.into(),
            width_m,
            length_m,
            height_m,
            surfaces: Vec::new(),
            temperature_c: default_temperature(),
            humidity_pct: default_humidity(),
        };
        room.validate()?;
        Ok(room)
    }

    /// Replaces the surface list.
    pub fn with_surfaces(mut self, surfaces: Vec<Surface>) -> Self {
        self.surfaces = surfaces;
        self
    }

    /// Sets temperature and relative humidity.
    pub fn with_climate(mut self, temperature_c: f32, humidity_pct: f32) -> Result<Self, RoomError> {
        self.temperature_c = temperature_c;
        self.humidity_pct = humidity_pct;
        self.validate()?;
        Ok(self)
    }

    /// Checks every invariant of the model.
    ///
    /// Dimensions must be positive, humidity in (0, 100], temperature above
    /// absolute zero. Surfaces carry their own invariants from construction,
    /// but deserialized ones are re-checked here.
    pub fn validate(&self) -> Result<(), RoomError> {
        for (name, value) in [
            ("width", self.width_m),
            ("length", self.length_m),
            ("height", self.height_m),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(RoomError::InvalidDimension { name, value });
            }
        }
        if !(self.humidity_pct > 0.0 && self.humidity_pct <= 100.0) {
            return Err(RoomError::InvalidHumidity(self.humidity_pct));
        }
        if !(self.temperature_c > -273.15) || !self.temperature_c.is_finite() {
            return Err(RoomError::InvalidTemperature(self.temperature_c));
        }
        for surface in &self.surfaces {
            if !(surface.area_m2() > 0.0) || !surface.area_m2().is_finite() {
                return Err(RoomError::InvalidSurfaceArea {
                    surface: surface.name().to_string(),
                    area: surface.area_m2(),
                });
            }
        }
        Ok(())
    }

    /// Room name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in meters.
    pub fn width_m(&self) -> f32 {
        self.width_m
    }

    /// Length in meters.
    pub fn length_m(&self) -> f32 {
        self.length_m
    }

    /// Height in meters.
    pub fn height_m(&self) -> f32 {
        self.height_m
    }

    /// The absorbing surfaces. May be empty, in which case prediction falls
    /// back to a flat α = 0.1 over the full boundary area.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Air temperature in degrees Celsius.
    pub fn temperature_c(&self) -> f32 {
        self.temperature_c
    }

    /// Relative humidity in percent.
    pub fn humidity_pct(&self) -> f32 {
        self.humidity_pct
    }

    /// Volume `w * l * h` in cubic meters.
    pub fn volume_m3(&self) -> f32 {
        self.width_m * self.length_m * self.height_m
    }

    /// Total boundary area `2 (wl + wh + lh)` in square meters.
    pub fn total_surface_area_m2(&self) -> f32 {
        2.0 * (self.width_m * self.length_m
            + self.width_m * self.height_m
            + self.length_m * self.height_m)
    }

    /// Speed of sound at the room temperature, `331.3 * sqrt(1 + T/273.15)`.
    pub fn speed_of_sound_m_per_s(&self) -> f32 {
        331.3 * (1.0 + self.temperature_c / 273.15).sqrt()
    }
}
