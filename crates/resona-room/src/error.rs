//! Error types for room model construction and validation.

use crate::band::FrequencyBand;
use thiserror::Error;

/// Errors raised while building or validating a room description.
///
/// Any of these makes the room unusable for analysis; the engine reports
/// them before touching the audio.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoomError {
    /// A room dimension is zero or negative.
    #[error("room dimension '{name}' must be positive, got {value}")]
    InvalidDimension {
        /// Which dimension (width, length, height).
        name: &'static str,
        /// The offending value in meters.
        value: f32,
    },

    /// Relative humidity outside (0, 100].
    #[error("relative humidity must be in (0, 100] percent, got {0}")]
    InvalidHumidity(f32),

    /// Temperature at or below absolute zero.
    #[error("temperature must be above -273.15 C, got {0}")]
    InvalidTemperature(f32),

    /// A surface with zero or negative area.
    #[error("surface '{surface}' must have positive area, got {area} m^2")]
    InvalidSurfaceArea {
        /// Surface name.
        surface: String,
        /// The offending area.
        area: f32,
    },

    /// An absorption coefficient outside [0, 1].
    #[error("material '{material}' has absorption {alpha} at {band}, must be in [0, 1]")]
    AbsorptionOutOfRange {
        /// Material name.
        material: String,
        /// Band at which the coefficient is invalid.
        band: FrequencyBand,
        /// The offending coefficient.
        alpha: f32,
    },

    /// A material preset name that does not exist.
    #[error("unknown material preset: {0}")]
    UnknownMaterial(String),
}
