//! Sabine and Eyring reverberation prediction.
//!
//! Both formulas predict RT60 from room volume, equivalent absorption area,
//! and an air-attenuation term `4 m V` that matters at high frequency and
//! low humidity. Eyring's variant stays accurate when mean absorption is
//! high; for small mean absorption the two converge.
//!
//! The air-absorption coefficient is a simplified parametric fit, not
//! ISO 9613-1.

use crate::band::FrequencyBand;
use crate::material::DEFAULT_ABSORPTION;
use crate::room::RoomModel;

/// Sabine's constant, `24 ln(10) / c` at room temperature, in s/m.
const SABINE_COEFFICIENT: f32 = 0.161;

/// Predictions are clamped into this range to keep downstream display and
/// quality assessment meaningful.
const RT_MIN_S: f32 = 0.1;
const RT_MAX_S: f32 = 10.0;

/// Equivalent absorption area of the room at a band, in m² sabins.
///
/// Sums `area * alpha` over all surfaces. A room without surfaces falls
/// back to α = 0.1 over the full boundary area.
pub fn absorption_area(room: &RoomModel, band: FrequencyBand) -> f32 {
    if room.surfaces().is_empty() {
        return room.total_surface_area_m2() * DEFAULT_ABSORPTION;
    }
    room.surfaces()
        .iter()
        .map(|s| s.absorption_area(band))
        .sum()
}

/// Air-absorption coefficient `m` in 1/m.
///
/// Simplified parametric model: `m = 5.5e-4 * sqrt(50/h) * (f/1000)^1.7`
/// with `h` the humidity as a fraction of 1. Grows with frequency and
/// shrinks with humidity; at 125 Hz it is negligible.
pub fn air_attenuation(band: FrequencyBand, humidity_pct: f32) -> f32 {
    let h = (humidity_pct / 100.0).clamp(1e-3, 1.0);
    let f = band.center_hz();
    5.5e-4 * (50.0 / h).sqrt() * (f / 1000.0).powf(1.7)
}

fn air_term(room: &RoomModel, band: FrequencyBand, use_air_absorption: bool) -> f32 {
    if use_air_absorption {
        4.0 * air_attenuation(band, room.humidity_pct()) * room.volume_m3()
    } else {
        0.0
    }
}

/// Sabine prediction `T = 0.161 V / (A + 4 m V)`, clamped to [0.1, 10] s.
pub fn sabine_rt60(room: &RoomModel, band: FrequencyBand, use_air_absorption: bool) -> f32 {
    let volume = room.volume_m3();
    let denominator = absorption_area(room, band) + air_term(room, band, use_air_absorption);
    (SABINE_COEFFICIENT * volume / denominator).clamp(RT_MIN_S, RT_MAX_S)
}

/// Eyring prediction `T = 0.161 V / (-S ln(1 - ᾱ) + 4 m V)`, clamped to
/// [0.1, 10] s.
///
/// Mean absorption ᾱ is capped at 0.99; as ᾱ approaches 1 the log term
/// diverges and the prediction correctly collapses toward zero (then the
/// clamp floor).
pub fn eyring_rt60(room: &RoomModel, band: FrequencyBand, use_air_absorption: bool) -> f32 {
    let volume = room.volume_m3();
    let total_area = room.total_surface_area_m2();
    let mean_alpha = (absorption_area(room, band) / total_area).min(0.99);
    let denominator =
        -total_area * (1.0 - mean_alpha).ln() + air_term(room, band, use_air_absorption);
    (SABINE_COEFFICIENT * volume / denominator).clamp(RT_MIN_S, RT_MAX_S)
}
