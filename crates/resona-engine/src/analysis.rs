//! The analysis result and its wire form.
//!
//! An [`Analysis`] is self-contained: it snapshots the room, carries only
//! scalar per-band values, and serializes to a JSON-compatible record with
//! band keys `"125_hz"` through `"4_khz"`. Absent measured values
//! serialize as `null`, never as zero.

use crate::decay::DecayTimes;
use crate::schroeder::DecayCurve;
use resona_room::{FrequencyBand, RoomModel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable copy of the room a measurement was analyzed against.
///
/// Later edits to the source room must not alter stored results, so the
/// analyzer copies what it used, including the derived quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// Room name.
    pub name: String,
    /// Width in meters.
    pub width_m: f32,
    /// Length in meters.
    pub length_m: f32,
    /// Height in meters.
    pub height_m: f32,
    /// Volume in cubic meters.
    pub room_volume_m3: f32,
    /// Total boundary area in square meters.
    pub surface_area_m2: f32,
    /// Air temperature in Celsius.
    pub temperature_c: f32,
    /// Relative humidity in percent.
    pub humidity_pct: f32,
    /// Speed of sound at that temperature, m/s.
    pub speed_of_sound_m_per_s: f32,
}

impl From<&RoomModel> for RoomSnapshot {
    fn from(room: &RoomModel) -> Self {
        Self {
            name: room.name().to_string(),
            width_m: room.width_m(),
            length_m: room.length_m(),
            height_m: room.height_m(),
            room_volume_m3: room.volume_m3(),
            surface_area_m2: room.total_surface_area_m2(),
            temperature_c: room.temperature_c(),
            humidity_pct: room.humidity_pct(),
            speed_of_sound_m_per_s: room.speed_of_sound_m_per_s(),
        }
    }
}

/// Six human categories for how live a room sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityRating {
    /// RT60 under 0.3 s.
    VeryDry,
    /// RT60 under 0.5 s.
    Dry,
    /// RT60 under 0.8 s.
    Balanced,
    /// RT60 under 1.2 s.
    Live,
    /// RT60 under 2.0 s.
    Reverberant,
    /// RT60 of 2.0 s or more.
    VeryReverberant,
}

impl QualityRating {
    /// Buckets an average RT60 into a category.
    pub fn from_rt60(seconds: f32) -> Self {
        if seconds < 0.3 {
            QualityRating::VeryDry
        } else if seconds < 0.5 {
            QualityRating::Dry
        } else if seconds < 0.8 {
            QualityRating::Balanced
        } else if seconds < 1.2 {
            QualityRating::Live
        } else if seconds < 2.0 {
            QualityRating::Reverberant
        } else {
            QualityRating::VeryReverberant
        }
    }

    /// Human-readable description of the category.
    pub fn description(self) -> &'static str {
        match self {
            QualityRating::VeryDry => {
                "Very dry - suited to control rooms and voice recording"
            }
            QualityRating::Dry => "Dry - excellent speech intelligibility",
            QualityRating::Balanced => "Balanced - comfortable for speech and most music",
            QualityRating::Live => "Live - suits classrooms and rehearsal spaces",
            QualityRating::Reverberant => "Reverberant - speech clarity starts to suffer",
            QualityRating::VeryReverberant => {
                "Very reverberant - typical of halls and churches"
            }
        }
    }
}

/// Everything the engine derived for one octave band.
///
/// Band results are working material for the analyzer; the aggregate
/// [`Analysis`] keeps only their scalars, so the sample-heavy decay curve
/// is dropped once the run finishes.
#[derive(Debug, Clone)]
pub struct BandResult {
    /// The octave band.
    pub band: FrequencyBand,
    /// The Schroeder decay curve the estimates came from.
    pub decay_curve: DecayCurve,
    /// The surviving decay-time estimates.
    pub decay_times: DecayTimes,
    /// Peak level of the band signal, dB.
    pub peak_db: f32,
    /// Noise floor over the final tenth of the band signal, dB.
    pub noise_floor_db: f32,
    /// Whether any estimator survived its gates.
    pub valid: bool,
}

/// The terminal product of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Seconds since the Unix epoch at completion.
    pub timestamp_unix_s: u64,
    /// The room as analyzed.
    pub room: RoomSnapshot,
    /// Measured RT60 per band; `None` where every estimator failed.
    pub measured_rt60_seconds: BTreeMap<FrequencyBand, Option<f32>>,
    /// Sabine prediction per band.
    pub sabine_rt60_seconds: BTreeMap<FrequencyBand, f32>,
    /// Eyring prediction per band.
    pub eyring_rt60_seconds: BTreeMap<FrequencyBand, f32>,
    /// Early decay time per band.
    pub edt_seconds: BTreeMap<FrequencyBand, Option<f32>>,
    /// T20 per band.
    pub t20_seconds: BTreeMap<FrequencyBand, Option<f32>>,
    /// T30 per band.
    pub t30_seconds: BTreeMap<FrequencyBand, Option<f32>>,
    /// Mean of the measured values over populated bands.
    pub average_measured_rt60_seconds: Option<f32>,
    /// Mean Sabine prediction over all bands.
    pub average_sabine_rt60_seconds: f32,
    /// Mean Eyring prediction over all bands.
    pub average_eyring_rt60_seconds: f32,
    /// Category of the governing average RT60.
    pub quality: QualityRating,
    /// Human-readable form of the category.
    pub quality_text: String,
    /// Non-fatal conditions observed during the run.
    pub warnings: Vec<String>,
}
