//! ISO octave bands used for per-band analysis.

use serde::{Deserialize, Serialize};

/// One of the six octave-band center frequencies from 125 Hz to 4 kHz.
///
/// The variant order is ascending in frequency, and the derived `Ord`
/// follows it, so iterating [`FrequencyBand::ALL`] or a `BTreeMap` keyed by
/// band always walks the spectrum upward. Serialized names double as the
/// wire keys of the analysis record (`"125_hz"`, ..., `"4_khz"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FrequencyBand {
    /// 125 Hz octave band
    #[serde(rename = "125_hz")]
    Hz125,
    /// 250 Hz octave band
    #[serde(rename = "250_hz")]
    Hz250,
    /// 500 Hz octave band
    #[serde(rename = "500_hz")]
    Hz500,
    /// 1 kHz octave band
    #[serde(rename = "1_khz")]
    Khz1,
    /// 2 kHz octave band
    #[serde(rename = "2_khz")]
    Khz2,
    /// 4 kHz octave band
    #[serde(rename = "4_khz")]
    Khz4,
}

impl FrequencyBand {
    /// All bands, ascending in frequency.
    pub const ALL: [FrequencyBand; 6] = [
        FrequencyBand::Hz125,
        FrequencyBand::Hz250,
        FrequencyBand::Hz500,
        FrequencyBand::Khz1,
        FrequencyBand::Khz2,
        FrequencyBand::Khz4,
    ];

    /// Center frequency in Hz.
    pub fn center_hz(self) -> f32 {
        match self {
            FrequencyBand::Hz125 => 125.0,
            FrequencyBand::Hz250 => 250.0,
            FrequencyBand::Hz500 => 500.0,
            FrequencyBand::Khz1 => 1000.0,
            FrequencyBand::Khz2 => 2000.0,
            FrequencyBand::Khz4 => 4000.0,
        }
    }

    /// Lower band edge, `fc / sqrt(2)`.
    pub fn lower_edge_hz(self) -> f32 {
        self.center_hz() / core::f32::consts::SQRT_2
    }

    /// Upper band edge, `fc * sqrt(2)`.
    pub fn upper_edge_hz(self) -> f32 {
        self.center_hz() * core::f32::consts::SQRT_2
    }

    /// Wire/display label, e.g. `"125_hz"` or `"4_khz"`.
    pub fn label(self) -> &'static str {
        match self {
            FrequencyBand::Hz125 => "125_hz",
            FrequencyBand::Hz250 => "250_hz",
            FrequencyBand::Hz500 => "500_hz",
            FrequencyBand::Khz1 => "1_khz",
            FrequencyBand::Khz2 => "2_khz",
            FrequencyBand::Khz4 => "4_khz",
        }
    }

    /// Index into a six-element per-band table.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl core::fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let hz = self.center_hz();
        if hz >= 1000.0 {
            write!(f, "{} kHz", hz / 1000.0)
        } else {
            write!(f, "{hz} Hz")
        }
    }
}
