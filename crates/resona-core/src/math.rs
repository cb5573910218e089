//! Level conversions and signal statistics.
//!
//! Decibel conversions here are amplitude conventions (20·log10). The
//! Schroeder integrator works on energy and applies its own 10·log10.

use libm::{expf, logf, sqrt};

/// Lowest level the engine will report, in dB.
///
/// Levels are clamped here instead of running log10 into zero amplitude.
pub const DB_FLOOR: f32 = -120.0;

/// Convert decibels to linear amplitude.
///
/// # Example
/// ```rust
/// use resona_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear amplitude to decibels, clamped to [`DB_FLOOR`].
///
/// # Example
/// ```rust
/// use resona_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// assert_eq!(linear_to_db(0.0), -120.0);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 1e-6 amplitude is the -120 dB floor
    if linear <= 1e-6 {
        return DB_FLOOR;
    }
    // 20 * log10(x) = 20 * ln(x) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear) * FACTOR
}

/// Root-mean-square of a buffer, accumulated in f64.
///
/// Returns 0.0 for an empty buffer.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    sqrt(sum_sq / samples.len() as f64) as f32
}

/// Largest absolute sample value.
///
/// Returns 0.0 for an empty buffer.
pub fn peak_abs(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}
