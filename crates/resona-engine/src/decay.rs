//! Decay-time estimation from Schroeder curves.
//!
//! Each estimator regresses a line over one stretch of the decay curve and
//! extrapolates to the full 60 dB decay. All reported values are on the
//! RT60 scale: EDT is the 0 to -10 dB fit times six, T20 the -5 to -25 dB
//! fit times three, T30 the -5 to -35 dB fit times two, and the direct
//! estimate spans -5 to -65 dB when the noise floor allows it (it rarely
//! does outside synthetic input; T30 is the workhorse).

use crate::error::EngineError;
use crate::schroeder::DecayCurve;
use resona_core::{linear_fit, linear_to_db, peak_abs, rms};
use serde::{Deserialize, Serialize};

/// Minimum |Pearson correlation| for a fit to be trusted.
const CORRELATION_GATE: f32 = 0.9;

/// Plausible reverberation times, in seconds.
const MIN_PLAUSIBLE_S: f32 = 0.05;
const MAX_PLAUSIBLE_S: f32 = 15.0;

/// Evaluation ranges as (start_db, end_db) pairs.
pub const EDT_RANGE: (f32, f32) = (0.0, -10.0);
/// T20 range.
pub const T20_RANGE: (f32, f32) = (-5.0, -25.0);
/// T30 range.
pub const T30_RANGE: (f32, f32) = (-5.0, -35.0);
/// Direct RT60 range.
pub const RT60_DIRECT_RANGE: (f32, f32) = (-5.0, -65.0);

/// The per-band decay times that survived their quality gates.
///
/// Absent means the estimator failed for that range: threshold not reached,
/// fit not straight enough, or a value outside [0.05, 15] s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DecayTimes {
    /// Early decay time, 0 to -10 dB extrapolated.
    pub edt_seconds: Option<f32>,
    /// -5 to -25 dB, extrapolated.
    pub t20_seconds: Option<f32>,
    /// -5 to -35 dB, extrapolated.
    pub t30_seconds: Option<f32>,
    /// Directly evaluated -5 to -65 dB decay.
    pub rt60_direct_seconds: Option<f32>,
}

impl DecayTimes {
    /// The single "measured RT60" for a band.
    ///
    /// Preference order: direct, then T30, then T20, then EDT.
    pub fn preferred_rt60_seconds(&self) -> Option<f32> {
        self.rt60_direct_seconds
            .or(self.t30_seconds)
            .or(self.t20_seconds)
            .or(self.edt_seconds)
    }

    /// Whether any estimator succeeded.
    pub fn any(&self) -> bool {
        self.preferred_rt60_seconds().is_some()
    }
}

/// Regresses the decay between two dB thresholds and extrapolates to 60 dB.
///
/// Locates the first curve point at or under `start_db` and the first one
/// at or under `end_db` after it, fits a least-squares line over the
/// inclusive index range, gates on |correlation| >= 0.9, and converts the
/// slope to `60 / |slope|` seconds. The result must land in [0.05, 15] s.
pub fn decay_time_between(
    curve: &DecayCurve,
    start_db: f32,
    end_db: f32,
) -> Result<f32, EngineError> {
    debug_assert!(start_db > end_db && start_db <= 0.0);

    // an empty or near-empty curve cannot reach the start threshold in any
    // way worth regressing over
    if curve.len() < 4 {
        return Err(EngineError::InvalidDecayRange {
            missing_db: start_db,
        });
    }

    let levels = curve.level_db();
    let start_index = levels
        .iter()
        .position(|&l| l <= start_db)
        .ok_or(EngineError::InvalidDecayRange {
            missing_db: start_db,
        })?;
    let end_index = levels[start_index..]
        .iter()
        .position(|&l| l <= end_db)
        .map(|offset| start_index + offset)
        .ok_or(EngineError::InvalidDecayRange { missing_db: end_db })?;

    if end_index <= start_index {
        return Err(EngineError::InvalidDecayRange { missing_db: end_db });
    }

    let times = &curve.time_s()[start_index..=end_index];
    let levels = &levels[start_index..=end_index];
    let fit = linear_fit(times, levels).ok_or(EngineError::LowCorrelation { correlation: 0.0 })?;

    if fit.correlation.abs() < CORRELATION_GATE {
        return Err(EngineError::LowCorrelation {
            correlation: fit.correlation.abs(),
        });
    }
    if fit.slope >= 0.0 {
        return Err(EngineError::ImplausibleResult { seconds: f32::INFINITY });
    }

    let rt60 = 60.0 / fit.slope.abs();
    if !(MIN_PLAUSIBLE_S..=MAX_PLAUSIBLE_S).contains(&rt60) {
        return Err(EngineError::ImplausibleResult { seconds: rt60 });
    }
    Ok(rt60)
}

/// Peak level of a band signal: `20 log10(max |x|)`, floored at -120 dB.
pub fn peak_level_db(samples: &[f32]) -> f32 {
    linear_to_db(peak_abs(samples))
}

/// Noise floor estimate: RMS level over the final tenth of the signal,
/// floored at -120 dB.
pub fn noise_floor_db(samples: &[f32]) -> f32 {
    let tail_start = samples.len() - samples.len() / 10;
    linear_to_db(rms(&samples[tail_start..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exponential_curve(rt60: f32) -> DecayCurve {
        let sample_rate = 48000;
        let k = (10.0f32).powi(3).ln() / rt60;
        let ir: Vec<f32> = (0..(sample_rate as f32 * rt60 * 2.0) as usize)
            .map(|i| (-k * i as f32 / sample_rate as f32).exp())
            .collect();
        DecayCurve::from_impulse(&ir, sample_rate)
    }

    #[test]
    fn recovers_rt60_from_all_ranges() {
        for target in [0.2f32, 0.5, 1.0, 3.0] {
            let curve = exponential_curve(target);
            for (start, end) in [EDT_RANGE, T20_RANGE, T30_RANGE, RT60_DIRECT_RANGE] {
                let rt = decay_time_between(&curve, start, end).unwrap();
                assert!(
                    (rt - target).abs() < target * 0.05,
                    "range ({start}, {end}) for target {target}: got {rt}"
                );
            }
        }
    }

    #[test]
    fn estimators_agree_on_clean_decay() {
        let curve = exponential_curve(0.5);
        let edt = decay_time_between(&curve, EDT_RANGE.0, EDT_RANGE.1).unwrap();
        let t20 = decay_time_between(&curve, T20_RANGE.0, T20_RANGE.1).unwrap();
        let t30 = decay_time_between(&curve, T30_RANGE.0, T30_RANGE.1).unwrap();
        let spread = (edt.max(t20).max(t30)) - (edt.min(t20).min(t30));
        assert!(spread < 0.5 * 0.05, "spread {spread}");
    }

    #[test]
    fn unreachable_threshold_is_reported() {
        // a slow decay truncated early never reaches -65 dB
        let sample_rate = 48000;
        let k = (10.0f32).powi(3).ln() / 2.0;
        let ir: Vec<f32> = (0..sample_rate as usize / 2)
            .map(|i| (-k * i as f32 / sample_rate as f32).exp())
            .collect();
        let curve = DecayCurve::from_impulse(&ir, sample_rate);

        let err = decay_time_between(&curve, RT60_DIRECT_RANGE.0, RT60_DIRECT_RANGE.1)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDecayRange { .. }));
    }

    #[test]
    fn empty_curve_reaches_no_threshold() {
        let curve = DecayCurve::empty();
        assert_eq!(
            decay_time_between(&curve, T20_RANGE.0, T20_RANGE.1),
            Err(EngineError::InvalidDecayRange {
                missing_db: T20_RANGE.0
            })
        );
    }

    #[test]
    fn preference_order() {
        let times = DecayTimes {
            edt_seconds: Some(0.4),
            t20_seconds: Some(0.5),
            t30_seconds: Some(0.6),
            rt60_direct_seconds: Some(0.7),
        };
        assert_eq!(times.preferred_rt60_seconds(), Some(0.7));

        let no_direct = DecayTimes {
            rt60_direct_seconds: None,
            ..times
        };
        assert_eq!(no_direct.preferred_rt60_seconds(), Some(0.6));

        let only_edt = DecayTimes {
            edt_seconds: Some(0.4),
            ..DecayTimes::default()
        };
        assert_eq!(only_edt.preferred_rt60_seconds(), Some(0.4));
        assert!(!DecayTimes::default().any());
    }

    #[test]
    fn peak_and_floor_levels() {
        let mut samples = vec![0.0f32; 1000];
        samples[10] = 0.5;
        let peak = peak_level_db(&samples);
        assert!((peak - (-6.02)).abs() < 0.1);

        // silent tail: floor clamps at -120
        assert_eq!(noise_floor_db(&samples), -120.0);

        let loud_tail: Vec<f32> = vec![0.1f32; 1000];
        let floor = noise_floor_db(&loud_tail);
        assert!((floor - (-20.0)).abs() < 0.1);
    }
}
