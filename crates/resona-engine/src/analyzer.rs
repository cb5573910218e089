//! Analysis orchestration.
//!
//! `analyze` is the engine's one entry point: resolve the impulse response
//! according to the measurement mode, walk the six octave bands through
//! filter, Schroeder integration, and decay estimation, attach the
//! Sabine/Eyring predictions, and fold everything into a self-contained
//! [`Analysis`].
//!
//! Band-level failures never abort a run; they surface as absent values.
//! Only an invalid room, a failed deconvolution, cancellation, or a
//! numerical fault reach the caller as errors.

use crate::analysis::{Analysis, BandResult, QualityRating, RoomSnapshot};
use crate::bandpass::octave_filter;
use crate::cancel::CancelToken;
use crate::decay::{
    DecayTimes, EDT_RANGE, RT60_DIRECT_RANGE, T20_RANGE, T30_RANGE, decay_time_between,
    noise_floor_db, peak_level_db,
};
use crate::deconvolve::deconvolve;
use crate::error::EngineError;
use crate::impulse::locate_impulse;
use crate::schroeder::DecayCurve;
use crate::sweep::SweepParams;
use resona_room::{FrequencyBand, RoomModel, eyring_rt60, sabine_rt60};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// How the excitation was produced, decided once at the top of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasurementMode {
    /// The recording captured a played exponential sweep; deconvolve it.
    Ess(SweepParams),
    /// The recording captured a clap or balloon burst; locate and window
    /// it. Falls back to the raw buffer (with a warning) when nothing
    /// clears the threshold.
    Impulse {
        /// Minimum peak magnitude for an impulse to count.
        threshold: f32,
    },
    /// The buffer already is an impulse response.
    Raw,
}

/// Switches for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Estimate the early decay time (0 to -10 dB).
    pub compute_edt: bool,
    /// Estimate T20 (-5 to -25 dB).
    pub compute_t20: bool,
    /// Estimate T30 (-5 to -35 dB).
    pub compute_t30: bool,
    /// Attempt the direct -5 to -65 dB evaluation.
    pub compute_rt60_direct: bool,
    /// Split the response into octave bands. When off, the broadband
    /// decay is analyzed once and reported under every band.
    pub filter_by_band: bool,
    /// Include the `4 m V` air term in the predictions.
    pub use_air_absorption: bool,
    /// Cancellation handle polled at band boundaries and inside long
    /// passes.
    pub cancel: CancelToken,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            compute_edt: true,
            compute_t20: true,
            compute_t30: true,
            compute_rt60_direct: true,
            filter_by_band: true,
            use_air_absorption: true,
            cancel: CancelToken::new(),
        }
    }
}

/// Produces the ESS excitation for playback by the capture collaborator.
pub fn synthesize_sweep(params: &SweepParams) -> Vec<f32> {
    params.generate()
}

/// Produces the matched inverse filter for callers deconvolving elsewhere.
pub fn synthesize_inverse(params: &SweepParams) -> Vec<f32> {
    params.inverse_filter()
}

/// Runs the full analysis of one measurement.
///
/// See the module docs for the control flow. The audio buffer is mono
/// samples at `sample_rate`; the room must pass validation; `options`
/// defaults are right for normal measurements.
pub fn analyze(
    samples: &[f32],
    sample_rate: u32,
    mode: &MeasurementMode,
    room: &RoomModel,
    options: &AnalysisOptions,
) -> Result<Analysis, EngineError> {
    room.validate()?;
    if samples.is_empty() || sample_rate == 0 {
        return Err(EngineError::InsufficientData);
    }

    let mut warnings = Vec::new();
    let impulse_response = resolve_impulse_response(samples, sample_rate, mode, options, &mut warnings)?;

    let mut measured = BTreeMap::new();
    let mut edt = BTreeMap::new();
    let mut t20 = BTreeMap::new();
    let mut t30 = BTreeMap::new();

    if options.filter_by_band {
        for band in FrequencyBand::ALL {
            options.cancel.checkpoint()?;
            match analyze_band(&impulse_response, sample_rate, band, options)? {
                Some(result) => {
                    debug!(
                        band = band.label(),
                        rt60 = ?result.decay_times.preferred_rt60_seconds(),
                        peak_db = result.peak_db,
                        noise_floor_db = result.noise_floor_db,
                        "band analyzed"
                    );
                    measured.insert(band, result.decay_times.preferred_rt60_seconds());
                    edt.insert(band, result.decay_times.edt_seconds);
                    t20.insert(band, result.decay_times.t20_seconds);
                    t30.insert(band, result.decay_times.t30_seconds);
                }
                None => {
                    warn!(band = band.label(), sample_rate, "band above Nyquist, excluded");
                    warnings.push(format!(
                        "band {} excluded: center above Nyquist at {} Hz",
                        band.label(),
                        sample_rate
                    ));
                    measured.insert(band, None);
                    edt.insert(band, None);
                    t20.insert(band, None);
                    t30.insert(band, None);
                }
            }
        }
    } else {
        options.cancel.checkpoint()?;
        let times = broadband_times(&impulse_response, sample_rate, options)?;
        for band in FrequencyBand::ALL {
            measured.insert(band, times.preferred_rt60_seconds());
            edt.insert(band, times.edt_seconds);
            t20.insert(band, times.t20_seconds);
            t30.insert(band, times.t30_seconds);
        }
    }

    let mut sabine = BTreeMap::new();
    let mut eyring = BTreeMap::new();
    for band in FrequencyBand::ALL {
        let sab = sabine_rt60(room, band, options.use_air_absorption);
        let eyr = eyring_rt60(room, band, options.use_air_absorption);
        if !sab.is_finite() || !eyr.is_finite() {
            return Err(EngineError::ComputationFault(format!(
                "prediction at {}",
                band.label()
            )));
        }
        sabine.insert(band, sab);
        eyring.insert(band, eyr);
    }

    let average_measured = mean_present(measured.values().copied());
    let average_sabine = mean(sabine.values().copied());
    let average_eyring = mean(eyring.values().copied());

    let governing_rt60 = average_measured.unwrap_or(average_sabine);
    let quality = QualityRating::from_rt60(governing_rt60);

    Ok(Analysis {
        timestamp_unix_s: unix_now(),
        room: RoomSnapshot::from(room),
        measured_rt60_seconds: measured,
        sabine_rt60_seconds: sabine,
        eyring_rt60_seconds: eyring,
        edt_seconds: edt,
        t20_seconds: t20,
        t30_seconds: t30,
        average_measured_rt60_seconds: average_measured,
        average_sabine_rt60_seconds: average_sabine,
        average_eyring_rt60_seconds: average_eyring,
        quality,
        quality_text: quality.description().to_string(),
        warnings,
    })
}

/// Runs the filter -> Schroeder -> estimator pipeline for one band.
///
/// Returns `Ok(None)` when the band does not fit under Nyquist. Band-local
/// estimator failures are logged and leave the corresponding decay time
/// absent; only cancellation propagates as an error.
pub fn analyze_band(
    impulse_response: &[f32],
    sample_rate: u32,
    band: FrequencyBand,
    options: &AnalysisOptions,
) -> Result<Option<BandResult>, EngineError> {
    let Some(filtered) = octave_filter(impulse_response, band, sample_rate, &options.cancel)?
    else {
        return Ok(None);
    };

    let peak_db = peak_level_db(&filtered);
    let noise_floor = noise_floor_db(&filtered);

    // shorter than a tenth of a second cannot carry a measurable decay
    let (decay_curve, decay_times) = if filtered.len() < sample_rate as usize / 10 {
        debug!(band = band.label(), len = filtered.len(), "input too short to estimate");
        (DecayCurve::empty(), DecayTimes::default())
    } else {
        let curve = DecayCurve::from_impulse(&filtered, sample_rate);
        let times = estimate_times(&curve, band.label(), options)?;
        (curve, times)
    };

    let valid = decay_times.any();
    Ok(Some(BandResult {
        band,
        decay_curve,
        decay_times,
        peak_db,
        noise_floor_db: noise_floor,
        valid,
    }))
}

fn resolve_impulse_response(
    samples: &[f32],
    sample_rate: u32,
    mode: &MeasurementMode,
    options: &AnalysisOptions,
    warnings: &mut Vec<String>,
) -> Result<Vec<f32>, EngineError> {
    match mode {
        MeasurementMode::Ess(params) => {
            let deconvolution = deconvolve(samples, params, &options.cancel)?;
            warnings.extend(deconvolution.warnings);
            Ok(deconvolution.impulse_response)
        }
        MeasurementMode::Impulse { threshold } => {
            match locate_impulse(samples, sample_rate, *threshold) {
                Some(window) => Ok(samples[window].to_vec()),
                None => {
                    warn!(threshold, "no impulse located, falling back to raw buffer");
                    warnings.push(
                        "no impulse detected above threshold; analyzing the raw buffer"
                            .to_string(),
                    );
                    Ok(samples.to_vec())
                }
            }
        }
        MeasurementMode::Raw => Ok(samples.to_vec()),
    }
}

fn broadband_times(
    impulse_response: &[f32],
    sample_rate: u32,
    options: &AnalysisOptions,
) -> Result<DecayTimes, EngineError> {
    if impulse_response.len() < sample_rate as usize / 10 {
        return Ok(DecayTimes::default());
    }
    let curve = DecayCurve::from_impulse(impulse_response, sample_rate);
    estimate_times(&curve, "broadband", options)
}

/// Runs the enabled estimators over one curve.
///
/// Band-local failures (threshold not reached, low correlation, implausible
/// value) are logged and become absent entries; anything else is a
/// run-level problem and propagates.
fn estimate_times(
    curve: &DecayCurve,
    label: &str,
    options: &AnalysisOptions,
) -> Result<DecayTimes, EngineError> {
    let run = |enabled: bool, range: (f32, f32), name: &str| -> Result<Option<f32>, EngineError> {
        if !enabled {
            return Ok(None);
        }
        match decay_time_between(curve, range.0, range.1) {
            Ok(seconds) => Ok(Some(seconds)),
            Err(err) if err.is_band_local() => {
                debug!(band = label, estimator = name, %err, "estimate rejected");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    };

    Ok(DecayTimes {
        edt_seconds: run(options.compute_edt, EDT_RANGE, "edt")?,
        t20_seconds: run(options.compute_t20, T20_RANGE, "t20")?,
        t30_seconds: run(options.compute_t30, T30_RANGE, "t30")?,
        rt60_direct_seconds: run(options.compute_rt60_direct, RT60_DIRECT_RANGE, "rt60_direct")?,
    })
}

fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 { 0.0 } else { sum / count as f32 }
}

fn mean_present(values: impl Iterator<Item = Option<f32>>) -> Option<f32> {
    let present: Vec<f32> = values.flatten().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f32>() / present.len() as f32)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
