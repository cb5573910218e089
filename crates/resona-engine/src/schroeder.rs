//! Schroeder backward integration.
//!
//! Squares the band-filtered impulse response and accumulates the energy
//! from the tail backward. The resulting curve equals the ensemble average
//! of squared noise decays, which is what makes a single impulse response
//! usable for decay-time regression.

use resona_core::linear_fit;

/// Levels below this are numerical floor and are dropped from the curve.
const FLOOR_DB: f32 = -80.0;

/// Curves are decimated to at most this many points for regression and
/// display.
const MAX_POINTS: usize = 1000;

/// A normalized energy decay curve in dB over time.
///
/// The first point sits at 0 dB and the curve is monotonically
/// non-increasing down to the numerical floor. Alongside the points, the
/// curve stores the least-squares line fit over its whole usable extent.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayCurve {
    time_s: Vec<f32>,
    level_db: Vec<f32>,
    slope_db_per_s: f32,
    intercept_db: f32,
    correlation: f32,
}

impl DecayCurve {
    /// An empty curve, produced when a band carries no energy.
    pub fn empty() -> Self {
        Self {
            time_s: Vec::new(),
            level_db: Vec::new(),
            slope_db_per_s: 0.0,
            intercept_db: 0.0,
            correlation: 0.0,
        }
    }

    /// Integrates a band-filtered impulse response into a decay curve.
    ///
    /// Returns an empty curve when the input is empty or carries no
    /// positive energy.
    pub fn from_impulse(samples: &[f32], sample_rate: u32) -> Self {
        if samples.is_empty() || sample_rate == 0 {
            return Self::empty();
        }

        // reverse running energy total, in one pass
        let mut remaining = vec![0.0f64; samples.len()];
        let mut sum = 0.0f64;
        for (i, &x) in samples.iter().enumerate().rev() {
            sum += f64::from(x) * f64::from(x);
            remaining[i] = sum;
        }

        let total = remaining[0];
        if total <= 0.0 || !total.is_finite() {
            return Self::empty();
        }

        let step = samples.len().div_ceil(MAX_POINTS);
        let mut time_s = Vec::with_capacity(MAX_POINTS);
        let mut level_db = Vec::with_capacity(MAX_POINTS);
        for n in (0..samples.len()).step_by(step) {
            let level = (10.0 * (remaining[n] / total).log10()) as f32;
            if level < FLOOR_DB {
                break;
            }
            time_s.push(n as f32 / sample_rate as f32);
            level_db.push(level);
        }

        let fit = linear_fit(&time_s, &level_db);
        let (slope_db_per_s, intercept_db, correlation) = match fit {
            Some(fit) => (fit.slope, fit.intercept, fit.correlation),
            None => (0.0, 0.0, 0.0),
        };

        Self {
            time_s,
            level_db,
            slope_db_per_s,
            intercept_db,
            correlation,
        }
    }

    /// Time axis in seconds, ascending.
    pub fn time_s(&self) -> &[f32] {
        &self.time_s
    }

    /// Level axis in dB, starting at 0 and non-increasing.
    pub fn level_db(&self) -> &[f32] {
        &self.level_db
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.level_db.len()
    }

    /// Whether the curve carries no points.
    pub fn is_empty(&self) -> bool {
        self.level_db.is_empty()
    }

    /// Slope of the whole-curve line fit, in dB/s.
    pub fn slope_db_per_s(&self) -> f32 {
        self.slope_db_per_s
    }

    /// Intercept of the whole-curve line fit, in dB.
    pub fn intercept_db(&self) -> f32 {
        self.intercept_db
    }

    /// Pearson correlation of the whole-curve line fit.
    pub fn correlation(&self) -> f32 {
        self.correlation
    }
}
