//! Biquad (bi-quadratic) filter structure.
//!
//! Provides the second-order IIR section used by the octave band filter
//! bank. Coefficient calculation uses the RBJ Audio EQ Cookbook band-pass
//! formula.
//!
//! State and accumulation are kept in `f64` so that forward-backward
//! filtering of long impulse responses does not collect rounding error;
//! inputs and outputs stay `f32`.

use core::f64::consts::PI;
use libm::{cos, sin};

/// Normalized biquad coefficients.
///
/// Stored with `a0` already divided out, so the difference equation is
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward coefficients
    pub b0: f64,
    /// Feedforward, one sample delayed
    pub b1: f64,
    /// Feedforward, two samples delayed
    pub b2: f64,
    /// Feedback, one sample delayed
    pub a1: f64,
    /// Feedback, two samples delayed
    pub a2: f64,
}

impl BiquadCoefficients {
    /// Band-pass coefficients with constant 0 dB peak gain (RBJ cookbook).
    ///
    /// `q` controls the bandwidth: Q = sqrt(2) gives a one-octave passband,
    /// which is what the octave band filter bank uses.
    ///
    /// # Arguments
    ///
    /// * `center_hz` - Center frequency in Hz (must be below Nyquist)
    /// * `q` - Q factor (bandwidth = center / Q)
    /// * `sample_rate` - Sample rate in Hz
    pub fn bandpass(center_hz: f64, q: f64, sample_rate: f64) -> Self {
        let omega = 2.0 * PI * center_hz / sample_rate;
        let cos_omega = cos(omega);
        let sin_omega = sin(omega);
        let alpha = sin_omega / (2.0 * q);

        let a0 = 1.0 + alpha;
        Self {
            b0: alpha / a0,
            b1: 0.0,
            b2: -alpha / a0,
            a1: -2.0 * cos_omega / a0,
            a2: (1.0 - alpha) / a0,
        }
    }
}

/// Direct Form I biquad with 64-bit delay lines.
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: BiquadCoefficients,

    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,

    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Creates a biquad with the given coefficients and cleared state.
    pub fn new(coeffs: BiquadCoefficients) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let x = f64::from(input);
        let c = &self.coeffs;
        let y = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;

        y as f32
    }

    /// Filters a whole buffer, resetting state first.
    pub fn process_buffer(&mut self, input: &[f32], output: &mut [f32]) {
        self.clear();
        for (out, &sample) in output.iter_mut().zip(input.iter()) {
            *out = self.process(sample);
        }
    }

    /// Clears the delay lines without changing coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}
