//! Exponential sine sweep excitation and its inverse filter.
//!
//! Farina-method impulse response capture: play the sweep through the room,
//! record it, and convolve the recording with the matched inverse filter to
//! recover the impulse response while pushing distortion harmonics ahead of
//! the linear response.

use std::f64::consts::PI;

/// Peak amplitude of the generated sweep, leaving headroom for the
/// playback chain.
const SWEEP_AMPLITUDE: f64 = 0.8;

/// Fraction of the duration spent on the linear fade at each end.
const FADE_FRACTION: f64 = 0.05;

/// Parameters of an exponential sine sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepParams {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Start frequency in Hz.
    pub start_hz: f32,
    /// End frequency in Hz.
    pub end_hz: f32,
    /// Sweep duration in seconds.
    pub duration_s: f32,
}

impl SweepParams {
    /// The standard measurement sweep: 20 Hz to 20 kHz over 3 seconds.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            start_hz: 20.0,
            end_hz: 20000.0,
            duration_s: 3.0,
        }
    }

    /// Overrides the frequency range.
    pub fn with_range(mut self, start_hz: f32, end_hz: f32) -> Self {
        self.start_hz = start_hz;
        self.end_hz = end_hz;
        self
    }

    /// Overrides the duration.
    pub fn with_duration(mut self, duration_s: f32) -> Self {
        self.duration_s = duration_s;
        self
    }

    /// Number of samples in the sweep.
    pub fn num_samples(&self) -> usize {
        (f64::from(self.duration_s) * f64::from(self.sample_rate)) as usize
    }

    /// Exponential growth rate `R = ln(f2/f1) / D` in 1/s.
    fn rate(&self) -> f64 {
        let f1 = f64::from(self.start_hz);
        let f2 = f64::from(self.end_hz);
        (f2 / f1).ln() / f64::from(self.duration_s)
    }

    /// Generates the sweep.
    ///
    /// Instantaneous frequency grows as `f(t) = f1 * exp(R t)`; the phase is
    /// its integral `2 pi f1 / R * (exp(R t) - 1)`. A linear fade over 5 %
    /// of the duration at each end avoids spectral splatter at the edges.
    pub fn generate(&self) -> Vec<f32> {
        let n = self.num_samples();
        let sr = f64::from(self.sample_rate);
        let f1 = f64::from(self.start_hz);
        let rate = self.rate();
        let phase_scale = 2.0 * PI * f1 / rate;
        let fade_len = ((n as f64) * FADE_FRACTION) as usize;

        (0..n)
            .map(|i| {
                let t = i as f64 / sr;
                let phase = phase_scale * ((rate * t).exp() - 1.0);
                let envelope = SWEEP_AMPLITUDE * fade(i, n, fade_len);
                (envelope * phase.sin()) as f32
            })
            .collect()
    }

    /// Generates the matched inverse filter.
    ///
    /// The sweep is time-reversed and modulated by a decaying exponential
    /// `exp(-R t)` so that the band occupied at each instant is weighted by
    /// `f1 / f`, flattening the sweep's -3 dB/octave energy slope. The
    /// result is normalized to a peak magnitude of 1, so convolving the
    /// sweep with it approximates a delta at the tail of the kernel.
    pub fn inverse_filter(&self) -> Vec<f32> {
        let sweep = self.generate();
        let sr = f64::from(self.sample_rate);
        let rate = self.rate();

        let mut inverse: Vec<f32> = sweep
            .into_iter()
            .rev()
            .enumerate()
            .map(|(i, sample)| {
                let t = i as f64 / sr;
                (f64::from(sample) * (-rate * t).exp()) as f32
            })
            .collect();

        let peak = inverse.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        if peak > 0.0 {
            for sample in &mut inverse {
                *sample /= peak;
            }
        }
        inverse
    }
}

/// Linear fade-in/fade-out envelope, 1.0 through the middle.
fn fade(i: usize, n: usize, fade_len: usize) -> f64 {
    if fade_len == 0 {
        return 1.0;
    }
    if i < fade_len {
        i as f64 / fade_len as f64
    } else if i >= n - fade_len {
        (n - 1 - i) as f64 / fade_len as f64
    } else {
        1.0
    }
}
