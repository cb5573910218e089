//! FFT plan wrapper.
//!
//! Pairs a forward and an inverse rustfft plan for one transform size. The
//! plans behind the `Arc`s are immutable once built, so a wrapper can be
//! shared freely across concurrent analysis runs.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use std::sync::Arc;

/// Forward/inverse FFT pair for a fixed size.
pub struct Fft {
    forward: Arc<dyn rustfft::Fft<f32>>,
    inverse: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Plans transforms for the given size.
    ///
    /// Callers guarantee `size > 0`; the deconvolver rejects empty input
    /// before planning.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
            size,
        }
    }

    /// Transform size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// In-place forward transform.
    pub fn forward(&self, buffer: &mut [Complex<f32>]) {
        self.forward.process(buffer);
    }

    /// In-place inverse transform, scaled by 1/N so that
    /// forward-then-inverse is the identity.
    pub fn inverse(&self, buffer: &mut [Complex<f32>]) {
        self.inverse.process(buffer);
        let scale = 1.0 / self.size as f32;
        for value in buffer.iter_mut() {
            *value *= scale;
        }
    }

    /// Copies real samples into a zero-padded complex buffer of the plan
    /// size.
    pub fn complex_buffer(&self, samples: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> =
            samples.iter().map(|&x| Complex::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));
        buffer
    }
}
