//! FFT deconvolution of sweep recordings.
//!
//! Convolves the recorded sweep response with the matched inverse filter to
//! recover the room impulse response, then windows the result around the
//! located peak.

use crate::cancel::CancelToken;
use crate::error::EngineError;
use crate::fft::Fft;
use crate::sweep::SweepParams;
use tracing::debug;

/// Samples kept ahead of the located peak, preserving pre-echo and
/// direct-sound structure.
const PRE_PEAK_MARGIN: usize = 1000;

/// A deconvolved impulse response.
#[derive(Debug, Clone)]
pub struct Deconvolution {
    /// The windowed impulse response.
    pub impulse_response: Vec<f32>,
    /// Index of the peak within the raw convolution output.
    pub peak_index: usize,
    /// Non-fatal conditions observed along the way.
    pub warnings: Vec<String>,
}

/// Linear convolution of two signals via zero-padded FFT.
///
/// The output has length `a.len() + b.len() - 1`. Fails with
/// [`EngineError::DeconvolutionFailed`] when either input is empty, and with
/// [`EngineError::Cancelled`] if the token fires between transform passes.
pub fn fft_convolve(
    a: &[f32],
    b: &[f32],
    cancel: &CancelToken,
) -> Result<Vec<f32>, EngineError> {
    if a.is_empty() || b.is_empty() {
        return Err(EngineError::DeconvolutionFailed(
            "cannot convolve an empty signal".to_string(),
        ));
    }

    let out_len = a.len() + b.len() - 1;
    let fft_size = out_len.next_power_of_two();
    let fft = Fft::new(fft_size);

    cancel.checkpoint()?;
    let mut spectrum_a = fft.complex_buffer(a);
    fft.forward(&mut spectrum_a);

    cancel.checkpoint()?;
    let mut spectrum_b = fft.complex_buffer(b);
    fft.forward(&mut spectrum_b);

    for (bin_a, bin_b) in spectrum_a.iter_mut().zip(spectrum_b.iter()) {
        *bin_a *= *bin_b;
    }

    cancel.checkpoint()?;
    fft.inverse(&mut spectrum_a);

    spectrum_a.truncate(out_len);
    Ok(spectrum_a.into_iter().map(|c| c.re).collect())
}

/// Recovers the impulse response from a recorded sweep.
///
/// Convolves the recording with the inverse filter of `params`, locates the
/// peak, and returns the window from [`PRE_PEAK_MARGIN`] samples before the
/// peak to one sweep duration after it, clipped to bounds.
pub fn deconvolve(
    recording: &[f32],
    params: &SweepParams,
    cancel: &CancelToken,
) -> Result<Deconvolution, EngineError> {
    let inverse = params.inverse_filter();
    if inverse.is_empty() {
        return Err(EngineError::DeconvolutionFailed(
            "sweep parameters produce an empty inverse filter".to_string(),
        ));
    }

    let convolved = fft_convolve(recording, &inverse, cancel)?;
    let mut warnings = Vec::new();

    let (peak_index, peak_value) = convolved
        .iter()
        .enumerate()
        .fold((0, 0.0f32), |(best_i, best_v), (i, &x)| {
            if x.abs() > best_v {
                (i, x.abs())
            } else {
                (best_i, best_v)
            }
        });

    if !peak_value.is_finite() {
        return Err(EngineError::DeconvolutionFailed(
            "convolution output is not finite".to_string(),
        ));
    }
    if peak_value < 1e-6 {
        warnings.push(format!(
            "deconvolved peak magnitude {peak_value:.2e} is near the float precision floor"
        ));
    }

    let start = peak_index.saturating_sub(PRE_PEAK_MARGIN);
    let tail = (f64::from(params.sample_rate) * f64::from(params.duration_s)) as usize;
    let end = (peak_index + tail).min(convolved.len());
    debug!(peak_index, start, end, "windowed deconvolved impulse response");

    Ok(Deconvolution {
        impulse_response: convolved[start..end].to_vec(),
        peak_index,
        warnings,
    })
}
