//! Zero-phase octave band filtering.
//!
//! Each band is a single RBJ band-pass biquad with Q = sqrt(2) (one octave
//! between the -3 dB points), applied forward and then backward. The double
//! pass cancels the filter's group delay and doubles its steepness, so the
//! Schroeder integrator downstream sees an undisplaced decay. Valid offline
//! only, which is all this engine does.

use crate::cancel::CancelToken;
use crate::error::EngineError;
use resona_core::{Biquad, BiquadCoefficients};
use resona_room::FrequencyBand;

/// Q of a one-octave band-pass.
const OCTAVE_Q: f64 = std::f64::consts::SQRT_2;

/// Safety margin below Nyquist; bands centered above it are excluded.
const NYQUIST_MARGIN_HZ: f64 = 1.0;

/// Inputs shorter than a tenth of a second pass through unfiltered; the
/// estimator downstream rejects them anyway.
fn too_short(len: usize, sample_rate: u32) -> bool {
    len < sample_rate as usize / 10
}

/// Filters the signal into one octave band with zero phase.
///
/// Returns `Ok(None)` when the band's center does not fit below Nyquist at
/// this sample rate. Very short inputs are returned unchanged. The token is
/// polled before each directional pass over signals of a second or more.
pub fn octave_filter(
    samples: &[f32],
    band: FrequencyBand,
    sample_rate: u32,
    cancel: &CancelToken,
) -> Result<Option<Vec<f32>>, EngineError> {
    let nyquist = f64::from(sample_rate) / 2.0;
    if f64::from(band.center_hz()) > nyquist - NYQUIST_MARGIN_HZ {
        return Ok(None);
    }
    if too_short(samples.len(), sample_rate) {
        return Ok(Some(samples.to_vec()));
    }

    let coeffs = BiquadCoefficients::bandpass(
        f64::from(band.center_hz()),
        OCTAVE_Q,
        f64::from(sample_rate),
    );
    let long_input = samples.len() >= sample_rate as usize;

    // forward pass
    if long_input {
        cancel.checkpoint()?;
    }
    let mut filtered = vec![0.0f32; samples.len()];
    Biquad::new(coeffs).process_buffer(samples, &mut filtered);

    // backward pass over the reversed signal
    if long_input {
        cancel.checkpoint()?;
    }
    filtered.reverse();
    let mut output = vec![0.0f32; filtered.len()];
    Biquad::new(coeffs).process_buffer(&filtered, &mut output);
    output.reverse();

    Ok(Some(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq: f32, sample_rate: u32, secs: f32) -> Vec<f32> {
        let n = (sample_rate as f32 * secs) as usize;
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    fn rms(buf: &[f32]) -> f32 {
        (buf.iter().map(|x| x * x).sum::<f32>() / buf.len() as f32).sqrt()
    }

    #[test]
    fn center_frequency_passes() {
        let token = CancelToken::new();
        let input = sine(1000.0, 44100, 1.0);
        let out = octave_filter(&input, FrequencyBand::Khz1, 44100, &token)
            .unwrap()
            .unwrap();

        // ignore the edges where the non-causal pass rings
        let mid = &out[4410..out.len() - 4410];
        let mid_in = &input[4410..input.len() - 4410];
        let ratio = rms(mid) / rms(mid_in);
        assert!(
            (ratio - 1.0).abs() < 0.05,
            "center tone should pass near unity, got {ratio}"
        );
    }

    #[test]
    fn zero_phase_leaves_no_group_delay() {
        // A causal pass of this filter delays the band center by roughly
        // 2Q/omega0 (~20 samples at 44.1 kHz). The forward-backward pass
        // must cancel that: the cross-correlation between input and output
        // peaks at lag zero, give or take one sample.
        let sample_rate = 44100;
        let input = sine(1000.0, sample_rate, 1.0);
        let out = octave_filter(&input, FrequencyBand::Khz1, sample_rate, &CancelToken::new())
            .unwrap()
            .unwrap();

        let window = 4410..input.len() - 4410;
        let correlation_at = |lag: i64| -> f64 {
            window
                .clone()
                .map(|i| {
                    let j = i as i64 + lag;
                    f64::from(input[i]) * f64::from(out[j as usize])
                })
                .sum()
        };

        let best_lag = (-30i64..=30)
            .max_by(|a, b| correlation_at(*a).total_cmp(&correlation_at(*b)))
            .unwrap();
        assert!(best_lag.abs() <= 1, "output shifted by {best_lag} samples");
    }

    #[test]
    fn out_of_band_tone_is_attenuated() {
        let token = CancelToken::new();
        let input = sine(4000.0, 44100, 1.0);
        let out = octave_filter(&input, FrequencyBand::Hz500, 44100, &token)
            .unwrap()
            .unwrap();
        let mid = &out[4410..out.len() - 4410];
        let ratio = rms(mid) / rms(&input[4410..input.len() - 4410]);
        assert!(ratio < 0.05, "4 kHz through the 500 Hz band: {ratio}");
    }

    #[test]
    fn band_above_nyquist_is_excluded() {
        let input = sine(100.0, 4000, 1.0);
        let out = octave_filter(&input, FrequencyBand::Khz4, 4000, &CancelToken::new()).unwrap();
        assert!(out.is_none());
        // 2 kHz is exactly Nyquist at 4 kHz sampling: also excluded
        let out = octave_filter(&input, FrequencyBand::Khz2, 4000, &CancelToken::new()).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn short_input_passes_through() {
        let input = vec![0.25f32; 1000];
        let out = octave_filter(&input, FrequencyBand::Khz1, 44100, &CancelToken::new())
            .unwrap()
            .unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn cancellation_stops_long_filtering() {
        let token = CancelToken::new();
        token.cancel();
        let input = sine(1000.0, 44100, 1.5);
        assert_eq!(
            octave_filter(&input, FrequencyBand::Khz1, 44100, &token).unwrap_err(),
            EngineError::Cancelled
        );
    }
}
