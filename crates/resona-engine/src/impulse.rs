//! Impulse location for clap/balloon measurements.
//!
//! When the excitation was an acoustic event rather than a sweep, the
//! impulse response is already inside the recording; it just has to be
//! found and windowed.

use std::ops::Range;
use tracing::debug;

/// Default peak threshold below which no impulse is reported.
pub const DEFAULT_IMPULSE_THRESHOLD: f32 = 0.3;

/// Fraction of the peak at which the backward walk stops; marks the
/// impulse start.
const ONSET_FRACTION: f32 = 0.1;

/// Longest impulse response kept, in seconds.
const MAX_IMPULSE_SECONDS: usize = 5;

/// Locates the primary impulse in a raw recording.
///
/// Finds the absolute peak, rejects it if it sits below `threshold`, then
/// walks backward to the onset (first sample under a tenth of the peak) and
/// caps the window at five seconds. Returns `None` when no impulse clears
/// the threshold; the caller may fall back to the raw buffer.
pub fn locate_impulse(
    samples: &[f32],
    sample_rate: u32,
    threshold: f32,
) -> Option<Range<usize>> {
    if samples.is_empty() {
        return None;
    }

    let (peak_index, peak_value) =
        samples
            .iter()
            .enumerate()
            .fold((0, 0.0f32), |(best_i, best_v), (i, &x)| {
                if x.abs() > best_v {
                    (i, x.abs())
                } else {
                    (best_i, best_v)
                }
            });

    if peak_value < threshold {
        debug!(peak_value, threshold, "no impulse above threshold");
        return None;
    }

    let onset_level = ONSET_FRACTION * peak_value;
    let mut start = peak_index;
    while start > 0 && samples[start - 1].abs() >= onset_level {
        start -= 1;
    }

    let end = samples
        .len()
        .min(start + MAX_IMPULSE_SECONDS * sample_rate as usize);
    debug!(peak_index, start, end, "located impulse window");
    Some(start..end)
}
