//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use tracing::debug;

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels);
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
    })
}

/// Read a WAV file as mono f32 samples plus the sample rate.
///
/// Multi-channel files are mixed down to mono by averaging channels;
/// integer formats are scaled to [-1, 1]. The engine analyzes one channel,
/// so this is the only shape callers need.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32)> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels);

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    if interleaved.is_empty() {
        return Err(Error::Empty);
    }

    let samples: Vec<f32> = if channels <= 1 {
        interleaved
    } else {
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    debug!(
        frames = samples.len(),
        sample_rate = spec.sample_rate,
        channels,
        "loaded WAV file"
    );
    Ok((samples, spec.sample_rate))
}

/// Write mono f32 samples to a 32-bit float WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    debug!(frames = samples.len(), sample_rate, "wrote WAV file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.wav");

        let samples: Vec<f32> = (0..1000)
            .map(|i| (i as f32 / 1000.0 * std::f32::consts::TAU).sin() * 0.5)
            .collect();
        write_wav(&path, &samples, 48000).unwrap();

        let (back, sample_rate) = read_wav(&path).unwrap();
        assert_eq!(sample_rate, 48000);
        assert_eq!(back.len(), samples.len());
        for (a, b) in samples.iter().zip(back.iter()) {
            assert_eq!(a, b, "float samples must roundtrip exactly");
        }
    }

    #[test]
    fn info_reports_duration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("info.wav");
        write_wav(&path, &vec![0.0; 24000], 48000).unwrap();

        let info = read_wav_info(&path).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 48000);
        assert_eq!(info.num_frames, 24000);
        assert!((info.duration_secs - 0.5).abs() < 1e-9);
    }

    #[test]
    fn stereo_downmixes_to_mono() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..100 {
            writer.write_sample(1.0f32).unwrap(); // left
            writer.write_sample(0.0f32).unwrap(); // right
        }
        writer.finalize().unwrap();

        let (samples, _) = read_wav(&path).unwrap();
        assert_eq!(samples.len(), 100);
        assert!(samples.iter().all(|&x| (x - 0.5).abs() < 1e-6));
    }

    #[test]
    fn int16_is_scaled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("int16.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(i16::MAX).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(i16::MIN).unwrap();
        writer.finalize().unwrap();

        let (samples, _) = read_wav(&path).unwrap();
        assert!((samples[0] - 1.0).abs() < 1e-3);
        assert_eq!(samples[1], 0.0);
        assert!((samples[2] + 1.0).abs() < 1e-3);
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        write_wav(&path, &[], 48000).unwrap();
        assert!(matches!(read_wav(&path), Err(Error::Empty)));
    }
}
