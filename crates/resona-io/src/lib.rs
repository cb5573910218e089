//! WAV file I/O for the resona measurement toolkit.
//!
//! The analysis engine consumes bare `f32` sample buffers; this crate gets
//! them in and out of WAV files. Recording hardware access is the capture
//! collaborator's problem, not this crate's.

mod wav;

pub use wav::{WavInfo, read_wav, read_wav_info, write_wav};

/// Error types for audio file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file contains no audio frames.
    #[error("WAV file contains no samples")]
    Empty,

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio file operations.
pub type Result<T> = std::result::Result<T, Error>;
