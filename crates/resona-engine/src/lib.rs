//! Resona Engine - acoustic analysis for room reverberation measurement
//!
//! Given a captured (or deconvolved) room impulse response and a
//! [`RoomModel`](resona_room::RoomModel), the engine computes the
//! reverberation time RT60 (plus the EDT/T20/T30 estimators) per octave
//! band and cross-checks the measurements against Sabine and Eyring
//! predictions.
//!
//! The pipeline, leaves first:
//!
//! - [`sweep`] - exponential sine sweep excitation and its inverse filter
//! - [`deconvolve`] - FFT deconvolution of sweep recordings
//! - [`impulse`] - impulse location for clap/balloon measurements
//! - [`bandpass`] - zero-phase octave band filtering
//! - [`schroeder`] - backward energy integration into decay curves
//! - [`decay`] - decay-time estimation with quality gating
//! - [`analyzer`] - orchestration into a self-contained [`Analysis`]
//!
//! # Example
//!
//! ```rust
//! use resona_engine::{AnalysisOptions, MeasurementMode, analyze};
//! use resona_room::RoomModel;
//!
//! let room = RoomModel::new("studio", 5.0, 7.0, 3.0)?;
//! // a captured impulse response (here: a second of silence)
//! let samples = vec![0.0f32; 44100];
//!
//! let analysis = analyze(
//!     &samples,
//!     44100,
//!     &MeasurementMode::Raw,
//!     &room,
//!     &AnalysisOptions::default(),
//! )?;
//! assert!(analysis.average_measured_rt60_seconds.is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The engine is batch/offline and purely CPU-bound: no I/O, no process
//! state, no internal threads. Independent runs may execute concurrently;
//! a caller-provided [`CancelToken`] aborts a run at the next checkpoint.

pub mod analysis;
pub mod analyzer;
pub mod bandpass;
pub mod cancel;
pub mod decay;
pub mod deconvolve;
pub mod error;
pub mod fft;
pub mod impulse;
pub mod schroeder;
pub mod sweep;

// Re-export main types at crate root
pub use analysis::{Analysis, BandResult, QualityRating, RoomSnapshot};
pub use analyzer::{
    AnalysisOptions, MeasurementMode, analyze, analyze_band, synthesize_inverse,
    synthesize_sweep,
};
pub use cancel::CancelToken;
pub use decay::{DecayTimes, decay_time_between, noise_floor_db, peak_level_db};
pub use deconvolve::{Deconvolution, deconvolve, fft_convolve};
pub use error::EngineError;
pub use impulse::{DEFAULT_IMPULSE_THRESHOLD, locate_impulse};
pub use schroeder::DecayCurve;
pub use sweep::SweepParams;
