//! Error types for the analysis engine.

use resona_room::RoomError;
use thiserror::Error;

/// Everything that can go wrong during an analysis run.
///
/// The band-local kinds (see [`EngineError::is_band_local`]) are caught by
/// the analyzer, logged, and reduced to absent decay times in the result.
/// The remaining kinds abort the run and reach the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// An empty audio buffer or a zero sample rate; nothing can be
    /// analyzed. Fatal before any band work starts.
    #[error("not enough audio to analyze")]
    InsufficientData,

    /// The decay curve never crosses a required dB threshold.
    #[error("decay curve never reaches the {missing_db} dB threshold")]
    InvalidDecayRange {
        /// The threshold that was not reached.
        missing_db: f32,
    },

    /// The least-squares fit over the decay range was not straight enough.
    #[error("decay fit correlation {correlation} below the 0.9 gate")]
    LowCorrelation {
        /// Absolute Pearson correlation of the rejected fit.
        correlation: f32,
    },

    /// A decay time outside the plausible [0.05, 15] s range.
    #[error("decay time {seconds} s outside the plausible range")]
    ImplausibleResult {
        /// The rejected value in seconds.
        seconds: f32,
    },

    /// The sweep recording could not be deconvolved into an impulse
    /// response. Fatal for an ESS run.
    #[error("deconvolution failed: {0}")]
    DeconvolutionFailed(String),

    /// The room description failed validation. Fatal before any audio is
    /// touched.
    #[error("invalid room: {0}")]
    InvalidRoom(#[from] RoomError),

    /// The caller's cancellation token fired. No partial analysis is
    /// emitted.
    #[error("analysis cancelled")]
    Cancelled,

    /// A numerical invariant was violated (NaN or infinity where none can
    /// legitimately occur). Indicates a bug, not bad input data.
    #[error("numerical invariant violated in {0}")]
    ComputationFault(String),
}

impl EngineError {
    /// Whether this error is confined to a single band's estimate.
    ///
    /// Band-local errors reduce to absent optional fields in the analysis;
    /// run-level errors propagate to the caller. The estimator suppresses
    /// exactly the kinds this returns true for.
    pub fn is_band_local(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidDecayRange { .. }
                | EngineError::LowCorrelation { .. }
                | EngineError::ImplausibleResult { .. }
        )
    }
}
