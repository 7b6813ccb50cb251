//! Errors raised when an outcome is extracted from the wrong track.
//!
//! Failures a caller expects are values on the failure track and never show up here.
//! [`UnwrapError`] describes misuse: asking an outcome for the side it does not hold.
//! The panicking extractors (`unwrap`, `unwrap_err`) format this error into their panic
//! message; the `try_*` extractors return it.

use thiserror::Error;

/// Extraction was attempted on the wrong track.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnwrapError {
    /// A success value was requested from a failure.
    #[error("called `unwrap()` on a failure outcome: {outcome}")]
    OnFailure {
        /// Debug rendering of the outcome at the time of the call.
        outcome: String,
    },

    /// A failure value was requested from a success.
    #[error("called `unwrap_err()` on a success outcome: {outcome}")]
    FailureOnSuccess {
        /// Debug rendering of the outcome at the time of the call.
        outcome: String,
    },

    /// The outcome's track is not known until it is resolved.
    #[error("outcome track is unsettled; resolve it before extracting")]
    Unsettled,
}
