//! Error types shared across quirk crates.

use thiserror::Error;

/// Errors surfaced by quirk components.
///
/// Malformed firmware input (unknown unit tags, null payloads) is
/// deliberately *not* an error: the tag vocabulary is not a hard contract,
/// so classifiers degrade silently instead of failing the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuirkError {
    /// A bus listener failed while handling a delivered event.
    ///
    /// Delivery is not retried and state already written by earlier steps of
    /// the same update is not rolled back; the error propagates to the
    /// caller of the classifier.
    #[error("listener failed while handling '{event}': {reason}")]
    Listener {
        /// Name of the event being delivered.
        event: &'static str,
        /// Listener-provided failure description.
        reason: String,
    },
}
