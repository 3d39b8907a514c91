//! Error types for tracepoint_core

use thiserror::Error;

/// Errors that can occur while interpreting a track binding
///
/// Trigger dispatch itself is infallible; errors only arise at the typed
/// boundary where host template values become [`TrackBinding`] values.
///
/// [`TrackBinding`]: crate::binding::TrackBinding
#[derive(Error, Debug)]
pub enum TrackError {
    /// Binding value did not match the declarative wire shape
    #[error("malformed track binding: {0}")]
    MalformedBinding(#[from] serde_json::Error),

    /// Unrecognized trigger kind name
    #[error("unknown trigger kind: {0:?}")]
    UnknownTrigger(String),

    /// Unrecognized bind phase name
    #[error("unknown bind phase: {0:?}")]
    UnknownPhase(String),
}

/// Result type for tracepoint operations
pub type Result<T> = std::result::Result<T, TrackError>;
