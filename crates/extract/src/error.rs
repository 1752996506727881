//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Every entity accessor, fetch and
//! document source in this crate reports failures through [`ErrorKind`].

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable identifying key, or a construction value that cannot be used.
    #[display("invalid argument: {_0}")]
    InvalidArgument(#[error(not(source))] String),
    /// An attribute was read before a successful fetch. This is an ordering
    /// bug in the caller, not a runtime condition.
    #[display("entity has not been fetched")]
    NotFetched,
    /// The entity can only be fetched with an active session.
    #[display("login required")]
    LoginRequired,
    /// The document source gave up waiting for a response.
    #[display("request timed out")]
    TransportTimeout,
    /// The document source failed to deliver a response.
    #[display("request failed: {_0}")]
    Transport(#[error(not(source))] String),
    /// The document was fetched but the attribute could not be found or was
    /// not structurally valid. Usually means the page format has changed.
    #[display("could not extract {_0} from document")]
    ExtractionFailed(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransportTimeout | Self::Transport(_))
    }
}
