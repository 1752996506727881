//! HTTP Source Error Types
//!
//! Only construction can fail with these. Request failures are reported
//! through the core's transport error kinds.

use derive_more::{Display, Error};

/// An HTTP source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for HTTP source construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The settings were rejected; fix the configuration.
    #[display("invalid settings")]
    Settings,
    /// The underlying HTTP client could not be built.
    #[display("could not build HTTP client")]
    Client,
}
