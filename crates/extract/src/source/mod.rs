//! The document source seam.
//!
//! Entities never talk to the network themselves. They build a path from
//! their identifying key and ask a [`DocumentSource`] for the raw response
//! text, which is then parsed into a [`Page`]. Transport concerns (cookies,
//! sessions, URL escaping, timeouts) all live behind this trait.

#[cfg(any(test, feature = "mock"))]
mod mock;

#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockSource;
use crate::Page;
use crate::error::Result;

/// Unified interface for anything that can serve site documents.
///
/// Implementations perform exactly one request attempt per call. Transport
/// failures are reported as [`TransportTimeout`](crate::error::ErrorKind::TransportTimeout)
/// or [`Transport`](crate::error::ErrorKind::Transport) and are never retried
/// by the caller in this crate.
///
/// # Examples
///
/// ```
/// use gc_extract::{DocumentSource, error::Result};
///
/// struct Offline;
/// impl DocumentSource for Offline {
///     fn get(&self, _path: &str) -> Result<String> {
///         Ok("<html></html>".to_string())
///     }
///     fn is_session_active(&self) -> bool {
///         false
///     }
/// }
///
/// let page = Offline.page("/anything").unwrap();
/// assert_eq!(page.raw(), "<html></html>");
/// ```
pub trait DocumentSource {
    /// Issue a GET for a site-relative path (including its query string) and
    /// return the response body.
    fn get(&self, path: &str) -> Result<String>;

    /// Whether requests are made with an authenticated session.
    fn is_session_active(&self) -> bool;

    /// Fetch and parse a path into a queryable [`Page`].
    fn page(&self, path: &str) -> Result<Page> {
        self.get(path).map(Page::parse)
    }
}
