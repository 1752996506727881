//! In-memory document source for testing.

use std::cell::RefCell;
use std::collections::HashMap;

use super::DocumentSource;
use crate::error::{ErrorKind, Result};

/// In-memory document source for testing.
///
/// Serves canned HTML keyed by exact request path, can be told to fail
/// specific paths with a given transport error, and records every path it
/// was asked for so tests can assert on (the absence of) requests.
///
/// # Examples
///
/// ```
/// use gc_extract::{DocumentSource, MockSource};
///
/// let source = MockSource::with_pages([("/profile/?guid=abc", "<html>...</html>")]);
/// assert!(source.get("/profile/?guid=abc").is_ok());
/// assert!(source.get("/profile/?guid=def").is_err());
/// assert_eq!(source.requests().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    pages: HashMap<String, String>,
    failures: HashMap<String, ErrorKind>,
    session: bool,
    requests: RefCell<Vec<String>>,
}

impl MockSource {
    /// Create a mock source pre-populated with pages.
    pub fn with_pages(pages: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            pages: pages.into_iter().map(|(path, html)| (path.into(), html.into())).collect(),
            ..Self::default()
        }
    }

    /// Report an active (or inactive) session.
    pub fn with_session(mut self, active: bool) -> Self {
        self.session = active;
        self
    }

    /// Fail every request for `path` with `kind`.
    pub fn with_failure(mut self, path: impl Into<String>, kind: ErrorKind) -> Self {
        self.failures.insert(path.into(), kind);
        self
    }

    /// Every path requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl DocumentSource for MockSource {
    fn get(&self, path: &str) -> Result<String> {
        self.requests.borrow_mut().push(path.to_string());
        if let Some(kind) = self.failures.get(path) {
            return Err(exn::Exn::from(kind.clone()));
        }
        match self.pages.get(path) {
            Some(html) => Ok(html.clone()),
            None => exn::bail!(ErrorKind::Transport(format!("404 Not Found: {path}"))),
        }
    }

    fn is_session_active(&self) -> bool {
        self.session
    }
}
