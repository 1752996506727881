//! Entities reconstructed from site documents.
//!
//! Every entity follows the same discipline:
//!
//! 1. It is constructed from an explicit params struct carrying whatever
//!    identity (code, GUID) and parent-discovered values are already known.
//! 2. [`Entity::fetch`] turns the identity into a request path, asks a
//!    [`DocumentSource`] for it, and stores the resulting [`Page`]. This
//!    happens at most once.
//! 3. Each attribute accessor derives its value from the stored page on
//!    first successful read and memoizes it. Reading before a fetch is
//!    [`NotFetched`](ErrorKind::NotFetched); a failed derivation is
//!    [`ExtractionFailed`](ErrorKind::ExtractionFailed) and is not memoized,
//!    so the next read tries again.
//!
//! Identity keys and values handed over at construction are returned as-is
//! without a fetch; everything else needs the document.

mod cache;
mod list;
mod log;
mod trackable;
mod user;

use std::cell::OnceCell;

use exn::OptionExt;
use tracing::instrument;

pub use self::cache::{Cache, CacheParams};
pub use self::list::{EntityList, LogList};
pub use self::log::{Log, LogParams};
pub use self::trackable::{Holder, Trackable, TrackableParams};
pub use self::user::{User, UserParams};
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::{DocumentSource, Page};

/// The fetch lifecycle of an entity: `Unfetched` until a page is stored,
/// `Fetched` forever after.
#[derive(Debug, Clone)]
pub struct FetchState {
    page: Option<Page>,
}
impl FetchState {
    pub(crate) fn unfetched() -> Self {
        Self { page: None }
    }

    pub fn is_fetched(&self) -> bool {
        self.page.is_some()
    }

    pub(crate) fn page(&self) -> Result<&Page> {
        self.page.as_ref().ok_or_raise(|| ErrorKind::NotFetched)
    }

    fn store(&mut self, page: Page) {
        self.page.get_or_insert(page);
    }

    /// Returns the memoized value in `cell`, deriving it from the page on
    /// first successful read. Failures are returned and not stored.
    #[instrument(level = "trace", skip_all, fields(field = field))]
    pub(crate) fn memo<'a, T>(
        &self,
        cell: &'a OnceCell<T>,
        field: &'static str,
        derive: impl FnOnce(&Page) -> Result<T>,
    ) -> Result<&'a T> {
        if let Some(value) = cell.get() {
            return Ok(value);
        }
        let value = derive(self.page()?).inspect_err(|err| {
            let kind: &ErrorKind = err;
            tracing::debug!(field, error = %kind, "Attribute extraction failed");
        })?;
        Ok(cell.get_or_init(|| value))
    }

    /// Returns an identity key known at construction or discovered later.
    /// An unknown key is [`NotFetched`](ErrorKind::NotFetched) before the
    /// fetch and [`ExtractionFailed`](ErrorKind::ExtractionFailed) after it.
    pub(crate) fn key<'a>(&self, cell: &'a OnceCell<String>, field: &'static str) -> Result<&'a str> {
        if let Some(value) = cell.get() {
            return Ok(value);
        }
        self.page()?;
        exn::bail!(ErrorKind::ExtractionFailed(field))
    }

    #[cfg(test)]
    pub(crate) fn clear(&mut self) {
        self.page = None;
    }
}

/// Shared fetch lifecycle for every entity kind.
pub trait Entity: Sized {
    /// Entity kind, used in logs and error messages.
    const KIND: &'static str;
    /// Whether fetching needs an authenticated session.
    const REQUIRES_SESSION: bool = false;

    /// Everything that may be known about the entity before it is fetched.
    type Params;

    fn new(params: Self::Params) -> Self;

    /// The site-relative request path, built from the identifying key(s).
    ///
    /// Fails with [`InvalidArgument`](ErrorKind::InvalidArgument) when no
    /// usable key is known.
    fn path(&self) -> Result<String>;

    #[doc(hidden)]
    fn state(&self) -> &FetchState;

    #[doc(hidden)]
    fn state_mut(&mut self) -> &mut FetchState;

    /// Whether a document has been fetched and stored.
    fn is_fetched(&self) -> bool {
        self.state().is_fetched()
    }

    /// Fetches and stores the entity's document.
    ///
    /// Checks the key before the session and the session before any request
    /// is made. Transport errors are returned unchanged and leave the entity
    /// unfetched. Fetching an already fetched entity keeps the first document.
    #[instrument(skip_all, fields(kind = Self::KIND, path = tracing::field::Empty))]
    fn fetch(&mut self, source: &dyn DocumentSource) -> Result<()> {
        if self.is_fetched() {
            tracing::debug!("Already fetched; keeping the first document");
            return Ok(());
        }
        let path = self.path()?;
        tracing::Span::current().record("path", path.as_str());
        if Self::REQUIRES_SESSION && !source.is_session_active() {
            exn::bail!(ErrorKind::LoginRequired);
        }
        let page = source.page(&path)?;
        tracing::debug!(bytes = page.raw().len(), "Fetched document");
        self.state_mut().store(page);
        Ok(())
    }

    /// Constructs and fetches in one step. Any fetch failure is returned and
    /// the half-built entity is dropped.
    fn load(source: &dyn DocumentSource, params: Self::Params) -> Result<Self> {
        let mut entity = Self::new(params);
        entity.fetch(source)?;
        Ok(entity)
    }
}

/// A cell pre-filled with a construction value, treating empty strings as
/// absent.
pub(crate) fn known(value: Option<String>) -> OnceCell<String> {
    let cell = OnceCell::new();
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        let _ = cell.set(value);
    }
    cell
}

/// A cell pre-filled with an optional construction value.
pub(crate) fn given<T>(value: Option<T>) -> OnceCell<T> {
    let cell = OnceCell::new();
    if let Some(value) = value {
        let _ = cell.set(value);
    }
    cell
}

/// Validates a waypoint or tracking code before it is put into a request
/// path.
pub(crate) fn checked_code(code: &str) -> Result<&str> {
    if consts::CODE_FORMAT_REGEX.is_match(code) {
        Ok(code)
    } else {
        exn::bail!(ErrorKind::InvalidArgument(format!("malformed code `{code}`")))
    }
}

/// Validates a GUID before it is put into a request path.
pub(crate) fn checked_guid(guid: &str) -> Result<&str> {
    if consts::GUID_FORMAT_REGEX.is_match(guid) {
        Ok(guid)
    } else {
        exn::bail!(ErrorKind::InvalidArgument(format!("malformed GUID `{guid}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_requires_page() {
        let state = FetchState::unfetched();
        let cell: OnceCell<u32> = OnceCell::new();
        let err = state.memo(&cell, "count", |_| Ok(1)).unwrap_err();
        assert_eq!(&*err, &ErrorKind::NotFetched);
        assert!(cell.get().is_none());
    }

    #[test]
    fn test_memo_computes_once() {
        let mut state = FetchState::unfetched();
        state.store(Page::parse("<p>1</p>"));
        let cell: OnceCell<u32> = OnceCell::new();
        let mut calls = 0;
        assert_eq!(
            *state
                .memo(&cell, "count", |_| {
                    calls += 1;
                    Ok(7)
                })
                .unwrap(),
            7
        );
        assert_eq!(*state.memo(&cell, "count", |_| Ok(8)).unwrap(), 7);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_memo_does_not_store_failures() {
        let mut state = FetchState::unfetched();
        state.store(Page::parse("<p>1</p>"));
        let cell: OnceCell<u32> = OnceCell::new();
        assert!(state.memo(&cell, "count", |_| Err(exn::Exn::from(ErrorKind::ExtractionFailed("count")))).is_err());
        assert!(cell.get().is_none());
        assert_eq!(*state.memo(&cell, "count", |_| Ok(3)).unwrap(), 3);
    }

    #[test]
    fn test_store_keeps_first_page() {
        let mut state = FetchState::unfetched();
        state.store(Page::parse("first"));
        state.store(Page::parse("second"));
        assert_eq!(state.page().unwrap().raw(), "first");
    }

    #[test]
    fn test_known_ignores_blank() {
        assert!(known(Some("   ".to_string())).get().is_none());
        assert!(known(None).get().is_none());
        assert_eq!(known(Some("GC1".to_string())).get().map(String::as_str), Some("GC1"));
    }

    #[test]
    fn test_checked_guid() {
        assert!(checked_guid("6bb9bd20-f75d-42a0-bfc7-d1033040f480").is_ok());
        let err = checked_guid("not-a-guid").unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn test_checked_code() {
        assert_eq!(checked_code("GC1ZXEZ").unwrap(), "GC1ZXEZ");
        assert_eq!(checked_code("tb3x4y5").unwrap(), "tb3x4y5");
        for code in ["GC1&guid=x", "GC1#x", "GC 1", "GC1/../x"] {
            let err = checked_code(code).unwrap_err();
            assert!(matches!(&*err, ErrorKind::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_key_before_and_after_fetch() {
        let mut state = FetchState::unfetched();
        let given = known(Some("GC1".to_string()));
        let unknown = OnceCell::new();
        assert_eq!(state.key(&given, "code").unwrap(), "GC1");
        assert_eq!(&*state.key(&unknown, "guid").unwrap_err(), &ErrorKind::NotFetched);
        state.store(Page::parse("<p></p>"));
        assert_eq!(&*state.key(&unknown, "guid").unwrap_err(), &ErrorKind::ExtractionFailed("guid"));
    }
}
