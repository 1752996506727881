//! Read-only entities reconstructed from geocaching.com pages.
//!
//! The site exposes no structured API, so every [`Cache`], [`Trackable`],
//! [`Log`] and [`User`] is rebuilt from the HTML of its detail page. Entities
//! are constructed with an identifying key, fetched once through a
//! [`DocumentSource`], and then expose typed attributes that are extracted
//! lazily and memoized. See [`Entity`] for the lifecycle rules every accessor
//! follows.
//!
//! ```
//! use gc_extract::error::{ErrorKind, Result};
//! use gc_extract::{DocumentSource, Entity, User};
//!
//! struct Profile;
//! impl DocumentSource for Profile {
//!     fn get(&self, _path: &str) -> Result<String> {
//!         Ok(r#"<span id="ctl00_ContentBody_ProfilePanel1_lblMemberName">lloydpick</span>"#.into())
//!     }
//!     fn is_session_active(&self) -> bool {
//!         false
//!     }
//! }
//!
//! let mut user = User::with_guid("daf07e55-660f-4d4c-9c34-0e901a8f7198");
//! assert_eq!(&*user.name().unwrap_err(), &ErrorKind::NotFetched);
//! user.fetch(&Profile).unwrap();
//! assert_eq!(user.name().unwrap(), "lloydpick");
//! ```

mod coerce;
mod consts;
mod entity;
pub mod error;
pub mod models;
mod page;
mod source;

pub use crate::entity::{
    Cache, CacheParams, Entity, EntityList, FetchState, Holder, Log, LogList, LogParams, Trackable, TrackableParams,
    User, UserParams,
};
pub use crate::page::Page;
pub use crate::source::DocumentSource;
#[cfg(any(test, feature = "mock"))]
pub use crate::source::MockSource;
