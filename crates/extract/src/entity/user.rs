use std::cell::OnceCell;

use exn::OptionExt;

use super::{Entity, FetchState, checked_guid, known};
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::page::non_empty_text;

/// Construction values for a [`User`].
#[derive(Debug, Clone, Default)]
pub struct UserParams {
    pub guid: Option<String>,
    /// Display name, when the referring page already showed it.
    pub name: Option<String>,
}

/// A member profile.
#[derive(Debug, Clone)]
pub struct User {
    state: FetchState,
    guid: OnceCell<String>,
    name: OnceCell<String>,
}

impl User {
    pub fn with_guid(guid: impl Into<String>) -> Self {
        Self::new(UserParams {
            guid: Some(guid.into()),
            ..UserParams::default()
        })
    }

    /// The profile GUID. Only known when given at construction.
    pub fn guid(&self) -> Result<&str> {
        self.state.key(&self.guid, "guid")
    }

    /// The member's display name.
    pub fn name(&self) -> Result<&str> {
        self.state
            .memo(&self.name, "name", |page| non_empty_text(page.one(&consts::USER_NAME_SELECTOR, "name")?, "name"))
            .map(String::as_str)
    }
}

impl Entity for User {
    const KIND: &'static str = "user";
    type Params = UserParams;

    fn new(params: UserParams) -> Self {
        Self {
            state: FetchState::unfetched(),
            guid: known(params.guid),
            name: known(params.name),
        }
    }

    fn path(&self) -> Result<String> {
        let guid = self
            .guid
            .get()
            .ok_or_raise(|| ErrorKind::InvalidArgument("no GUID given".to_string()))?;
        Ok(format!("{}?guid={}", consts::USER_ROUTE, checked_guid(guid)?))
    }

    fn state(&self) -> &FetchState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FetchState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockSource;

    const GUID: &str = "daf07e55-660f-4d4c-9c34-0e901a8f7198";
    const PROFILE: &str = include_str!("../../fixtures/profile.html");

    fn source() -> MockSource {
        MockSource::with_pages([(format!("/profile/?guid={GUID}"), PROFILE)])
    }

    #[test]
    fn test_fetch_and_name() {
        let params = UserParams {
            guid: Some(GUID.to_string()),
            ..UserParams::default()
        };
        let user = User::load(&source(), params).unwrap();
        assert!(user.is_fetched());
        assert_eq!(user.guid().unwrap(), GUID);
        assert_eq!(user.name().unwrap(), "lloydpick");
    }

    #[test]
    fn test_name_given_at_construction_needs_no_fetch() {
        let user = User::new(UserParams {
            guid: Some(GUID.to_string()),
            name: Some("lloydpick".to_string()),
        });
        assert!(!user.is_fetched());
        assert_eq!(user.name().unwrap(), "lloydpick");
    }

    #[test]
    fn test_name_before_fetch() {
        let user = User::with_guid(GUID);
        assert_eq!(&*user.name().unwrap_err(), &ErrorKind::NotFetched);
    }

    #[test]
    fn test_unknown_guid_before_fetch() {
        let user = User::new(UserParams {
            name: Some("lloydpick".to_string()),
            ..UserParams::default()
        });
        assert_eq!(&*user.guid().unwrap_err(), &ErrorKind::NotFetched);
        assert_eq!(user.name().unwrap(), "lloydpick");
    }

    #[test]
    fn test_empty_profile() {
        let source = MockSource::with_pages([(format!("/profile/?guid={GUID}"), "<html><body></body></html>")]);
        let user = User::load(&source, UserParams { guid: Some(GUID.to_string()), name: None }).unwrap();
        assert_eq!(user.guid().unwrap(), GUID);
        assert_eq!(&*user.name().unwrap_err(), &ErrorKind::ExtractionFailed("name"));
    }

    #[test]
    fn test_fetch_without_guid() {
        let source = source();
        let mut user = User::new(UserParams::default());
        let err = user.fetch(&source).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidArgument(_)));
        assert!(source.requests().is_empty());
    }
}
