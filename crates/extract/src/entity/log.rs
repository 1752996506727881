use std::cell::OnceCell;

use exn::OptionExt;
use time::Date;

use super::{Cache, CacheParams, Entity, FetchState, User, UserParams, checked_guid, given, known};
use crate::coerce;
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::{LogType, Registry};
use crate::page::{attr, capture_in, non_empty_text, text};

/// Construction values for a [`Log`]. A cache listing already shows most of
/// these, so they can be handed over without fetching the log page.
#[derive(Debug, Clone, Default)]
pub struct LogParams {
    pub guid: Option<String>,
    /// Log type display name, e.g. `Found it`.
    pub title: Option<String>,
    pub date: Option<Date>,
    /// The cache the log was written for.
    pub cache: Option<Cache>,
    /// The member who wrote the log.
    pub user: Option<User>,
}

/// A single log entry on a cache.
#[derive(Debug, Clone)]
pub struct Log {
    state: FetchState,
    guid: OnceCell<String>,
    title: OnceCell<String>,
    log_type: OnceCell<LogType>,
    date: OnceCell<Date>,
    cache: OnceCell<Cache>,
    user: OnceCell<User>,
    message: OnceCell<String>,
}

impl Log {
    /// The log GUID. Only known when given at construction.
    pub fn guid(&self) -> Result<&str> {
        self.state.key(&self.guid, "guid")
    }

    /// Log type display name, e.g. `Didn't find it`.
    pub fn title(&self) -> Result<&str> {
        self.state
            .memo(&self.title, "title", |page| {
                let image = page.one(&consts::LOG_TYPE_IMAGE_SELECTOR, "title")?;
                Ok(attr(image, "alt", "title")?.trim().to_string())
            })
            .map(String::as_str)
    }

    /// The log type, looked up in the registry by its title.
    pub fn log_type(&self) -> Result<LogType> {
        if let Some(kind) = self.log_type.get() {
            return Ok(*kind);
        }
        let kind = LogType::for_name(self.title()?).ok_or_raise(|| ErrorKind::ExtractionFailed("log_type"))?;
        Ok(*self.log_type.get_or_init(|| kind))
    }

    /// The date the log was written for.
    pub fn date(&self) -> Result<Date> {
        self.state
            .memo(&self.date, "date", |page| coerce::us_date(&text(page.one(&consts::LOG_DATE_SELECTOR, "date")?), "date"))
            .copied()
    }

    /// The cache the log belongs to. Not fetched.
    pub fn cache(&self) -> Result<&Cache> {
        self.state.memo(&self.cache, "cache", |page| {
            let link = page.one(&consts::LOG_CACHE_SELECTOR, "cache")?;
            let guid = capture_in(attr(link, "href", "cache")?, &consts::CACHE_LINK_REGEX, 1, "cache")?;
            Ok(Cache::new(CacheParams {
                guid: Some(guid.to_string()),
                ..CacheParams::default()
            }))
        })
    }

    /// The member who wrote the log. Not fetched.
    pub fn user(&self) -> Result<&User> {
        self.state.memo(&self.user, "user", |page| {
            let link = page.one(&consts::LOG_USER_SELECTOR, "user")?;
            let guid = capture_in(attr(link, "href", "user")?, &consts::PROFILE_LINK_REGEX, 1, "user")?;
            Ok(User::new(UserParams {
                guid: Some(guid.to_string()),
                name: Some(text(link)),
            }))
        })
    }

    /// The log text as rendered HTML.
    pub fn message(&self) -> Result<&str> {
        self.state
            .memo(&self.message, "message", |page| {
                let element = page.one(&consts::LOG_TEXT_SELECTOR, "message")?;
                non_empty_text(element, "message")?;
                Ok(element.inner_html().trim().to_string())
            })
            .map(String::as_str)
    }
}

impl Entity for Log {
    const KIND: &'static str = "log";
    type Params = LogParams;

    fn new(params: LogParams) -> Self {
        Self {
            state: FetchState::unfetched(),
            guid: known(params.guid),
            title: known(params.title),
            log_type: OnceCell::new(),
            date: given(params.date),
            cache: given(params.cache),
            user: given(params.user),
            message: OnceCell::new(),
        }
    }

    fn path(&self) -> Result<String> {
        let guid = self
            .guid
            .get()
            .ok_or_raise(|| ErrorKind::InvalidArgument("no GUID given".to_string()))?;
        Ok(format!("{}?LUID={}", consts::LOG_ROUTE, checked_guid(guid)?))
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
    use rstest::{fixture, rstest};
    use time::Month;

    const GUID: &str = "a1b2c3d4-0000-4000-8000-0123456789ab";
    const LOG: &str = include_str!("../../fixtures/log.html");

    #[fixture]
    fn log() -> Log {
        let source = MockSource::with_pages([(format!("/seek/log.aspx?LUID={GUID}"), LOG)]);
        Log::load(
            &source,
            LogParams {
                guid: Some(GUID.to_string()),
                ..LogParams::default()
            },
        )
        .unwrap()
    }

    #[rstest]
    fn test_title_and_type(log: Log) {
        assert_eq!(log.title().unwrap(), "Found it");
        assert_eq!(log.log_type().unwrap(), LogType::Found);
        assert!(log.log_type().unwrap().is("found"));
    }

    #[rstest]
    fn test_date(log: Log) {
        assert_eq!(log.date().unwrap(), Date::from_calendar_date(2024, Month::May, 25).unwrap());
    }

    #[rstest]
    fn test_references_are_not_fetched(log: Log) {
        let cache = log.cache().unwrap();
        assert_eq!(cache.guid().unwrap(), "6bb9bd20-f75d-42a0-bfc7-d1033040f480");
        assert!(!cache.is_fetched());
        let user = log.user().unwrap();
        assert_eq!(user.guid().unwrap(), "daf07e55-660f-4d4c-9c34-0e901a8f7198");
        assert_eq!(user.name().unwrap(), "lloydpick");
        assert!(!user.is_fetched());
    }

    #[rstest]
    fn test_message_keeps_markup(log: Log) {
        assert_eq!(log.message().unwrap(), "Quick find on the way home.<br>TFTC!");
    }

    #[test]
    fn test_construction_values_need_no_fetch() {
        let log = Log::new(LogParams {
            guid: Some(GUID.to_string()),
            title: Some("Write note".to_string()),
            ..LogParams::default()
        });
        assert_eq!(log.title().unwrap(), "Write note");
        assert_eq!(log.log_type().unwrap(), LogType::Note);
        assert_eq!(&*log.date().unwrap_err(), &ErrorKind::NotFetched);
        assert_eq!(&*log.message().unwrap_err(), &ErrorKind::NotFetched);
    }

    #[test]
    fn test_unknown_title_fails_type_lookup() {
        let source = MockSource::with_pages([(
            format!("/seek/log.aspx?LUID={GUID}"),
            r#"<img id="ctl00_ContentBody_LogBookPanel1_LogImage" alt="Danced a jig">"#,
        )]);
        let log = Log::load(
            &source,
            LogParams {
                guid: Some(GUID.to_string()),
                ..LogParams::default()
            },
        )
        .unwrap();
        assert_eq!(log.title().unwrap(), "Danced a jig");
        assert_eq!(&*log.log_type().unwrap_err(), &ErrorKind::ExtractionFailed("log_type"));
    }

    #[rstest]
    #[case("title", "title")]
    #[case("log_type", "title")]
    #[case("date", "date")]
    #[case("cache", "cache")]
    #[case("user", "user")]
    #[case("message", "message")]
    fn test_accessors_on_empty_document(#[case] accessor: &str, #[case] field: &'static str) {
        let source = MockSource::with_pages([(format!("/seek/log.aspx?LUID={GUID}"), "<html><body></body></html>")]);
        let log = Log::load(
            &source,
            LogParams {
                guid: Some(GUID.to_string()),
                ..LogParams::default()
            },
        )
        .unwrap();
        let err = match accessor {
            "title" => log.title().unwrap_err(),
            "log_type" => log.log_type().unwrap_err(),
            "date" => log.date().unwrap_err(),
            "cache" => log.cache().unwrap_err(),
            "user" => log.user().unwrap_err(),
            "message" => log.message().unwrap_err(),
            _ => unreachable!(),
        };
        assert_eq!(&*err, &ErrorKind::ExtractionFailed(field));
        assert_eq!(log.guid().unwrap(), GUID);
    }

    #[test]
    fn test_unknown_guid_before_fetch() {
        let log = Log::new(LogParams {
            title: Some("Found it".to_string()),
            ..LogParams::default()
        });
        assert_eq!(&*log.guid().unwrap_err(), &ErrorKind::NotFetched);
    }

    #[test]
    fn test_fetch_without_guid_makes_no_request() {
        let source = MockSource::default();
        let mut log = Log::new(LogParams::default());
        assert!(matches!(&*log.fetch(&source).unwrap_err(), ErrorKind::InvalidArgument(_)));
        assert!(source.requests().is_empty());
        assert!(!log.is_fetched());
    }
}
