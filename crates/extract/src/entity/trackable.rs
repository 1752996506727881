use std::cell::OnceCell;
use std::collections::BTreeMap;

use exn::{OptionExt, ResultExt};
use time::Date;

use super::{Cache, Entity, FetchState, User, checked_code, checked_guid, known};
use crate::coerce;
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::{Registry, TrackableType};
use crate::page::{Page, attr, capture_in, non_empty_text, text};

/// Construction values for a [`Trackable`]. The code wins when both keys are
/// given.
#[derive(Debug, Clone, Default)]
pub struct TrackableParams {
    /// Tracking code, e.g. `TB1ABCD`.
    pub code: Option<String>,
    pub guid: Option<String>,
}

/// Where a trackable was last seen: in a cache, or in a member's hands.
#[derive(Debug, Clone)]
pub enum Holder {
    Cache(Cache),
    User(User),
}
impl Holder {
    pub fn cache(&self) -> Option<&Cache> {
        match self {
            Self::Cache(cache) => Some(cache),
            Self::User(_) => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            Self::Cache(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Owner {
    user: User,
    display_name: String,
}

/// A trackable item (travel bug, geocoin, ...). Fetching requires an
/// authenticated session.
#[derive(Debug, Clone)]
pub struct Trackable {
    state: FetchState,
    code: OnceCell<String>,
    guid: OnceCell<String>,
    name: OnceCell<String>,
    owner: OnceCell<Owner>,
    released_at: OnceCell<Date>,
    origin: OnceCell<String>,
    goal: OnceCell<String>,
    about: OnceCell<String>,
    distance_travelled: OnceCell<f64>,
    last_spotted: OnceCell<Holder>,
    title: OnceCell<String>,
    trackable_type: OnceCell<TrackableType>,
    type_symbol: OnceCell<String>,
    meta: OnceCell<BTreeMap<String, String>>,
}

impl Trackable {
    pub fn with_code(code: impl Into<String>) -> Self {
        Self::new(TrackableParams {
            code: Some(code.into()),
            ..TrackableParams::default()
        })
    }

    pub fn with_guid(guid: impl Into<String>) -> Self {
        Self::new(TrackableParams {
            guid: Some(guid.into()),
            ..TrackableParams::default()
        })
    }

    /// Tracking code (`TB...`).
    pub fn code(&self) -> Result<&str> {
        self.state
            .memo(&self.code, "code", |page| non_empty_text(page.one(&consts::TRACKABLE_CODE_SELECTOR, "code")?, "code"))
            .map(String::as_str)
    }

    /// The trackable GUID. Only known when given at construction.
    pub fn guid(&self) -> Result<&str> {
        self.state.key(&self.guid, "guid")
    }

    pub fn name(&self) -> Result<&str> {
        self.state
            .memo(&self.name, "name", |page| non_empty_text(page.one(&consts::TRACKABLE_NAME_SELECTOR, "name")?, "name"))
            .map(String::as_str)
    }

    /// The owner's profile. Not fetched.
    pub fn owner(&self) -> Result<&User> {
        self.resolve_owner().map(|owner| &owner.user)
    }

    /// The owner name as displayed on the trackable page.
    pub fn owner_display_name(&self) -> Result<&str> {
        self.resolve_owner().map(|owner| owner.display_name.as_str())
    }

    fn resolve_owner(&self) -> Result<&Owner> {
        self.state.memo(&self.owner, "owner", |page| {
            let link = page.one(&consts::TRACKABLE_OWNER_SELECTOR, "owner")?;
            let guid = capture_in(attr(link, "href", "owner")?, &consts::GUID_PARAM_REGEX, 1, "owner")?;
            Ok(Owner {
                user: User::with_guid(guid),
                display_name: text(link),
            })
        })
    }

    pub fn released_at(&self) -> Result<Date> {
        self.state
            .memo(&self.released_at, "released_at", |page| {
                coerce::long_date(page.capture(&consts::RELEASE_DATE_REGEX, 1, "released_at")?, "released_at")
            })
            .copied()
    }

    /// Where the trackable started its journey, e.g. `Bavaria, Germany`.
    pub fn origin(&self) -> Result<&str> {
        self.state
            .memo(&self.origin, "origin", |page| {
                non_empty_text(page.one(&consts::TRACKABLE_ORIGIN_SELECTOR, "origin")?, "origin")
            })
            .map(String::as_str)
    }

    /// The mission set by the owner, as rendered HTML.
    pub fn goal(&self) -> Result<&str> {
        self.state.memo(&self.goal, "goal", |page| paragraph(page, 0, "goal")).map(String::as_str)
    }

    /// The owner's description, as rendered HTML.
    pub fn about(&self) -> Result<&str> {
        self.state.memo(&self.about, "about", |page| paragraph(page, 1, "about")).map(String::as_str)
    }

    /// Total distance travelled, in the unit the page is rendered in.
    pub fn distance_travelled(&self) -> Result<f64> {
        self.state
            .memo(&self.distance_travelled, "distance_travelled", |page| {
                coerce::distance(page.capture(&consts::DISTANCE_REGEX, 1, "distance_travelled")?, "distance_travelled")
            })
            .copied()
    }

    /// Where the trackable was last seen. Not fetched.
    ///
    /// A cache link wins over a profile link. A holder entry without a link
    /// target means the owner still has it.
    pub fn last_spotted(&self) -> Result<&Holder> {
        self.state.memo(&self.last_spotted, "last_spotted", |page| {
            let links = page.all(&consts::TRACKABLE_HOLDER_SELECTOR);
            let href = match links.as_slice() {
                [] => None,
                [link] => link.value().attr("href"),
                _ => exn::bail!(ErrorKind::ExtractionFailed("last_spotted")),
            };
            let Some(href) = href else {
                let owner = self.owner().or_raise(|| ErrorKind::ExtractionFailed("last_spotted"))?;
                return Ok(Holder::User(owner.clone()));
            };
            if let Ok(guid) = capture_in(href, &consts::CACHE_LINK_REGEX, 1, "last_spotted") {
                Ok(Holder::Cache(Cache::with_guid(guid)))
            } else {
                let guid = capture_in(href, &consts::PROFILE_LINK_REGEX, 1, "last_spotted")?;
                Ok(Holder::User(User::with_guid(guid)))
            }
        })
    }

    /// The trackable type, looked up by the type icon's caption. Only types
    /// in [`TrackableType`] resolve; see [`Trackable::type_symbol`] for any
    /// other caption.
    pub fn trackable_type(&self) -> Result<TrackableType> {
        if let Some(kind) = self.trackable_type.get() {
            return Ok(*kind);
        }
        let kind =
            TrackableType::for_name(self.title()?).ok_or_raise(|| ErrorKind::ExtractionFailed("trackable_type"))?;
        Ok(*self.trackable_type.get_or_init(|| kind))
    }

    /// The type caption as a symbol, e.g. `travel_bug` or `geocoin`. Works
    /// for every caption the site renders, registered or not.
    pub fn type_symbol(&self) -> Result<&str> {
        if let Some(symbol) = self.type_symbol.get() {
            return Ok(symbol);
        }
        let symbol = self.title()?.to_lowercase().replace(' ', "_");
        Ok(self.type_symbol.get_or_init(|| symbol))
    }

    fn title(&self) -> Result<&str> {
        self.state
            .memo(&self.title, "title", |page| {
                let image = page.one(&consts::TRACKABLE_TYPE_IMAGE_SELECTOR, "title")?;
                let title = attr(image, "alt", "title")?.trim();
                if title.is_empty() {
                    exn::bail!(ErrorKind::ExtractionFailed("title"));
                }
                Ok(title.to_string())
            })
            .map(String::as_str)
    }

    /// OpenGraph properties (`og:*` meta tags), keyed without the prefix.
    pub fn meta(&self) -> Result<&BTreeMap<String, String>> {
        self.state.memo(&self.meta, "meta", |page| {
            let meta: BTreeMap<String, String> = page
                .all(&consts::META_SELECTOR)
                .into_iter()
                .filter_map(|element| {
                    let element = element.value();
                    let key = element.attr("name").or_else(|| element.attr("property"))?.strip_prefix("og:")?;
                    Some((key.to_string(), element.attr("content")?.to_string()))
                })
                .collect();
            Some(meta).filter(|meta| !meta.is_empty()).ok_or_raise(|| ErrorKind::ExtractionFailed("meta"))
        })
    }
}

/// The `index`-th text paragraph of the trackable description block.
fn paragraph(page: &Page, index: usize, field: &'static str) -> Result<String> {
    let element = page
        .all(&consts::TRACKABLE_TEXT_SELECTOR)
        .get(index)
        .copied()
        .ok_or_raise(|| ErrorKind::ExtractionFailed(field))?;
    Ok(element.inner_html().trim().to_string())
}

impl Entity for Trackable {
    const KIND: &'static str = "trackable";
    const REQUIRES_SESSION: bool = true;
    type Params = TrackableParams;

    fn new(params: TrackableParams) -> Self {
        Self {
            state: FetchState::unfetched(),
            code: known(params.code),
            guid: known(params.guid),
            name: OnceCell::new(),
            owner: OnceCell::new(),
            released_at: OnceCell::new(),
            origin: OnceCell::new(),
            goal: OnceCell::new(),
            about: OnceCell::new(),
            distance_travelled: OnceCell::new(),
            last_spotted: OnceCell::new(),
            title: OnceCell::new(),
            trackable_type: OnceCell::new(),
            type_symbol: OnceCell::new(),
            meta: OnceCell::new(),
        }
    }

    fn path(&self) -> Result<String> {
        match (self.code.get(), self.guid.get()) {
            (Some(code), _) => Ok(format!("{}?tracker={}", consts::TRACKABLE_ROUTE, checked_code(code)?)),
            (None, Some(guid)) => Ok(format!("{}?guid={}", consts::TRACKABLE_ROUTE, checked_guid(guid)?)),
            (None, None) => exn::bail!(ErrorKind::InvalidArgument("neither code nor GUID given".to_string())),
        }
    }

    fn state(&self) -> &FetchState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FetchState {
        &mut self.state
    }
}
