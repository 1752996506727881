use std::cell::OnceCell;

use exn::OptionExt;
use time::Date;

use super::{Entity, FetchState, Log, LogList, LogParams, checked_code, checked_guid, known};
use crate::coerce;
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::{CacheType, Registry, Size};
use crate::page::{Page, attr, capture_in, non_empty_text, parse, text};

/// Construction values for a [`Cache`]. At least one key is needed to fetch;
/// the code wins when both are given.
#[derive(Debug, Clone, Default)]
pub struct CacheParams {
    /// Waypoint code, e.g. `GC1ZXEZ`.
    pub code: Option<String>,
    pub guid: Option<String>,
}

/// A geocache listing.
///
/// # Examples
///
/// ```
/// use gc_extract::error::Result;
/// use gc_extract::{Cache, DocumentSource, Entity};
///
/// struct Listing;
/// impl DocumentSource for Listing {
///     fn get(&self, path: &str) -> Result<String> {
///         assert_eq!(path, "/seek/cache_details.aspx?log=y&wp=GCTEST");
///         Ok(r#"<strong>Difficulty:</strong> <img src="/images/stars/stars3_5.gif" alt="3.5 out of 5" />"#.into())
///     }
///     fn is_session_active(&self) -> bool {
///         false
///     }
/// }
///
/// let mut cache = Cache::with_code("GCTEST");
/// cache.fetch(&Listing).unwrap();
/// assert_eq!(cache.difficulty().unwrap(), 3.5);
/// ```
#[derive(Debug, Clone)]
pub struct Cache {
    state: FetchState,
    code: OnceCell<String>,
    guid: OnceCell<String>,
    type_id: OnceCell<u32>,
    cache_type: OnceCell<CacheType>,
    name: OnceCell<String>,
    difficulty: OnceCell<f64>,
    terrain: OnceCell<f64>,
    hidden_at: OnceCell<Date>,
    size: OnceCell<Size>,
    latitude: OnceCell<f64>,
    longitude: OnceCell<f64>,
    location: OnceCell<String>,
    archived: OnceCell<bool>,
    pm_only: OnceCell<bool>,
    logs: OnceCell<LogList>,
}

impl Cache {
    pub fn with_code(code: impl Into<String>) -> Self {
        Self::new(CacheParams {
            code: Some(code.into()),
            ..CacheParams::default()
        })
    }

    pub fn with_guid(guid: impl Into<String>) -> Self {
        Self::new(CacheParams {
            guid: Some(guid.into()),
            ..CacheParams::default()
        })
    }

    /// Waypoint code (`GC...`).
    pub fn code(&self) -> Result<&str> {
        self.state
            .memo(&self.code, "code", |page| {
                let element = page.one(&consts::CACHE_CODE_SELECTOR, "code")?;
                Ok(capture_in(&text(element), &consts::CACHE_CODE_REGEX, 1, "code")?.to_string())
            })
            .map(String::as_str)
    }

    /// Globally unique identifier, read from the printable-version link.
    pub fn guid(&self) -> Result<&str> {
        self.state
            .memo(&self.guid, "guid", |page| {
                let link = page.one(&consts::CACHE_PRINT_LINK_SELECTOR, "guid")?;
                Ok(capture_in(attr(link, "href", "guid")?, &consts::GUID_PARAM_REGEX, 1, "guid")?.to_string())
            })
            .map(String::as_str)
    }

    /// Numeric cache type identifier, from the type icon.
    pub fn type_id(&self) -> Result<u32> {
        self.state
            .memo(&self.type_id, "type_id", |page| parse(page.capture(&consts::CACHE_TYPE_REGEX, 1, "type_id")?, "type_id"))
            .copied()
    }

    pub fn cache_type(&self) -> Result<CacheType> {
        if let Some(kind) = self.cache_type.get() {
            return Ok(*kind);
        }
        let kind = CacheType::for_id(self.type_id()?).ok_or_raise(|| ErrorKind::ExtractionFailed("cache_type"))?;
        Ok(*self.cache_type.get_or_init(|| kind))
    }

    pub fn name(&self) -> Result<&str> {
        self.state
            .memo(&self.name, "name", |page| non_empty_text(page.one(&consts::CACHE_NAME_SELECTOR, "name")?, "name"))
            .map(String::as_str)
    }

    /// Difficulty rating in `[1.0, 5.0]`.
    pub fn difficulty(&self) -> Result<f64> {
        self.state
            .memo(&self.difficulty, "difficulty", |page| {
                coerce::rating(page.capture(&consts::DIFFICULTY_REGEX, 1, "difficulty")?, "difficulty")
            })
            .copied()
    }

    /// Terrain rating in `[1.0, 5.0]`.
    pub fn terrain(&self) -> Result<f64> {
        self.state
            .memo(&self.terrain, "terrain", |page| {
                coerce::rating(page.capture(&consts::TERRAIN_REGEX, 1, "terrain")?, "terrain")
            })
            .copied()
    }

    pub fn hidden_at(&self) -> Result<Date> {
        self.state
            .memo(&self.hidden_at, "hidden_at", |page| {
                let captures = page.captures(&consts::HIDDEN_REGEX, "hidden_at")?;
                coerce::date(&captures[3], &captures[1], &captures[2], "hidden_at")
            })
            .copied()
    }

    /// Container size. An icon outside the known set is a failure.
    pub fn size(&self) -> Result<Size> {
        self.state
            .memo(&self.size, "size", |page| page.capture(&consts::SIZE_REGEX, 1, "size")?.parse())
            .copied()
    }

    pub fn latitude(&self) -> Result<f64> {
        self.state
            .memo(&self.latitude, "latitude", |page| {
                coerce::degrees(conversion(page, &consts::LATITUDE_REGEX, "latitude")?, 90.0, "latitude")
            })
            .copied()
    }

    pub fn longitude(&self) -> Result<f64> {
        self.state
            .memo(&self.longitude, "longitude", |page| {
                coerce::degrees(conversion(page, &consts::LONGITUDE_REGEX, "longitude")?, 180.0, "longitude")
            })
            .copied()
    }

    /// Region and country, e.g. `Baden-Württemberg, Germany`.
    pub fn location(&self) -> Result<&str> {
        self.state
            .memo(&self.location, "location", |page| {
                let html = page.one(&consts::CACHE_LOCATION_SELECTOR, "location")?.inner_html();
                Some(capture_in(&html, &consts::LOCATION_REGEX, 1, "location")?.trim().to_string())
                    .filter(|location| !location.is_empty())
                    .ok_or_raise(|| ErrorKind::ExtractionFailed("location"))
            })
            .map(String::as_str)
    }

    pub fn is_archived(&self) -> Result<bool> {
        self.state
            .memo(&self.archived, "archived", |page| Ok(page.contains(consts::ARCHIVED_MARKER)))
            .copied()
    }

    /// Whether the listing is only viewable by premium members.
    pub fn is_pm_only(&self) -> Result<bool> {
        self.state
            .memo(&self.pm_only, "pm_only", |page| Ok(page.contains(consts::PM_ONLY_MARKER)))
            .copied()
    }

    /// Logs shown on the listing, newest first as the site orders them.
    ///
    /// Each log carries its GUID and title when the listing shows them, and
    /// an unfetched handle back to this cache. None of them are fetched.
    pub fn logs(&self) -> Result<&LogList> {
        self.state.memo(&self.logs, "logs", |page| {
            let nodes = page.all(&consts::CACHE_LOGS_SELECTOR);
            if nodes.is_empty() {
                exn::bail!(ErrorKind::ExtractionFailed("logs"));
            }
            let parent = self.handle();
            Ok(nodes
                .into_iter()
                .map(|node| {
                    let images: Vec<_> = node.select(&consts::IMAGE_SELECTOR).collect();
                    let anchors: Vec<_> = node.select(&consts::ANCHOR_SELECTOR).collect();
                    let title = match images.as_slice() {
                        [image] => image.value().attr("title").map(str::to_string),
                        _ => None,
                    };
                    let guid = match anchors.as_slice() {
                        [anchor] => anchor
                            .value()
                            .attr("href")
                            .and_then(|href| consts::GUID_PARAM_REGEX.captures(href))
                            .map(|captures| captures[1].to_string()),
                        _ => None,
                    };
                    Log::new(LogParams {
                        guid,
                        title,
                        cache: Some(parent.clone()),
                        ..LogParams::default()
                    })
                })
                .collect())
        })
    }

    /// Mutable access to the logs, for [`fetch_all`](super::EntityList::fetch_all).
    pub fn logs_mut(&mut self) -> Result<&mut LogList> {
        self.logs()?;
        self.logs.get_mut().ok_or_raise(|| ErrorKind::ExtractionFailed("logs"))
    }

    /// An unfetched cache carrying whatever keys this one knows.
    fn handle(&self) -> Cache {
        Cache::new(CacheParams {
            code: self.code().ok().map(str::to_string),
            guid: self.guid().ok().map(str::to_string),
        })
    }
}

/// A coordinate from the conversions link, which carries both as query
/// parameters.
fn conversion<'p>(page: &'p Page, regex: &regex::Regex, field: &'static str) -> Result<&'p str> {
    let link = page.one(&consts::CACHE_CONVERSIONS_SELECTOR, field)?;
    capture_in(attr(link, "href", field)?, regex, 1, field)
}

impl Entity for Cache {
    const KIND: &'static str = "cache";
    type Params = CacheParams;

    fn new(params: CacheParams) -> Self {
        Self {
            state: FetchState::unfetched(),
            code: known(params.code),
            guid: known(params.guid),
            type_id: OnceCell::new(),
            cache_type: OnceCell::new(),
            name: OnceCell::new(),
            difficulty: OnceCell::new(),
            terrain: OnceCell::new(),
            hidden_at: OnceCell::new(),
            size: OnceCell::new(),
            latitude: OnceCell::new(),
            longitude: OnceCell::new(),
            location: OnceCell::new(),
            archived: OnceCell::new(),
            pm_only: OnceCell::new(),
            logs: OnceCell::new(),
        }
    }

    fn path(&self) -> Result<String> {
        match (self.code.get(), self.guid.get()) {
            (Some(code), _) => Ok(format!("{}?log=y&wp={}", consts::CACHE_ROUTE, checked_code(code)?)),
            (None, Some(guid)) => Ok(format!("{}?log=y&guid={}", consts::CACHE_ROUTE, checked_guid(guid)?)),
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
