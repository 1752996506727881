use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

const GUID: &str = "([a-f0-9-]{36})";

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Routes.
pub(crate) const CACHE_ROUTE: &str = "/seek/cache_details.aspx";
pub(crate) const TRACKABLE_ROUTE: &str = "/track/details.aspx";
pub(crate) const LOG_ROUTE: &str = "/seek/log.aspx";
pub(crate) const USER_ROUTE: &str = "/profile/";

// Shared.
selector!(ANCHOR_SELECTOR, "a");
selector!(IMAGE_SELECTOR, "img");
selector!(META_SELECTOR, "meta");
regex!(GUID_PARAM_REGEX, format!(r"guid={}", GUID).as_str());
regex!(GUID_FORMAT_REGEX, r"^[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$");
regex!(CODE_FORMAT_REGEX, r"^[A-Za-z0-9]+$");
regex!(CACHE_LINK_REGEX, format!(r"cache_details\.aspx\?guid={}", GUID).as_str());
regex!(PROFILE_LINK_REGEX, format!(r"/profile/\?guid={}", GUID).as_str());

// Cache details page.
selector!(CACHE_CODE_SELECTOR, "#ctl00_uxWaypointName.GCCode");
regex!(CACHE_CODE_REGEX, r"(GC[A-Z0-9]+)");
selector!(CACHE_PRINT_LINK_SELECTOR, "#ctl00_ContentBody_lnkPrintFriendly");
selector!(CACHE_NAME_SELECTOR, "span#ctl00_ContentBody_CacheName");
selector!(CACHE_CONVERSIONS_SELECTOR, "a#ctl00_ContentBody_lnkConversions");
selector!(CACHE_LOCATION_SELECTOR, "span#ctl00_ContentBody_Location");
selector!(CACHE_LOGS_SELECTOR, "table.Table.LogsTable tr > td > strong");
regex!(CACHE_TYPE_REGEX, r#"<a[^>]*?title="About Cache Types"><img[^>]*?WptTypes/(\d+)\.gif""#);
regex!(DIFFICULTY_REGEX, r#"<strong>\s*Difficulty:</strong>\s*<img[^>]*?alt="([\d.]{1,3}) out of 5""#);
regex!(TERRAIN_REGEX, r#"<strong>\s*Terrain:</strong>\s*<img[^>]*?alt="([\d.]{1,3}) out of 5""#);
regex!(HIDDEN_REGEX, r"<strong>\s*Hidden\s*:</strong>\s*(\d{1,2})/(\d{1,2})/(\d{4})");
regex!(SIZE_REGEX, r#"<img[^>]*?src="[^"]*?/container/([^"/]+?)\.gif""#);
regex!(LATITUDE_REGEX, r"lat=(-?[0-9.]+)");
regex!(LONGITUDE_REGEX, r"lon=(-?[0-9.]+)");
regex!(LOCATION_REGEX, r"In ([^<]+)");
pub(crate) const ARCHIVED_MARKER: &str = "<li>This cache has been archived";
pub(crate) const PM_ONLY_MARKER: &str =
    r#"<p class="Warning">Sorry, the owner of this listing has made it viewable to Premium Members only."#;

// Trackable details page.
selector!(TRACKABLE_CODE_SELECTOR, "#ctl00_ContentBody_BugDetails_BugTBNum > strong");
selector!(TRACKABLE_NAME_SELECTOR, "#ctl00_ContentBody_lbHeading");
selector!(TRACKABLE_OWNER_SELECTOR, "a#ctl00_ContentBody_BugDetails_BugOwner[href*='/profile/?guid=']");
selector!(TRACKABLE_ORIGIN_SELECTOR, "span#ctl00_ContentBody_BugDetails_BugOrigin");
selector!(TRACKABLE_TEXT_SELECTOR, "div.yui-g > p.NoSpacing");
selector!(TRACKABLE_HOLDER_SELECTOR, "a#ctl00_ContentBody_BugDetails_BugLocation");
selector!(TRACKABLE_TYPE_IMAGE_SELECTOR, "#ctl00_ContentBody_BugTypeImage");
regex!(
    RELEASE_DATE_REGEX,
    r#"<span id="ctl00_ContentBody_BugDetails_BugReleaseDate">[^<]*?(\d{1,2} [A-Za-z]+ \d{4})</span>"#
);
regex!(DISTANCE_REGEX, r"<h3>\s*Tracking History \(([0-9][0-9.,]*)");

// Log page.
selector!(LOG_TYPE_IMAGE_SELECTOR, "img#ctl00_ContentBody_LogBookPanel1_LogImage");
selector!(LOG_DATE_SELECTOR, "span#ctl00_ContentBody_LogBookPanel1_LogDate");
selector!(LOG_CACHE_SELECTOR, "a#ctl00_ContentBody_LogBookPanel1_lnkCacheTitle");
selector!(LOG_USER_SELECTOR, "a#ctl00_ContentBody_LogBookPanel1_lnkUsername");
selector!(LOG_TEXT_SELECTOR, "span#ctl00_ContentBody_LogBookPanel1_LogText");

// Profile page.
selector!(USER_NAME_SELECTOR, "span#ctl00_ContentBody_ProfilePanel1_lblMemberName");

// Coercions.
regex!(US_DATE_REGEX, r"^\s*(\d{1,2})/(\d{1,2})/(\d{4})\s*$");
regex!(LONG_DATE_REGEX, r"^\s*(\d{1,2}) ([A-Za-z]+) (\d{4})\s*$");
