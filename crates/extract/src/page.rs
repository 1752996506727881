//! A fetched document and the two extraction strategies applied to it.
//!
//! Every entity attribute is derived from a [`Page`] in one of two ways:
//!
//! - **Structured query**: select nodes with a CSS selector and read their
//!   text or an attribute. Unless a field documents otherwise, exactly one
//!   node must match; zero matches and ambiguous matches both fail.
//! - **Pattern match**: run a regular expression over the raw response text
//!   and take a capture group. Used where the rendered structure is unstable
//!   or the raw text is simply more reliable.

use exn::{OptionExt, ResultExt};
use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Selector};

use crate::error::{ErrorKind, Result};

/// Raw response text plus its parsed, queryable document.
#[derive(Debug, Clone)]
pub struct Page {
    raw: String,
    document: Html,
}
impl Page {
    /// Parses raw HTML. Parsing is lenient; any input produces a document.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let document = Html::parse_document(&raw);
        Self { raw, document }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn document(&self) -> &Html {
        &self.document
    }
}

/// Structured query
impl Page {
    /// Selects exactly one node. Ambiguity is a failure, not "pick first".
    pub(crate) fn one(&self, selector: &Selector, field: &'static str) -> Result<ElementRef<'_>> {
        let mut matches = self.document.select(selector);
        match (matches.next(), matches.next()) {
            (Some(element), None) => Ok(element),
            (None, _) => exn::bail!(ErrorKind::ExtractionFailed(field)),
            (Some(_), Some(_)) => {
                tracing::debug!(field, "Selector matched more than one node");
                exn::bail!(ErrorKind::ExtractionFailed(field))
            },
        }
    }

    /// Selects every matching node in document order.
    pub(crate) fn all(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.document.select(selector).collect()
    }
}

/// Pattern match
impl Page {
    /// Captures group `index` of `regex` against the raw response text.
    pub(crate) fn capture(&self, regex: &Regex, index: usize, field: &'static str) -> Result<&str> {
        capture_in(&self.raw, regex, index, field)
    }

    /// All capture groups of `regex` against the raw response text.
    pub(crate) fn captures(&self, regex: &Regex, field: &'static str) -> Result<Captures<'_>> {
        regex.captures(&self.raw).ok_or_raise(|| ErrorKind::ExtractionFailed(field))
    }

    /// Substring presence in the raw response text.
    pub(crate) fn contains(&self, needle: &str) -> bool {
        self.raw.contains(needle)
    }
}

/// Captures group `index` of `regex` in an arbitrary haystack, usually an
/// attribute value read by a structured query.
pub(crate) fn capture_in<'h>(haystack: &'h str, regex: &Regex, index: usize, field: &'static str) -> Result<&'h str> {
    regex
        .captures(haystack)
        .and_then(|captures| captures.get(index))
        .map(|m| m.as_str())
        .ok_or_raise(|| ErrorKind::ExtractionFailed(field))
}

/// Collected, trimmed text content of a node.
pub(crate) fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Collected, trimmed text content that must not be empty.
pub(crate) fn non_empty_text(element: ElementRef<'_>, field: &'static str) -> Result<String> {
    Some(text(element)).filter(|s| !s.is_empty()).ok_or_raise(|| ErrorKind::ExtractionFailed(field))
}

/// A named attribute of a node, which must be present.
pub(crate) fn attr<'a>(element: ElementRef<'a>, name: &str, field: &'static str) -> Result<&'a str> {
    element.value().attr(name).ok_or_raise(|| ErrorKind::ExtractionFailed(field))
}

/// Parses a captured value, mapping any parse failure onto the attribute.
pub(crate) fn parse<T>(value: &str, field: &'static str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse::<T>().or_raise(|| ErrorKind::ExtractionFailed(field))
}
