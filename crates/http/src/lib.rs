//! A blocking [`DocumentSource`] that fetches site pages over HTTP.
//!
//! ```no_run
//! use gc_config::Settings;
//! use gc_extract::{Cache, Entity};
//! use gc_http::HttpSource;
//!
//! let source = HttpSource::new(&Settings::load().unwrap()).unwrap();
//! let cache = Cache::load(&source, gc_extract::CacheParams { code: Some("GC1ZXEZ".into()), guid: None }).unwrap();
//! println!("{}", cache.name().unwrap());
//! ```

pub mod error;

use exn::ResultExt;
use gc_config::Settings;
use gc_extract::DocumentSource;
use gc_extract::error::{ErrorKind as FetchErrorKind, Result as FetchResult};
use reqwest::blocking::Client;
use reqwest::header::COOKIE;
use tracing::instrument;
use url::Url;

use crate::error::{ErrorKind, Result};

/// Fetches documents relative to a base URL, one attempt per request.
///
/// A session is considered active when a session cookie is configured; the
/// cookie is sent with every request.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
    session_cookie: Option<String>,
}

impl HttpSource {
    #[instrument(skip_all, fields(base_url = %settings.base_url))]
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate().or_raise(|| ErrorKind::Settings)?;
        let base_url = Url::parse(&settings.base_url).or_raise(|| ErrorKind::Settings)?;
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.request_timeout())
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self {
            client,
            base_url,
            session_cookie: settings.session_cookie.clone().filter(|cookie| !cookie.trim().is_empty()),
        })
    }

    fn url_for(&self, path: &str) -> FetchResult<Url> {
        self.base_url
            .join(path)
            .or_raise(|| FetchErrorKind::InvalidArgument(format!("cannot resolve `{path}` against the base URL")))
    }
}

impl DocumentSource for HttpSource {
    #[instrument(skip(self))]
    fn get(&self, path: &str) -> FetchResult<String> {
        let url = self.url_for(path)?;
        let mut request = self.client.get(url);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie.as_str());
        }
        let response = transport(request.send())?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(FetchErrorKind::Transport(format!("{status} for {path}")));
        }
        let body = transport(response.text())?;
        tracing::info!(%status, bytes = body.len(), "Fetched document");
        Ok(body)
    }

    fn is_session_active(&self) -> bool {
        self.session_cookie.is_some()
    }
}

/// Maps a client failure onto the core's transport kinds.
fn transport<T>(result: std::result::Result<T, reqwest::Error>) -> FetchResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            let kind = if err.is_timeout() {
                FetchErrorKind::TransportTimeout
            } else {
                FetchErrorKind::Transport(err.to_string())
            };
            tracing::warn!(error = %err, "Request failed");
            Err(err).or_raise(|| kind)
        },
    }
}
