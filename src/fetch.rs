use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::extract::snapshot_from_html;
use crate::models::PageSnapshot;

// ── Constants ────────────────────────────────────────────────────────────────

const USER_AGENT: &str = "seo-insight-api/1.0";
const MAX_REDIRECTS: usize = 10;

static SCHEME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").unwrap());

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("TimeoutError: {0}")]
    Timeout(String),
    #[error("ConnectError: {0}")]
    Connect(String),
    #[error("RequestError: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

// ── URL normalization ────────────────────────────────────────────────────────

/// Prepends `http://` unless the input already carries an HTTP(S) scheme.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if SCHEME_RE.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Normalizes the input and parses it into the URL that will be requested.
pub fn request_url(input: &str) -> Result<Url, FetchError> {
    Url::parse(&normalize_url(input)).map_err(|e| FetchError::InvalidUrl(e.to_string()))
}

// ── Fetcher ──────────────────────────────────────────────────────────────────

/// Fetches one page and reduces it to a [`PageSnapshot`].
///
/// The inner client is reference counted, so cloning a `Fetcher` is cheap and
/// every clone shares the same connection pool.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration, insecure_ssl: bool) -> Result<Self, FetchError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );

        let mut builder = reqwest::ClientBuilder::new()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .default_headers(headers);

        if insecure_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;
        Ok(Fetcher { client })
    }

    pub async fn fetch(&self, input: &str) -> Result<PageSnapshot, FetchError> {
        let url = request_url(input)?;
        let is_https = url.scheme() == "https";
        tracing::debug!(%url, is_https, "sending request");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Still analysed as a normal page.
            tracing::warn!(%url, %status, "upstream returned non-success status");
        }

        let html = response.text().await?;
        let snapshot = snapshot_from_html(&html, is_https);
        tracing::debug!(
            %url,
            title = ?snapshot.title,
            heading = ?snapshot.heading,
            has_meta_description = snapshot.meta_description.is_some(),
            word_count = snapshot.word_count,
            "extracted page snapshot"
        );
        Ok(snapshot)
    }
}
