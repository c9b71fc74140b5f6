//! Anonymous YouTube Music client.
//!
//! Talks to the InnerTube JSON API used by the music.youtube.com web client.
//! No credentials are sent; only public search and playlist browsing are used.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, ORIGIN},
};
use serde_json::{Value, json};
use tracing::{debug, error, info};
use url::Url;

use super::{CatalogClient, CatalogError, Result, SearchKind, parser};

pub const DEFAULT_BASE_URL: &str = "https://music.youtube.com";

/// InnerTube API root, relative to the configured base URL.
const API_PATH: &str = "youtubei/v1/";

const CLIENT_NAME: &str = "WEB_REMIX";
const CLIENT_VERSION: &str = "1.20241111.01.00";

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Search `params` tokens selecting a single result shelf.
const SONGS_FILTER: &str = "EgWKAQIIAWoMEA4QChADEAQQCRAF";
const PLAYLISTS_FILTER: &str = "Eg-KAQwIABAAGAAgACgBMABqChAEEAMQCRAFEAo%3D";

/// Longest upstream body echoed back in an error.
const ERROR_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct YtMusicConfig {
    pub base_url: String,
    pub language: String,
    pub location: Option<String>,
    pub timeout: Duration,
}

impl Default for YtMusicConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en".to_string(),
            location: None,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct YtMusicClient {
    http: Client,
    api_base: Url,
    context: Value,
}

impl SearchKind {
    fn filter_params(&self) -> &'static str {
        match self {
            SearchKind::Songs => SONGS_FILTER,
            SearchKind::Playlists => PLAYLISTS_FILTER,
        }
    }
}

impl YtMusicClient {
    /// Build the client. Nothing is sent upstream until the first call.
    pub fn new(config: &YtMusicConfig) -> Result<Self> {
        let mut base = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::InvalidConfig(format!("{}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(CatalogError::InvalidConfig(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let api_base = base
            .join(API_PATH)
            .map_err(|e| CatalogError::InvalidConfig(e.to_string()))?;

        let origin = header_value(&base.origin().ascii_serialization())?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.language)?);
        headers.insert(ORIGIN, origin.clone());
        headers.insert(HeaderName::from_static("x-origin"), origin);

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        let mut client = json!({
            "clientName": CLIENT_NAME,
            "clientVersion": CLIENT_VERSION,
            "hl": config.language,
        });
        if let Some(location) = config.location.as_deref().filter(|l| !l.is_empty()) {
            client["gl"] = json!(location);
        }

        info!("YTMusic client targeting {}", api_base);

        Ok(Self {
            http,
            api_base,
            context: json!({ "context": { "client": client, "user": {} } }),
        })
    }

    async fn send(&self, endpoint: &str, body: Value) -> Result<Value> {
        let url = self
            .api_base
            .join(endpoint)
            .map_err(|e| CatalogError::InvalidConfig(e.to_string()))?;

        let mut payload = self.context.clone();
        if let (Some(target), Value::Object(extra)) = (payload.as_object_mut(), body) {
            target.extend(extra);
        }

        debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .query(&[("alt", "json"), ("prettyPrint", "false")])
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let preview: String = text.chars().take(ERROR_PREVIEW_CHARS).collect();
            if status != StatusCode::NOT_FOUND {
                error!("YTMusic {} failed with {}: {}", endpoint, status, preview);
            }
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: preview,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl CatalogClient for YtMusicClient {
    async fn search(&self, query: &str, kind: SearchKind) -> Result<Vec<Value>> {
        let response = self
            .send(
                "search",
                json!({ "query": query, "params": kind.filter_params() }),
            )
            .await?;
        let results = parser::parse_search_results(&response, kind);
        debug!("Search {} for {:?}: {} results", kind, query, results.len());
        Ok(results)
    }

    async fn get_playlist(&self, playlist_id: &str, limit: usize) -> Result<Option<Value>> {
        let (browse_id, playlist_id) = match playlist_id.strip_prefix("VL") {
            Some(stripped) => (playlist_id.to_string(), stripped),
            None => (format!("VL{}", playlist_id), playlist_id),
        };

        let response = match self.send("browse", json!({ "browseId": browse_id })).await {
            Ok(response) => response,
            Err(CatalogError::Status { status: 404, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let Some(mut page) = parser::parse_playlist_page(&response) else {
            return Ok(None);
        };

        while page.tracks.len() < limit {
            let Some(token) = page.continuation.take() else {
                break;
            };
            let response = self.send("browse", json!({ "continuation": token })).await?;
            let (tracks, next) = parser::parse_playlist_continuation(&response);
            if tracks.is_empty() {
                break;
            }
            page.tracks.extend(tracks);
            page.continuation = next;
        }
        page.tracks.truncate(limit);

        debug!("Playlist {}: {} tracks", playlist_id, page.tracks.len());
        Ok(Some(page.into_record(playlist_id)))
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| CatalogError::InvalidConfig(format!("{:?}: {}", value, e)))
}
