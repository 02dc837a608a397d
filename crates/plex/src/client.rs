//! Plex Media Server API client.
//!
//! Async HTTP client using `reqwest` with `X-Plex-Token` authentication.
//! All requests ask for JSON responses.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiResponse, MediaContainer, Metadata, Section};

const PRODUCT_NAME: &str = "postersync";

/// Errors from the Plex client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid server token")]
    InvalidToken,

    #[error("library section not found: {0}")]
    SectionNotFound(String),
}

/// Plex Media Server API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a new client for the server at `base_url` using `token`.
    pub fn new(base_url: &str, token: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-plex-token",
            HeaderValue::from_str(token).map_err(|_| Error::InvalidToken)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("x-plex-product", HeaderValue::from_static(PRODUCT_NAME));
        if let Ok(device) = HeaderValue::from_str(&device_name()) {
            headers.insert("x-plex-device-name", device);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the server base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs an authenticated GET request and unwraps the `MediaContainer`.
    async fn get(&self, endpoint: &str) -> Result<MediaContainer, Error> {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        let resp: ApiResponse = serde_json::from_slice(&body)?;
        Ok(resp.media_container)
    }

    /// Lists all library sections on the server.
    pub async fn sections(&self) -> Result<Vec<Section>, Error> {
        Ok(self.get("/library/sections").await?.directory)
    }

    /// Finds a library section by its display title.
    pub async fn find_section(&self, title: &str) -> Result<Section, Error> {
        self.sections()
            .await?
            .into_iter()
            .find(|s| s.title == title)
            .ok_or_else(|| Error::SectionNotFound(title.to_string()))
    }

    /// Lists every item in a library section.
    pub async fn section_items(&self, section_key: &str) -> Result<Vec<Metadata>, Error> {
        let container = self
            .get(&format!("/library/sections/{section_key}/all"))
            .await?;
        debug!(
            section = section_key,
            items = container.metadata.len(),
            "listed section items"
        );
        Ok(container.metadata)
    }

    /// Uploads poster image data for an item.
    ///
    /// The server selects the uploaded image as the item's poster.
    pub async fn upload_poster(
        &self,
        rating_key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), Error> {
        let url = format!("{}/library/metadata/{rating_key}/posters", self.base_url);
        let mut req = self.http.post(&url).body(data);
        if let Some(ct) = content_type {
            req = req.header(CONTENT_TYPE, ct);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(rating_key, "poster uploaded");
        Ok(())
    }
}

/// Device name reported to the server, the local hostname when available.
fn device_name() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| PRODUCT_NAME.into())
}
