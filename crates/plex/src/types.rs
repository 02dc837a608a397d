//! API response types for Plex Media Server.

use serde::{Deserialize, Serialize};

/// A library section (e.g. "Movies") as listed by `/library/sections`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// A media item as listed by `/library/sections/{key}/all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub rating_key: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// `MediaContainer` envelope wrapping every JSON response (internal).
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(rename = "MediaContainer")]
    pub media_container: MediaContainer,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MediaContainer {
    #[serde(default)]
    #[allow(dead_code)]
    pub size: u32,
    #[serde(default, rename = "Directory")]
    pub directory: Vec<Section>,
    #[serde(default, rename = "Metadata")]
    pub metadata: Vec<Metadata>,
}
