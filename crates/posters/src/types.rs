//! Data types shared by the matcher and the sync orchestrator.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::stats::MatchStatistics;

/// A media item as listed by the remote library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Opaque identifier used by the library to address the item.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
}

impl MediaItem {
    /// Returns the string the item is matched under: `"{title} ({year})"`.
    ///
    /// Items without a known year match under their bare title.
    pub fn comparison_name(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({year})", self.title),
            None => self.title.clone(),
        }
    }
}

/// Outcome of matching one comparison string against a candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// Best-scoring candidate name and its score (0-100).
    Found { name: String, score: u8 },
    /// No candidate could be scored.
    NotFound,
}

/// One accepted match, uploaded or (in a dry run) previewed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadRecord {
    pub item_id: String,
    pub comparison_name: String,
    pub candidate: String,
    pub path: PathBuf,
    pub score: u8,
}

/// Result of one library's matching pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LibraryReport {
    pub library: String,
    /// Accepted matches in listing order.
    pub uploads: Vec<UploadRecord>,
    /// Items whose best match scored below the acceptance threshold.
    pub below_threshold: usize,
    /// Items skipped because the library has no candidates.
    pub skipped: usize,
    /// Items for which no candidate could be scored.
    pub no_match: usize,
    /// Accepted matches whose upload failed.
    pub failed: usize,
    /// Set when the library's items could not be listed at all.
    pub listing_error: Option<String>,
    pub stats: MatchStatistics,
}

impl LibraryReport {
    pub fn new(library: &str) -> Self {
        Self {
            library: library.to_string(),
            ..Default::default()
        }
    }
}
