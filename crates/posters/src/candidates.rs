//! Candidate poster loading.
//!
//! Posters for a library live in a flat directory
//! `<root>/<library_identifier>/posters/`, where the identifier is the
//! library name lowercased with spaces replaced by underscores. Each regular
//! file becomes a candidate keyed by its file name (extension included).

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::PosterError;

/// Default root holding one directory per library.
pub const DEFAULT_LIBRARIES_DIR: &str = "./libraries";

const POSTERS_DIR: &str = "posters";

/// Candidate file names mapped to their full paths.
///
/// Iteration is in byte order of the names, so matching does not depend on
/// directory listing order. Inserting an existing name replaces its path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    entries: BTreeMap<String, PathBuf>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.entries.insert(name.into(), path.into());
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, P: Into<PathBuf>> FromIterator<(N, P)> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = (N, P)>>(iter: T) -> Self {
        let mut set = CandidateSet::new();
        for (name, path) in iter {
            set.insert(name, path);
        }
        set
    }
}

/// Storage-safe identifier for a library name: `"TV Shows"` -> `"tv_shows"`.
pub fn library_identifier(library: &str) -> String {
    library.to_lowercase().replace(' ', "_")
}

/// Directory expected to hold the posters for `library` under `root`.
pub fn posters_dir(root: &Path, library: &str) -> PathBuf {
    root.join(library_identifier(library)).join(POSTERS_DIR)
}

/// Loads the candidate set for `library` from `root`.
///
/// Returns `Ok(None)` (with a warning) when the posters directory does not
/// exist. Subdirectories and names that are not valid UTF-8 are skipped.
pub fn load_candidates(root: &Path, library: &str) -> Result<Option<CandidateSet>, PosterError> {
    let dir = posters_dir(root, library);

    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                path = %dir.display(),
                library,
                "expected posters directory is missing"
            );
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let mut set = CandidateSet::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        // Follow symlinks, matching what a plain "is this a file" check sees.
        let is_file = std::fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => set.insert(name, path),
            Err(raw) => {
                warn!(name = ?raw, library, "skipping poster with non UTF-8 name");
            }
        }
    }

    debug!(library, candidates = set.len(), path = %dir.display(), "loaded poster candidates");
    Ok(Some(set))
}

/// Detects the image MIME type from a file path extension.
pub fn detect_content_type(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("webp") => Some("image/webp"),
        Some("gif") => Some("image/gif"),
        Some("ico") => Some("image/x-icon"),
        _ => None,
    }
}
