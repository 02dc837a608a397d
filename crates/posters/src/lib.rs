//! Poster matching and upload: candidates, fuzzy scoring, selection, sync.
//!
//! This crate implements the **business logic** for assigning local poster
//! images to items of a remote media library. It has no HTTP dependency;
//! the app provides a `MediaLibrary` implementation that bridges to the
//! actual server client.
//!
//! # Pipeline (per library)
//!
//! 1. **Load**: list `<root>/<library_identifier>/posters/` into a `CandidateSet`
//! 2. **List**: fetch the library's items from the server
//! 3. **Select**: score `"{title} ({year})"` against every candidate name
//! 4. **Upload**: send the best candidate when it clears the threshold
//! 5. **Report**: log match-quality statistics for the library

pub mod candidates;
pub mod error;
pub mod export;
pub mod fuzz;
pub mod library;
pub mod selector;
pub mod stats;
pub mod sync;
pub mod types;

// Re-export primary types for convenience.
pub use candidates::{
    CandidateSet, DEFAULT_LIBRARIES_DIR, detect_content_type, library_identifier,
    load_candidates, posters_dir,
};
pub use error::PosterError;
pub use export::{list_file_name, write_title_list};
pub use fuzz::{TextProcessing, token_sort_ratio};
pub use library::{LibraryFuture, MediaLibrary};
pub use selector::{DEFAULT_MIN_RATIO, Selector};
pub use stats::{MatchStatistics, NO_MATCHES_SENTINEL, QualityBand};
pub use sync::{PosterSync, SyncOptions};
pub use types::{LibraryReport, MatchResult, MediaItem, UploadRecord};
