//! Poster sync orchestrator.
//!
//! For each library: load the candidate set, list the library's items,
//! pick the best candidate per item and upload accepted matches. Every
//! failure is logged and the run moves on to the next item or library.

use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::candidates::{CandidateSet, load_candidates};
use crate::library::MediaLibrary;
use crate::selector::Selector;
use crate::stats::{MatchStatistics, QualityBand};
use crate::types::{LibraryReport, MatchResult, MediaItem, UploadRecord};

/// Options controlling a sync run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    pub selector: Selector,
    pub band: QualityBand,
    /// Match and report without uploading anything.
    pub dry_run: bool,
}

/// Matches local posters to library items and uploads them.
pub struct PosterSync<'a> {
    library: &'a dyn MediaLibrary,
    options: SyncOptions,
}

impl<'a> PosterSync<'a> {
    pub fn new(library: &'a dyn MediaLibrary, options: SyncOptions) -> Self {
        Self { library, options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Processes each library in turn, loading its posters from `root`.
    ///
    /// Returns one report per library, in the order given.
    pub async fn run(&self, root: &Path, libraries: &[String]) -> Vec<LibraryReport> {
        let mut reports = Vec::with_capacity(libraries.len());

        for name in libraries {
            let candidates = match load_candidates(root, name) {
                Ok(candidates) => candidates,
                Err(e) => {
                    error!(library = %name, error = %e, "failed to load poster candidates");
                    None
                }
            };
            reports.push(self.sync_library(name, candidates.as_ref()).await);
        }

        reports
    }

    /// Runs the matching pass for one library.
    pub async fn sync_library(
        &self,
        library: &str,
        candidates: Option<&CandidateSet>,
    ) -> LibraryReport {
        let mut report = LibraryReport {
            stats: MatchStatistics::new(self.options.band),
            ..LibraryReport::new(library)
        };

        let items = match self.library.list_items(library).await {
            Ok(items) => items,
            Err(e) => {
                error!(library, error = %e, "failed to list library items");
                report.listing_error = Some(e.to_string());
                return report;
            }
        };

        let candidates = candidates.filter(|c| !c.is_empty());
        for item in &items {
            match candidates {
                Some(candidates) => self.sync_item(library, item, candidates, &mut report).await,
                None => report.skipped += 1,
            }
        }

        let band = report.stats.band();
        info!(
            library,
            count = report.stats.accepted_count(),
            band_min = band.min,
            band_max = band.max,
            "{}",
            report.stats
        );

        report
    }

    async fn sync_item(
        &self,
        library: &str,
        item: &MediaItem,
        candidates: &CandidateSet,
        report: &mut LibraryReport,
    ) {
        let query = item.comparison_name();
        let selector = &self.options.selector;

        let (name, score) = match selector.select(&query, candidates) {
            MatchResult::Found { name, score } => (name, score),
            MatchResult::NotFound => {
                warn!(library, item = %query, "no poster match found");
                report.no_match += 1;
                return;
            }
        };

        if !selector.accepts(score) {
            report.below_threshold += 1;
            return;
        }

        let Some(path) = candidates.get(&name) else {
            warn!(library, candidate = %name, "matched poster missing from candidate set");
            report.no_match += 1;
            return;
        };

        debug!(
            library,
            score,
            candidate = %name,
            path = %path.display(),
            "poster matched"
        );

        if self.options.dry_run {
            info!(library, item = %query, candidate = %name, score, "dry run, skipping upload");
        } else {
            info!(
                library,
                item = %query,
                score,
                min_ratio = selector.min_ratio,
                "poster found above min ratio, uploading"
            );
            if let Err(e) = self.library.upload_poster(item, path).await {
                error!(library, item = %query, path = %path.display(), error = %e, "poster upload failed");
                report.failed += 1;
                return;
            }
        }

        if report.stats.record(score) {
            debug!(
                library,
                candidate = %name,
                score,
                item = %query,
                boundary = report.stats.band().percentile_boundary(),
                "borderline poster match"
            );
        }

        report.uploads.push(UploadRecord {
            item_id: item.id.clone(),
            comparison_name: query,
            candidate: name,
            path: path.to_path_buf(),
            score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosterError;
    use crate::fuzz::TextProcessing;
    use crate::library::LibraryFuture;
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockLibrary {
        sections: HashMap<String, Vec<MediaItem>>,
        failing_items: HashSet<String>,
        uploads: Mutex<Vec<(String, PathBuf)>>,
    }

    impl MockLibrary {
        fn with_section(mut self, name: &str, items: &[(&str, &str, i32)]) -> Self {
            let items = items
                .iter()
                .map(|(id, title, year)| MediaItem {
                    id: (*id).into(),
                    title: (*title).into(),
                    year: Some(*year),
                })
                .collect();
            self.sections.insert(name.into(), items);
            self
        }

        fn failing(mut self, id: &str) -> Self {
            self.failing_items.insert(id.into());
            self
        }

        fn uploads(&self) -> Vec<(String, PathBuf)> {
            self.uploads.lock().unwrap().clone()
        }
    }

    impl MediaLibrary for MockLibrary {
        fn list_items<'a>(&'a self, library: &'a str) -> LibraryFuture<'a, Vec<MediaItem>> {
            Box::pin(async move {
                self.sections
                    .get(library)
                    .cloned()
                    .ok_or_else(|| PosterError::Library(format!("no section {library}")))
            })
        }

        fn upload_poster<'a>(&'a self, item: &'a MediaItem, path: &'a Path) -> LibraryFuture<'a, ()> {
            Box::pin(async move {
                if self.failing_items.contains(&item.id) {
                    return Err(PosterError::Upload("server said no".into()));
                }
                self.uploads
                    .lock()
                    .unwrap()
                    .push((item.id.clone(), path.to_path_buf()));
                Ok(())
            })
        }
    }

    fn alien_candidates() -> CandidateSet {
        [
            ("Alien (1979).png", "/posters/Alien (1979).png"),
            ("Aliens (1986).png", "/posters/Aliens (1986).png"),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn uploads_best_match() {
        let lib = MockLibrary::default().with_section("Movies", &[("1", "Alien", 1979)]);
        let sync = PosterSync::new(&lib, SyncOptions::default());

        let report = sync.sync_library("Movies", Some(&alien_candidates())).await;

        assert_eq!(report.uploads.len(), 1);
        assert_eq!(report.uploads[0].candidate, "Alien (1979).png");
        assert!(report.uploads[0].score >= 78);
        assert_eq!(
            lib.uploads(),
            vec![("1".to_string(), PathBuf::from("/posters/Alien (1979).png"))]
        );
        assert_eq!(report.stats.accepted_count(), 1);
    }

    #[tokio::test]
    async fn below_threshold_is_skipped_silently() {
        let lib = MockLibrary::default().with_section("Movies", &[("1", "Predator", 1987)]);
        let sync = PosterSync::new(&lib, SyncOptions::default());

        let report = sync.sync_library("Movies", Some(&alien_candidates())).await;

        assert!(report.uploads.is_empty());
        assert_eq!(report.below_threshold, 1);
        assert!(lib.uploads().is_empty());
        assert_eq!(report.stats.lowest_accepted_score(), None);
    }

    #[tokio::test]
    async fn missing_candidates_skip_every_item() {
        let lib = MockLibrary::default()
            .with_section("TV Shows", &[("1", "Firefly", 2002), ("2", "Lost", 2004)]);
        let sync = PosterSync::new(&lib, SyncOptions::default());

        let report = sync.sync_library("TV Shows", None).await;
        assert_eq!(report.skipped, 2);
        assert!(lib.uploads().is_empty());

        let report = sync.sync_library("TV Shows", Some(&CandidateSet::new())).await;
        assert_eq!(report.skipped, 2);
    }

    #[tokio::test]
    async fn upload_failure_continues_with_next_item() {
        let lib = MockLibrary::default()
            .with_section("Movies", &[("1", "Alien", 1979), ("2", "Aliens", 1986)])
            .failing("1");
        let sync = PosterSync::new(&lib, SyncOptions::default());

        let report = sync.sync_library("Movies", Some(&alien_candidates())).await;

        assert_eq!(report.failed, 1);
        assert_eq!(report.uploads.len(), 1);
        assert_eq!(report.uploads[0].item_id, "2");
        assert_eq!(report.stats.accepted_count(), 1);
    }

    #[tokio::test]
    async fn listing_failure_is_reported() {
        let lib = MockLibrary::default();
        let sync = PosterSync::new(&lib, SyncOptions::default());

        let report = sync.sync_library("Music", Some(&alien_candidates())).await;
        assert!(report.listing_error.unwrap().contains("Music"));
        assert!(report.uploads.is_empty());
    }

    #[tokio::test]
    async fn dry_run_does_not_upload() {
        let lib = MockLibrary::default().with_section("Movies", &[("1", "Alien", 1979)]);
        let options = SyncOptions {
            dry_run: true,
            ..Default::default()
        };
        let sync = PosterSync::new(&lib, options);

        let report = sync.sync_library("Movies", Some(&alien_candidates())).await;
        assert_eq!(report.uploads.len(), 1);
        assert!(lib.uploads().is_empty());
    }

    #[tokio::test]
    async fn threshold_override_rejects_weaker_match() {
        let lib = MockLibrary::default().with_section("Movies", &[("1", "Alien", 1979)]);
        let options = SyncOptions {
            selector: Selector::new(99, TextProcessing::Raw),
            ..Default::default()
        };
        let sync = PosterSync::new(&lib, options);

        let report = sync.sync_library("Movies", Some(&alien_candidates())).await;
        assert!(report.uploads.is_empty());
        assert_eq!(report.below_threshold, 1);
    }

    #[tokio::test]
    async fn run_is_repeatable() {
        let lib = MockLibrary::default()
            .with_section("Movies", &[("1", "Alien", 1979), ("2", "Aliens", 1986)]);
        let sync = PosterSync::new(&lib, SyncOptions::default());
        let candidates = alien_candidates();

        let first = sync.sync_library("Movies", Some(&candidates)).await;
        let second = sync.sync_library("Movies", Some(&candidates)).await;

        assert_eq!(first.uploads, second.uploads);
        let uploads = lib.uploads();
        assert_eq!(uploads.len(), 4);
        assert_eq!(uploads[..2], uploads[2..]);
    }
}
