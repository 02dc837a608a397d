//! Command implementations.

use std::path::Path;

use anyhow::Context;
use postersync_plex::Client;
use postersync_posters::{
    LibraryReport, MatchResult, MediaLibrary, PosterSync, list_file_name, load_candidates,
    token_sort_ratio, write_title_list,
};
use tracing::{error, info};

use crate::cli::Command;
use crate::config::Config;
use crate::plex_library::PlexLibrary;

/// Runs `command` against the resolved configuration.
pub async fn run(config: &Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Sync { dry_run, report } => sync(config, dry_run, report.as_deref()).await,
        Command::ExportList { output_dir } => export_list(config, &output_dir).await,
        Command::Match { query, candidate } => {
            match_names(config, &query, candidate.as_deref());
            Ok(())
        }
    }
}

fn connect(config: &Config) -> anyhow::Result<PlexLibrary> {
    let token = config.require_token()?;
    let client = Client::new(&config.server_url, token)
        .with_context(|| format!("failed to create client for {}", config.server_url))?;
    Ok(PlexLibrary::new(client))
}

async fn sync(config: &Config, dry_run: bool, report_path: Option<&Path>) -> anyhow::Result<()> {
    let library = connect(config)?;
    let sync = PosterSync::new(&library, config.sync_options(dry_run));

    info!(
        libraries = ?config.libraries,
        root = %config.libraries_dir.display(),
        min_ratio = config.min_ratio,
        dry_run,
        "starting poster sync"
    );
    let reports = sync.run(&config.libraries_dir, &config.libraries).await;
    log_totals(&reports);

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&reports)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}

fn log_totals(reports: &[LibraryReport]) {
    let uploaded: usize = reports.iter().map(|r| r.uploads.len()).sum();
    let failed: usize = reports.iter().map(|r| r.failed).sum();
    let rejected: usize = reports.iter().map(|r| r.below_threshold).sum();
    info!(
        libraries = reports.len(),
        uploaded,
        failed,
        rejected,
        "poster sync finished"
    );
}

async fn export_list(config: &Config, output_dir: &Path) -> anyhow::Result<()> {
    let library = connect(config)?;

    for name in &config.libraries {
        let items = match library.list_items(name).await {
            Ok(items) => items,
            Err(e) => {
                error!(library = %name, error = %e, "failed to list library items");
                continue;
            }
        };

        let path = output_dir.join(list_file_name(name));
        match write_title_list(&path, &items) {
            Ok(count) => info!(library = %name, count, path = %path.display(), "title list written"),
            Err(e) => error!(library = %name, path = %path.display(), error = %e, "failed to write title list"),
        }
    }

    Ok(())
}

/// Prints match scores without touching the server.
fn match_names(config: &Config, query: &str, candidate: Option<&str>) {
    let selector = config.selector();

    if let Some(candidate) = candidate {
        let processing = selector.processing;
        let score = token_sort_ratio(&processing.apply(query), &processing.apply(candidate));
        println!("{}", format_match(query, candidate, score, selector.accepts(score)));
        return;
    }

    for name in &config.libraries {
        let candidates = match load_candidates(&config.libraries_dir, name) {
            Ok(Some(candidates)) => candidates,
            Ok(None) => {
                println!("{name}: no posters directory");
                continue;
            }
            Err(e) => {
                error!(library = %name, error = %e, "failed to load poster candidates");
                continue;
            }
        };

        match selector.select(query, &candidates) {
            MatchResult::Found { name: best, score } => {
                println!(
                    "{name}: {}",
                    format_match(query, &best, score, selector.accepts(score))
                );
            }
            MatchResult::NotFound => println!("{name}: no match for '{query}'"),
        }
    }
}

fn format_match(query: &str, candidate: &str, score: u8, accepted: bool) -> String {
    let verdict = if accepted { "accepted" } else { "rejected" };
    format!("'{query}' -> '{candidate}' score {score} ({verdict})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_match_verdicts() {
        assert_eq!(
            format_match("Alien (1979)", "Alien (1979).png", 86, true),
            "'Alien (1979)' -> 'Alien (1979).png' score 86 (accepted)"
        );
        assert!(format_match("a", "b", 10, false).ends_with("(rejected)"));
    }

    #[test]
    fn connect_requires_token() {
        let config = Config::default();
        assert!(connect(&config).is_err());
    }

    #[tokio::test]
    async fn sync_without_token_fails_before_network() {
        let config = Config::default();
        let err = run(&config, Command::default()).await.unwrap_err();
        assert!(err.to_string().contains("server_token"));
    }
}
