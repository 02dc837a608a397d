use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "postersync",
    about = "Upload local poster images to Plex library items by fuzzy name matching",
    long_about = None,
    version,
)]
pub struct Args {
    /// Path to TOML config file (default: ~/.config/postersync/config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Library to process; repeat for several (overrides the config list)
    #[arg(short, long = "library", value_name = "NAME", global = true)]
    pub libraries: Vec<String>,

    /// Directory holding one `<library>/posters/` tree per library
    #[arg(long, value_name = "DIR", global = true)]
    pub libraries_dir: Option<PathBuf>,

    /// Minimum match score (0-100, inclusive) required to upload
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100), global = true)]
    pub min_ratio: Option<u8>,

    /// Plex server base URL, e.g. http://127.0.0.1:32400
    #[arg(long, value_name = "URL", global = true)]
    pub server_url: Option<String>,

    /// Plex authentication token
    #[arg(long, value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Log debug output, including borderline matches
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Match posters and upload them (the default)
    Sync {
        /// Report matches without uploading
        #[arg(long)]
        dry_run: bool,

        /// Write a JSON report of every library's results to FILE
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Write `plex_<library>_list.txt` with every item's "Title (Year)"
    ExportList {
        /// Directory the list files are written to
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },

    /// Score a title against a poster name, or against each library's posters
    Match {
        /// Title to match, e.g. "Alien (1979)"
        query: String,

        /// Poster file name to score against; omit to search the libraries
        candidate: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Sync {
            dry_run: false,
            report: None,
        }
    }
}
