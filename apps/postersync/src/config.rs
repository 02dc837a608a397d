//! postersync configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux/macOS: `~/.config/postersync/config.toml`
//! - Windows: `%APPDATA%/postersync/config.toml`
//!
//! Command-line flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use postersync_posters::{
    DEFAULT_LIBRARIES_DIR, DEFAULT_MIN_RATIO, QualityBand, Selector, SyncOptions, TextProcessing,
};
use serde::{Deserialize, Serialize};

use crate::cli::Args;

/// Resolved configuration, built once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Plex server base URL.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Plex authentication token.
    #[serde(default)]
    pub server_token: String,

    /// Library sections to process, in order.
    #[serde(default = "default_libraries")]
    pub libraries: Vec<String>,

    /// Root holding `<library_identifier>/posters/` directories.
    #[serde(default = "default_libraries_dir")]
    pub libraries_dir: PathBuf,

    /// Minimum match score (inclusive) required to upload.
    #[serde(default = "default_min_ratio")]
    pub min_ratio: u8,

    /// Lowercase and strip punctuation from names before scoring.
    #[serde(default)]
    pub normalize_names: bool,
}

fn default_server_url() -> String {
    "http://127.0.0.1:32400".into()
}

fn default_libraries() -> Vec<String> {
    vec!["Movies".into(), "TV Shows".into()]
}

fn default_libraries_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LIBRARIES_DIR)
}

fn default_min_ratio() -> u8 {
    DEFAULT_MIN_RATIO
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            server_token: String::new(),
            libraries: default_libraries(),
            libraries_dir: default_libraries_dir(),
            min_ratio: default_min_ratio(),
            normalize_names: false,
        }
    }
}

impl Config {
    /// Loads configuration from `explicit`, or from the default location.
    ///
    /// A missing default file is created with default values; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let path = config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save_to(&path)?;
            tracing::info!(path = %path.display(), "wrote default configuration");
            Ok(config)
        }
    }

    /// Reads and parses a TOML config file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // Restrict permissions on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Applies command-line overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if !args.libraries.is_empty() {
            self.libraries = args.libraries.clone();
        }
        if let Some(dir) = &args.libraries_dir {
            self.libraries_dir = dir.clone();
        }
        if let Some(min_ratio) = args.min_ratio {
            self.min_ratio = min_ratio;
        }
        if let Some(url) = &args.server_url {
            self.server_url = url.clone();
        }
        if let Some(token) = &args.token {
            self.server_token = token.clone();
        }
    }

    /// Checks values that serde alone cannot.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_ratio > 100 {
            bail!("min_ratio must be between 0 and 100, got {}", self.min_ratio);
        }
        if self.libraries.is_empty() {
            bail!("no libraries configured");
        }
        Ok(())
    }

    /// Returns the server token, failing when it has not been configured.
    pub fn require_token(&self) -> anyhow::Result<&str> {
        if self.server_token.is_empty() {
            bail!("server_token is not set; add it to the config file or pass --token");
        }
        Ok(&self.server_token)
    }

    pub fn text_processing(&self) -> TextProcessing {
        if self.normalize_names {
            TextProcessing::Full
        } else {
            TextProcessing::Raw
        }
    }

    pub fn selector(&self) -> Selector {
        Selector::new(self.min_ratio, self.text_processing())
    }

    pub fn sync_options(&self, dry_run: bool) -> SyncOptions {
        SyncOptions {
            selector: self.selector(),
            band: QualityBand::default(),
            dry_run,
        }
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata)
            .join("postersync")
            .join("config.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").context("HOME is not set")?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("postersync")
            .join("config.toml"))
    }
}
