//! Site configuration management for `confsite.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                            |
//! |--------------|----------------------------------------------------|
//! | `[site]`     | Environment, client id, path prefix, base dir, url |
//! | `[schedule]` | Event start, display timezone, schedule data file  |
//! | `[page]`     | Default page metadata (title, description, image)  |
//!
//! # Example
//!
//! ```toml
//! [site]
//! env = "prod"
//! client_id = "1234.apps.googleusercontent.com"
//! prefix = "/io15"
//! url = "https://events.example.com/io15/"
//!
//! [schedule]
//! start = "2015-05-28T09:00:00-07:00"
//! timezone = "-07:00"
//! ```

pub mod defaults;
mod error;
mod page;
mod schedule;
mod site;

pub use error::ConfigError;
pub use site::Env;

use page::PageSection;
use schedule::ScheduleSection;
use site::SiteSection;

use crate::cli::Cli;
use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

/// Templates directory, relative to `[site].dir`.
const TEMPLATES_DIR: &str = "templates";

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a `±HH:MM` UTC offset.
///
/// # Examples
/// ```ignore
/// parse_utc_offset("-07:00") // → UTC-7
/// parse_utc_offset("+05:30") // → UTC+5:30
/// parse_utc_offset("PST")    // → None
/// ```
fn parse_utc_offset(s: &str) -> Option<FixedOffset> {
    let bytes = s.as_bytes();
    if bytes.len() != 6 || bytes[3] != b':' {
        return None;
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let hours: i32 = s[1..3].parse().ok()?;
    let minutes: i32 = s[4..6].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse an absolute http(s) site URL, adding a trailing `/` to its path.
fn parse_site_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw)
        .map_err(|err| ConfigError::invalid("site.url", format!("`{raw}` is not a URL: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "site.url",
            format!("`{raw}` must use http or https"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing confsite.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Deployment settings
    #[serde(default)]
    pub site: SiteSection,

    /// Event schedule settings
    #[serde(default)]
    pub schedule: ScheduleSection,

    /// Page metadata defaults
    #[serde(default)]
    pub page: PageSection,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config file named by the CLI, apply overrides and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);
        if !config_path.exists() {
            bail!("Config file not found: {}", config_path.display());
        }

        let mut config = Self::from_path(&config_path)?;
        config.config_path = Self::normalize_path(&config_path);
        config.update_with_cli(cli, root);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    fn update_with_cli(&mut self, cli: &Cli, root: &Path) {
        Self::update_option(&mut self.site.env, cli.env.as_ref());

        let root = Self::normalize_path(root);
        self.site.dir = Self::normalize_path(&root.join(&self.site.dir));
        self.schedule.data = Self::normalize_path(&root.join(&self.schedule.data));
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate values serde can't check on its own.
    pub fn validate(&self) -> Result<()> {
        self.schedule_start()?;
        self.timezone()?;

        let prefix = &self.site.prefix;
        if !prefix.is_empty() && !prefix.starts_with('/') {
            bail!(ConfigError::invalid(
                "site.prefix",
                format!("`{prefix}` must be empty or start with `/`")
            ));
        }

        if let Some(url) = &self.site.url {
            parse_site_url(url)?;
        }

        Ok(())
    }

    /// Whether the template cache should be bypassed.
    pub fn is_dev(&self) -> bool {
        self.site.env == Env::Dev
    }

    /// Directory holding layouts and page templates.
    pub fn templates_dir(&self) -> PathBuf {
        self.site.dir.join(TEMPLATES_DIR)
    }

    /// Parsed `[schedule.start]`.
    pub fn schedule_start(&self) -> Result<DateTime<FixedOffset>, ConfigError> {
        DateTime::parse_from_rfc3339(&self.schedule.start).map_err(|err| {
            ConfigError::invalid(
                "schedule.start",
                format!("`{}` is not RFC3339: {err}", self.schedule.start),
            )
        })
    }

    /// Parsed `[schedule.timezone]`.
    pub fn timezone(&self) -> Result<FixedOffset, ConfigError> {
        parse_utc_offset(&self.schedule.timezone).ok_or_else(|| {
            ConfigError::invalid(
                "schedule.timezone",
                format!("`{}` must look like +HH:MM or -HH:MM", self.schedule.timezone),
            )
        })
    }

    /// Event start as RFC3339 in the configured timezone.
    pub fn start_date_str(&self) -> Result<String, ConfigError> {
        let start = self.schedule_start()?.with_timezone(&self.timezone()?);
        Ok(start.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Sitemap resolution root: `override_url` or `[site.url]`, always ending in `/`.
    pub fn base_url(&self, override_url: Option<&str>) -> Result<Url, ConfigError> {
        let Some(raw) = override_url.or(self.site.url.as_deref()) else {
            return Err(ConfigError::invalid(
                "site.url",
                "is required for sitemap generation",
            ));
        };
        parse_site_url(raw)
    }
}

// ============================================================================
// Tests
// ============================================================================
