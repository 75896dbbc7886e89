//! `[site]` section configuration.
//!
//! Deployment facts the page renderer injects into every page.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf};

/// Application environment.
///
/// `Dev` disables the template cache so edits show up without a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Dev,
    Stage,
    #[default]
    Prod,
}

impl Env {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Stage => "stage",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "stage" => Ok(Self::Stage),
            "prod" => Ok(Self::Prod),
            other => Err(format!("unknown environment `{other}` (expected dev, stage or prod)")),
        }
    }
}

/// `[site]` section in confsite.toml.
///
/// # Example
/// ```toml
/// [site]
/// env = "stage"
/// client_id = "1234.apps.googleusercontent.com"
/// prefix = "/io15"
/// dir = "app"
/// url = "https://events.example.com/io15/"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Current environment: "dev", "stage" or "prod".
    #[serde(default = "defaults::site::env")]
    #[educe(Default = defaults::site::env())]
    pub env: Env,

    /// OAuth client identifier exposed to pages.
    #[serde(default)]
    pub client_id: String,

    /// URL path prefix the site is mounted under.
    #[serde(default = "defaults::site::prefix")]
    #[educe(Default = defaults::site::prefix())]
    pub prefix: String,

    /// Base directory containing `templates/`.
    #[serde(default = "defaults::site::dir")]
    #[educe(Default = defaults::site::dir())]
    pub dir: PathBuf,

    /// Absolute site URL used as the sitemap resolution root.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: Option<String>,
}
