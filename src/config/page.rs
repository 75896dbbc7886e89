//! `[page]` section configuration.
//!
//! Metadata defaults filled into pages that don't set their own.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[page]` section in confsite.toml.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PageSection {
    /// Site title used when a page defines no `title` block.
    #[serde(default = "defaults::page::title")]
    #[educe(Default = defaults::page::title())]
    pub title: String,

    /// Default meta description.
    #[serde(default = "defaults::page::description")]
    #[educe(Default = defaults::page::description())]
    pub description: String,

    /// Default `og:image` path.
    #[serde(default = "defaults::page::og_image")]
    #[educe(Default = defaults::page::og_image())]
    pub og_image: String,

    /// Description used when an experiment link is shared.
    #[serde(default = "defaults::page::experiment_description")]
    #[educe(Default = defaults::page::experiment_description())]
    pub experiment_description: String,

    /// `og:image` used when an experiment link is shared.
    #[serde(default = "defaults::page::experiment_og_image")]
    #[educe(Default = defaults::page::experiment_og_image())]
    pub experiment_og_image: String,
}
