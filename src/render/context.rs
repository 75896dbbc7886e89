//! Page render context: caller input and the fully resolved page data.

use crate::config::{ConfigError, Env, SiteConfig};
use serde::{Deserialize, Serialize};

/// Caller-supplied page metadata. Every field is optional.
///
/// Missing or empty fields are filled by the renderer; fields that are set
/// are never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageContext {
    pub env: Option<String>,
    pub client_id: Option<String>,
    pub prefix: Option<String>,
    pub slug: Option<String>,
    pub canonical: Option<String>,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub og_title: Option<String>,
    pub og_image: Option<String>,
    pub start_date_str: Option<String>,
    /// Livestream video IDs.
    pub live_ids: Vec<String>,
}

/// Data a page template executes against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageData {
    pub env: String,
    pub client_id: String,
    pub prefix: String,
    pub slug: String,
    pub canonical: String,
    pub title: String,
    pub desc: String,
    pub og_title: String,
    pub og_image: String,
    pub start_date_str: String,
    pub live_ids: Vec<String>,
}

/// Values the renderer falls back to, taken from configuration once.
#[derive(Debug, Clone)]
pub struct PageDefaults {
    pub env: Env,
    pub client_id: String,
    pub prefix: String,
    /// Event start, RFC3339 in the configured timezone.
    pub start_date_str: String,
    pub title: String,
    pub description: String,
    pub og_image: String,
    pub experiment_description: String,
    pub experiment_og_image: String,
}

impl PageDefaults {
    pub fn from_config(config: &SiteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            env: config.site.env,
            client_id: config.site.client_id.clone(),
            prefix: config.site.prefix.clone(),
            start_date_str: config.start_date_str()?,
            title: config.page.title.clone(),
            description: config.page.description.clone(),
            og_image: config.page.og_image.clone(),
            experiment_description: config.page.experiment_description.clone(),
            experiment_og_image: config.page.experiment_og_image.clone(),
        })
    }

    /// Context for pages shared as an experiment link.
    pub fn experiment(&self) -> PageContext {
        PageContext {
            desc: Some(self.experiment_description.clone()),
            og_image: Some(self.experiment_og_image.clone()),
            ..PageContext::default()
        }
    }
}

/// `value` unless it is missing or empty, else `default`.
pub(super) fn or_default(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_default() {
        assert_eq!(or_default(&None, "io15"), "io15");
        assert_eq!(or_default(&Some(String::new()), "io15"), "io15");
        assert_eq!(or_default(&Some("custom".into()), "io15"), "custom");
    }

    #[test]
    fn test_defaults_from_config() {
        let mut config = SiteConfig::default();
        config.site.client_id = "1234.apps".into();

        let defaults = PageDefaults::from_config(&config).unwrap();
        assert_eq!(defaults.env, Env::Prod);
        assert_eq!(defaults.client_id, "1234.apps");
        assert_eq!(defaults.prefix, "/io15");
        assert_eq!(defaults.start_date_str, "2015-05-28T09:00:00-07:00");
        assert_eq!(defaults.title, "Google I/O 2015");
    }

    #[test]
    fn test_defaults_reject_bad_start() {
        let mut config = SiteConfig::default();
        config.schedule.start = "tomorrow".into();
        assert!(PageDefaults::from_config(&config).is_err());
    }

    #[test]
    fn test_experiment_context() {
        let defaults = PageDefaults::from_config(&SiteConfig::default()).unwrap();
        let ctx = defaults.experiment();

        assert_eq!(ctx.og_image.as_deref(), Some("images/io15-experiment.png"));
        assert!(ctx.desc.unwrap().starts_with("Make music"));
        assert_eq!(ctx.title, None);
    }

    #[test]
    fn test_page_context_deserialize_partial() {
        let ctx: PageContext =
            serde_json::from_str(r#"{"title": "Keynote", "live_ids": ["abc", "def"]}"#).unwrap();

        assert_eq!(ctx.title.as_deref(), Some("Keynote"));
        assert_eq!(ctx.live_ids, ["abc", "def"]);
        assert_eq!(ctx.desc, None);
    }
}
