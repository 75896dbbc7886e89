//! `[schedule]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[schedule]` section in confsite.toml - event timing and data location.
///
/// # Example
/// ```toml
/// [schedule]
/// start = "2015-05-28T09:00:00-07:00"
/// timezone = "-07:00"
/// data = "data/schedule.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ScheduleSection {
    /// Event start, RFC3339.
    #[serde(default = "defaults::schedule::start")]
    #[educe(Default = defaults::schedule::start())]
    pub start: String,

    /// UTC offset pages display the start in, `±HH:MM`.
    #[serde(default = "defaults::schedule::timezone")]
    #[educe(Default = defaults::schedule::timezone())]
    pub timezone: String,

    /// JSON schedule snapshot read by the sitemap.
    #[serde(default = "defaults::schedule::data")]
    #[educe(Default = defaults::schedule::data())]
    pub data: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::Path;

    #[test]
    fn test_schedule_section() {
        let config = r#"
            [schedule]
            start = "2016-05-18T10:00:00-07:00"
            timezone = "+02:00"
            data = "data/sessions.json"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.schedule.start, "2016-05-18T10:00:00-07:00");
        assert_eq!(config.schedule.timezone, "+02:00");
        assert_eq!(config.schedule.data, Path::new("data/sessions.json"));
    }

    #[test]
    fn test_schedule_section_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.schedule.start, "2015-05-28T09:00:00-07:00");
        assert_eq!(config.schedule.timezone, "-07:00");
        assert_eq!(config.schedule.data, Path::new("schedule.json"));
    }

    #[test]
    fn test_schedule_partial_override() {
        let config: SiteConfig = toml::from_str(
            r#"
            [schedule]
            timezone = "+00:00"
        "#,
        )
        .unwrap();

        assert_eq!(config.schedule.timezone, "+00:00");
        assert_eq!(config.schedule.start, "2015-05-28T09:00:00-07:00");
    }
}
