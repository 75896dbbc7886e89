//! Configuration error types.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors loading or checking `confsite.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid confsite.toml")]
    Toml(#[from] toml::de::Error),

    /// A value serde accepted but the site can't use, keyed by `section.field`.
    #[error("[{key}] {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("confsite.toml"),
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(err.to_string(), "failed to read config `confsite.toml`");
    }

    #[test]
    fn test_invalid_names_field() {
        let err = ConfigError::invalid("schedule.timezone", "`PST` must look like +HH:MM or -HH:MM");
        assert_eq!(
            err.to_string(),
            "[schedule.timezone] `PST` must look like +HH:MM or -HH:MM"
        );
        assert!(matches!(err, ConfigError::Invalid { key: "schedule.timezone", .. }));
    }

    #[test]
    fn test_toml_error_keeps_source() {
        let err = toml::from_str::<toml::Value>("[site").unwrap_err();
        let config_err = ConfigError::from(err);
        assert!(std::error::Error::source(&config_err).is_some());
    }
}
