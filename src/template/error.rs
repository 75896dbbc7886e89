//! Template error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading, parsing or executing a page template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A layout or page file could not be read.
    #[error("failed to read template `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    /// A template has a syntax error or the engine rejected its setup.
    #[error("failed to parse template `{0}`")]
    Parse(String, #[source] minijinja::Error),

    /// Executing a template against its page data failed.
    #[error("failed to render template `{0}`")]
    Render(String, #[source] minijinja::Error),
}
