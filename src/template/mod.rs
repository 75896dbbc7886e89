//! Page templates: classification, compilation and caching.
//!
//! A page lives in `templates/<name>.html` and is compiled together with one
//! of four layout files picked from its [`PageKind`]:
//!
//! ```text
//! resolve("schedule", partial)
//!        │
//!        ▼
//!  PageKind::classify ──► Layout ──► TemplateCache::get ──hit──► Arc<CompiledTemplate>
//!                                          │ miss
//!                                          ▼
//!                        read layout + page, parse ──► TemplateCache::put
//! ```
//!
//! Statements use `{% %}` and expressions `{= =}`. Pages inherit their layout
//! with `{% extends layout %}` and may define a `title` block.

mod cache;
mod compiled;
mod error;
mod funcs;
mod index;
mod kind;
mod resolver;

pub use cache::TemplateCache;
pub use compiled::CompiledTemplate;
pub use error::TemplateError;
pub use index::PageIndex;
pub use kind::{Layout, PageKind};
pub use resolver::TemplateResolver;
