//! Page rendering.
//!
//! [`PageRenderer::render`] resolves a page template, fills every metadata
//! field the caller left empty, and executes the template:
//!
//! | Field            | Default                                           |
//! |------------------|---------------------------------------------------|
//! | `env`            | `[site.env]`                                      |
//! | `client_id`      | `[site.client_id]`                                |
//! | `prefix`         | `[site.prefix]`                                   |
//! | `slug`           | page name                                         |
//! | `start_date_str` | `[schedule.start]` in `[schedule.timezone]`       |
//! | `desc`           | `[page.description]`                              |
//! | `og_image`       | `[page.og_image]`                                 |
//! | `title`          | page `title` block, else `[page.title]`           |
//! | `og_title`       | resolved `title`                                  |

mod context;

pub use context::{PageContext, PageData, PageDefaults};

use crate::{
    config::{ConfigError, SiteConfig},
    log,
    template::{CompiledTemplate, TemplateCache, TemplateError, TemplateResolver},
};
use context::or_default;
use std::sync::Arc;

/// Renders pages by name. Cheap to share across threads.
#[derive(Debug)]
pub struct PageRenderer {
    resolver: TemplateResolver,
    defaults: PageDefaults,
}

impl PageRenderer {
    pub fn new(resolver: TemplateResolver, defaults: PageDefaults) -> Self {
        Self { resolver, defaults }
    }

    /// Renderer over `config`'s templates directory, sharing `cache`.
    pub fn from_config(config: &SiteConfig, cache: Arc<TemplateCache>) -> Result<Self, ConfigError> {
        let resolver = TemplateResolver::new(config.templates_dir(), &config.site.prefix, cache);
        Ok(Self::new(resolver, PageDefaults::from_config(config)?))
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    pub fn defaults(&self) -> &PageDefaults {
        &self.defaults
    }

    /// Render page `name` as a full page or a partial.
    ///
    /// `ctx` is read, never modified; `None` means all defaults.
    pub fn render(
        &self,
        name: &str,
        partial: bool,
        ctx: Option<&PageContext>,
    ) -> Result<Vec<u8>, TemplateError> {
        let template = self.resolver.resolve(name, partial)?;
        let data = self.page_data(name, &template, ctx);
        Ok(template.render(&data)?.into_bytes())
    }

    /// Render the `error_<status>` page.
    ///
    /// Never fails: if the error page itself can't be rendered, a built-in
    /// static page is returned instead.
    pub fn render_error(&self, status: u16, ctx: Option<&PageContext>) -> Vec<u8> {
        let name = format!("error_{status}");
        match self.render(&name, false, ctx) {
            Ok(page) => page,
            Err(err) => {
                log!("error"; "`{name}` failed, serving built-in page: {err}");
                fallback_page(status).into_bytes()
            }
        }
    }

    /// Fill the fields `ctx` leaves empty.
    fn page_data(&self, name: &str, template: &CompiledTemplate, ctx: Option<&PageContext>) -> PageData {
        let empty = PageContext::default();
        let ctx = ctx.unwrap_or(&empty);
        let d = &self.defaults;

        let title = match ctx.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) => title.to_owned(),
            None => template.title().unwrap_or_else(|| d.title.clone()),
        };
        let og_title = or_default(&ctx.og_title, &title);

        PageData {
            env: or_default(&ctx.env, d.env.as_str()),
            client_id: or_default(&ctx.client_id, &d.client_id),
            prefix: or_default(&ctx.prefix, &d.prefix),
            slug: or_default(&ctx.slug, name),
            canonical: ctx.canonical.clone().unwrap_or_default(),
            desc: or_default(&ctx.desc, &d.description),
            og_image: or_default(&ctx.og_image, &d.og_image),
            start_date_str: or_default(&ctx.start_date_str, &d.start_date_str),
            live_ids: ctx.live_ids.clone(),
            title,
            og_title,
        }
    }
}

// ============================================================================
// Built-in Error Page
// ============================================================================

/// Reason phrase for the status codes the site serves.
fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Error",
    }
}

/// Static error page used when no error template can be rendered.
fn fallback_page(status: u16) -> String {
    let reason = reason_phrase(status);
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{status} {reason}</title></head>\
         <body><h1>{status}</h1><p>{reason}</p></body></html>\n"
    )
}

// ============================================================================
// Tests
// ============================================================================
