//! A parsed layout + page pair, ready to execute.

use super::{TemplateError, kind::Layout};
use minijinja::{Environment, context};
use serde::Serialize;

/// Empty layout a page extends while its `title` block is extracted.
pub(super) const TITLE_ROOT: &str = "@title-root";

/// Immutable template built from one layout file and one page file.
///
/// Shared through the cache by every render of the same page and layout.
#[derive(Debug)]
pub struct CompiledTemplate {
    env: Environment<'static>,
    page: String,
    layout: Layout,
}

impl CompiledTemplate {
    pub(super) fn new(env: Environment<'static>, page: String, layout: Layout) -> Self {
        Self { env, page, layout }
    }

    /// Layout the page was compiled with.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Execute the page (and through it, its layout) against `data`.
    pub fn render<S: Serialize>(&self, data: S) -> Result<String, TemplateError> {
        let tmpl = self
            .env
            .get_template(&self.page)
            .map_err(|err| TemplateError::Render(self.page.clone(), err))?;
        tmpl.render(data)
            .map_err(|err| TemplateError::Render(self.page.clone(), err))
    }

    /// Output of the page's `title` block, run on its own without data.
    ///
    /// The page is evaluated against the empty [`TITLE_ROOT`] layout instead
    /// of its real one, so nothing but the block executes. `None` when the
    /// block is missing, fails, or renders nothing.
    pub fn title(&self) -> Option<String> {
        let tmpl = self.env.get_template(&self.page).ok()?;
        let mut state = tmpl.eval_to_state(context! { layout => TITLE_ROOT }).ok()?;
        let title = state.render_block("title").ok()?;
        (!title.is_empty()).then_some(title)
    }
}
