//! Template resolution: layout selection, cache lookup, compilation.

use super::{
    CompiledTemplate, TemplateError,
    cache::{CacheKey, TemplateCache},
    compiled::TITLE_ROOT,
    funcs::register_functions,
    kind::Layout,
};
use minijinja::{Environment, syntax::SyntaxConfig};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Statement delimiters. The engine's `{{ }}` is left to client-side bindings.
const BLOCK_DELIMITERS: (&str, &str) = ("{%", "%}");
/// Expression delimiters.
const VARIABLE_DELIMITERS: (&str, &str) = ("{=", "=}");
/// Comment delimiters.
const COMMENT_DELIMITERS: (&str, &str) = ("{#", "#}");

/// Global holding the selected layout's template name, for `{% extends layout %}`.
const LAYOUT_GLOBAL: &str = "layout";

/// Build the delimiter configuration shared by every page.
fn syntax() -> Result<SyntaxConfig, minijinja::Error> {
    SyntaxConfig::builder()
        .block_delimiters(BLOCK_DELIMITERS.0, BLOCK_DELIMITERS.1)
        .variable_delimiters(VARIABLE_DELIMITERS.0, VARIABLE_DELIMITERS.1)
        .comment_delimiters(COMMENT_DELIMITERS.0, COMMENT_DELIMITERS.1)
        .build()
}

/// Read a template file, keeping its path in the error.
fn read_template(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|err| TemplateError::Read(path.to_path_buf(), err))
}

/// Turns a page name into a compiled template, through the cache.
#[derive(Debug)]
pub struct TemplateResolver {
    dir: PathBuf,
    prefix: String,
    cache: Arc<TemplateCache>,
    /// Number of successful compilations, cache hits excluded.
    compiles: AtomicUsize,
}

impl TemplateResolver {
    /// Resolver over templates in `dir`, with `url()` bound to `prefix`.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, cache: Arc<TemplateCache>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            cache,
            compiles: AtomicUsize::new(0),
        }
    }

    /// Templates directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// How many templates were compiled from disk so far.
    pub fn compile_count(&self) -> usize {
        self.compiles.load(Ordering::Relaxed)
    }

    /// Compiled template for page `name`, full page or partial.
    ///
    /// Parse failures are returned as-is and never cached.
    pub fn resolve(&self, name: &str, partial: bool) -> Result<Arc<CompiledTemplate>, TemplateError> {
        let layout = Layout::select(name, partial);
        let key = CacheKey::new(name, layout);

        if let Some(template) = self.cache.get(&key) {
            debug_assert_eq!(template.layout(), layout);
            return Ok(template);
        }

        let template = self.compile(name, layout)?;
        Ok(self.cache.put(key, template))
    }

    /// Load and parse `layout` and `<name>.html` into a fresh environment.
    fn compile(&self, name: &str, layout: Layout) -> Result<CompiledTemplate, TemplateError> {
        let page = format!("{name}.html");
        let layout_source = read_template(&self.dir.join(layout.file_name()))?;
        let page_source = read_template(&self.dir.join(&page))?;

        let mut env = Environment::new();
        env.set_syntax(syntax().map_err(|err| TemplateError::Parse(page.clone(), err))?);
        register_functions(&mut env, &self.prefix);
        env.add_global(LAYOUT_GLOBAL, layout.file_name());

        env.add_template_owned(layout.file_name(), layout_source)
            .map_err(|err| TemplateError::Parse(layout.file_name().to_owned(), err))?;
        env.add_template_owned(TITLE_ROOT, String::new())
            .map_err(|err| TemplateError::Parse(TITLE_ROOT.to_owned(), err))?;
        env.add_template_owned(page.clone(), page_source)
            .map_err(|err| TemplateError::Parse(page.clone(), err))?;

        self.compiles.fetch_add(1, Ordering::Relaxed);
        Ok(CompiledTemplate::new(env, page, layout))
    }
}
