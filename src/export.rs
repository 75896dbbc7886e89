//! Static export of every registered page.
//!
//! ```text
//! export_site()
//!     │
//!     ├── PageIndex::scan()   ──► registered pages (layouts skipped)
//!     │
//!     └── par_iter ──► PageRenderer::render ──► <out>/<name>.html
//!                           │ error
//!                           └──► render_error(500) written in its place
//! ```

use crate::{log, render::PageRenderer, template::PageIndex};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Status of the page written in place of one that failed to render.
const FAILED_PAGE_STATUS: u16 = 500;

/// Outcome of an export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written, failures included.
    pub written: usize,
    /// Pages replaced by the error fallback, sorted.
    pub failed: Vec<String>,
}

impl ExportReport {
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render every page under the renderer's templates directory into `out_dir`.
///
/// Render failures don't stop the run. I/O failures do.
pub fn export_site(renderer: &PageRenderer, out_dir: &Path) -> Result<ExportReport> {
    let templates = renderer.resolver().dir();
    let index = PageIndex::scan(templates)
        .with_context(|| format!("Failed to scan templates in {}", templates.display()))?;
    let pages: Vec<_> = index.renderable().collect();

    log!("export"; "rendering {} pages", pages.len());

    let mut failed = pages
        .par_iter()
        .map(|page| -> Result<Option<String>> {
            let (html, ok) = match renderer.render(&page.name, false, None) {
                Ok(html) => (html, true),
                Err(e) => {
                    log!("error"; "{}: {:#}", page.name, anyhow::Error::from(e));
                    (renderer.render_error(FAILED_PAGE_STATUS, None), false)
                }
            };
            write_page(out_dir, &page.name, &html)?;
            Ok((!ok).then(|| page.name.clone()))
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    failed.sort();

    Ok(ExportReport {
        written: pages.len(),
        failed,
    })
}

/// Output path of page `name`: `admin/users` → `<out>/admin/users.html`.
fn page_path(out_dir: &Path, name: &str) -> PathBuf {
    out_dir.join(format!("{name}.html"))
}

fn write_page(out_dir: &Path, name: &str, html: &[u8]) -> Result<()> {
    let path = page_path(out_dir, name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))
}
