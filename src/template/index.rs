//! Page registration from the templates directory.

use super::kind::PageKind;
use std::path::Path;
use walkdir::WalkDir;

/// Page template file extension.
const PAGE_EXTENSION: &str = "html";

/// A registered page: logical name plus its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Path below the templates directory without `.html`, `/`-separated.
    pub name: String,
    pub kind: PageKind,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = PageKind::classify(&name);
        Self { name, kind }
    }
}

/// Every page template found under a templates directory, in lexical order.
#[derive(Debug, Default)]
pub struct PageIndex {
    pages: Vec<Page>,
}

impl PageIndex {
    /// Walk `dir` and register every `.html` file.
    ///
    /// Any traversal error (including a missing `dir`) aborts the scan.
    pub fn scan(dir: &Path) -> Result<Self, walkdir::Error> {
        let mut pages = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PAGE_EXTENSION) {
                continue;
            }
            if let Some(name) = page_name(dir, path) {
                pages.push(Page::new(name));
            }
        }

        Ok(Self { pages })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    /// Pages listed in the sitemap.
    pub fn sitemap_pages(&self) -> impl Iterator<Item = &Page> {
        self.iter().filter(|page| page.kind.in_sitemap())
    }

    /// Pages that can be rendered on their own (everything but layouts).
    pub fn renderable(&self) -> impl Iterator<Item = &Page> {
        self.iter().filter(|page| page.kind.is_renderable())
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Logical name of `path` below `root`: `root/admin/users.html` → `admin/users`.
fn page_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::testutil::site;

    fn names(index: &PageIndex) -> Vec<&str> {
        index.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_scan_registers_html_files_in_order() {
        let dir = site(&[
            ("schedule.html", ""),
            ("home.html", ""),
            ("about/team.html", ""),
            ("error_404.html", ""),
            ("styles.css", ""),
            ("notes.txt", ""),
        ]);
        let index = PageIndex::scan(dir.path()).unwrap();

        assert_eq!(
            names(&index),
            [
                "about/team",
                "error_404",
                "home",
                "layout_bare",
                "layout_error",
                "layout_full",
                "layout_partial",
                "schedule",
            ]
        );
    }

    #[test]
    fn test_scan_classifies_pages() {
        let dir = site(&[("home.html", ""), ("upgrade.html", ""), ("admin/users.html", "")]);
        let index = PageIndex::scan(dir.path()).unwrap();

        let kind = |name: &str| index.iter().find(|p| p.name == name).unwrap().kind;
        assert_eq!(kind("home"), PageKind::Home);
        assert_eq!(kind("upgrade"), PageKind::Bare);
        assert_eq!(kind("admin/users"), PageKind::Unlisted);
        assert_eq!(kind("layout_full"), PageKind::Layout);
    }

    #[test]
    fn test_sitemap_and_renderable_filters() {
        let dir = site(&[("home.html", ""), ("embed.html", ""), ("schedule.html", "")]);
        let index = PageIndex::scan(dir.path()).unwrap();

        let listed: Vec<_> = index.sitemap_pages().map(|p| p.name.as_str()).collect();
        assert_eq!(listed, ["home", "schedule"]);

        let renderable: Vec<_> = index.renderable().map(|p| p.name.as_str()).collect();
        assert_eq!(renderable, ["embed", "home", "schedule"]);
    }

    #[test]
    fn test_scan_missing_dir_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = PageIndex::scan(&dir.path().join("templates"));
        assert!(result.is_err());
    }

    #[test]
    fn test_page_name() {
        let root = Path::new("/site/templates");
        assert_eq!(
            page_name(root, Path::new("/site/templates/home.html")).as_deref(),
            Some("home")
        );
        assert_eq!(
            page_name(root, Path::new("/site/templates/debug/srv.v2.html")).as_deref(),
            Some("debug/srv.v2")
        );
        assert_eq!(page_name(root, Path::new("/elsewhere/home.html")), None);
    }
}
