//! Page classification and layout selection.
//!
//! Every page name is classified once into a [`PageKind`]. Layout selection
//! and sitemap membership are both derived from the kind, so the two can
//! never disagree about what an `error_*` or `admin/*` page is.

use std::fmt;

/// Outer HTML skeleton a page is embedded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Full page chrome.
    Full,
    /// Fragment for in-page updates.
    Partial,
    /// No chrome at all.
    Bare,
    /// HTTP error pages.
    Error,
}

impl Layout {
    /// Every layout, in file-name order.
    pub const ALL: [Layout; 4] = [Self::Bare, Self::Error, Self::Full, Self::Partial];

    /// File name inside the templates directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Full => "layout_full.html",
            Self::Partial => "layout_partial.html",
            Self::Bare => "layout_bare.html",
            Self::Error => "layout_error.html",
        }
    }

    /// Layout for page `name` rendered fully or as a partial.
    pub fn select(name: &str, partial: bool) -> Self {
        PageKind::classify(name).layout(partial)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// What a template file is, decided from its logical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// `home`, served at the site root.
    Home,
    /// Regular crawlable page.
    Page,
    /// Renderable but kept out of the sitemap (embeds, admin, debug).
    Unlisted,
    /// `upgrade`, rendered without chrome.
    Bare,
    /// `error_*` pages.
    Error,
    /// `layout_*` files, never rendered directly.
    Layout,
}

/// Name prefixes of renderable pages that are never listed.
const UNLISTED_PREFIXES: &[&str] = &["embed", "upgrade", "admin/", "debug/"];

impl PageKind {
    /// Classify a logical page name (template path without `.html`).
    pub fn classify(name: &str) -> Self {
        match name {
            n if n.starts_with("error_") => Self::Error,
            "upgrade" => Self::Bare,
            n if n.starts_with("layout_") => Self::Layout,
            n if UNLISTED_PREFIXES.iter().any(|p| n.starts_with(p)) => Self::Unlisted,
            "home" => Self::Home,
            _ => Self::Page,
        }
    }

    /// Layout used to render a page of this kind.
    pub const fn layout(self, partial: bool) -> Layout {
        match self {
            Self::Error => Layout::Error,
            Self::Bare => Layout::Bare,
            _ if partial => Layout::Partial,
            _ => Layout::Full,
        }
    }

    /// Whether the page belongs in the sitemap.
    pub const fn in_sitemap(self) -> bool {
        matches!(self, Self::Home | Self::Page)
    }

    /// Whether the page can be rendered on its own.
    pub const fn is_renderable(self) -> bool {
        !matches!(self, Self::Layout)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Page => "page",
            Self::Unlisted => "unlisted",
            Self::Bare => "bare",
            Self::Error => "error",
            Self::Layout => "layout",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_pages_select_full_or_partial() {
        for name in ["home", "schedule", "about", "offsite", "faq/travel"] {
            assert_eq!(Layout::select(name, false), Layout::Full, "{name}");
            assert_eq!(Layout::select(name, true), Layout::Partial, "{name}");
        }
    }

    #[test]
    fn test_error_pages_ignore_partial_flag() {
        for name in ["error_404", "error_500", "error_"] {
            assert_eq!(Layout::select(name, false), Layout::Error);
            assert_eq!(Layout::select(name, true), Layout::Error);
        }
    }

    #[test]
    fn test_upgrade_is_bare_only_on_exact_match() {
        assert_eq!(Layout::select("upgrade", false), Layout::Bare);
        assert_eq!(Layout::select("upgrade", true), Layout::Bare);

        assert_eq!(Layout::select("upgrade_browser", false), Layout::Full);
        assert_eq!(Layout::select("upgrade_browser", true), Layout::Partial);
    }

    #[test]
    fn test_unlisted_pages_still_use_regular_layouts() {
        assert_eq!(Layout::select("admin/dashboard", false), Layout::Full);
        assert_eq!(Layout::select("embed", true), Layout::Partial);
    }

    #[test]
    fn test_classify() {
        assert_eq!(PageKind::classify("home"), PageKind::Home);
        assert_eq!(PageKind::classify("schedule"), PageKind::Page);
        assert_eq!(PageKind::classify("about/team"), PageKind::Page);
        assert_eq!(PageKind::classify("error_404"), PageKind::Error);
        assert_eq!(PageKind::classify("upgrade"), PageKind::Bare);
        assert_eq!(PageKind::classify("upgrade_ie"), PageKind::Unlisted);
        assert_eq!(PageKind::classify("embed"), PageKind::Unlisted);
        assert_eq!(PageKind::classify("embed_live"), PageKind::Unlisted);
        assert_eq!(PageKind::classify("admin/users"), PageKind::Unlisted);
        assert_eq!(PageKind::classify("debug/srvconfig"), PageKind::Unlisted);
        assert_eq!(PageKind::classify("layout_full"), PageKind::Layout);

        // prefixes need the separator
        assert_eq!(PageKind::classify("administration"), PageKind::Page);
        assert_eq!(PageKind::classify("debugging"), PageKind::Page);
    }

    #[test]
    fn test_sitemap_membership() {
        assert!(PageKind::Home.in_sitemap());
        assert!(PageKind::Page.in_sitemap());
        for kind in [
            PageKind::Unlisted,
            PageKind::Bare,
            PageKind::Error,
            PageKind::Layout,
        ] {
            assert!(!kind.in_sitemap(), "{kind}");
        }
    }

    #[test]
    fn test_layout_file_names() {
        let names: Vec<_> = Layout::ALL.iter().map(|l| l.file_name()).collect();
        assert_eq!(
            names,
            [
                "layout_bare.html",
                "layout_error.html",
                "layout_full.html",
                "layout_partial.html"
            ]
        );
    }
}
