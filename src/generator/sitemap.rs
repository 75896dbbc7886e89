//! Sitemap generation.
//!
//! Lists every public page template plus one schedule URL per session.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/io15/</loc>
//!     <changefreq>daily</changefreq>
//!   </url>
//!   <url>
//!     <loc>https://example.com/io15/schedule?sid=keynote</loc>
//!     <changefreq>daily</changefreq>
//!     <lastmod>2015-05-20T17:00:00Z</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    schedule::{ScheduleError, ScheduleSource},
    template::{PageIndex, PageKind},
};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{fmt, io, path::Path};
use thiserror::Error;
use url::Url;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Page session URLs point at.
const SCHEDULE_PAGE: &str = "schedule";

/// Query parameter carrying the session id.
const SESSION_PARAM: &str = "sid";

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("failed to walk templates directory")]
    Walk(#[from] walkdir::Error),

    #[error("failed to load schedule")]
    Schedule(#[from] ScheduleError),

    #[error("cannot resolve `{0}` against the base url")]
    Url(String, #[source] url::ParseError),
}

/// `<changefreq>` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single URL entry in the sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Absolute URL
    pub loc: String,
    pub changefreq: Option<ChangeFreq>,
    pub lastmod: Option<DateTime<Utc>>,
}

/// Sitemap data structure, in emission order.
#[derive(Debug, Default)]
pub struct Sitemap {
    pub entries: Vec<SitemapEntry>,
}

// ============================================================================
// Public API
// ============================================================================

/// Build the sitemap for the templates in `templates_dir`, resolved against
/// `base_url`.
///
/// Any walk, schedule or URL error discards everything gathered so far.
pub fn build_sitemap(
    templates_dir: &Path,
    base_url: &Url,
    source: &dyn ScheduleSource,
) -> Result<Sitemap, SitemapError> {
    let index = PageIndex::scan(templates_dir)?;
    let mut entries = Vec::with_capacity(index.len());

    for page in index.sitemap_pages() {
        let (path, changefreq) = match page.kind {
            PageKind::Home => ("", ChangeFreq::Daily),
            _ => (page.name.as_str(), ChangeFreq::Weekly),
        };
        entries.push(SitemapEntry {
            loc: page_url(base_url, path)?.into(),
            changefreq: Some(changefreq),
            lastmod: None,
        });
    }

    let schedule = source.latest_event_data()?;
    let modified = schedule.modified.with_timezone(&Utc);
    let schedule_url = page_url(base_url, SCHEDULE_PAGE)?;

    for id in schedule.sessions.keys() {
        let mut loc = schedule_url.clone();
        loc.query_pairs_mut().clear().append_pair(SESSION_PARAM, id);
        entries.push(SitemapEntry {
            loc: loc.into(),
            changefreq: Some(ChangeFreq::Daily),
            lastmod: Some(modified),
        });
    }

    Ok(Sitemap { entries })
}

/// `base_url` with page `name` appended as path segments.
///
/// Each `/`-separated part of `name` is percent-encoded, so `:`, `?` and `#`
/// stay in the path. The empty name is the base itself.
fn page_url(base_url: &Url, name: &str) -> Result<Url, SitemapError> {
    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| SitemapError::Url(name.to_owned(), url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(name.split('/'));
    Ok(url)
}

// ============================================================================
// XML Encoding
// ============================================================================

impl Sitemap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generate sitemap XML string.
    pub fn to_xml(&self) -> io::Result<String> {
        let mut writer = Writer::new_with_indent(Vec::with_capacity(4096), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
        ))?;

        for entry in &self.entries {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            write_text_element(&mut writer, "loc", &entry.loc)?;
            if let Some(freq) = entry.changefreq {
                write_text_element(&mut writer, "changefreq", freq.as_str())?;
            }
            if let Some(lastmod) = entry.lastmod {
                let lastmod = lastmod.to_rfc3339_opts(SecondsFormat::Secs, true);
                write_text_element(&mut writer, "lastmod", &lastmod)?;
            }
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let mut xml = writer.into_inner();
        xml.push(b'\n');
        String::from_utf8(xml).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

/// `<name>text</name>`, text escaped.
fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}

// ============================================================================
// Tests
// ============================================================================
