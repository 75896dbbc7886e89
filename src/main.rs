//! confsite - conference site page renderer and sitemap builder.

mod cli;
mod config;
mod export;
mod generator;
mod logger;
mod render;
mod schedule;
mod template;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use export::export_site;
use generator::sitemap::build_sitemap;
use render::{PageContext, PageRenderer};
use schedule::FileScheduleSource;
use std::{
    fs,
    io::{Write, stdout},
    path::{Path, PathBuf},
    sync::Arc,
};
use template::{Layout, PageIndex, TemplateCache};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;
    let cache = Arc::new(TemplateCache::new(config.is_dev()));
    if cache.is_dev_mode() {
        log!("config"; "env `{}`: template cache disabled", config.site.env);
    }

    match &cli.command {
        Commands::Render {
            name,
            partial,
            title,
            desc,
            experiment,
            context,
            output,
        } => {
            let renderer = PageRenderer::from_config(&config, cache)?;
            let mut ctx = match context {
                Some(path) => read_context(path)?,
                None => PageContext::default(),
            };
            if *experiment {
                let preset = renderer.defaults().experiment();
                ctx.desc = preset.desc;
                ctx.og_image = preset.og_image;
            }
            if title.is_some() {
                ctx.title = title.clone();
            }
            if desc.is_some() {
                ctx.desc = desc.clone();
            }

            let html = renderer.render(name, *partial, Some(&ctx))?;
            write_output(output.as_deref(), &html)?;
            if let Some(path) = output {
                log!("render"; "{} -> {}", name, path.display());
            }
            Ok(())
        }
        Commands::Sitemap { base_url, output } => {
            let base = config.base_url(base_url.as_deref())?;
            let source = FileScheduleSource::new(&config.schedule.data);
            let sitemap = build_sitemap(&config.templates_dir(), &base, &source)?;
            let xml = sitemap.to_xml().context("Failed to encode sitemap")?;

            if sitemap.is_empty() {
                log!("warn"; "sitemap has no urls");
            }
            write_output(output.as_deref(), xml.as_bytes())?;
            if let Some(path) = output {
                log!("sitemap"; "{} urls -> {}", sitemap.len(), path.display());
            }
            Ok(())
        }
        Commands::Export { output } => {
            let renderer = PageRenderer::from_config(&config, cache)?;
            let out_dir = resolve_output(&cli, output);
            let report = export_site(&renderer, &out_dir)?;

            if !report.is_ok() {
                bail!(
                    "{} of {} pages failed to render: {}",
                    report.failed.len(),
                    report.written,
                    report.failed.join(", ")
                );
            }
            let resolver = renderer.resolver();
            log!(
                "export";
                "{} pages -> {} ({} compiled, {} cached)",
                report.written,
                out_dir.display(),
                resolver.compile_count(),
                resolver.cache().len()
            );
            Ok(())
        }
        Commands::Pages => {
            let templates = config.templates_dir();
            let index = PageIndex::scan(&templates)
                .with_context(|| format!("Failed to scan templates in {}", templates.display()))?;
            if index.is_empty() {
                log!("warn"; "no pages in {}", templates.display());
            }
            for layout in Layout::ALL {
                if !templates.join(layout.file_name()).is_file() {
                    log!("warn"; "missing layout {}", layout);
                }
            }
            for page in index.iter() {
                log!("pages"; "{:<10} {}", page.kind, page.name);
            }
            Ok(())
        }
    }
}

/// Read extra page context fields from a JSON file.
fn read_context(path: &Path) -> Result<PageContext> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid context file {}", path.display()))
}

/// `output` relative to the site root.
fn resolve_output(cli: &Cli, output: &Path) -> PathBuf {
    cli.root.as_deref().unwrap_or(Path::new("./")).join(output)
}

/// Write `bytes` to `path`, or stdout when no path is given.
fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = stdout().lock();
            stdout.write_all(bytes).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")
        }
    }
}
