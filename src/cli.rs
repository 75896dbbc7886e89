//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::config::Env;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Conference site renderer and sitemap builder
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to root (default: confsite.toml)
    #[arg(short = 'C', long, default_value = "confsite.toml")]
    pub config: PathBuf,

    /// Override `[site.env]`: dev, stage or prod
    #[arg(short, long)]
    pub env: Option<Env>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a single page
    Render {
        /// Page name, e.g. `home` or `error_404`
        name: String,

        /// Render the page fragment with the partial layout
        #[arg(short, long)]
        partial: bool,

        /// Page title (default: the page's title block)
        #[arg(long)]
        title: Option<String>,

        /// Page description
        #[arg(long)]
        desc: Option<String>,

        /// Use the experiment share description and image
        #[arg(long)]
        experiment: bool,

        /// JSON file with extra page context fields
        #[arg(long)]
        context: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build sitemap.xml from templates and the schedule
    Sitemap {
        /// Override `[site.url]`.
        ///
        /// Useful when the public address differs per deployment:
        ///   confsite sitemap --base-url "https://staging.example.com/io15/"
        #[arg(long = "base-url")]
        base_url: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every page into a directory
    Export {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        output: PathBuf,
    },

    /// List registered pages and their kinds
    Pages,
}
