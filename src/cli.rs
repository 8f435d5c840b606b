//! CLI definitions for vocab-helper.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vocab_protocols::PageSource;

/// vocab-helper CLI.
#[derive(Parser)]
#[command(name = "vocab-helper")]
#[command(about = "Define selected text using the page it came from")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Reset the status record to idle
    Init,

    /// Define a selection using its surrounding page text
    Define {
        /// The selected text
        #[arg(short, long)]
        selection: String,

        #[command(flatten)]
        page: PageArgs,

        /// Which occurrence of the selection in the page to anchor on (0-based)
        #[arg(long, default_value_t = 0)]
        occurrence: usize,
    },

    /// Show the current status record
    Status {
        /// Print only the Markdown result
        #[arg(long, conflicts_with = "json")]
        raw: bool,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Follow the status record until interrupted
    Watch,

    /// Manage the Gemini API key
    Options {
        #[command(subcommand)]
        action: OptionsAction,
    },
}

/// The page holding the selection. Exactly one is required.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub(crate) struct PageArgs {
    /// HTML file on disk
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Page URL to fetch
    #[arg(long)]
    pub url: Option<String>,

    /// Inline HTML
    #[arg(long)]
    pub html: Option<String>,
}

impl PageArgs {
    pub fn into_source(self) -> Option<PageSource> {
        self.file
            .map(PageSource::File)
            .or(self.url.map(PageSource::Url))
            .or(self.html.map(PageSource::Html))
    }
}

#[derive(Subcommand)]
pub(crate) enum OptionsAction {
    /// Store the API key
    SetKey {
        /// Gemini API key
        key: String,
    },

    /// Show the stored API key, masked
    Show,

    /// Remove the stored API key
    Clear,
}
