use clap::Parser;
use std::path::PathBuf;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::fetchers::WebFetcher;
use crate::import_recipe;
use crate::variant::FetchVariant;

/// Converts a web recipe to an Obsidian Markdown note
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// The URL to process
    pub url: String,

    /// The name of the file to write to (defaults to "<title>.md")
    #[arg(long)]
    pub outfile: Option<PathBuf>,
}

/// Run one import with the record shape fixed by the calling binary.
pub fn run(args: Args, variant: FetchVariant) -> Result<PathBuf, ImportError> {
    let config = ImportConfig::load()?;
    let fetcher = WebFetcher::new(&config, variant)?;
    import_recipe(&fetcher, &args.url, args.outfile.as_deref())
}
