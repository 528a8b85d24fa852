use clap::Parser;

use obsidian_recipe_import::cli::{self, Args};
use obsidian_recipe_import::FetchVariant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    cli::run(args, FetchVariant::Structured)?;

    Ok(())
}
