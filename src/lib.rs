pub mod cli;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod render;
pub mod title;
pub mod variant;
pub mod writer;

use log::debug;
use std::path::{Path, PathBuf};

pub use config::ImportConfig;
pub use error::ImportError;
pub use fetchers::{Fetcher, WebFetcher};
pub use model::{Directions, IngredientEntry, Ingredients, Recipe, Section};
pub use render::recipe_to_markdown;
pub use title::{resolve_title, title_from_url};
pub use variant::FetchVariant;
pub use writer::write_recipe_to_file;

/// Fetch a recipe and fill in its title from the URL if the page had none.
pub fn get_recipe(fetcher: &dyn Fetcher, url: &str) -> Result<Recipe, ImportError> {
    let mut recipe = fetcher.fetch(url)?;
    resolve_title(&mut recipe, url);
    debug!("{:#?}", recipe);
    Ok(recipe)
}

/// Fetch, render and save a recipe; returns the path written.
pub fn import_recipe(
    fetcher: &dyn Fetcher,
    url: &str,
    outfile: Option<&Path>,
) -> Result<PathBuf, ImportError> {
    let recipe = get_recipe(fetcher, url)?;
    write_recipe_to_file(&recipe, outfile)
}
