use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ImportError;
use crate::model::Recipe;
use crate::render::recipe_to_markdown;

/// Path the note is written to: `outfile` if given, otherwise `<title>.md`.
pub fn output_path(recipe: &Recipe, outfile: Option<&Path>) -> PathBuf {
    match outfile {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("{}.md", recipe.display_title())),
    }
}

/// Render `recipe` and write it to disk, replacing any existing file.
pub fn write_recipe_to_file(
    recipe: &Recipe,
    outfile: Option<&Path>,
) -> Result<PathBuf, ImportError> {
    let markdown = recipe_to_markdown(recipe);
    let path = output_path(recipe, outfile);

    fs::write(&path, markdown).map_err(|source| ImportError::WriteError {
        path: path.clone(),
        source,
    })?;

    info!("Wrote {}", path.display());
    Ok(path)
}
