use log::debug;
use reqwest::Url;

use crate::model::Recipe;

/// Derive a human-readable title from the last path segment of a URL.
///
/// `https://example.com/recipes/creamy-garlic-chicken/` becomes
/// `Creamy Garlic Chicken`. Input that does not parse as a URL is treated as
/// a bare path, so the result is best-effort and may be empty.
pub fn title_from_url(url: &str) -> String {
    let url = url.strip_suffix('/').unwrap_or(url);

    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            url[..end].to_string()
        }
    };

    let segment = path.rsplit('/').next().unwrap_or("");
    title_case(&segment.replace('-', " "))
}

/// Fill in a missing title from the recipe URL, falling back to the URL that
/// was requested when the page did not report one.
pub fn resolve_title(recipe: &mut Recipe, requested_url: &str) {
    let has_title = recipe.title.as_deref().is_some_and(|t| !t.is_empty());
    if has_title {
        return;
    }

    let source = recipe.url.as_deref().unwrap_or(requested_url);
    let title = title_from_url(source);
    debug!("Derived title '{}' from {}", title, source);
    recipe.title = Some(title);
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
