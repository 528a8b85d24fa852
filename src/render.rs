use crate::model::{Directions, Ingredients, Recipe};

/// Info block labels, in the order they are emitted.
const INFO_FIELDS: [&str; 4] = ["Servings", "Prep Time", "Cook Time", "Total Time"];

/// Render a recipe as an Obsidian note.
///
/// The output starts with a property block (`aliases`, `source`, `tags`,
/// `rating`), followed by the title, the info lines that have a non-zero
/// value, a notes placeholder, the ingredient checklist and the directions.
/// Ingredient and step text is passed through without escaping.
pub fn recipe_to_markdown(recipe: &Recipe) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("---".to_string());
    lines.push("aliases:".to_string());
    lines.push(format!("source: {}", recipe.url.as_deref().unwrap_or("")));
    lines.push(tags_line(recipe.tags.as_deref()));
    lines.push(format!(
        "rating: {}",
        recipe.rating.map(format_rating).unwrap_or_default()
    ));
    lines.push("---".to_string());

    lines.push(format!("# {}\n", recipe.display_title()));

    let values = [
        recipe.servings,
        recipe.prep_time,
        recipe.cook_time,
        recipe.total_time,
    ];
    for (label, value) in INFO_FIELDS.iter().zip(values) {
        // zero is indistinguishable from unknown
        if let Some(value) = value.filter(|v| *v != 0) {
            lines.push(format!("{label}: {value}"));
        }
    }

    lines.push("\n> Notes: \n".to_string());

    lines.push("## Ingredients".to_string());
    lines.push("#ingredients".to_string());
    match &recipe.ingredients {
        Ingredients::Plain(items) => {
            lines.extend(items.iter().map(|item| format!("- [ ] {item}")));
        }
        Ingredients::Structured(items) => {
            lines.extend(items.iter().map(|item| format!("- [ ] {}", item.text())));
        }
    }
    lines.push("\n".to_string());

    lines.push("## Directions".to_string());
    match &recipe.directions {
        Directions::Steps(steps) => {
            lines.extend(
                steps
                    .iter()
                    .enumerate()
                    .map(|(idx, step)| format!("{}. {}", idx + 1, step)),
            );
        }
        Directions::Sections(sections) => {
            for section in sections {
                if let Some(title) = section.title.as_deref().filter(|t| !t.is_empty()) {
                    lines.push(format!("### {title}"));
                }
                lines.extend(section.steps.iter().map(|step| format!("- {step}")));
                lines.push(String::new());
            }
        }
    }
    lines.push("\n".to_string());

    lines.join("\n")
}

fn tags_line(tags: Option<&[String]>) -> String {
    match tags {
        Some(tags) if !tags.is_empty() => {
            let tags: Vec<String> = tags
                .iter()
                .map(|tag| tag.trim().to_lowercase().replace(' ', "-"))
                .collect();
            format!("tags: {}", tags.join(", "))
        }
        _ => "tags:".to_string(),
    }
}

/// Whole ratings keep one decimal place (`4.0`), others print as-is (`4.5`).
fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{rating:.1}")
    } else {
        rating.to_string()
    }
}
