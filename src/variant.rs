use crate::extractors::{ScrapedIngredient, ScrapedRecipe};
use crate::model::{Directions, IngredientEntry, Ingredients, Recipe, Section};

/// Units recognised directly after a leading quantity.
const UNITS: &[&str] = &[
    "c", "can", "cans", "clove", "cloves", "cup", "cups", "dash", "dashes", "g", "gram",
    "grams", "handful", "handfuls", "kg", "l", "lb", "lbs", "litre", "litres", "liter", "liters",
    "mg", "ml", "oz", "ounce", "ounces", "package", "packages", "pinch", "pinches", "pint",
    "pints", "pound", "pounds", "quart", "quarts", "slice", "slices", "stick", "sticks", "t",
    "tablespoon", "tablespoons", "tbsp", "tbs", "teaspoon", "teaspoons", "tsp",
];

const FRACTIONS: &str = "½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞";

/// The record shape a fetch produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchVariant {
    /// Plain ingredient lines and one numbered step list, no tags.
    Flat,
    /// Quantity/name ingredients, sectioned steps and tags.
    #[default]
    Structured,
}

impl FetchVariant {
    /// Shape scraped fields into a recipe record for `url`.
    pub fn shape(self, scraped: ScrapedRecipe, url: &str) -> Recipe {
        let (ingredients, directions, tags) = match self {
            FetchVariant::Flat => (
                Ingredients::Plain(scraped.ingredients.iter().map(ScrapedIngredient::line).collect()),
                Directions::Steps(
                    scraped
                        .sections
                        .into_iter()
                        .flat_map(|section| section.steps)
                        .collect(),
                ),
                None,
            ),
            FetchVariant::Structured => (
                Ingredients::Structured(scraped.ingredients.into_iter().map(to_entry).collect()),
                Directions::Sections(
                    scraped
                        .sections
                        .into_iter()
                        .map(|section| Section {
                            title: section.name,
                            steps: section.steps,
                        })
                        .collect(),
                ),
                Some(scraped.keywords),
            ),
        };

        Recipe {
            url: Some(url.to_string()),
            title: scraped.name,
            rating: scraped.rating,
            tags,
            servings: scraped.servings,
            prep_time: scraped.prep_time,
            cook_time: scraped.cook_time,
            total_time: scraped.total_time,
            ingredients,
            directions,
        }
    }
}

fn to_entry(ingredient: ScrapedIngredient) -> IngredientEntry {
    match ingredient.amount {
        Some(amount) => IngredientEntry::new(amount, Some(ingredient.name)),
        None => split_quantity(&ingredient.name),
    }
}

/// Split `2 cups flour` into the quantity `2 cups` and the name `flour`.
///
/// Text without a leading quantity is kept whole as the quantity.
pub fn split_quantity(text: &str) -> IngredientEntry {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let mut split = tokens.iter().take_while(|t| is_amount(t)).count();
    if split > 0 {
        if let Some(next) = tokens.get(split) {
            let unit = next.trim_end_matches(['.', ',']).to_lowercase();
            if UNITS.contains(&unit.as_str()) {
                split += 1;
            }
        }
    }

    if split == 0 || split == tokens.len() {
        return IngredientEntry::new(text.trim(), None);
    }

    IngredientEntry::new(
        tokens[..split].join(" "),
        Some(tokens[split..].join(" ")),
    )
}

fn is_amount(token: &str) -> bool {
    let token = token.trim_end_matches(',');
    token.chars().any(|c| c.is_ascii_digit() || FRACTIONS.contains(c))
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || FRACTIONS.contains(c) || "/.-–".contains(c))
}
