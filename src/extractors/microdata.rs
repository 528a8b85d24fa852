use super::{
    clean_text, first_integer, leading_number, parse_duration_minutes, valid_rating, Extractor,
    ParsingContext, ScrapedIngredient, ScrapedRecipe,
};
use crate::error::ImportError;
use log::debug;
use scraper::{ElementRef, Html, Selector};

pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        // Look for elements with itemscope and itemtype containing "Recipe"
        let selector = selector("[itemscope]")?;
        document.select(&selector).find(|element| {
            element.value().attr("itemtype").is_some_and(|itemtype| {
                itemtype.contains("schema.org/Recipe")
                    || itemtype.contains("data-vocabulary.org/Recipe")
            })
        })
    }

    /// Value of the first `itemprop` match: its `content` or `datetime`
    /// attribute when present, otherwise its text.
    fn get_itemprop(&self, root: ElementRef, prop: &str) -> Option<String> {
        let selector = selector(&format!("[itemprop='{prop}']"))?;
        root.select(&selector)
            .next()
            .map(element_value)
            .filter(|value| !value.is_empty())
    }

    fn get_itemprop_list(&self, root: ElementRef, prop: &str) -> Vec<String> {
        let Some(selector) = selector(&format!("[itemprop='{prop}']")) else {
            return Vec::new();
        };
        root.select(&selector)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Instruction steps; a container holding `<li>` items yields one step
    /// per item.
    fn get_instructions(&self, root: ElementRef) -> Vec<String> {
        let Some(item_selector) = selector("li") else {
            return Vec::new();
        };
        let mut steps = Vec::new();
        for prop in ["recipeInstructions", "instructions"] {
            let Some(prop_selector) = selector(&format!("[itemprop='{prop}']")) else {
                continue;
            };
            for el in root.select(&prop_selector) {
                let items: Vec<String> = el
                    .select(&item_selector)
                    .map(element_text)
                    .filter(|text| !text.is_empty())
                    .collect();
                if items.is_empty() {
                    let text = element_text(el);
                    if !text.is_empty() {
                        steps.push(text);
                    }
                } else {
                    steps.extend(items);
                }
            }
            if !steps.is_empty() {
                break;
            }
        }
        steps
    }
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn element_text(el: ElementRef) -> String {
    clean_text(&el.text().collect::<Vec<_>>().join(" "))
}

fn element_value(el: ElementRef) -> String {
    let attr = el
        .value()
        .attr("content")
        .or_else(|| el.value().attr("datetime"));
    match attr {
        Some(value) => clean_text(value),
        None => element_text(el),
    }
}

impl Extractor for MicroDataExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<ScrapedRecipe, ImportError> {
        debug!("Attempting to extract recipe using MicroData extractor");

        // Scope everything to the Recipe item; page-wide itemprops like
        // "name" usually belong to the site or the author.
        let container = self
            .find_recipe_container(&context.document)
            .ok_or_else(|| ImportError::ParseError("No MicroData Recipe container found".into()))?;

        let mut recipe = ScrapedRecipe {
            name: self.get_itemprop(container, "name"),
            ..Default::default()
        };

        recipe.rating = self
            .get_itemprop(container, "ratingValue")
            .and_then(|value| leading_number(&value))
            .and_then(valid_rating);

        if let Some(keywords) = self.get_itemprop(container, "keywords") {
            recipe.keywords = keywords
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect();
        }

        recipe.servings = self
            .get_itemprop(container, "recipeYield")
            .and_then(|value| first_integer(&value));

        recipe.prep_time = self
            .get_itemprop(container, "prepTime")
            .and_then(|value| parse_duration_minutes(&value));
        recipe.cook_time = self
            .get_itemprop(container, "cookTime")
            .and_then(|value| parse_duration_minutes(&value));
        recipe.total_time = self
            .get_itemprop(container, "totalTime")
            .and_then(|value| parse_duration_minutes(&value));

        // Try 'recipeIngredient' and the older 'ingredients'
        let mut ingredients = self.get_itemprop_list(container, "recipeIngredient");
        if ingredients.is_empty() {
            ingredients = self.get_itemprop_list(container, "ingredients");
        }
        recipe.ingredients = ingredients.into_iter().map(ScrapedIngredient::from_line).collect();

        for step in self.get_instructions(container) {
            recipe.push_loose_step(step);
        }

        if !recipe.has_content() {
            return Err(ImportError::ParseError(
                "Could not extract recipe content".to_string(),
            ));
        }

        Ok(recipe)
    }
}
