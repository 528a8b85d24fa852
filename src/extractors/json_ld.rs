use super::{
    clean_text, first_integer, leading_number, parse_duration_minutes, valid_rating, Extractor,
    ParsingContext, ScrapedIngredient, ScrapedRecipe, ScrapedSection,
};
use crate::error::ImportError;
use log::debug;
use scraper::Selector;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub struct JsonLdExtractor;

impl JsonLdExtractor {
    fn convert_to_recipe(&self, json_ld_recipe: JsonLdRecipe) -> ScrapedRecipe {
        let mut recipe = ScrapedRecipe {
            name: json_ld_recipe
                .name
                .map(|name| clean_text(&name))
                .filter(|name| !name.is_empty()),
            ..Default::default()
        };

        recipe.rating = json_ld_recipe
            .aggregate_rating
            .and_then(|rating| rating.rating_value)
            .and_then(|value| value.as_f64())
            .and_then(valid_rating);

        recipe.keywords = match json_ld_recipe.keywords {
            Some(Keywords::String(s)) => s.split(',').map(clean_text).collect(),
            Some(Keywords::Multiple(v)) => v.iter().map(|k| clean_text(k)).collect(),
            None => Vec::new(),
        };
        recipe.keywords.retain(|k| !k.is_empty());

        recipe.servings = match json_ld_recipe.recipe_yield {
            Some(RecipeYield::Single(value)) => value.as_u32(),
            Some(RecipeYield::Array(arr)) => arr.iter().find_map(NumberOrString::as_u32),
            None => None,
        };

        recipe.prep_time = json_ld_recipe
            .prep_time
            .and_then(|time| time.as_minutes());
        recipe.cook_time = json_ld_recipe
            .cook_time
            .and_then(|time| time.as_minutes());
        recipe.total_time = json_ld_recipe
            .total_time
            .and_then(|time| time.as_minutes());

        recipe.ingredients = json_ld_recipe
            .recipe_ingredient
            .map(RecipeIngredients::into_items)
            .unwrap_or_default()
            .into_iter()
            .filter_map(IngredientItem::into_scraped)
            .collect();

        match json_ld_recipe.recipe_instructions {
            Some(RecipeInstructions::String(text)) => {
                // a single blob, one step per line
                for line in text.lines() {
                    let step = clean_text(line);
                    if !step.is_empty() {
                        recipe.push_loose_step(step);
                    }
                }
            }
            Some(RecipeInstructions::Multiple(items)) => collect_items(items, &mut recipe),
            Some(RecipeInstructions::Single(item)) => collect_items(vec![item], &mut recipe),
            None => {}
        }

        recipe
    }
}

fn collect_items(items: Vec<InstructionItem>, recipe: &mut ScrapedRecipe) {
    for item in items {
        match item {
            InstructionItem::Text(text) => push_step(recipe, &text),
            InstructionItem::Node(HowTo::HowToStep(step)) | InstructionItem::Untyped(step) => {
                if let Some(text) = step.into_text() {
                    push_step(recipe, &text);
                }
            }
            InstructionItem::Node(HowTo::HowToSection(section)) => push_section(recipe, section),
            InstructionItem::UntypedSection(section) => push_section(recipe, section.into()),
            InstructionItem::List(nested) => collect_items(nested, recipe),
        }
    }
}

/// Steps inside a section, with any nested sections flattened into it.
fn flatten_steps(items: Vec<InstructionItem>, steps: &mut Vec<String>) {
    for item in items {
        let text = match item {
            InstructionItem::Text(text) => Some(text),
            InstructionItem::Node(HowTo::HowToStep(step)) | InstructionItem::Untyped(step) => {
                step.into_text()
            }
            InstructionItem::Node(HowTo::HowToSection(HowToSection {
                item_list_element, ..
            }))
            | InstructionItem::UntypedSection(UntypedSection {
                item_list_element, ..
            }) => {
                flatten_steps(item_list_element, steps);
                None
            }
            InstructionItem::List(nested) => {
                flatten_steps(nested, steps);
                None
            }
        };
        if let Some(text) = text.map(|t| clean_text(&t)).filter(|t| !t.is_empty()) {
            steps.push(text);
        }
    }
}

fn push_section(recipe: &mut ScrapedRecipe, section: HowToSection) {
    let mut steps = Vec::new();
    flatten_steps(section.item_list_element, &mut steps);
    recipe.sections.push(ScrapedSection {
        name: section
            .name
            .map(|name| clean_text(&name))
            .filter(|name| !name.is_empty()),
        steps,
    });
}

fn push_step(recipe: &mut ScrapedRecipe, text: &str) {
    let step = clean_text(text);
    if !step.is_empty() {
        recipe.push_loose_step(step);
    }
}

// Every field is read leniently: a value in a shape we don't understand
// drops that field, not the whole recipe.
#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(rename = "aggregateRating", default, deserialize_with = "lenient")]
    aggregate_rating: Option<AggregateRating>,
    #[serde(rename = "recipeIngredient", default, deserialize_with = "lenient")]
    recipe_ingredient: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions", default, deserialize_with = "lenient")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "recipeYield", default, deserialize_with = "lenient")]
    recipe_yield: Option<RecipeYield>,
    #[serde(rename = "prepTime", default, deserialize_with = "lenient")]
    prep_time: Option<NumberOrString>,
    #[serde(rename = "cookTime", default, deserialize_with = "lenient")]
    cook_time: Option<NumberOrString>,
    #[serde(rename = "totalTime", default, deserialize_with = "lenient")]
    total_time: Option<NumberOrString>,
    #[serde(default, deserialize_with = "lenient")]
    keywords: Option<Keywords>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match T::deserialize(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            debug!("JsonLdExtractor: Ignoring field with unexpected shape: {}", e);
            Ok(None)
        }
    }
}

#[derive(Debug, Deserialize)]
struct AggregateRating {
    #[serde(rename = "ratingValue")]
    rating_value: Option<NumberOrString>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::String(s) => leading_number(s),
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            NumberOrString::Number(n) if *n >= 0.0 => Some(n.round() as u32),
            NumberOrString::Number(_) => None,
            NumberOrString::String(s) => first_integer(s),
        }
    }

    /// A bare number is taken as minutes.
    fn as_minutes(&self) -> Option<u32> {
        match self {
            NumberOrString::String(s) => parse_duration_minutes(s),
            number => number.as_u32(),
        }
    }

    fn into_text(self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::String(s) => clean_text(&s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Many(Vec<IngredientItem>),
    One(IngredientItem),
}

impl RecipeIngredients {
    fn into_items(self) -> Vec<IngredientItem> {
        match self {
            RecipeIngredients::Many(items) => items,
            RecipeIngredients::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IngredientItem {
    Text(String),
    Object(IngredientObject),
}

impl IngredientItem {
    fn into_scraped(self) -> Option<ScrapedIngredient> {
        match self {
            IngredientItem::Text(text) => {
                let line = clean_text(&text);
                (!line.is_empty()).then(|| ScrapedIngredient::from_line(line))
            }
            IngredientItem::Object(ing) => {
                let name = clean_text(&ing.name);
                if name.is_empty() {
                    return None;
                }
                Some(ScrapedIngredient {
                    amount: ing
                        .amount
                        .map(NumberOrString::into_text)
                        .filter(|amount| !amount.is_empty()),
                    name,
                })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct IngredientObject {
    name: String,
    amount: Option<NumberOrString>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<InstructionItem>),
    Single(InstructionItem),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionItem {
    Text(String),
    Node(HowTo),
    List(Vec<InstructionItem>),
    // @type given as an array, recognised by its item list
    UntypedSection(UntypedSection),
    // objects without a usable @type, e.g. {"text": "..."} or HowToDirection
    Untyped(HowToStep),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
}

impl HowToStep {
    // Prefer text over name
    fn into_text(self) -> Option<String> {
        self.text.or(self.name)
    }
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    name: Option<String>,
    #[serde(rename = "itemListElement", default)]
    item_list_element: Vec<InstructionItem>,
}

#[derive(Debug, Deserialize)]
struct UntypedSection {
    name: Option<String>,
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<InstructionItem>,
}

impl From<UntypedSection> for HowToSection {
    fn from(section: UntypedSection) -> Self {
        HowToSection {
            name: section.name,
            item_list_element: section.item_list_element,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    Single(NumberOrString),
    Array(Vec<NumberOrString>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Keywords {
    String(String),
    Multiple(Vec<String>),
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(type_str)) => type_str.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// Locate the Recipe node: the root itself, an element of a root array, or an
/// element of `@graph`.
fn find_recipe_node(json_ld: &Value) -> Option<&Value> {
    if is_recipe_type(json_ld) {
        debug!("JsonLdExtractor: Found Recipe type in root");
        return Some(json_ld);
    }
    if let Some(items) = json_ld.as_array() {
        debug!("JsonLdExtractor: JSON-LD is an array");
        return items.iter().find_map(find_recipe_node);
    }
    if let Some(graph) = json_ld.get("@graph") {
        debug!("JsonLdExtractor: Found @graph");
        return find_recipe_node(graph);
    }
    None
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<ScrapedRecipe, ImportError> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);
        let selector = Selector::parse("script[type='application/ld+json']")
            .map_err(|e| ImportError::ParseError(e.to_string()))?;

        let scripts: Vec<_> = context.document.select(&selector).collect();
        debug!("JsonLdExtractor: Found {} JSON-LD script tags", scripts.len());

        // Try each script element until we find a valid recipe
        for (index, script) in scripts.iter().enumerate() {
            let raw_json = script.inner_html();
            let cleaned_json = sanitize_json(&raw_json);

            let json_ld = match serde_json::from_str::<Value>(&cleaned_json) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {}: {}", index, e);
                    continue;
                }
            };

            let Some(node) = find_recipe_node(&json_ld) else {
                debug!("JsonLdExtractor: No recipe found in JSON-LD {}", index);
                continue;
            };

            match JsonLdRecipe::deserialize(node) {
                Ok(json_ld_recipe) => {
                    let recipe = self.convert_to_recipe(json_ld_recipe);
                    if recipe.has_content() {
                        debug!("JsonLdExtractor: Successfully converted to JsonLdRecipe");
                        return Ok(recipe);
                    }
                    debug!(
                        "JsonLdExtractor: Recipe in JSON-LD {} has no ingredients or instructions",
                        index
                    );
                }
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to convert to JsonLdRecipe: {}", e);
                }
            }
        }

        Err(ImportError::ParseError(
            "No valid recipe found in any JSON-LD script".to_string(),
        ))
    }
}

/// Repair the two defects most often seen in hand-written JSON-LD: raw line
/// breaks or tabs inside strings, and trailing commas before `]` or `}`.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = String::with_capacity(json_str.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json_str.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                '\n' | '\r' | '\t' => {
                    cleaned.push(' ');
                    continue;
                }
                _ => {}
            }
            cleaned.push(c);
            continue;
        }

        match c {
            '"' => in_string = true,
            ']' | '}' => {
                let trimmed_len = cleaned.trim_end().len();
                if cleaned[..trimmed_len].ends_with(',') {
                    cleaned.truncate(trimmed_len - 1);
                }
            }
            _ => {}
        }
        cleaned.push(c);
    }

    cleaned
}
