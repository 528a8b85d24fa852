use html_escape::decode_html_entities;
use log::debug;
use scraper::Html;

use crate::error::ImportError;

mod json_ld;
mod microdata;

pub use json_ld::JsonLdExtractor;
pub use microdata::MicroDataExtractor;

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

/// Recipe fields as found on the page, before they are shaped into a
/// [`Recipe`](crate::model::Recipe).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedRecipe {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub keywords: Vec<String>,
    pub servings: Option<u32>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub total_time: Option<u32>,
    pub ingredients: Vec<ScrapedIngredient>,
    pub sections: Vec<ScrapedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedIngredient {
    /// Only set when the page splits the amount out itself.
    pub amount: Option<String>,
    pub name: String,
}

impl ScrapedIngredient {
    pub fn from_line(text: impl Into<String>) -> Self {
        Self {
            amount: None,
            name: text.into(),
        }
    }

    /// The ingredient as a single line, `amount name`.
    pub fn line(&self) -> String {
        match self.amount.as_deref().map(str::trim) {
            Some(amount) if !amount.is_empty() => format!("{amount} {}", self.name),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedSection {
    pub name: Option<String>,
    pub steps: Vec<String>,
}

impl ScrapedRecipe {
    pub fn has_content(&self) -> bool {
        !self.ingredients.is_empty() || self.sections.iter().any(|s| !s.steps.is_empty())
    }

    /// Append a step that doesn't belong to a named section.
    pub(crate) fn push_loose_step(&mut self, step: String) {
        match self.sections.last_mut() {
            Some(section) if section.name.is_none() => section.steps.push(step),
            _ => self.sections.push(ScrapedSection {
                name: None,
                steps: vec![step],
            }),
        }
    }
}

pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Result<ScrapedRecipe, ImportError>;
}

/// Run the extractors in order and return the first recipe found.
pub fn extract_recipe(context: &ParsingContext) -> Result<ScrapedRecipe, ImportError> {
    let extractors: Vec<Box<dyn Extractor>> =
        vec![Box::new(JsonLdExtractor), Box::new(MicroDataExtractor)];

    for extractor in extractors {
        match extractor.parse(context) {
            Ok(recipe) => return Ok(recipe),
            Err(e) => debug!("Extractor miss for {}: {}", context.url, e),
        }
    }

    Err(ImportError::NoRecipeFound(context.url.clone()))
}

/// Decode entities, drop markup and collapse whitespace.
pub(crate) fn clean_text(text: &str) -> String {
    // some sites double-encode entities
    let decoded = decode_html_entities(&decode_html_entities(text)).into_owned();
    let plain = if decoded.contains('<') {
        Html::parse_fragment(&decoded)
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        decoded
    };
    plain.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First run of digits in `text`, e.g. `Serves 4 people` -> 4.
pub(crate) fn first_integer(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Leading decimal number in `text`, e.g. `4.7 stars` -> 4.7.
pub(crate) fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

/// Keep ratings in the 0-5 range, anything else is treated as unknown.
pub(crate) fn valid_rating(rating: f64) -> Option<f64> {
    (0.0..=5.0).contains(&rating).then_some(rating)
}

/// Whole minutes from an ISO 8601 duration such as `PT1H30M` or `P0DT20M`.
///
/// Ranges like `PT15-20M` use the lower bound, seconds are rounded, and text
/// that isn't a duration falls back to its first number (`20 mins` -> 20).
pub(crate) fn parse_duration_minutes(text: &str) -> Option<u32> {
    let text = text.trim();
    let upper = text.to_ascii_uppercase();
    let is_iso = upper
        .chars()
        .all(|c| c.is_ascii_digit() || "PTYWDHMS.-".contains(c));
    let Some(rest) = upper.strip_prefix('P').filter(|_| is_iso) else {
        return first_integer(text);
    };

    let mut total = 0.0_f64;
    let mut number = String::new();
    let mut in_time = false;
    let mut in_range = false;
    let mut parsed_any = false;

    for c in rest.chars() {
        match c {
            '0'..='9' | '.' => {
                if !in_range {
                    number.push(c);
                }
            }
            '-' => in_range = true,
            'T' => in_time = true,
            unit => {
                let value: f64 = number.parse().unwrap_or(0.0);
                number.clear();
                in_range = false;
                parsed_any = true;
                total += match (unit, in_time) {
                    ('W', false) => value * 7.0 * 24.0 * 60.0,
                    ('D', false) => value * 24.0 * 60.0,
                    ('H', true) => value * 60.0,
                    ('M', true) => value,
                    ('S', true) => value / 60.0,
                    _ => 0.0,
                };
            }
        }
    }

    parsed_any.then(|| total.round() as u32)
}
