use serde::Serialize;

/// A recipe as produced by a fetcher and consumed by the renderer.
///
/// Every field except the ingredient and direction lists is optional; the
/// renderer omits whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recipe {
    pub url: Option<String>,
    pub title: Option<String>,
    /// Average rating on a 0-5 scale.
    pub rating: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub servings: Option<u32>,
    /// Minutes.
    pub prep_time: Option<u32>,
    /// Minutes.
    pub cook_time: Option<u32>,
    /// Minutes.
    pub total_time: Option<u32>,
    pub ingredients: Ingredients,
    pub directions: Directions,
}

/// Ingredient list in one of the two shapes a fetcher can produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Ingredients {
    /// Free-form lines, rendered verbatim.
    Plain(Vec<String>),
    /// Quantity/name pairs.
    Structured(Vec<IngredientEntry>),
}

impl Default for Ingredients {
    fn default() -> Self {
        Ingredients::Plain(Vec::new())
    }
}

impl Ingredients {
    pub fn len(&self) -> usize {
        match self {
            Ingredients::Plain(items) => items.len(),
            Ingredients::Structured(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientEntry {
    pub quantity: String,
    pub name: Option<String>,
}

impl IngredientEntry {
    pub fn new(quantity: impl Into<String>, name: Option<String>) -> Self {
        Self {
            quantity: quantity.into(),
            name,
        }
    }

    /// `quantity name`, or whichever of the two is non-empty.
    pub fn text(&self) -> String {
        let name = self.name.as_deref().unwrap_or("");
        match (self.quantity.is_empty(), name.is_empty()) {
            (false, false) => format!("{} {}", self.quantity, name),
            (false, true) => self.quantity.clone(),
            (true, _) => name.to_string(),
        }
    }
}

/// Cooking steps, either as one numbered list or grouped into sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Directions {
    Steps(Vec<String>),
    Sections(Vec<Section>),
}

impl Default for Directions {
    fn default() -> Self {
        Directions::Steps(Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: Option<String>,
    pub steps: Vec<String>,
}

impl Recipe {
    /// The title the recipe will be saved under, empty if unresolved.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}
