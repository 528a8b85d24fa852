use log::debug;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::extractors::{extract_recipe, ParsingContext};
use crate::model::Recipe;
use crate::variant::FetchVariant;

mod request;

pub use request::RequestFetcher;

/// Anything that can turn a URL into a recipe record.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Recipe, ImportError>;
}

/// Fetches a page over HTTP and extracts its schema.org recipe.
pub struct WebFetcher {
    client: RequestFetcher,
    variant: FetchVariant,
}

impl WebFetcher {
    pub fn new(config: &ImportConfig, variant: FetchVariant) -> Result<Self, ImportError> {
        Ok(Self {
            client: RequestFetcher::new(config)?,
            variant,
        })
    }
}

impl Fetcher for WebFetcher {
    fn fetch(&self, url: &str) -> Result<Recipe, ImportError> {
        let html = self.client.fetch(url)?;
        let context = ParsingContext::new(url, &html);

        let scraped = extract_recipe(&context)?;
        debug!("{:#?}", scraped);

        Ok(self.variant.shape(scraped, url))
    }
}
