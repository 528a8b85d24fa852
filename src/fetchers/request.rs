use log::debug;
use reqwest::blocking::Client;

use crate::config::ImportConfig;
use crate::error::ImportError;

/// Blocking HTTP client for recipe pages.
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(config: &ImportConfig) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the page body, treating any non-success status as an error.
    pub fn fetch(&self, url: &str) -> Result<String, ImportError> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let html = response.text()?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
