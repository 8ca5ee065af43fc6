use std::future::Future;
use std::time::Duration;

use crate::catalog::CatalogError;
use crate::web::config::CatalogConfig;

/// Where raw element set text comes from.
pub trait CatalogSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<String, CatalogError>> + Send;
}

/// Catalog feed served over HTTP (CelesTrak by default)
pub struct HttpCatalog {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Self::with_timeout(&config.url, &config.user_agent, config.timeout)
    }

    pub fn with_timeout(
        url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(CatalogError::Client)?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl CatalogSource for HttpCatalog {
    async fn fetch(&self) -> Result<String, CatalogError> {
        log::debug!("Requesting element sets from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        Ok(response.text().await?)
    }
}
