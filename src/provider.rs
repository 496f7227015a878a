use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use url::Url;

use crate::config::AppConfig;
use crate::locator::AssetLocator;
use crate::{DoglinkError, Result};

/// Source of random asset locators.
#[async_trait]
pub trait AssetProvider: Send + Sync {
    async fn random_locator(&self) -> Result<AssetLocator>;
}

#[async_trait]
impl<P: AssetProvider + ?Sized> AssetProvider for Box<P> {
    async fn random_locator(&self) -> Result<AssetLocator> {
        (**self).random_locator().await
    }
}

#[derive(Debug, Deserialize)]
struct RandomImageResponse {
    message: String,
}

/// Parses a `{ "message": "<locator>" }` body.
pub fn parse_random_response(body: &[u8]) -> Result<AssetLocator> {
    let response: RandomImageResponse = serde_json::from_slice(body)?;
    AssetLocator::parse(response.message)
}

/// Talks to the public dog image API.
#[derive(Debug, Clone)]
pub struct DogApiProvider {
    client: reqwest::Client,
    endpoint: Url,
}

impl DogApiProvider {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(agent) = &config.user_agent {
            let value = HeaderValue::from_str(agent).map_err(|e| {
                DoglinkError::Config(format!("Invalid user agent: {e}"))
            })?;
            headers.insert(USER_AGENT, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.random_endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AssetProvider for DogApiProvider {
    async fn random_locator(&self) -> Result<AssetLocator> {
        log::debug!("Requesting a random asset from {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;

        let locator = parse_random_response(&body)?;
        log::trace!("Provider answered with {}", locator);
        Ok(locator)
    }
}
