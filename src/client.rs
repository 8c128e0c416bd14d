use crate::config::PokemonConfig;
use crate::error::AppError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

/// Fetches a JSON document by absolute URL and decodes it.
///
/// This is the only way the aggregators talk to the outside world, so a fake
/// implementation is enough to drive them in tests.
pub trait Fetcher: Send + Sync + 'static {
    fn get_json<T>(&self, url: &str) -> impl Future<Output = Result<T, AppError>> + Send
    where
        T: DeserializeOwned + Send + 'static;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &PokemonConfig) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout as u64));
        }
        let client = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            AppError::from(e)
        })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn get_json<T>(&self, url: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to make HTTP request to {}: {}", url, e);
            AppError::from(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Upstream has no resource at {}", url);
            return Err(AppError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let error_msg = format!("API request to {} failed with status: {}", url, status);
            tracing::error!("{}", error_msg);
            return Err(AppError::NetworkError(error_msg));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse JSON response from {}: {}", url, e);
            AppError::ParseError(format!("JSON parsing failed: {}", e))
        })
    }
}

/// URL builder for the upstream API.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(api_url: &str) -> Self {
        Self {
            base: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn pokemon(&self, name_or_id: &str) -> String {
        format!("{}/pokemon/{}", self.base, name_or_id)
    }

    pub fn species(&self, id: u32) -> String {
        format!("{}/pokemon-species/{}", self.base, id)
    }

    pub fn type_record(&self, name: &str) -> String {
        format!("{}/type/{}", self.base, name)
    }

    pub fn listing(&self, limit: u32) -> String {
        format!("{}/pokemon?limit={}", self.base, limit)
    }
}
