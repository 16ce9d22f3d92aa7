use crate::domain::ports::{HttpResponse, HttpTransport, TransportError};
use crate::utils::error::{FundingError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// `HttpTransport` backed by a shared `reqwest::Client`. Cloning is cheap and
/// shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FundingError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> std::result::Result<HttpResponse, TransportError> {
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        tracing::debug!("API response status: {}", status);

        // A body that cannot be read is an interrupted exchange, not a bad status
        let body = response.text().await.map_err(transport_error)?;

        Ok(HttpResponse { status, body })
    }
}

fn transport_error(error: reqwest::Error) -> TransportError {
    TransportError {
        message: format!("{:?}", error),
    }
}
