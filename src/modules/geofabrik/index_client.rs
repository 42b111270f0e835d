use async_trait::async_trait;
use reqwest::Client;

use super::IndexSource;
use crate::core::config::IndexConfig;
use crate::core::error::{AppError, Result};

/// HTTP client for the Geofabrik download index
pub struct GeofabrikClient {
    client: Client,
    url: String,
}

impl GeofabrikClient {
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl IndexSource for GeofabrikClient {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Fetching region index from {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::error!("Region index request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Region index request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Region index returned status: {}", status);
            return Err(AppError::ExternalServiceError(format!(
                "Region index returned status {}",
                status
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read region index body: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to read region index body: {}", e))
        })?;

        tracing::debug!("Received {} bytes of region index", body.len());

        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_uses_configured_url() {
        let config = IndexConfig {
            url: "http://127.0.0.1:9/index.json".to_string(),
            request_timeout: Duration::from_secs(1),
            user_agent: "test-agent".to_string(),
        };
        let client = GeofabrikClient::new(&config).unwrap();

        assert_eq!(client.describe(), "http://127.0.0.1:9/index.json");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_external_service_error() {
        // Port 9 (discard) is not expected to be listening on loopback
        let config = IndexConfig {
            url: "http://127.0.0.1:9/index.json".to_string(),
            request_timeout: Duration::from_secs(2),
            user_agent: "test-agent".to_string(),
        };
        let client = GeofabrikClient::new(&config).unwrap();

        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}
