use std::time::Duration;

use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::ConfigError;
use crate::operations::DiscoverySource;

/// Fetches discovery documents over HTTP.
///
/// Requests have no timeout unless one is set with [`RemoteDiscovery::with_timeout`].
#[derive(Clone, Debug, Default)]
pub struct RemoteDiscovery {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl RemoteDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait::async_trait]
impl DiscoverySource for RemoteDiscovery {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_document(&self, url: &str) -> Result<Map<String, Value>, ConfigError> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let body = request.send().await?.error_for_status()?.bytes().await?;

        let document: Value = serde_json::from_slice(&body)
            .map_err(|e| ConfigError::DiscoveryParse(e.to_string()))?;

        let Value::Object(document) = document else {
            return Err(ConfigError::DiscoveryParse(
                "expected the document to be a JSON object".to_string(),
            ));
        };

        Ok(document)
    }
}
