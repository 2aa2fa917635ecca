use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::env::EnvSettings;
use crate::error::ConfigError;
use crate::models::{DiscoveredEndpoints, Setting};
use crate::operations::discovery_source::remote::RemoteDiscovery;
use crate::operations::{Configurator, DiscoverySource};

#[derive(Clone, Debug, PartialEq, Eq)]
enum DiscoveryState {
    NotAttempted,
    Populated(DiscoveredEndpoints),
}

/// Static settings plus the endpoints discovered from the identity provider.
///
/// Discovery runs lazily, the first time any discovered setting is read, and
/// its result is kept for the life of the resolver. The state lock is held for
/// the whole check-fetch-store sequence, so concurrent readers share a single
/// in-flight fetch instead of racing to issue their own. A failed fetch leaves
/// the state untouched and the next read tries again.
pub struct ConfigResolver<S: DiscoverySource = RemoteDiscovery> {
    settings: EnvSettings,
    source: S,
    state: Mutex<DiscoveryState>,
}

impl ConfigResolver {
    pub fn from_env() -> Self {
        Self::new(EnvSettings::from_env(), RemoteDiscovery::new())
    }
}

impl<S: DiscoverySource> ConfigResolver<S> {
    pub fn new(settings: EnvSettings, source: S) -> Self {
        Self {
            settings,
            source,
            state: Mutex::new(DiscoveryState::NotAttempted),
        }
    }

    pub fn settings(&self) -> &EnvSettings {
        &self.settings
    }

    /// Whether a discovery document has been fetched and stored.
    pub async fn is_discovered(&self) -> bool {
        matches!(*self.state.lock().await, DiscoveryState::Populated(_))
    }

    async fn discover(&self, setting: Setting) -> Result<Option<String>, ConfigError> {
        let mut state = self.state.lock().await;

        if let DiscoveryState::Populated(endpoints) = &*state {
            return Ok(endpoints.get(setting).map(str::to_string));
        }

        let Some(url) = self.settings.discovery_url() else {
            debug!(%setting, "no discovery url configured, skipping OIDC discovery");
            return Ok(None);
        };

        info!(url, "fetching OIDC discovery document");
        let document = match self.source.fetch_document(url).await {
            Ok(document) => document,
            Err(e) => {
                warn!(url, error = %e, "OIDC discovery failed");
                return Err(e);
            }
        };

        let endpoints = DiscoveredEndpoints::from_document(&document);
        info!(
            authorization_endpoint = ?endpoints.authorization_endpoint,
            token_endpoint = ?endpoints.token_endpoint,
            userinfo_endpoint = ?endpoints.userinfo_endpoint,
            "stored discovered OIDC endpoints"
        );

        let value = endpoints.get(setting).map(str::to_string);
        *state = DiscoveryState::Populated(endpoints);
        Ok(value)
    }
}

#[async_trait::async_trait]
impl<S: DiscoverySource> Configurator for ConfigResolver<S> {
    fn get_static(&self, setting: Setting) -> Option<&str> {
        self.settings.get(setting)
    }

    async fn get_discovered(&self, setting: Setting) -> Result<Option<String>, ConfigError> {
        if !setting.is_discovered() {
            return Ok(None);
        }

        self.discover(setting).await
    }
}

impl<S: DiscoverySource + std::fmt::Debug> std::fmt::Debug for ConfigResolver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formatter = f.debug_struct("ConfigResolver");
        formatter.field("settings", &self.settings);
        formatter.field("source", &self.source);
        if let Ok(state) = self.state.try_lock() {
            formatter.field("state", &*state);
        }
        formatter.finish()
    }
}
