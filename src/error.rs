use thiserror::Error;

use crate::models::Setting;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The setting has no value and no default; whatever needs it is disabled.
    #[error("{0} is not configured")]
    ConfigurationAbsent(Setting),

    #[error("failed to fetch the OIDC discovery document: {0}")]
    DiscoveryTransport(#[from] reqwest::Error),

    #[error("failed to parse the OIDC discovery document: {0}")]
    DiscoveryParse(String),

    #[error("unknown property {0:?}")]
    UnknownPropertyName(String),

    #[error("{setting} is not a valid url: {source}")]
    InvalidUrl {
        setting: Setting,
        #[source]
        source: url::ParseError,
    },
}

impl ConfigError {
    /// Errors raised while talking to the identity provider. These are never
    /// cached, so the next read that needs discovery tries again.
    pub fn is_discovery_failure(&self) -> bool {
        matches!(
            self,
            ConfigError::DiscoveryTransport(_) | ConfigError::DiscoveryParse(_)
        )
    }
}
