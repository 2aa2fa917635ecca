use oauth2::basic::BasicClient;
use oauth2::{AuthUrl, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope, TokenUrl};
use serde_json::{Map, Value};
use url::Url;

use crate::error::ConfigError;
use crate::models::{Property, Setting};

pub(crate) mod configurator;
pub(crate) mod discovery_source;

/// Fetches an identity provider's discovery document.
#[async_trait::async_trait]
pub trait DiscoverySource: Send + Sync {
    async fn fetch_document(&self, url: &str) -> Result<Map<String, Value>, ConfigError>;
}

/// Read interface over static and discovered settings.
///
/// Static reads never touch the network. Discovered reads may perform the
/// discovery fetch the first time any of them is called, and surface its
/// failure to the caller.
#[async_trait::async_trait]
pub trait Configurator: Send + Sync {
    fn get_static(&self, setting: Setting) -> Option<&str>;

    async fn get_discovered(&self, setting: Setting) -> Result<Option<String>, ConfigError>;

    fn discovery_url(&self) -> Option<&str> {
        self.get_static(Setting::DiscoveryUrl)
    }

    async fn authorization_url(&self) -> Result<Option<String>, ConfigError> {
        self.get_discovered(Setting::AuthorizationUrl).await
    }

    async fn token_url(&self) -> Result<Option<String>, ConfigError> {
        self.get_discovered(Setting::TokenUrl).await
    }

    async fn userinfo_url(&self) -> Result<Option<String>, ConfigError> {
        self.get_discovered(Setting::UserInfoUrl).await
    }

    /// Look a property up by its name. Unrecognized names are reported as
    /// [`Property::Unknown`] instead of an error.
    async fn get_property(&self, name: &str) -> Result<Property, ConfigError> {
        tracing::debug!(property = name, "getting property");

        let Ok(setting) = name.parse::<Setting>() else {
            return Ok(Property::Unknown);
        };

        if setting.is_discovered() {
            return Ok(Property::Found(self.get_discovered(setting).await?));
        }

        Ok(Property::Found(self.get_static(setting).map(str::to_string)))
    }

    fn scopes(&self) -> Vec<Scope> {
        self.get_static(Setting::Scope)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|scope| !scope.is_empty())
            .map(|scope| Scope::new(scope.to_string()))
            .collect()
    }

    async fn oauth_client(&self) -> Result<BasicClient, ConfigError> {
        let client_id = self
            .get_static(Setting::ClientId)
            .ok_or(ConfigError::ConfigurationAbsent(Setting::ClientId))?;

        let auth_url = self
            .authorization_url()
            .await?
            .ok_or(ConfigError::ConfigurationAbsent(Setting::AuthorizationUrl))?;
        let auth_url = AuthUrl::new(auth_url).map_err(|source| ConfigError::InvalidUrl {
            setting: Setting::AuthorizationUrl,
            source,
        })?;

        let token_url = self
            .token_url()
            .await?
            .map(TokenUrl::new)
            .transpose()
            .map_err(|source| ConfigError::InvalidUrl {
                setting: Setting::TokenUrl,
                source,
            })?;

        let client = BasicClient::new(
            ClientId::new(client_id.to_string()),
            self.get_static(Setting::ClientSecret)
                .map(|secret| ClientSecret::new(secret.to_string())),
            auth_url,
            token_url,
        );

        let Some(redirect_uri) = self.get_static(Setting::RedirectUri) else {
            return Ok(client);
        };

        let redirect_uri = RedirectUrl::new(redirect_uri.to_string()).map_err(|source| {
            ConfigError::InvalidUrl {
                setting: Setting::RedirectUri,
                source,
            }
        })?;

        Ok(client.set_redirect_uri(redirect_uri))
    }

    /// The provider login redirect, with the configured scopes and a fresh
    /// CSRF token for the caller to keep.
    async fn authorize_url(&self) -> Result<(Url, CsrfToken), ConfigError> {
        let client = self.oauth_client().await?;
        let mut authorize_url = client.authorize_url(CsrfToken::new_random);
        for scope in self.scopes() {
            authorize_url = authorize_url.add_scope(scope);
        }

        Ok(authorize_url.url())
    }
}
