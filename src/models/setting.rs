use std::{fmt::Display, str::FromStr};

use crate::error::ConfigError;

/// Every named property the resolver can answer for.
///
/// Names are the environment variable names; the three discovered settings are
/// never read from the environment and are only known after discovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Setting {
    DefaultPermission,
    SecretKey,
    SessionType,
    UsersDbUri,
    GroupName,
    AdminGroupName,
    ProviderDisplayName,
    GroupsAttribute,
    Scope,
    GroupDetectionPlugin,
    RedirectUri,
    ClientId,
    ClientSecret,
    DiscoveryUrl,
    AuthorizationUrl,
    TokenUrl,
    UserInfoUrl,
}

impl Setting {
    pub const ALL: [Setting; 17] = [
        Setting::DefaultPermission,
        Setting::SecretKey,
        Setting::SessionType,
        Setting::UsersDbUri,
        Setting::GroupName,
        Setting::AdminGroupName,
        Setting::ProviderDisplayName,
        Setting::GroupsAttribute,
        Setting::Scope,
        Setting::GroupDetectionPlugin,
        Setting::RedirectUri,
        Setting::ClientId,
        Setting::ClientSecret,
        Setting::DiscoveryUrl,
        Setting::AuthorizationUrl,
        Setting::TokenUrl,
        Setting::UserInfoUrl,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Setting::DefaultPermission => "DEFAULT_MLFLOW_PERMISSION",
            Setting::SecretKey => "SECRET_KEY",
            Setting::SessionType => "SESSION_TYPE",
            Setting::UsersDbUri => "OIDC_USERS_DB_URI",
            Setting::GroupName => "OIDC_GROUP_NAME",
            Setting::AdminGroupName => "OIDC_ADMIN_GROUP_NAME",
            Setting::ProviderDisplayName => "OIDC_PROVIDER_DISPLAY_NAME",
            Setting::GroupsAttribute => "OIDC_GROUPS_ATTRIBUTE",
            Setting::Scope => "OIDC_SCOPE",
            Setting::GroupDetectionPlugin => "OIDC_GROUP_DETECTION_PLUGIN",
            Setting::RedirectUri => "OIDC_REDIRECT_URI",
            Setting::ClientId => "OIDC_CLIENT_ID",
            Setting::ClientSecret => "OIDC_CLIENT_SECRET",
            Setting::DiscoveryUrl => "OIDC_DISCOVERY_URL",
            Setting::AuthorizationUrl => "OIDC_AUTHORIZATION_URL",
            Setting::TokenUrl => "OIDC_TOKEN_URL",
            Setting::UserInfoUrl => "OIDC_USER_URL",
        }
    }

    /// Settings extracted from the provider's discovery document.
    pub fn is_discovered(&self) -> bool {
        matches!(
            self,
            Setting::AuthorizationUrl | Setting::TokenUrl | Setting::UserInfoUrl
        )
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Setting::SecretKey | Setting::ClientSecret)
    }
}

impl Display for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Setting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Setting::ALL
            .iter()
            .copied()
            .find(|setting| setting.name() == s)
            .ok_or_else(|| ConfigError::UnknownPropertyName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for setting in Setting::ALL {
            assert_eq!(setting.name().parse::<Setting>().unwrap(), setting);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let Err(ConfigError::UnknownPropertyName(name)) = "OIDC_NOPE".parse::<Setting>() else {
            panic!("expected an unknown property error");
        };
        assert_eq!(name, "OIDC_NOPE");

        // lookups are case sensitive, like attribute access
        assert!("oidc_scope".parse::<Setting>().is_err());
    }

    #[test]
    fn only_endpoint_urls_are_discovered() {
        let discovered: Vec<_> = Setting::ALL
            .iter()
            .filter(|setting| setting.is_discovered())
            .collect();
        assert_eq!(
            discovered,
            [&Setting::AuthorizationUrl, &Setting::TokenUrl, &Setting::UserInfoUrl]
        );
        assert!(!Setting::DiscoveryUrl.is_discovered());
    }
}
