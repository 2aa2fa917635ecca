use std::collections::HashMap;

use uuid::Uuid;

use crate::models::Setting;

const SESSION_TYPE: &str = "cachelib";

/// Settings taken from the environment once, at construction.
#[derive(Clone)]
pub struct EnvSettings {
    default_permission: String,
    secret_key: String,
    users_db_uri: String,
    group_name: String,
    admin_group_name: String,
    provider_display_name: String,
    groups_attribute: String,
    scope: String,
    group_detection_plugin: Option<String>,
    redirect_uri: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    discovery_url: Option<String>,
}

impl EnvSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an explicit list of variables instead of the
    /// process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();

        Self::from_lookup(|name| vars.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |setting: Setting| lookup(setting.name());
        let var_or = |setting: Setting, default: &str| {
            var(setting).unwrap_or_else(|| default.to_string())
        };

        Self {
            default_permission: var_or(Setting::DefaultPermission, "MANAGE"),
            // 32 hex characters, regenerated for every process that doesn't set one
            secret_key: var(Setting::SecretKey)
                .unwrap_or_else(|| Uuid::new_v4().simple().to_string()),
            users_db_uri: var_or(Setting::UsersDbUri, "sqlite:///auth.db"),
            group_name: var_or(Setting::GroupName, "mlflow"),
            admin_group_name: var_or(Setting::AdminGroupName, "mlflow-admin"),
            provider_display_name: var_or(Setting::ProviderDisplayName, "Login with OIDC"),
            groups_attribute: var_or(Setting::GroupsAttribute, "groups"),
            scope: var_or(Setting::Scope, "openid,email,profile"),
            group_detection_plugin: var(Setting::GroupDetectionPlugin),
            redirect_uri: var(Setting::RedirectUri),
            client_id: var(Setting::ClientId),
            client_secret: var(Setting::ClientSecret),
            discovery_url: var(Setting::DiscoveryUrl),
        }
    }

    /// Discovered settings are never answered here.
    pub fn get(&self, setting: Setting) -> Option<&str> {
        match setting {
            Setting::DefaultPermission => Some(self.default_permission.as_str()),
            Setting::SecretKey => Some(self.secret_key.as_str()),
            Setting::SessionType => Some(SESSION_TYPE),
            Setting::UsersDbUri => Some(self.users_db_uri.as_str()),
            Setting::GroupName => Some(self.group_name.as_str()),
            Setting::AdminGroupName => Some(self.admin_group_name.as_str()),
            Setting::ProviderDisplayName => Some(self.provider_display_name.as_str()),
            Setting::GroupsAttribute => Some(self.groups_attribute.as_str()),
            Setting::Scope => Some(self.scope.as_str()),
            Setting::GroupDetectionPlugin => self.group_detection_plugin.as_deref(),
            Setting::RedirectUri => self.redirect_uri.as_deref(),
            Setting::ClientId => self.client_id.as_deref(),
            Setting::ClientSecret => self.client_secret.as_deref(),
            Setting::DiscoveryUrl => self.discovery_url.as_deref(),
            Setting::AuthorizationUrl | Setting::TokenUrl | Setting::UserInfoUrl => None,
        }
    }

    pub fn default_permission(&self) -> &str {
        &self.default_permission
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn session_type(&self) -> &str {
        SESSION_TYPE
    }

    pub fn users_db_uri(&self) -> &str {
        &self.users_db_uri
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn admin_group_name(&self) -> &str {
        &self.admin_group_name
    }

    pub fn provider_display_name(&self) -> &str {
        &self.provider_display_name
    }

    pub fn groups_attribute(&self) -> &str {
        &self.groups_attribute
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn group_detection_plugin(&self) -> Option<&str> {
        self.group_detection_plugin.as_deref()
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn discovery_url(&self) -> Option<&str> {
        self.discovery_url.as_deref()
    }
}

impl Default for EnvSettings {
    fn default() -> Self {
        EnvSettings::from_env()
    }
}

impl std::fmt::Debug for EnvSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formatter = f.debug_struct("EnvSettings");
        for setting in Setting::ALL {
            if setting.is_discovered() {
                continue;
            }

            let value = self.get(setting);
            if setting.is_secret() && value.is_some() {
                formatter.field(setting.name(), &"<redacted>");
            } else {
                formatter.field(setting.name(), &value);
            }
        }
        formatter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars() -> EnvSettings {
        EnvSettings::from_vars(Vec::<(String, String)>::new())
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let settings = no_vars();

        assert_eq!(settings.default_permission(), "MANAGE");
        assert_eq!(settings.users_db_uri(), "sqlite:///auth.db");
        assert_eq!(settings.group_name(), "mlflow");
        assert_eq!(settings.admin_group_name(), "mlflow-admin");
        assert_eq!(settings.provider_display_name(), "Login with OIDC");
        assert_eq!(settings.groups_attribute(), "groups");
        assert_eq!(settings.scope(), "openid,email,profile");
        assert_eq!(settings.session_type(), "cachelib");

        assert_eq!(settings.group_detection_plugin(), None);
        assert_eq!(settings.redirect_uri(), None);
        assert_eq!(settings.client_id(), None);
        assert_eq!(settings.client_secret(), None);
        assert_eq!(settings.discovery_url(), None);
    }

    #[test]
    fn set_variables_win_over_defaults() {
        let settings = EnvSettings::from_vars([
            ("DEFAULT_MLFLOW_PERMISSION", "READ"),
            ("OIDC_GROUP_NAME", "ml-team"),
            ("OIDC_SCOPE", "openid,groups"),
            ("OIDC_CLIENT_ID", "client-1"),
            ("OIDC_DISCOVERY_URL", "https://idp.test/.well-known/openid-configuration"),
        ]);

        assert_eq!(settings.get(Setting::DefaultPermission), Some("READ"));
        assert_eq!(settings.get(Setting::GroupName), Some("ml-team"));
        assert_eq!(settings.get(Setting::Scope), Some("openid,groups"));
        assert_eq!(settings.get(Setting::ClientId), Some("client-1"));
        assert_eq!(
            settings.get(Setting::DiscoveryUrl),
            Some("https://idp.test/.well-known/openid-configuration")
        );
        assert_eq!(settings.get(Setting::AdminGroupName), Some("mlflow-admin"));
    }

    #[test]
    fn discovered_settings_are_not_static() {
        let settings = EnvSettings::from_vars([("OIDC_AUTHORIZATION_URL", "https://sneaky")]);
        assert_eq!(settings.get(Setting::AuthorizationUrl), None);
        assert_eq!(settings.get(Setting::TokenUrl), None);
        assert_eq!(settings.get(Setting::UserInfoUrl), None);
    }

    #[test]
    fn generated_secret_key_is_stable_per_instance() {
        let first = no_vars();
        let second = no_vars();

        assert_eq!(first.secret_key(), first.secret_key());
        assert_eq!(first.secret_key().len(), 32);
        assert!(first.secret_key().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first.secret_key(), second.secret_key());
    }

    #[test]
    fn configured_secret_key_is_used_verbatim() {
        let settings = EnvSettings::from_vars([("SECRET_KEY", "hunter2")]);
        assert_eq!(settings.secret_key(), "hunter2");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let settings = EnvSettings::from_vars([
            ("SECRET_KEY", "hunter2"),
            ("OIDC_CLIENT_SECRET", "s3cr3t"),
            ("OIDC_CLIENT_ID", "client-1"),
        ]);

        let debug = format!("{:?}", settings);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("client-1"));
        assert!(debug.contains("<redacted>"));
    }
}
