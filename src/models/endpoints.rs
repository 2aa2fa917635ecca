use serde::Serialize;
use serde_json::{Map, Value};

use super::Setting;

/// The provider endpoints extracted from a discovery document.
///
/// A field the document omits (or does not give as a string) is `None`; that
/// is still a complete result and is cached as such.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveredEndpoints {
    pub authorization_endpoint: Option<String>,
    pub token_endpoint: Option<String>,
    pub userinfo_endpoint: Option<String>,
}

impl DiscoveredEndpoints {
    pub fn from_document(document: &Map<String, Value>) -> Self {
        let field = |name: &str| {
            document
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            authorization_endpoint: field("authorization_endpoint"),
            token_endpoint: field("token_endpoint"),
            userinfo_endpoint: field("userinfo_endpoint"),
        }
    }

    pub fn get(&self, setting: Setting) -> Option<&str> {
        match setting {
            Setting::AuthorizationUrl => self.authorization_endpoint.as_deref(),
            Setting::TokenUrl => self.token_endpoint.as_deref(),
            Setting::UserInfoUrl => self.userinfo_endpoint.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> Map<String, Value> {
        let Value::Object(map) = value else {
            panic!("test documents must be objects");
        };
        map
    }

    #[test]
    fn extracts_the_three_endpoints_and_ignores_the_rest() {
        let endpoints = DiscoveredEndpoints::from_document(&document(json!({
            "issuer": "https://idp.example.com",
            "authorization_endpoint": "A",
            "token_endpoint": "T",
            "userinfo_endpoint": "U",
            "jwks_uri": "https://idp.example.com/keys",
        })));

        assert_eq!(endpoints.get(Setting::AuthorizationUrl), Some("A"));
        assert_eq!(endpoints.get(Setting::TokenUrl), Some("T"));
        assert_eq!(endpoints.get(Setting::UserInfoUrl), Some("U"));
    }

    #[test]
    fn missing_and_non_string_fields_are_absent() {
        let endpoints = DiscoveredEndpoints::from_document(&document(json!({
            "authorization_endpoint": "A",
            "token_endpoint": null,
            "userinfo_endpoint": 42,
        })));

        assert_eq!(
            endpoints,
            DiscoveredEndpoints {
                authorization_endpoint: Some("A".to_string()),
                token_endpoint: None,
                userinfo_endpoint: None,
            }
        );
    }

    #[test]
    fn static_settings_are_not_endpoints() {
        let endpoints = DiscoveredEndpoints::from_document(&document(json!({
            "authorization_endpoint": "A",
        })));
        assert_eq!(endpoints.get(Setting::DiscoveryUrl), None);
    }
}
