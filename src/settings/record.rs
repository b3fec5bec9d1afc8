//! The developer override record

use serde::{Deserialize, Serialize};

/// Values a developer pins for a local install.
///
/// Every field is optional, and an empty string means the same as an
/// absent field: no override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DevSettings {
    pub site_url: Option<String>,
    pub oauth2_client_id: Option<String>,
    pub oauth2_client_secret: Option<String>,
    pub search_console_property_id: Option<String>,
}

/// Returns the value only when it is set and non-empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let settings: DevSettings = toml::from_str(
            r#"
            site_url = "https://dev.example.com"
            oauth2_client_id = "id-123"
            oauth2_client_secret = "secret-456"
            search_console_property_id = "sc-prop"
            "#,
        )
        .unwrap();

        assert_eq!(settings.site_url.as_deref(), Some("https://dev.example.com"));
        assert_eq!(settings.oauth2_client_id.as_deref(), Some("id-123"));
        assert_eq!(settings.oauth2_client_secret.as_deref(), Some("secret-456"));
        assert_eq!(settings.search_console_property_id.as_deref(), Some("sc-prop"));
    }

    #[test]
    fn test_parse_partial_record() {
        let settings: DevSettings = toml::from_str(r#"site_url = "https://dev.example.com""#).unwrap();

        assert!(settings.site_url.is_some());
        assert!(settings.oauth2_client_id.is_none());
        assert!(settings.oauth2_client_secret.is_none());
        assert!(settings.search_console_property_id.is_none());
    }

    #[test]
    fn test_parse_empty_record() {
        let settings: DevSettings = toml::from_str("").unwrap();
        assert!(settings.site_url.is_none());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
    }
}
