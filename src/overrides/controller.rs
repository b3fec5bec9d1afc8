//! The override controller
//!
//! Registers interception points that substitute developer-supplied
//! values on three independent configuration surfaces: the reported
//! site URL, the OAuth client secret, and the Search Console property
//! ID. String overrides are computed once per controller lifetime;
//! everything else passes through untouched.

use crate::hooks::{FilterRegistry, DEFAULT_PRIORITY, EARLY_PRIORITY};
use crate::overrides::client_secret::client_secret_json;
use crate::settings::{non_empty, SettingStore};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};
use url::Url;

/// Filter carrying the site URL the host reports for this install.
pub const SITE_URL_FILTER: &str = "sitekit_site_url";

/// Filter carrying the OAuth client-secret JSON document.
pub const OAUTH_SECRET_FILTER: &str = "sitekit_oauth_secret";

/// Read-side filter for the persisted Search Console settings blob.
pub const SEARCH_CONSOLE_SETTINGS_FILTER: &str = "option_sitekit_search_console_settings";

/// Pre-persist filter for the same blob.
pub const PRE_UPDATE_SEARCH_CONSOLE_SETTINGS_FILTER: &str =
    "pre_update_option_sitekit_search_console_settings";

/// Settings key the property-ID override writes.
const PROPERTY_ID_KEY: &str = "propertyID";

/// Computes developer-mode override values and supplies them through
/// the host's filters.
pub struct OverrideController {
    setting: Arc<dyn SettingStore>,
    home_url: Url,

    /// Filter name -> computed override, to reduce regeneration
    /// overhead. Sticky for the controller's lifetime; an empty string
    /// means "no override".
    filter_values: Mutex<HashMap<&'static str, String>>,
}

impl OverrideController {
    pub fn new(setting: Arc<dyn SettingStore>, home_url: Url) -> Self {
        Self {
            setting,
            home_url,
            filter_values: Mutex::new(HashMap::new()),
        }
    }

    /// Wires the override filters into `filters`.
    ///
    /// Call once during startup, before the host resolves any of the
    /// intercepted names.
    pub fn register(self: Arc<Self>, filters: &mut FilterRegistry) {
        let controller = Arc::clone(&self);
        filters.add_filter(SITE_URL_FILTER, EARLY_PRIORITY, move |value| {
            controller.filter_site_url(value)
        });

        let controller = Arc::clone(&self);
        filters.add_filter(OAUTH_SECRET_FILTER, EARLY_PRIORITY, move |value| {
            controller.filter_oauth_secret(value)
        });

        let controller = Arc::clone(&self);
        filters.add_filter(SEARCH_CONSOLE_SETTINGS_FILTER, DEFAULT_PRIORITY, move |value| {
            controller.maybe_override_property_id(value)
        });

        // Must run before the host's owned-keys bookkeeping, so the
        // override is never taken for a user-initiated change.
        let controller = self;
        filters.add_filter(
            PRE_UPDATE_SEARCH_CONSOLE_SETTINGS_FILTER,
            EARLY_PRIORITY,
            move |value| controller.maybe_override_property_id(value),
        );

        info!("Developer overrides registered");
    }

    /// Site URL filter: the cached override when one is configured,
    /// else the input unchanged.
    pub fn filter_site_url(&self, value: Value) -> Value {
        self.filter_cached(SITE_URL_FILTER, value, || self.site_url_override())
    }

    /// OAuth client-secret filter: the cached document when both
    /// credentials are configured, else the input unchanged.
    pub fn filter_oauth_secret(&self, value: Value) -> Value {
        self.filter_cached(OAUTH_SECRET_FILTER, value, || self.oauth_secret_override())
    }

    /// Enforces the configured property ID, if any.
    ///
    /// Without a configured ID the input is returned untouched, however
    /// malformed. With one, a non-object input is replaced by an empty
    /// object before the key is set.
    pub fn maybe_override_property_id(&self, settings: Value) -> Value {
        let property_id = match self.setting.search_console_property_id() {
            Some(property_id) => property_id,
            None => return settings,
        };

        let mut map = match settings {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        map.insert(PROPERTY_ID_KEY.to_string(), Value::String(property_id));

        Value::Object(map)
    }

    fn filter_cached(
        &self,
        name: &'static str,
        value: Value,
        compute: impl FnOnce() -> String,
    ) -> Value {
        let mut cache = self
            .filter_values
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let cached = cache.entry(name).or_insert_with(|| {
            debug!("Computing override value for '{}'", name);
            compute()
        });

        if cached.is_empty() {
            value
        } else {
            Value::String(cached.clone())
        }
    }

    /// Sanitized developer site URL, or empty when unset or
    /// unparseable.
    fn site_url_override(&self) -> String {
        let settings = self.setting.get();
        let raw = match non_empty(&settings.site_url) {
            Some(raw) => raw,
            None => return String::new(),
        };

        match Url::parse(raw) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!("Ignoring unparseable site_url override '{}': {}", raw, e);
                String::new()
            }
        }
    }

    /// Client-secret document, or empty unless both credentials are
    /// configured.
    fn oauth_secret_override(&self) -> String {
        let settings = self.setting.get();
        let (client_id, client_secret) = match (
            non_empty(&settings.oauth2_client_id),
            non_empty(&settings.oauth2_client_secret),
        ) {
            (Some(client_id), Some(client_secret)) => (client_id, client_secret),
            _ => return String::new(),
        };

        client_secret_json(client_id, client_secret, &self.home_url)
    }
}
