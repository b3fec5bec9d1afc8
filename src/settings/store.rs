//! Setting stores
//!
//! File discovery follows the usual dotfile conventions: a project-local
//! file, then an environment variable, then the user config directory.

use crate::settings::record::{non_empty, DevSettings};
use crate::types::{Result, SettingsError};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

/// Source of the developer override record.
///
/// Injected into the override controller as an explicit dependency.
pub trait SettingStore: Send + Sync {
    /// Current override record.
    fn get(&self) -> DevSettings;

    /// Configured Search Console property ID, if any. An empty string
    /// counts as unconfigured.
    fn search_console_property_id(&self) -> Option<String> {
        let settings = self.get();
        non_empty(&settings.search_console_property_id).map(str::to_string)
    }
}

/// Store backed by a TOML settings file, read once at startup.
pub struct TomlSettingStore {
    settings: DevSettings,
}

impl TomlSettingStore {
    /// Loads the record from an explicit file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        debug!("Loading dev settings from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let settings: DevSettings = toml::from_str(&content)?;

        Ok(Self { settings })
    }

    /// Discovers a settings file in the conventional locations.
    ///
    /// Tried in order:
    /// 1. `./.sitekit-dev.toml` (project-specific)
    /// 2. `$SITEKIT_DEV_SETTINGS` (environment variable)
    /// 3. `<config_dir>/sitekit-dev-settings/config.toml` (user-global)
    ///
    /// A missing file is not an error; every override simply stays
    /// inactive.
    pub fn discover() -> Result<Self> {
        let mut candidates = Vec::new();

        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(".sitekit-dev.toml"));
        }

        if let Ok(config_path) = std::env::var("SITEKIT_DEV_SETTINGS") {
            candidates.push(PathBuf::from(config_path));
        }

        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("sitekit-dev-settings").join("config.toml"));
        }

        for path in &candidates {
            if path.exists() {
                info!("Using dev settings file: {}", path.display());
                return Self::from_path(path);
            }
        }

        debug!("No dev settings file found, overrides inactive");
        Ok(Self {
            settings: DevSettings::default(),
        })
    }
}

impl SettingStore for TomlSettingStore {
    fn get(&self) -> DevSettings {
        self.settings.clone()
    }
}

/// Mutable in-memory store, for tests and embedding.
#[derive(Default)]
pub struct MemorySettingStore {
    settings: RwLock<DevSettings>,
}

impl MemorySettingStore {
    pub fn new(settings: DevSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    /// Replaces the record. Filter values a controller has already
    /// memoized are unaffected; the cache is sticky for its lifetime.
    pub fn set(&self, settings: DevSettings) {
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = settings;
    }
}

impl SettingStore for MemorySettingStore {
    fn get(&self) -> DevSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
