//! Developer-mode configuration overrides for Site Kit installs
//!
//! This crate lets a developer pin a site URL, OAuth client credentials,
//! and a Search Console property ID from a local settings file, and makes
//! those values win over whatever the host plugin would otherwise compute
//! or persist, by intercepting the host's named filters.

pub mod hooks;
pub mod overrides;
pub mod settings;
pub mod types;

pub use hooks::FilterRegistry;
pub use overrides::OverrideController;
pub use settings::{DevSettings, MemorySettingStore, SettingStore, TomlSettingStore};
pub use types::SettingsError;
