//! Developer settings: the override record and its stores
//!
//! The record is deliberately flat: a handful of optional values a
//! developer pins for a local install. Stores are injected into the
//! override controller as trait objects, so nothing in the core reaches
//! for ambient state.

mod record;
mod store;

pub use record::DevSettings;
pub use store::{MemorySettingStore, SettingStore, TomlSettingStore};

pub(crate) use record::non_empty;
