//! Override controller: computes developer-mode values and wires them
//! into the host's filters.

mod client_secret;
mod controller;

pub use controller::{
    OverrideController, OAUTH_SECRET_FILTER, PRE_UPDATE_SEARCH_CONSOLE_SETTINGS_FILTER,
    SEARCH_CONSOLE_SETTINGS_FILTER, SITE_URL_FILTER,
};
