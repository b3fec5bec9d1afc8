//! Named-filter registry
//!
//! A minimal rendition of the host plugin framework's filter contract:
//! callbacks registered under a name with a numeric priority, each
//! receiving the current value and returning the replacement (or the
//! value unchanged, to pass through).

mod registry;

pub use registry::{FilterRegistry, DEFAULT_PRIORITY, EARLY_PRIORITY};
