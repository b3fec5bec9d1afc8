use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Priority the host framework assigns when a registrant does not ask
/// for one.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Runs ahead of every default-priority registrant.
pub const EARLY_PRIORITY: i32 = 1;

type FilterFn = Box<dyn Fn(Value) -> Value + Send + Sync>;

/// Value-transform callbacks keyed by filter name.
///
/// Within a name, callbacks run in ascending priority; ties run in
/// registration order. A name with no registrants passes values through
/// untouched.
#[derive(Default)]
pub struct FilterRegistry {
    filters: HashMap<String, BTreeMap<i32, Vec<FilterFn>>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` on the filter `name` at `priority` (lower
    /// runs first).
    pub fn add_filter<F>(&mut self, name: &str, priority: i32, callback: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        debug!("Adding filter on '{}' at priority {}", name, priority);

        self.filters
            .entry(name.to_string())
            .or_default()
            .entry(priority)
            .or_default()
            .push(Box::new(callback));
    }

    /// Runs `value` through every callback registered on `name`.
    pub fn apply(&self, name: &str, value: Value) -> Value {
        let by_priority = match self.filters.get(name) {
            Some(by_priority) => by_priority,
            None => return value,
        };

        let mut value = value;
        for callbacks in by_priority.values() {
            for callback in callbacks {
                value = callback(value);
            }
        }

        value
    }

    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Registered filter names, for diagnostics.
    pub fn filter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
