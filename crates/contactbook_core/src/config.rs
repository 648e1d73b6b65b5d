//! Store configuration.
//!
//! # Invariants
//! - `page_size` is always at least 1.
//! - Environment overrides that fail to parse are ignored, not fatal.

use log::warn;

pub const DEFAULT_AUTH_KEY: &str = "auth";
pub const DEFAULT_CONTACTS_KEY: &str = "contacts";
pub const DEFAULT_PAGE_SIZE: usize = 5;

pub const ENV_AUTH_KEY: &str = "CONTACTBOOK_AUTH_KEY";
pub const ENV_CONTACTS_KEY: &str = "CONTACTBOOK_CONTACTS_KEY";
pub const ENV_PAGE_SIZE: &str = "CONTACTBOOK_PAGE_SIZE";

/// Storage keys and view defaults used by `AppStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Entry holding `{users, currentUserId, remember}`.
    pub auth_key: String,
    /// Entry holding `{byUserId}`.
    pub contacts_key: String,
    /// Rows per page for contact list views.
    pub page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            auth_key: DEFAULT_AUTH_KEY.to_string(),
            contacts_key: DEFAULT_CONTACTS_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StoreConfig {
    /// Builds a config from defaults overridden by `CONTACTBOOK_*` variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from defaults overridden by `lookup(name)` values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(key) = non_empty(lookup(ENV_AUTH_KEY)) {
            config.auth_key = key;
        }
        if let Some(key) = non_empty(lookup(ENV_CONTACTS_KEY)) {
            config.contacts_key = key;
        }
        if let Some(raw) = non_empty(lookup(ENV_PAGE_SIZE)) {
            match raw.parse::<usize>() {
                Ok(size) if size > 0 => config.page_size = size,
                _ => warn!(
                    "event=config_override module=config status=skipped var={ENV_PAGE_SIZE} reason=invalid_value"
                ),
            }
        }

        config
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_persisted_layout() {
        let config = StoreConfig::default();
        assert_eq!(config.auth_key, "auth");
        assert_eq!(config.contacts_key, "contacts");
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn lookup_overrides_apply_and_invalid_page_size_is_ignored() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("CONTACTBOOK_AUTH_KEY", " auth_v2 "),
            ("CONTACTBOOK_PAGE_SIZE", "10"),
        ]));
        assert_eq!(config.auth_key, "auth_v2");
        assert_eq!(config.contacts_key, "contacts");
        assert_eq!(config.page_size, 10);

        let config = StoreConfig::from_lookup(lookup(&[("CONTACTBOOK_PAGE_SIZE", "0")]));
        assert_eq!(config.page_size, 5);
        let config = StoreConfig::from_lookup(lookup(&[("CONTACTBOOK_PAGE_SIZE", "five")]));
        assert_eq!(config.page_size, 5);
    }
}
