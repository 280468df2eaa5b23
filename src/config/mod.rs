use dashmap::DashMap;
use serde_json::Value;
use std::env;
use std::sync::Arc;

/// Configuration service
///
/// Holds dotted keys (`db.default.driver`) mapped to string values. Keys are
/// consumed opaquely by collaborators such as connection-pool setup; no schema
/// is enforced here.
#[derive(Clone, Default)]
pub struct Config {
    entries: Arc<DashMap<String, String>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration seeded from the process environment.
    pub fn from_env() -> Self {
        let config = Self::default();
        for (key, value) in env::vars() {
            config.set(&key, &value);
        }
        config
    }

    /// Flatten a JSON tree into dotted keys.
    ///
    /// `{"db": {"default": {"driver": "org.h2.Driver"}}}` becomes
    /// `db.default.driver = org.h2.Driver`.
    pub fn from_json(tree: &Value) -> Self {
        let config = Self::default();
        config.merge_json("", tree);
        config
    }

    /// Merge a JSON subtree under `prefix`, overwriting existing keys.
    pub fn merge_json(&self, prefix: &str, tree: &Value) {
        match tree {
            Value::Object(map) => {
                for (key, value) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    self.merge_json(&path, value);
                }
            }
            Value::Null => {}
            Value::String(value) => self.set(prefix, value),
            other => self.set(prefix, &other.to_string()),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.clone())
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    /// All keys below a dotted prefix, e.g. `db.default`.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let needle = format!("{prefix}.");
        self.entries
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|key| key.starts_with(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flattens_json_tree() {
        let config = Config::from_json(&json!({
            "db": {
                "default": {
                    "driver": "org.h2.Driver",
                    "url": "jdbc:h2:mem:standalone",
                    "pool": { "max": 8 }
                }
            },
            "verbose": true
        }));

        assert_eq!(config.get("db.default.driver").as_deref(), Some("org.h2.Driver"));
        assert_eq!(config.get("db.default.pool.max").as_deref(), Some("8"));
        assert_eq!(config.get("verbose").as_deref(), Some("true"));
        assert_eq!(config.get("db.default"), None);
    }

    #[test]
    fn test_get_or_falls_back() {
        let config = Config::new();
        config.set("db.default.user", "sa");

        assert_eq!(config.get_or("db.default.user", "root"), "sa");
        assert_eq!(config.get_or("db.default.password", ""), "");
    }

    #[test]
    fn test_prefix_query() {
        let config = Config::new();
        config.set("db.default.driver", "org.h2.Driver");
        config.set("db.default.url", "jdbc:h2:mem:standalone");
        config.set("db.reporting.driver", "org.postgresql.Driver");

        let mut keys = config.keys_with_prefix("db.default");
        keys.sort();
        assert_eq!(keys, vec!["db.default.driver", "db.default.url"]);
    }

    #[test]
    fn test_set_overwrites() {
        let config = Config::new();
        config.set("mode", "dev");
        config.set("mode", "prod");
        assert_eq!(config.get("mode").as_deref(), Some("prod"));
    }
}
