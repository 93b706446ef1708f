//! Read access to environment variables
//!
//! Step inputs and cache client settings all arrive through the
//! environment. The repository trait keeps that source swappable.

use std::collections::BTreeMap;

/// Read-only view of an environment
pub trait EnvRepository: Send + Sync {
    /// Value of `key`, or `None` when unset
    fn get(&self, key: &str) -> Option<String>;

    /// All variables, sorted by name
    fn list(&self) -> Vec<(String, String)>;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnvRepository;

impl EnvRepository for OsEnvRepository {
    fn get(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values are treated as unset
        std::env::var(key).ok()
    }

    fn list(&self) -> Vec<(String, String)> {
        let mut vars: Vec<_> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        vars.sort();
        vars
    }
}

/// In-memory environment
#[derive(Debug, Clone, Default)]
pub struct MapEnvRepository {
    vars: BTreeMap<String, String>,
}

impl MapEnvRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvRepository {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvRepository for MapEnvRepository {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn list(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
