//! Dataset location from environment variables.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "data/nfl.db";
pub const DEFAULT_PLAYS_TABLE: &str = "pbp";

/// Where the play table lives.
///
/// Environment variables:
/// - `QB_DB_PATH` (default: data/nfl.db)
/// - `QB_PLAYS_TABLE` (default: pbp)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub db_path: PathBuf,
    pub table: String,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve from any key lookup; blank values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            db_path: get("QB_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            table: get("QB_PLAYS_TABLE").unwrap_or_else(|| DEFAULT_PLAYS_TABLE.to_string()),
        }
    }

    /// Command-line values win over the environment.
    pub fn with_overrides(mut self, db_path: Option<PathBuf>, table: Option<String>) -> Self {
        if let Some(path) = db_path {
            self.db_path = path;
        }
        if let Some(table) = table {
            self.table = table;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = DashboardConfig::from_lookup(lookup(&[]));
        assert_eq!(config.db_path, PathBuf::from("data/nfl.db"));
        assert_eq!(config.table, "pbp");
    }

    #[test]
    fn env_values_and_blank_fallback() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("QB_DB_PATH", "/tmp/plays.db"),
            ("QB_PLAYS_TABLE", "  "),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/tmp/plays.db"));
        assert_eq!(config.table, "pbp");
    }

    #[test]
    fn overrides_win() {
        let config = DashboardConfig::from_lookup(lookup(&[("QB_PLAYS_TABLE", "plays")]))
            .with_overrides(Some(PathBuf::from("other.db")), None);
        assert_eq!(config.db_path, PathBuf::from("other.db"));
        assert_eq!(config.table, "plays");
    }
}
