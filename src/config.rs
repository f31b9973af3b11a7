/// Application configuration
///
/// Read from `<config dir>/bells-note/config.json` when present, then
/// overridden by `BELLS_NOTE_*` environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::state::library::Library;

pub const DEFAULT_TABLE: &str = "materials";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Where the catalog comes from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Hosted Supabase project, read through its REST endpoint
    Supabase {
        url: String,
        anon_key: String,
        #[serde(default = "default_table")]
        table: String,
    },
    /// Local SQLite catalog file
    Sqlite { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: Option<SourceConfig>,
    pub search_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

impl Config {
    /// Load the config file (if any), apply environment overrides and fall
    /// back to the default local catalog. Errors are logged, never fatal.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                warn!("{e}; using defaults");
                Self::default()
            }),
            _ => Self::default(),
        };

        if let Err(e) = config.apply_env(|key| std::env::var(key).ok()) {
            warn!("{e}; ignoring");
        }

        if config.source.is_none() {
            if let Some(path) = Library::default_path().filter(|p| p.exists()) {
                info!(path = %path.display(), "using default local catalog");
                config.source = Some(SourceConfig::Sqlite { path });
            }
        }

        config
    }

    /// `<config dir>/bells-note/config.json`
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("bells-note");
        path.push("config.json");
        Some(path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `BELLS_NOTE_*` overrides using `lookup` to read variables.
    ///
    /// A Supabase source needs both URL and key; a catalog path wins over
    /// both. An unparsable debounce value is reported and left unchanged.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let (Some(url), Some(anon_key)) = (
            var("BELLS_NOTE_SUPABASE_URL"),
            var("BELLS_NOTE_SUPABASE_KEY"),
        ) {
            self.source = Some(SourceConfig::Supabase {
                url,
                anon_key,
                table: var("BELLS_NOTE_TABLE").unwrap_or_else(default_table),
            });
        } else if let Some(table) = var("BELLS_NOTE_TABLE") {
            if let Some(SourceConfig::Supabase { table: current, .. }) = &mut self.source {
                *current = table;
            }
        }

        if let Some(path) = var("BELLS_NOTE_CATALOG") {
            self.source = Some(SourceConfig::Sqlite { path: path.into() });
        }

        if let Some(value) = var("BELLS_NOTE_SEARCH_DEBOUNCE_MS") {
            self.search_debounce_ms = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "BELLS_NOTE_SEARCH_DEBOUNCE_MS",
                    value: value.clone(),
                })?;
        }

        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.source, None);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_parse_supabase_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"source": {"kind": "supabase", "url": "https://demo.supabase.co", "anon_key": "anon"}}"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(
            config.source,
            Some(SourceConfig::Supabase {
                url: "https://demo.supabase.co".to_string(),
                anon_key: "anon".to_string(),
                table: "materials".to_string(),
            })
        );
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn test_parse_sqlite_file_with_debounce() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"source": {"kind": "sqlite", "path": "/tmp/catalog.db"}, "search_debounce_ms": 150}"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(
            config.source,
            Some(SourceConfig::Sqlite {
                path: PathBuf::from("/tmp/catalog.db")
            })
        );
        assert_eq!(config.search_debounce(), Duration::from_millis(150));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::from_file(&dir.path().join("missing.json")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_env_supabase_requires_url_and_key() {
        let mut config = Config::default();
        config
            .apply_env(env(&[("BELLS_NOTE_SUPABASE_URL", "https://demo.supabase.co")]))
            .unwrap();
        assert_eq!(config.source, None);

        config
            .apply_env(env(&[
                ("BELLS_NOTE_SUPABASE_URL", "https://demo.supabase.co"),
                ("BELLS_NOTE_SUPABASE_KEY", "anon"),
                ("BELLS_NOTE_TABLE", "resources"),
            ]))
            .unwrap();
        assert_eq!(
            config.source,
            Some(SourceConfig::Supabase {
                url: "https://demo.supabase.co".to_string(),
                anon_key: "anon".to_string(),
                table: "resources".to_string(),
            })
        );
    }

    #[test]
    fn test_env_catalog_overrides_supabase() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                ("BELLS_NOTE_SUPABASE_URL", "https://demo.supabase.co"),
                ("BELLS_NOTE_SUPABASE_KEY", "anon"),
                ("BELLS_NOTE_CATALOG", "/data/materials.db"),
            ]))
            .unwrap();

        assert_eq!(
            config.source,
            Some(SourceConfig::Sqlite {
                path: PathBuf::from("/data/materials.db")
            })
        );
    }

    #[test]
    fn test_env_table_alone_retargets_configured_supabase() {
        let mut config = Config {
            source: Some(SourceConfig::Supabase {
                url: "https://demo.supabase.co".to_string(),
                anon_key: "anon".to_string(),
                table: "materials".to_string(),
            }),
            ..Default::default()
        };

        config.apply_env(env(&[("BELLS_NOTE_TABLE", "archive")])).unwrap();

        assert!(matches!(
            config.source,
            Some(SourceConfig::Supabase { ref table, .. }) if table == "archive"
        ));
    }

    #[test]
    fn test_env_bad_debounce_is_reported() {
        let mut config = Config::default();

        let result = config.apply_env(env(&[("BELLS_NOTE_SEARCH_DEBOUNCE_MS", "soon")]));

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        assert_eq!(config.search_debounce_ms, 300);

        config
            .apply_env(env(&[("BELLS_NOTE_SEARCH_DEBOUNCE_MS", " 500 ")]))
            .unwrap();
        assert_eq!(config.search_debounce_ms, 500);
    }
}
