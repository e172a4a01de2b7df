//! Runtime configuration.
//!
//! Reads the `[atlas]` section from `config/default.toml`, then applies
//! `ATLAS_DATA_DIR` / `ATLAS_LOG_LEVEL` overrides.  A missing or malformed
//! file is not an error: the built-in defaults are used and the reason is
//! kept so it can be logged once tracing is up.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default location of the configuration file, relative to the working
/// directory.
pub const CONFIG_PATH: &str = "config/default.toml";

/// Settings loaded from the `[atlas]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Directory holding the SQLite database.
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`.
    pub database_file: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            database_file: "atlas.db".into(),
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    atlas: Option<AtlasConfig>,
}

/// A loaded configuration plus the reason defaults were used, if any.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AtlasConfig,
    pub fallback_reason: Option<String>,
}

impl AtlasConfig {
    /// Load the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> LoadedConfig {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                return LoadedConfig {
                    config: Self::default(),
                    fallback_reason: Some(format!("cannot read {}: {e}", path.display())),
                };
            }
        };
        Self::parse(&content)
    }

    /// Parse configuration text.
    pub fn parse(content: &str) -> LoadedConfig {
        match toml::from_str::<ConfigFile>(content) {
            Ok(ConfigFile {
                atlas: Some(config),
            }) => LoadedConfig {
                config,
                fallback_reason: None,
            },
            Ok(ConfigFile { atlas: None }) => LoadedConfig {
                config: Self::default(),
                fallback_reason: Some("no [atlas] section".into()),
            },
            Err(e) => LoadedConfig {
                config: Self::default(),
                fallback_reason: Some(format!("invalid configuration: {e}")),
            },
        }
    }

    /// Apply `ATLAS_*` overrides.  `lookup` returns non-empty values only.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("ATLAS_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("ATLAS_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }
}

/// Read a non-empty environment variable.
pub fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_section() {
        let loaded = AtlasConfig::parse(
            r#"
            [atlas]
            data_dir = "/var/lib/atlas"
            database_file = "registry.db"
            log_level = "debug"
            "#,
        );
        assert!(loaded.fallback_reason.is_none());
        assert_eq!(
            loaded.config.database_path(),
            PathBuf::from("/var/lib/atlas/registry.db")
        );
        assert_eq!(loaded.config.log_level, "debug");
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let loaded = AtlasConfig::parse("[atlas]\nlog_level = \"warn\"\n");
        assert!(loaded.fallback_reason.is_none());
        assert_eq!(loaded.config.data_dir, PathBuf::from("data"));
        assert_eq!(loaded.config.database_file, "atlas.db");
        assert_eq!(loaded.config.log_level, "warn");
    }

    #[test]
    fn missing_section_falls_back() {
        let loaded = AtlasConfig::parse("[other]\nkey = 1\n");
        assert_eq!(loaded.config, AtlasConfig::default());
        assert_eq!(loaded.fallback_reason.as_deref(), Some("no [atlas] section"));
    }

    #[test]
    fn malformed_file_falls_back() {
        let loaded = AtlasConfig::parse("[atlas\n");
        assert_eq!(loaded.config, AtlasConfig::default());
        assert!(loaded.fallback_reason.unwrap().starts_with("invalid configuration"));
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AtlasConfig::load(dir.path().join("absent.toml"));
        assert_eq!(loaded.config, AtlasConfig::default());
        assert!(loaded.fallback_reason.is_some());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        std::fs::write(&path, "[atlas]\ndatabase_file = \"x.db\"\n").unwrap();
        let loaded = AtlasConfig::load(&path);
        assert_eq!(loaded.config.database_file, "x.db");
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = AtlasConfig::default();
        config.apply_overrides(|name| match name {
            "ATLAS_DATA_DIR" => Some("/tmp/atlas".into()),
            _ => None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/tmp/atlas"));
        assert_eq!(config.log_level, "info");
    }
}
