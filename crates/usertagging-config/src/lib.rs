use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config at {config_path}: {reason}")]
    ConfigInvalid { config_path: PathBuf, reason: String },
}

/// Settings for the tagging input.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Route hosts whose routes name a taggable member.
    pub member_hosts: Vec<String>,
    /// Host used in routes of newly tagged users (`route://<host>/<id>`).
    pub route_host: String,
    /// Candidates requested per page of suggestions.
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            member_hosts: ["member_profile", "member", "user_profile"]
                .map(String::from)
                .to_vec(),
            route_host: "user".to_string(),
            page_size: 10,
        }
    }
}

impl Config {
    /// Loads the config at `config_path` (`~` and `$VARS` are expanded).
    ///
    /// Returns `Ok(None)` when no file exists there.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let config_path =
            Self::expand_path(config_path).unwrap_or_else(|| config_path.to_path_buf());
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        config
            .validate()
            .map_err(|reason| ConfigError::ConfigInvalid {
                config_path,
                reason,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Like [`Config::load_from_path`], falling back to defaults when the
    /// file is missing.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/usertagging");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn validate(&self) -> Result<(), String> {
        if self.member_hosts.iter().any(|h| !is_route_host(h)) {
            return Err(format!("member_hosts {:?} must be plain host names", self.member_hosts));
        }
        if !is_route_host(&self.route_host) {
            return Err(format!("route_host {:?} must be a plain host name", self.route_host));
        }
        if self.page_size == 0 {
            return Err("page_size must be at least 1".to_string());
        }
        Ok(())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

/// A host usable in `route://<host>/...`.
fn is_route_host(host: &str) -> bool {
    !host.is_empty()
        && !host
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '<' | '>' | '|'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/usertagging/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(
            config.member_hosts,
            vec!["member_profile", "member", "user_profile"]
        );
        assert_eq!(config.route_host, "user");
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            member_hosts: vec!["member".to_string()],
            route_host: "member".to_string(),
            page_size: 25,
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("route_host = \"member\"\n").unwrap();
        assert_eq!(config.route_host, "member");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.member_hosts.len(), 3);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();
        assert!(result.is_none());

        let fallback = Config::load_or_default(&non_existent_config).unwrap();
        assert_eq!(fallback, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            member_hosts: vec!["member".to_string(), "user_profile".to_string()],
            route_host: "member".to_string(),
            page_size: 5,
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_load_expands_env_var_in_path() {
        let temp_dir = TempDir::new().unwrap();
        Config::default()
            .save_to_path(temp_dir.path().join("config.toml"))
            .unwrap();

        unsafe {
            env::set_var("USERTAGGING_TEST_DIR", temp_dir.path());
        }

        let loaded = Config::load_from_path("$USERTAGGING_TEST_DIR/config.toml").unwrap();
        assert_eq!(loaded, Some(Config::default()));

        unsafe {
            env::remove_var("USERTAGGING_TEST_DIR");
        }
    }

    #[test]
    fn test_parse_error_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "page_size = \"many\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        for content in [
            "route_host = \"user/profile\"",
            "route_host = \"\"",
            "member_hosts = [\"member\", \"a b\"]",
            "page_size = 0",
        ] {
            std::fs::write(&config_file, content).unwrap();
            let err = Config::load_from_path(&config_file).unwrap_err();
            assert!(
                matches!(err, ConfigError::ConfigInvalid { .. }),
                "{content} should be invalid"
            );
        }
    }
}
