use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the weather backend, e.g. "http://localhost:5000".
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Optional request timeout in seconds. When unset, the transport's own
    /// default applies.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self { endpoint: default_endpoint(), timeout_secs: None }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use the defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cfg = Config::default();
        assert_eq!(cfg.endpoint, "http://localhost:5000");
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let cfg: Config = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.endpoint, "http://localhost:5000");
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let cfg: Config =
            toml::from_str(r#"endpoint = "http://weather.internal:8080""#).expect("should parse");
        assert_eq!(cfg.endpoint, "http://weather.internal:8080");
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn roundtrips_through_toml() {
        let cfg = Config {
            endpoint: "http://weather.internal:8080".to_string(),
            timeout_secs: Some(10),
        };

        let text = toml::to_string_pretty(&cfg).expect("should serialize");
        let parsed: Config = toml::from_str(&text).expect("should parse back");

        assert_eq!(parsed.endpoint, cfg.endpoint);
        assert_eq!(parsed.timeout_secs, Some(10));
    }
}
