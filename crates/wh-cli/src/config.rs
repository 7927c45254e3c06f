//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wh_core::IdPolicy;

/// How hour amounts are written in text output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursFormat {
    /// `HH:MM`, rounded to the minute.
    #[default]
    Clock,
    /// Decimal hours with two places, e.g. `7.50`.
    Decimal,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How new entries get their ids.
    #[serde(default)]
    pub id_policy: IdPolicy,

    /// Hours column and totals format.
    #[serde(default)]
    pub hours_format: HoursFormat,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (WH_*)
        figment = figment.merge(Env::prefixed("WH_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for wh.
///
/// On Linux: `~/.config/wh`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wh"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_wh() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "wh");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.id_policy, IdPolicy::MaxPlusOne);
        assert_eq!(config.hours_format, HoursFormat::Clock);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "id_policy = \"monotonic\"\nhours_format = \"decimal\"\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.id_policy, IdPolicy::Monotonic);
        assert_eq!(config.hours_format, HoursFormat::Decimal);
    }

    #[test]
    fn test_load_from_rejects_unknown_policy() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "id_policy = \"random\"\n").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }
}
