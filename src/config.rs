use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::UteroError;
use crate::models::{clamp_cycle_length, clamp_period_length};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "UTERO_CONFIG";

/// Startup settings. Read once, never written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AppSettings {
    pub default_cycle_length: u32,
    pub default_period_length: u32,
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub log_filter: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_cycle_length: 28,
            default_period_length: 5,
            log_filter: "utero=info,utero_lib=info".to_string(),
        }
    }
}

impl AppSettings {
    /// Parse settings from TOML, clamping the default lengths into range.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let settings: Self = toml::from_str(contents)?;
        Ok(settings.clamped())
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, UteroError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(UteroError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&contents).map_err(|source| UteroError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from `$UTERO_CONFIG` or the platform config directory.
    pub fn load() -> Result<Self, UteroError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    fn clamped(self) -> Self {
        Self {
            default_cycle_length: clamp_cycle_length(i64::from(self.default_cycle_length)),
            default_period_length: clamp_period_length(i64::from(self.default_period_length)),
            log_filter: self.log_filter,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("utero").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(AppSettings::parse("").unwrap(), AppSettings::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let settings = AppSettings::parse("default_cycle_length = 32").unwrap();
        assert_eq!(settings.default_cycle_length, 32);
        assert_eq!(settings.default_period_length, 5);
        assert_eq!(settings.log_filter, AppSettings::default().log_filter);
    }

    #[test]
    fn out_of_range_defaults_are_clamped() {
        let settings =
            AppSettings::parse("default_cycle_length = 90\ndefault_period_length = 0").unwrap();
        assert_eq!(settings.default_cycle_length, 60);
        assert_eq!(settings.default_period_length, 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppSettings::parse("luteal_phase_days = 12").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("utero-config-does-not-exist.toml");
        assert_eq!(
            AppSettings::load_from(&path).unwrap(),
            AppSettings::default()
        );
    }

    #[test]
    fn reads_file_and_reports_path_on_error() {
        let dir = std::env::temp_dir().join(format!("utero-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.toml");
        fs::write(&good, "default_period_length = 7\nlog_filter = \"debug\"\n").unwrap();
        let settings = AppSettings::load_from(&good).unwrap();
        assert_eq!(settings.default_period_length, 7);
        assert_eq!(settings.log_filter, "debug");

        let bad = dir.join("bad.toml");
        fs::write(&bad, "default_cycle_length = \"long\"").unwrap();
        let err = AppSettings::load_from(&bad).unwrap_err();
        assert!(matches!(err, UteroError::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unreadable_path_reports_path() {
        let dir = std::env::temp_dir().join(format!("utero-config-dir-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let err = AppSettings::load_from(&dir).unwrap_err();
        assert!(matches!(err, UteroError::ConfigRead { .. }));
        assert!(err.to_string().contains(&*dir.to_string_lossy()));

        fs::remove_dir_all(&dir).unwrap();
    }
}
