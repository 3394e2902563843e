//! icsfix configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::convert::ConvertMode;
use crate::error::{FixError, FixResult};
use crate::zone::{DEFAULT_ZONE, ZoneProfile};

/// Configuration at ~/.config/icsfix/config.toml, overridable with
/// `ICSFIX_*` environment variables.
///
/// ```toml
/// zone = "America/New_York"
/// mode = "exact"
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FixerConfig {
    /// TZID of the compiled-in profile to convert into.
    pub zone: String,

    pub mode: ConvertMode,

    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for FixerConfig {
    fn default() -> Self {
        FixerConfig {
            zone: DEFAULT_ZONE.to_string(),
            mode: ConvertMode::default(),
            log_level: "info".to_string(),
        }
    }
}

impl FixerConfig {
    pub fn config_path() -> FixResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FixError::Config("Could not determine config directory".into()))?
            .join("icsfix");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location. A missing file is not an error.
    pub fn load() -> FixResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Defaults, then the TOML file at `path` if it exists, then environment.
    pub fn load_from(path: &Path) -> FixResult<Self> {
        let defaults = FixerConfig::default();

        Config::builder()
            .set_default("zone", defaults.zone)
            .and_then(|b| b.set_default("mode", "compatible"))
            .and_then(|b| b.set_default("log_level", defaults.log_level))
            .map_err(|e| FixError::Config(e.to_string()))?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("ICSFIX"))
            .build()
            .map_err(|e| FixError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FixError::Config(e.to_string()))
    }

    pub fn zone_profile(&self) -> FixResult<&'static ZoneProfile> {
        ZoneProfile::lookup(&self.zone)
    }
}
