use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::grid::GridBounds;
use crate::shape::ShapeKind;

/// Environment variable consulted for the candidate id when neither the
/// config file nor `MEGAVERSE__API__CANDIDATE_ID` provide one.
pub const LEGACY_CANDIDATE_ENV: &str = "candidateId";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MegaverseConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub throttle: ThrottleSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MegaverseConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.api.candidate_id.trim().is_empty() {
            return Err(format!(
                "api.candidate_id is required (set MEGAVERSE__API__CANDIDATE_ID or {LEGACY_CANDIDATE_ENV})"
            ));
        }
        match url::Url::parse(&self.api.base_url) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            Ok(u) => return Err(format!("api.base_url has unsupported scheme '{}'", u.scheme())),
            Err(e) => return Err(format!("api.base_url is not a valid URL: {e}")),
        }
        if self.grid.rows == 0 || self.grid.columns == 0 {
            return Err("grid.rows and grid.columns must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub candidate_id: String,
}

fn default_base_url() -> String {
    "https://challenge.crossmint.io".into()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            candidate_id: String::new(),
        }
    }
}

/// Grid size assumed before a goal map has been fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    #[serde(default = "default_grid_side")]
    pub rows: usize,
    #[serde(default = "default_grid_side")]
    pub columns: usize,
}

fn default_grid_side() -> usize {
    11
}

impl GridSettings {
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.rows, self.columns)
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            rows: default_grid_side(),
            columns: default_grid_side(),
        }
    }
}

/// Pause before every create call, per shape kind. Deletes are not throttled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleSettings {
    #[serde(default = "default_node_delay_ms")]
    pub polyanet_ms: u64,
    #[serde(default = "default_node_delay_ms")]
    pub soloon_ms: u64,
    #[serde(default = "default_satellite_delay_ms")]
    pub cometh_ms: u64,
}

fn default_node_delay_ms() -> u64 {
    3_000
}
fn default_satellite_delay_ms() -> u64 {
    5_000
}

impl ThrottleSettings {
    /// No pauses at all; handy for tests and dry environments.
    pub fn disabled() -> Self {
        Self {
            polyanet_ms: 0,
            soloon_ms: 0,
            cometh_ms: 0,
        }
    }

    pub fn delay_for(&self, kind: ShapeKind) -> Duration {
        let ms = match kind {
            ShapeKind::Polyanet => self.polyanet_ms,
            ShapeKind::Soloon => self.soloon_ms,
            ShapeKind::Cometh => self.cometh_ms,
        };
        Duration::from_millis(ms)
    }
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        Self {
            polyanet_ms: default_node_delay_ms(),
            soloon_ms: default_node_delay_ms(),
            cometh_ms: default_satellite_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub mod loader {
    use super::{LEGACY_CANDIDATE_ENV, MegaverseConfig};
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub fn load_config(path: Option<&str>) -> Result<MegaverseConfig, String> {
        load_config_with_overrides(path, &[])
    }

    /// Like [`load_config`], with `(key, value)` overrides applied on top of
    /// file and environment, e.g. `("api.candidate_id", "...")`.
    pub fn load_config_with_overrides(
        path: Option<&str>,
        overrides: &[(&str, &str)],
    ) -> Result<MegaverseConfig, String> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if pathbuf.exists() {
                    builder = builder.add_source(File::from(pathbuf));
                }
            }
            None => {
                // Try default root-level file
                let default_path = PathBuf::from("megaverse.toml");
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g., MEGAVERSE__API__CANDIDATE_ID=...
        builder = builder.add_source(
            Environment::with_prefix("MEGAVERSE")
                .try_parsing(true)
                .separator("__"),
        );
        for (key, value) in overrides {
            builder = builder
                .set_override(*key, *value)
                .map_err(|e| format!("config override error for {key}: {e}"))?;
        }
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let mut merged: MegaverseConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;

        if merged.api.candidate_id.trim().is_empty()
            && let Ok(legacy) = std::env::var(LEGACY_CANDIDATE_ENV)
        {
            merged.api.candidate_id = legacy;
        }

        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> MegaverseConfig {
        let mut cfg = MegaverseConfig::default();
        cfg.api.candidate_id = "candidate-1".into();
        cfg
    }

    #[test]
    fn test_defaults() {
        let cfg = MegaverseConfig::default();
        assert_eq!(cfg.api.base_url, "https://challenge.crossmint.io");
        assert_eq!(cfg.grid.bounds(), GridBounds::new(11, 11));
        assert_eq!(cfg.throttle.delay_for(ShapeKind::Polyanet), Duration::from_secs(3));
        assert_eq!(cfg.throttle.delay_for(ShapeKind::Soloon), Duration::from_secs(3));
        assert_eq!(cfg.throttle.delay_for(ShapeKind::Cometh), Duration::from_secs(5));
    }

    #[test]
    fn test_validate() {
        assert!(valid().validate().is_ok());
        assert!(MegaverseConfig::default().validate().is_err());

        let mut cfg = valid();
        cfg.api.base_url = "ftp://example.com".into();
        assert!(cfg.validate().is_err());

        let mut cfg = valid();
        cfg.grid.rows = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = valid();
        cfg.logging.level = "loud".into();
        assert!(cfg.validate().is_err());
    }
}
