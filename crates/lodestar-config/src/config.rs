//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of discrete geometry quality tiers.
pub const QUALITY_TIER_COUNT: usize = 6;

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Level-of-detail budget settings.
    pub lod: LodConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Level-of-detail budget configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Let the budget coordinator pick levels. When false, every object
    /// falls back to its own distance thresholds.
    pub enabled: bool,
    /// Geometry quality tier, 0 (lowest) to 5 (full budget).
    pub quality_tier: u8,
    /// Capacity multiplier for each quality tier.
    pub tier_multipliers: [f32; QUALITY_TIER_COUNT],
    /// Fixed cost added to every detail level of every object.
    pub object_overhead: u32,
    /// Fixed cost added once to the overall budget.
    pub overall_overhead: u32,
    /// Bonus factor for the detail level currently on screen.
    pub level_hysteresis: f32,
    /// Bonus factor for keeping a hidden object hidden.
    pub none_hysteresis: f32,
    /// Scale applied to every switch distance of the fallback selector.
    pub distance_multiplier: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quality_tier: 5,
            tier_multipliers: [0.15, 0.3, 0.45, 0.6, 0.75, 1.0],
            object_overhead: 8,
            overall_overhead: 16384,
            level_hysteresis: 0.2,
            none_hysteresis: 1.0,
            distance_multiplier: 1.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl LodConfig {
    /// Capacity multiplier of the configured quality tier.
    ///
    /// An out-of-range tier (hand-edited config) applies no reduction.
    pub fn capacity_multiplier(&self) -> f64 {
        match self.tier_multipliers.get(self.quality_tier as usize) {
            Some(&m) => f64::from(m),
            None => {
                log::warn!(
                    "Quality tier {} out of range, using full budget",
                    self.quality_tier
                );
                1.0
            }
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("quality_tier: 5"));
        assert!(ron_str.contains("overall_overhead: 16384"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.lod.quality_tier = 2;
        config.lod.level_hysteresis = 0.5;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = ron::from_str("(lod: (quality_tier: 1))").unwrap();
        assert_eq!(config.lod.quality_tier, 1);
        assert_eq!(config.lod.object_overhead, 8);
        assert_eq!(config.lod.distance_multiplier, 1.0);
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_tier_multipliers_ascend_to_full_budget() {
        let lod = LodConfig::default();
        assert!(lod.tier_multipliers.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(lod.tier_multipliers[QUALITY_TIER_COUNT - 1], 1.0);
        assert_eq!(lod.capacity_multiplier(), 1.0);
    }

    #[test]
    fn test_capacity_multiplier_per_tier() {
        let mut lod = LodConfig::default();
        lod.quality_tier = 0;
        assert!((lod.capacity_multiplier() - 0.15).abs() < 1e-6);
        lod.quality_tier = 3;
        assert!((lod.capacity_multiplier() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_tier_uses_full_budget() {
        let lod = LodConfig {
            quality_tier: 9,
            ..LodConfig::default()
        };
        assert_eq!(lod.capacity_multiplier(), 1.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.lod.quality_tier = 1;
        config.lod.enabled = false;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.lod.quality_tier = 0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().lod.quality_tier, 0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "(lod: (quality_tier: \"high\"))").unwrap();

        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(err.to_string().contains(&path.display().to_string()), "{err}");
    }

    #[test]
    fn test_reload_missing_file_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::default().reload(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME), "{err}");
    }
}
