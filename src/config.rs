//! Configuration loading for installation planning

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::curve_fit::MAX_CURVE_DEGREE;
use crate::errors::ConfigError;
use crate::planner::{InstallationPlanner, PlannerOptions};

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Largest `max_new_lamps` a config may set.
pub const MAX_NEW_LAMPS_LIMIT: usize = 10_000;

/// Main configuration structure
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallationConfig {
    #[serde(default)]
    pub planner: PlannerOptions,
}

impl InstallationConfig {
    /// Load and validate configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {:?}", path);
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: InstallationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let planner = &self.planner;
        if planner.curve_degree == 0 || planner.curve_degree > MAX_CURVE_DEGREE {
            return Err(ConfigError::Invalid(format!(
                "curve_degree must be between 1 and {}, got {}",
                MAX_CURVE_DEGREE, planner.curve_degree
            )));
        }
        if planner.max_new_lamps == 0 || planner.max_new_lamps > MAX_NEW_LAMPS_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_new_lamps must be between 1 and {}, got {}",
                MAX_NEW_LAMPS_LIMIT, planner.max_new_lamps
            )));
        }
        Ok(())
    }

    /// Planner built from these options.
    pub fn planner(&self) -> InstallationPlanner {
        InstallationPlanner::new(self.planner.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{HeightMode, Side};
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config = InstallationConfig::from_toml_str("").unwrap();
        assert_eq!(config, InstallationConfig::default());
        assert_eq!(config.planner.curve_degree, 1);
        assert_eq!(config.planner.start_side, Side::Right);
        assert_eq!(config.planner.height_mode, HeightMode::PairwiseFold);
        assert_eq!(config.planner.max_new_lamps, 50);
    }

    #[test]
    fn full_config() {
        let config = InstallationConfig::from_toml_str(
            r#"
            [planner]
            curve_degree = 2
            start_side = "left"
            height_mode = "mean"
            max_new_lamps = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.planner.curve_degree, 2);
        assert_eq!(config.planner.start_side, Side::Left);
        assert_eq!(config.planner.height_mode, HeightMode::Mean);
        assert_eq!(config.planner().options().max_new_lamps, 10);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = InstallationConfig::from_toml_str("[planner]\ncurve_degree = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = InstallationConfig::from_toml_str("[planner]\nmax_new_lamps = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = InstallationConfig::from_toml_str("[planner]\nmax_new_lamps = 1_000_000_000\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(InstallationConfig::from_toml_str("[planner]\nmax_new_lamps = 10_000\n").is_ok());
    }

    #[test]
    fn rejects_unknown_values() {
        let err = InstallationConfig::from_toml_str("[planner]\nstart_side = \"up\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = InstallationConfig::from_toml_str("[planner]\nspacing = 2.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[planner]\nstart_side = \"left\"").unwrap();
        let config = InstallationConfig::load(file.path()).unwrap();
        assert_eq!(config.planner.start_side, Side::Left);

        let missing = InstallationConfig::load(Path::new("/nonexistent/lamps.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
