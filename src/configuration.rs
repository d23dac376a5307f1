use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::math::polynomial::newtonsolver::NewtonSolver;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("invalid configuration value: {0}")]
    InvalidValue(String),
}

/// JSON 設定檔，例如：
///
/// ```json
/// { "root_finding": { "max_iterations": 10000, "tolerance": 1e-11 } }
/// ```
///
/// 所有欄位皆可省略，省略時使用預設值。
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    root_finding: NewtonSolver,
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let config: Configuration = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        let config: Configuration = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.root_finding.max_iterations() == 0 {
            return Err(ConfigurationError::InvalidValue(
                "root_finding.max_iterations must be positive".to_owned()
            ));
        }
        let tolerance = self.root_finding.tolerance();
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigurationError::InvalidValue(format!(
                "root_finding.tolerance must be a positive number, got {}",
                tolerance
            )));
        }
        Ok(())
    }

    pub fn newton_solver(&self) -> NewtonSolver {
        self.root_finding
    }
}
