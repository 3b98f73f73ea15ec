//! JSON run configuration for the `le-solver` driver
//!
//! Every field has a default, so a configuration file only needs the keys
//! it wants to change:
//!
//! ```json
//! { "method": "relaxation", "omega": 1.5, "precision": 1e-12 }
//! ```

use crate::direct::AnalysisOptions;
use crate::format::MatrixFormat;
use crate::iterative::SorConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors while loading a run configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which solver family the driver runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Gaussian elimination: solutions, determinants, inverse, condition number
    #[default]
    Gauss,
    /// SOR on the normal equations
    Relaxation,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gauss" => Ok(Method::Gauss),
            "relaxation" | "sor" => Ok(Method::Relaxation),
            other => Err(format!(
                "unknown method '{}' (expected 'gauss' or 'relaxation')",
                other
            )),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Gauss => f.write_str("gauss"),
            Method::Relaxation => f.write_str("relaxation"),
        }
    }
}

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Solver family
    pub method: Method,
    /// Output format for matrices
    pub format: MatrixFormat,
    /// Partial pivoting for the Gauss method (both policies are always
    /// reported; this selects the one used by [`RunConfig::analysis_options`])
    pub pivoting: bool,
    /// SOR relaxation factor
    pub omega: f64,
    /// SOR stopping threshold on the update norm
    pub precision: f64,
    /// SOR sweep cap (`None` = unbounded)
    pub max_sweeps: Option<usize>,
    /// SOR progress report interval (0 = silent)
    pub print_interval: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        let sor = SorConfig::default();
        Self {
            method: Method::Gauss,
            format: MatrixFormat::Grid,
            pivoting: true,
            omega: sor.omega,
            precision: sor.precision,
            max_sweeps: sor.max_sweeps,
            print_interval: sor.print_interval,
        }
    }
}

impl RunConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// SOR settings of this configuration
    pub fn sor_config(&self) -> SorConfig<f64> {
        SorConfig {
            omega: self.omega,
            precision: self.precision,
            max_sweeps: self.max_sweeps,
            print_interval: self.print_interval,
        }
    }

    /// Everything the Gauss method computes, with this configuration's pivoting
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            solve_system: true,
            pivoting: self.pivoting.into(),
            determinant: true,
            inverse: true,
            condition_number: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direct::PivotStrategy;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            RunConfig::from_json_str(r#"{ "method": "relaxation", "omega": 1.5 }"#).unwrap();
        assert_eq!(config.method, Method::Relaxation);
        assert_eq!(config.omega, 1.5);
        assert_eq!(config.precision, 1e-10);
        assert_eq!(config.format, MatrixFormat::Grid);
        assert_eq!(config.max_sweeps, None);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "method": "gauss",
            "format": "nested",
            "pivoting": false,
            "omega": 0.8,
            "precision": 1e-6,
            "max_sweeps": 500,
            "print_interval": 10
        }"#;
        let config = RunConfig::from_json_str(json).unwrap();
        assert_eq!(config.format, MatrixFormat::Nested);
        assert_eq!(
            config.analysis_options().pivoting,
            PivotStrategy::FirstNonZero
        );

        let sor = config.sor_config();
        assert_eq!(sor.max_sweeps, Some(500));
        assert_eq!(sor.print_interval, 10);
    }

    #[test]
    fn test_invalid_json() {
        let err = RunConfig::from_json_str(r#"{ "method": "newton" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RunConfig::from_file("/nonexistent/le-solver.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!("SOR".parse::<Method>(), Ok(Method::Relaxation));
        assert!("lu".parse::<Method>().is_err());
    }
}
