// Configuration loading and parsing (config/savant.toml).

use savant_core::CompositeWeights;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Highest accepted `output.composite_precision`.
const MAX_PRECISION: usize = 6;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub weights: CompositeWeights,
    pub output: OutputConfig,
}

/// Raw deserialization target for savant.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    /// Optional table; when present every weight field is required.
    weights: Option<CompositeWeights>,
    #[serde(default)]
    output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub missing_marker: String,
    pub composite_precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            missing_marker: "N/A".into(),
            composite_precision: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Path of the config file relative to `base_dir`.
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join("config").join("savant.toml")
}

/// Load and validate `config/savant.toml` under `base_dir`.
///
/// The file is required here; see [`load_config`] for the optional variant.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path(base_dir);
    let text = read_file(&path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        weights: file.weights.unwrap_or_default(),
        output: file.output,
    };

    validate(&config)?;

    Ok(config)
}

/// Load the config under `base_dir`, falling back to defaults when the file
/// does not exist. Parse and validation errors are still reported.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    if config_path(base_dir).exists() {
        load_config_from(base_dir)
    } else {
        Ok(Config::default())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let w = &config.weights;
    let weight_fields: &[(&str, f64)] = &[
        ("weights.w_bb", w.w_bb),
        ("weights.w_k", w.w_k),
        ("weights.w_power", w.w_power),
        ("weights.w_contact", w.w_contact),
        ("weights.base_woba", w.base_woba),
    ];
    for (name, val) in weight_fields {
        if !val.is_finite() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be a finite number, got {val}"),
            });
        }
    }

    if config.output.missing_marker.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "output.missing_marker".into(),
            message: "must not be empty".into(),
        });
    }

    let precision = config.output.composite_precision;
    if precision > MAX_PRECISION {
        return Err(ConfigError::ValidationError {
            field: "output.composite_precision".into(),
            message: format!("must be at most {MAX_PRECISION}, got {precision}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
