//! Solver configuration: built-in defaults, an optional JSON file, then flags.
//!
//! Flags:
//!   <path> | --input=<path>     Hailstone file (one `x, y, z @ vx, vy, vz` per line)
//!   --config=<file.json>        Load a SolverConfig; later flags override it
//!   --vx=<lo..hi>               Inclusive rock velocity range on x (likewise --vy, --vz)
//!   --area=<lo..hi>             Inclusive XY test area for the crossing count
//!   --json=<path>               Write the solution as JSON

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::filter::{AxisRange, SearchBox};

/// Errors from building a [`SolverConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid range for {field}: '{value}'")]
    InvalidRange { field: String, value: String },

    #[error("unrecognized argument '{0}'")]
    InvalidFlag(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the CLI needs to run one solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub input: Option<PathBuf>,
    pub search_box: SearchBox,
    pub test_area: AxisRange,
    pub json_output: Option<PathBuf>,
}

impl Default for SolverConfig {
    /// Box found by offline inspection of the puzzle input's velocity distribution.
    fn default() -> Self {
        Self {
            input: None,
            search_box: SearchBox::new(
                AxisRange::new(-400, -201),
                AxisRange::new(25, 34),
                AxisRange::new(32, 40),
            ),
            test_area: AxisRange::new(200_000_000_000_000, 400_000_000_000_000),
            json_output: None,
        }
    }
}

impl SolverConfig {
    /// Load a config from a JSON file; missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: SolverConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Build from CLI arguments (program name excluded).
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut config = match args.iter().find_map(|a| a.strip_prefix("--config=")) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        for arg in args {
            if arg.starts_with("--config=") {
                continue;
            } else if let Some(v) = arg.strip_prefix("--input=") {
                config.input = Some(PathBuf::from(v));
            } else if let Some(v) = arg.strip_prefix("--vx=") {
                config.search_box.x = parse_range("vx", v)?;
            } else if let Some(v) = arg.strip_prefix("--vy=") {
                config.search_box.y = parse_range("vy", v)?;
            } else if let Some(v) = arg.strip_prefix("--vz=") {
                config.search_box.z = parse_range("vz", v)?;
            } else if let Some(v) = arg.strip_prefix("--area=") {
                config.test_area = parse_range("area", v)?;
            } else if let Some(v) = arg.strip_prefix("--json=") {
                config.json_output = Some(PathBuf::from(v));
            } else if arg.starts_with("--") {
                return Err(ConfigError::InvalidFlag(arg.clone()));
            } else {
                config.input = Some(PathBuf::from(arg));
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject ranges with `lo > hi`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("vx", self.search_box.x),
            ("vy", self.search_box.y),
            ("vz", self.search_box.z),
            ("area", self.test_area),
        ];
        for (field, range) in ranges {
            if range.is_empty() {
                return Err(ConfigError::InvalidRange {
                    field: field.to_string(),
                    value: range.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Parse `lo..hi` or `lo..=hi`; both forms are inclusive.
fn parse_range(field: &str, value: &str) -> Result<AxisRange, ConfigError> {
    let invalid = || ConfigError::InvalidRange {
        field: field.to_string(),
        value: value.to_string(),
    };

    let (lo, hi) = value.split_once("..").ok_or_else(invalid)?;
    let hi = hi.strip_prefix('=').unwrap_or(hi);
    let lo: i64 = lo.trim().parse().map_err(|_| invalid())?;
    let hi: i64 = hi.trim().parse().map_err(|_| invalid())?;
    if lo > hi {
        return Err(invalid());
    }
    Ok(AxisRange::new(lo, hi))
}
