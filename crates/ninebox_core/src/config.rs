//! Grid Configuration
//!
//! Threshold tables and the significance level for one layout. Values are
//! fixed once loaded; a board holds its configuration behind an `Arc`.
//!
//! ## Usage
//!
//! ```rust
//! use ninebox_core::config::GridConfig;
//! use ninebox_core::grid::GridLayout;
//!
//! let nine = GridConfig::nine_box();
//! assert_eq!(nine.layout, GridLayout::NineBox);
//!
//! let three = GridConfig::for_layout(GridLayout::ThreeBox);
//! assert!(three.validate().is_ok());
//! ```
//!
//! ## Environment Variables
//!
//! - `NINEBOX_LAYOUT`: preset selection (`nine`, `three`)
//! - `NINEBOX_CONFIG_PATH`: YAML or JSON config file, takes precedence

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::sync::Arc;

use crate::analysis::DEFAULT_SIGNIFICANCE_LEVEL;
use crate::error::ConfigError;
use crate::grid::{Bounds, CellThreshold, GridLayout, GroupThreshold};

pub const LAYOUT_ENV: &str = "NINEBOX_LAYOUT";
pub const CONFIG_PATH_ENV: &str = "NINEBOX_CONFIG_PATH";

/// Share above which the top-right elbow (6, 8, 9) is flagged.
pub const TOP_RIGHT_ELBOW_MAX: f64 = 0.33;

/// Process-wide default, resolved from the environment on first use.
pub static DEFAULT_CONFIG: Lazy<Arc<GridConfig>> = Lazy::new(|| {
    Arc::new(GridConfig::from_env_path_or_default().unwrap_or_else(|e| {
        log::warn!("Ignoring {}: {}", CONFIG_PATH_ENV, e);
        GridConfig::from_env_or_default()
    }))
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub layout: GridLayout,
    #[serde(default)]
    pub cell_thresholds: Vec<CellThreshold>,
    #[serde(default)]
    pub group_thresholds: Vec<GroupThreshold>,
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
}

fn default_significance_level() -> f64 {
    DEFAULT_SIGNIFICANCE_LEVEL
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::nine_box()
    }
}

impl GridConfig {
    /// 9-box preset: the top-right elbow may hold at most a third.
    pub fn nine_box() -> Self {
        Self {
            layout: GridLayout::NineBox,
            cell_thresholds: Vec::new(),
            group_thresholds: vec![GroupThreshold::new(
                "top-right elbow",
                &[6, 8, 9],
                Bounds::max(TOP_RIGHT_ELBOW_MAX),
            )],
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
        }
    }

    /// 3-box preset: high performers may be at most a third.
    pub fn three_box() -> Self {
        Self {
            layout: GridLayout::ThreeBox,
            cell_thresholds: Vec::new(),
            group_thresholds: vec![GroupThreshold::new(
                "high performers",
                &[3],
                Bounds::max(TOP_RIGHT_ELBOW_MAX),
            )],
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
        }
    }

    pub fn for_layout(layout: GridLayout) -> Self {
        match layout {
            GridLayout::NineBox => Self::nine_box(),
            GridLayout::ThreeBox => Self::three_box(),
        }
    }

    /// Preset named by `NINEBOX_LAYOUT`, nine-box otherwise.
    pub fn from_env_or_default() -> Self {
        let layout = env::var(LAYOUT_ENV)
            .ok()
            .and_then(|v| GridLayout::parse(&v))
            .unwrap_or_default();
        Self::for_layout(layout)
    }

    /// File named by `NINEBOX_CONFIG_PATH` if set, else `from_env_or_default`.
    pub fn from_env_path_or_default() -> Result<Self, ConfigError> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(path.trim())),
            _ => Ok(Self::from_env_or_default()),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            "json" => Self::from_json_str(&content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        log::info!("Loaded {} grid config from {}", config.layout, path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ConfigError::InvalidSignificance(self.significance_level));
        }

        for rule in &self.cell_thresholds {
            let name = format!("cell {}", rule.cell);
            self.check_cell(&name, rule.cell)?;
            check_bounds(&name, &rule.bounds)?;
        }

        for rule in &self.group_thresholds {
            if rule.cells.is_empty() {
                return Err(ConfigError::EmptyGroup {
                    rule: rule.name.clone(),
                });
            }
            for &cell in &rule.cells {
                self.check_cell(&rule.name, cell)?;
            }
            check_bounds(&rule.name, &rule.bounds)?;
        }

        Ok(())
    }

    fn check_cell(&self, rule: &str, cell: crate::models::CellId) -> Result<(), ConfigError> {
        if self.layout.contains(cell) {
            Ok(())
        } else {
            Err(ConfigError::UnknownCell {
                rule: rule.to_string(),
                cell,
                layout: self.layout,
            })
        }
    }
}

fn check_bounds(rule: &str, bounds: &Bounds) -> Result<(), ConfigError> {
    for value in [bounds.min, bounds.max].into_iter().flatten() {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::BoundOutOfRange {
                rule: rule.to_string(),
                value,
            });
        }
    }
    if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
        if min > max {
            return Err(ConfigError::InvertedBounds {
                rule: rule.to_string(),
                min,
                max,
            });
        }
    }
    Ok(())
}
