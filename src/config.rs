//! Ranking run configuration
//!
//! A [`RankConfig`] can be written in YAML or JSON; every field is optional
//! and falls back to its default:
//!
//! ```yaml
//! page_rank:
//!   damping_factor: 0.85
//!   iterations: 50
//! view:
//!   label: Habit
//!   direction: both
//!   attributes: [value]
//! central_node_ids: [b]
//! target_central_weight: 0.5
//! edge_bias:
//!   mode: inflate
//!   magnitude: 0.5
//! ```

use crate::algo::ViewOptions;
use attrank_algorithms::PageRankConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How the central edges are biased before ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EdgeBias {
    /// Multiply every attribute of the central edges
    Scale { multiplier: f64 },
    /// Rebalance central against other edges; `magnitude` in [-1, 1]
    Inflate { magnitude: f64 },
}

/// Configuration of one ranking run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    pub page_rank: PageRankConfig,
    /// Spread each round across the rayon pool
    pub parallel: bool,
    pub view: ViewOptions,
    /// Nodes the ranking is biased toward
    pub central_node_ids: Vec<String>,
    /// Total weight the central nodes should start with, per attribute
    pub target_central_weight: Option<f64>,
    pub edge_bias: Option<EdgeBias>,
}

impl RankConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a `.yaml`, `.yml` or `.json` file
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::EdgeDirection;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = RankConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, RankConfig::default());
        assert_eq!(config.page_rank.damping_factor, 0.85);
        assert_eq!(config.page_rank.iterations, 50);
        assert!(!config.parallel);
    }

    #[test]
    fn test_partial_yaml() {
        let config = RankConfig::from_yaml_str(
            "page_rank:\n  iterations: 3\nview:\n  direction: both\nedge_bias:\n  mode: scale\n  multiplier: 2.0\n",
        )
        .unwrap();

        assert_eq!(config.page_rank.iterations, 3);
        assert_eq!(config.page_rank.damping_factor, 0.85);
        assert_eq!(config.view.direction, EdgeDirection::Both);
        assert_eq!(config.edge_bias, Some(EdgeBias::Scale { multiplier: 2.0 }));
    }

    #[test]
    fn test_json_edge_bias() {
        let config =
            RankConfig::from_json_str(r#"{"edge_bias": {"mode": "inflate", "magnitude": -0.5}}"#).unwrap();
        assert_eq!(config.edge_bias, Some(EdgeBias::Inflate { magnitude: -0.5 }));

        assert!(RankConfig::from_json_str(r#"{"edge_bias": {"mode": "stretch"}}"#).is_err());
    }
}
