//! Application configuration, loaded from JSON.
//!
//! ```text
//! {
//!   "counter":  { "line_position": 300, "direction": "right_to_left" },
//!   "pipeline": { "confidence_threshold": 0.5, "progress_interval": 30 },
//!   "output":   { "result_path": "count_result.txt",
//!                 "message": "Toplam sayılan yumurta: {count}",
//!                 "annotations_path": null }
//! }
//! ```
//!
//! Every section and field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::counter::{CountMessage, CounterConfig, DEFAULT_RESULT_FILE};
use crate::error::ConfigError;
use crate::integration::PipelineConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File receiving the final count line
    pub result_path: PathBuf,
    pub message: CountMessage,
    /// Optional JSON Lines file with per-frame annotations
    pub annotations_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            result_path: PathBuf::from(DEFAULT_RESULT_FILE),
            message: CountMessage::default(),
            annotations_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub counter: CounterConfig,
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::Direction;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.counter.line_position, 300);
        assert_eq!(config.counter.direction, Direction::RightToLeft);
        assert_eq!(config.pipeline.confidence_threshold, 0.5);
        assert_eq!(config.output.result_path, PathBuf::from("count_result.txt"));
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_json(
            r#"{"counter": {"direction": "left_to_right"}, "output": {"message": "eggs: {count}"}}"#,
        )
        .unwrap();
        assert_eq!(config.counter.line_position, 300);
        assert_eq!(config.counter.direction, Direction::LeftToRight);
        assert_eq!(config.output.message.render(4), "eggs: 4");
    }

    #[test]
    fn test_bad_direction_is_rejected() {
        let err = AppConfig::from_json(r#"{"counter": {"direction": "up"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
