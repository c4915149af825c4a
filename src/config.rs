use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// Describes how a log file names its columns and marks action rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFormat {
    /// Accepted header names for the timestamp column
    pub timestamp_columns: Vec<String>,

    /// Accepted header names for the arbitration ID column
    pub id_columns: Vec<String>,

    /// Accepted header names for the hex data column
    pub data_columns: Vec<String>,

    /// Literal text that turns a line into a marker line
    pub marker_token: String,
}

impl Default for LogFormat {
    fn default() -> Self {
        Self {
            timestamp_columns: strings(&["timestamp", "time", "t", "ts"]),
            id_columns: strings(&["id", "can_id", "msg_id", "addr", "message_id"]),
            data_columns: strings(&["data", "payload", "hex", "bytes"]),
            marker_token: "Action".to_string(),
        }
    }
}

impl LogFormat {
    /// Location of the optional user format file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("can-log-viewer").join("format.json"))
    }

    /// Read a format description from a JSON file.
    ///
    /// Missing keys fall back to their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load the user format file if there is one, defaults otherwise
    pub fn load_or_default() -> Result<Self, LoadError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_format_keeps_defaults() {
        let format: LogFormat = serde_json::from_str(r#"{ "marker_token": "Event" }"#).unwrap();
        assert_eq!(format.marker_token, "Event");
        assert_eq!(format.id_columns, LogFormat::default().id_columns);
    }

    #[test]
    fn test_load_format_file() {
        let path = std::env::temp_dir().join("can-log-viewer-format-test.json");
        std::fs::write(&path, r#"{ "data_columns": ["Payload"] }"#).unwrap();

        let format = LogFormat::load(&path).unwrap();
        assert_eq!(format.data_columns, vec!["Payload".to_string()]);
        assert_eq!(format.marker_token, "Action");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_format_file() {
        let path = std::env::temp_dir().join("can-log-viewer-bad-format-test.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(LogFormat::load(&path), Err(LoadError::Format(_))));

        let _ = std::fs::remove_file(&path);
    }
}
