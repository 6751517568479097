use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Settings Error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Detection Log Error: {0}")]
    Log(#[from] LogError),

    #[error("Report Error: {0}")]
    Report(#[from] ReportError),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("cannot access settings file `{path}`: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Format(#[from] serde_json::Error),
}

impl SettingsError {
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("line {line}: expected `<frame>:<detections>`")]
    MissingSeparator { line: usize },

    #[error("line {line}: bad frame index `{value}`")]
    FrameIndex { line: usize, value: String },

    #[error("line {line}: bad detections: {source}")]
    Detections {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("scale must be positive, got {mm} mm / {pixels} px")]
    InvalidScale { mm: f32, pixels: f32 },
}
