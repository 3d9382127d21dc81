use std::path::PathBuf;
use thiserror::Error;

use crate::model::RecordId;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Candidature not found: {0}")]
    NotFound(RecordId),

    #[error("Import format error: {0}")]
    Format(#[from] FormatError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TrackerError {
    /// Returns true for errors that leave the in-memory state changed.
    ///
    /// A failed save happens after the mutation was applied and the views
    /// recomputed; the caller should report it without retrying the edit.
    pub fn is_persist_failure(&self) -> bool {
        matches!(self, TrackerError::Storage(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    BlankField { field: &'static str },

    #[error("Invalid {field} value '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Duplicate candidature id: {0}")]
    DuplicateId(RecordId),
}

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Payload has no 'candidatures' key")]
    MissingCandidatures,

    #[error("'candidatures' must be an array")]
    CandidaturesNotArray,

    #[error("Invalid candidature at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Invalid '{field}' in payload: {reason}")]
    InvalidViewState { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Schema upgrade to version {version} failed: {reason}")]
    Schema { version: u32, reason: String },

    #[error("No data directory available for the '{0}' backend")]
    NoDataDirectory(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
