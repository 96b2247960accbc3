use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum BurrowError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rules(#[from] RuleError),

    #[error("Trash error: {0}")]
    Trash(#[from] TrashError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse history file '{path}': {source}")]
    HistoryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine the home directory")]
    NoHomeDir,

    #[error("Failed to start scan workers: {0}")]
    WorkerPool(String),

    #[error("Authentication denied: {0}")]
    AuthDenied(String),

    #[error("Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while loading the rule catalog
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Failed to read rule file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rule file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid rule '{name}': {reason}")]
    Invalid { name: String, reason: String },

    #[error("Duplicate rule name: {0}")]
    Duplicate(String),
}

/// Errors raised by the trash store
#[derive(Error, Debug)]
pub enum TrashError {
    #[error("Nothing to undo: no trash sessions found")]
    NoSessions,

    #[error("Failed to read trash directory '{path}': {source}")]
    ListRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Trash session '{0}' already exists")]
    SessionExists(String),

    #[error("Failed to create trash directory '{path}': {source}")]
    CreateSession {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move '{path}' to trash: {source}")]
    Move {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write manifest '{path}': {source}")]
    WriteManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read manifest for session '{session}': {source}")]
    ManifestRead {
        session: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest for session '{session}': {source}")]
    ManifestParse {
        session: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to remove trash session '{path}': {source}")]
    RemoveSession {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BurrowError>;
