//! Error types for sidefold

use thiserror::Error;

/// Main error type for sidebar and preview operations
#[derive(Error, Debug)]
pub enum Error {
    /// None of the container selectors matched; carries the selectors tried.
    #[error("no sidebar container matches {0}")]
    SidebarNotFound(String),

    /// The configuration file could not be understood.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A book source could not be parsed.
    #[error("could not parse {path}: {reason}")]
    Parse {
        /// The source file.
        path: String,
        /// What the parser reported.
        reason: String,
    },

    /// Reading sources or outlines failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON outline was malformed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for sidefold operations
pub type Result<T> = std::result::Result<T, Error>;
