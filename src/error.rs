use std::path::PathBuf;
use thiserror::Error;

use crate::client::ServiceCall;

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("Cannot create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{call} failed: {status} {reason}")]
    Status {
        call: ServiceCall,
        status: u16,
        reason: String,
    },

    #[error("{call} returned unexpected Content-Type: {content_type}")]
    ContentType {
        call: ServiceCall,
        content_type: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Refusing to write file with unsafe name {0:?}")]
    InvalidFileName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CalibrationError>;
