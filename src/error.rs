//! Error types for profdiff operations

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfdiffError>;

#[derive(Error, Debug)]
pub enum ProfdiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile not found: {path}")]
    ProfileNotFound { path: PathBuf },

    #[error("Invalid profile '{path}': {message}")]
    InvalidProfile { path: PathBuf, message: String },

    #[error("Unsupported profile format version: {version}")]
    UnsupportedVersion { version: String },

    #[error("Histogram error: {message}")]
    Histogram { message: String },

    #[error("Top-K error: {message}")]
    TopK { message: String },

    #[error("Histogram binnings do not match: {message}")]
    BinningMismatch { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl ProfdiffError {
    pub fn profile_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ProfileNotFound { path: path.into() }
    }

    pub fn invalid_profile(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::InvalidProfile {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn unsupported_version(version: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            version: version.into(),
        }
    }

    pub fn histogram(msg: impl Into<String>) -> Self {
        Self::Histogram {
            message: msg.into(),
        }
    }

    pub fn top_k(msg: impl Into<String>) -> Self {
        Self::TopK {
            message: msg.into(),
        }
    }

    pub fn binning_mismatch(msg: impl Into<String>) -> Self {
        Self::BinningMismatch {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
