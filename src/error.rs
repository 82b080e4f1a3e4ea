// src/error.rs
use thiserror::Error;

/// Failures from the upstream clients and the valuation engine.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("transport error calling {service}: {message}")]
    Transport { service: &'static str, message: String },

    #[error("{service} returned HTTP {status}: {body}")]
    UpstreamStatus {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to decode {service} payload: {message}")]
    Decode { service: &'static str, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl FolioError {
    pub fn transport(service: &'static str, err: impl std::fmt::Display) -> Self {
        FolioError::Transport {
            service,
            message: err.to_string(),
        }
    }

    pub fn decode(service: &'static str, err: impl std::fmt::Display) -> Self {
        FolioError::Decode {
            service,
            message: err.to_string(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        FolioError::NotFound(what.into())
    }
}

pub type FolioResult<T> = Result<T, FolioError>;
