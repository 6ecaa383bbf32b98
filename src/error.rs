// src/error.rs
use reqwest::StatusCode;
use thiserror::Error;

/// Why a request to the chat service did not yield a reply.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request to chat service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat service responded with status {0}")]
    Status(StatusCode),

    #[error("chat service returned a malformed body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    Invalid { key: &'static str, value: String },
}
