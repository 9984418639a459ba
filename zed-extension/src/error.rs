use thiserror::Error;

use crate::registry::CommandId;

/// Failures while talking to the local AI service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be assembled
    #[error("failed to build request: {0}")]
    Request(String),

    /// Connection refused, timeout, or a non-2xx status
    #[error("request to {url} failed: {details}")]
    Fetch { url: String, details: String },

    /// The service answered with something that is not JSON
    #[error("malformed JSON response from {url}: {details}")]
    MalformedResponse { url: String, details: String },
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Request(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Open a file first")]
    NoActiveDocument,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command `{0}` is already registered")]
    AlreadyRegistered(CommandId),

    #[error("unknown command `{0}`")]
    UnknownCommand(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid base url `{url}`: {details}")]
    InvalidBaseUrl { url: String, details: String },
}
