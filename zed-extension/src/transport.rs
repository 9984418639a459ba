use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use zed_extension_api::http_client::{self, HttpMethod, HttpRequest};

use crate::config::ServiceConfig;
use crate::error::TransportError;

/// The four routes the local AI service exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Chat,
    AnalyzeFile,
    ApplyPatch,
    RunCommand,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Chat => "/chat",
            Endpoint::AnalyzeFile => "/analyze_file",
            Endpoint::ApplyPatch => "/apply_patch",
            Endpoint::RunCommand => "/run_command",
        }
    }

    /// Name of the single field the route expects in its request body
    pub fn field(self) -> &'static str {
        match self {
            Endpoint::Chat => "text",
            Endpoint::AnalyzeFile => "path",
            Endpoint::ApplyPatch => "patch",
            Endpoint::RunCommand => "command",
        }
    }

    pub fn payload(self, value: impl Into<String>) -> RequestPayload {
        RequestPayload {
            field: self.field(),
            value: value.into(),
        }
    }
}

/// Single-key JSON object sent as the request body, e.g. `{"text": "..."}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPayload {
    field: &'static str,
    value: String,
}

impl RequestPayload {
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Serialize for RequestPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.field, &self.value)?;
        map.end()
    }
}

/// One POST, one JSON reply.
pub trait Transport {
    fn post(&self, endpoint: Endpoint, payload: &RequestPayload) -> Result<Value, TransportError>;
}

/// Transport backed by Zed's host HTTP client.
///
/// Zed reports connection failures and non-2xx statuses as fetch errors;
/// both surface as [`TransportError::Fetch`].
pub struct HttpTransport {
    config: ServiceConfig,
}

impl HttpTransport {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }
}

impl Transport for HttpTransport {
    fn post(&self, endpoint: Endpoint, payload: &RequestPayload) -> Result<Value, TransportError> {
        let url = self.config.endpoint_url(endpoint);
        let body = encode_body(payload)?;
        log::debug!("POST {} ({} bytes)", url, body.len());

        let request = HttpRequest::builder()
            .method(HttpMethod::Post)
            .url(url.as_str())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(body)
            .build()
            .map_err(TransportError::Request)?;

        let response = http_client::fetch(&request).map_err(|details| TransportError::Fetch {
            url: url.clone(),
            details,
        })?;

        decode_response(&url, &response.body)
    }
}

pub(crate) fn encode_body(payload: &RequestPayload) -> Result<Vec<u8>, TransportError> {
    Ok(serde_json::to_vec(payload)?)
}

pub(crate) fn decode_response(url: &str, body: &[u8]) -> Result<Value, TransportError> {
    serde_json::from_slice(body).map_err(|e| TransportError::MalformedResponse {
        url: url.to_string(),
        details: e.to_string(),
    })
}
