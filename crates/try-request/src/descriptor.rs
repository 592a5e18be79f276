//! Assembled request descriptor
//!
//! The descriptor is the shared artifact of the try-it-out pipeline: the
//! assembler produces it, the curl renderer prints it, and the executor
//! sends it. It is plain data so it can be shown, diffed, or serialized
//! without touching the network.

use openapi_doc::HttpMethod;
use serde::{Deserialize, Serialize};

/// A fully assembled HTTP request, ready to render or send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Absolute URL with path parameters substituted, without the query string
    pub url: String,
    /// Encoded query string without the leading `?`; empty when there is none
    pub query: String,
    /// Header name/value pairs in emission order
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestPayload>,
}

/// Serialized request body together with its content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl RequestDescriptor {
    /// Full URL including the query string
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, self.query)
        }
    }

    /// First header matching `name`, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl RequestPayload {
    /// Body as UTF-8 text, when it is valid UTF-8
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    pub fn is_json(&self) -> bool {
        self.content_type.contains("json")
    }
}
