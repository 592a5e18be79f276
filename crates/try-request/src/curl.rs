//! curl snippet rendering
//!
//! Pure string construction over an assembled [`RequestDescriptor`]: the same
//! descriptor always renders the same snippet, so snippets can be tested and
//! cached without touching the network.

use serde_json::Value;

use crate::descriptor::{RequestDescriptor, RequestPayload};

/// Render a curl invocation for the descriptor.
///
/// One flag per line, joined with backslash continuations. JSON bodies are
/// pretty-printed so the snippet reads well when pasted into documentation.
pub fn curl_command(request: &RequestDescriptor) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "curl -X {} {}",
        request.method,
        shell_quote(&request.full_url())
    ));

    for (name, value) in &request.headers {
        lines.push(format!(
            "  -H {}",
            shell_quote(&format!("{}: {}", name, value))
        ));
    }

    if let Some(payload) = &request.body {
        lines.push(format!("  -d {}", shell_quote(&body_text(payload))));
    }

    lines.join(" \\\n")
}

/// Quote a token for POSIX shells.
///
/// Tokens made of unambiguously safe characters pass through bare; everything
/// else is wrapped in single quotes with embedded quotes escaped as `'\''`.
pub fn shell_quote(token: &str) -> String {
    if is_bare(token) {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

fn is_bare(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || b"@%_-+=:,./".contains(&byte))
}

fn body_text(payload: &RequestPayload) -> String {
    if payload.is_json() {
        if let Some(pretty) = payload
            .as_text()
            .and_then(|text| serde_json::from_str::<Value>(text).ok())
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
        {
            return pretty;
        }
    }
    String::from_utf8_lossy(&payload.bytes).to_string()
}
