//! Live request execution
//!
//! Sends assembled descriptors over HTTP. Execution never fails at the type
//! level: transport errors come back as a synthetic response with status 0,
//! so callers always render one shape. Spawned executions carry an abort
//! handle so an in-flight try-it-out call can be cancelled.

use std::time::{Duration, Instant};

use futures::future::{AbortHandle, Abortable, Aborted};
use indexmap::IndexMap;
use openapi_doc::HttpMethod;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::descriptor::RequestDescriptor;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of sending a request.
///
/// Transport failures are encoded as `status == 0` with the error message in
/// `body`, never as a separate error type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseData {
    pub status: u16,
    pub status_text: String,
    /// Response headers; repeated names keep the last value
    pub headers: IndexMap<String, String>,
    pub body: String,
    pub elapsed_ms: u64,
}

impl ResponseData {
    pub fn is_network_failure(&self) -> bool {
        self.status == 0
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn failure(message: String, started: Instant) -> Self {
        Self {
            status: 0,
            status_text: "Network Error".to_string(),
            headers: IndexMap::new(),
            body: message,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Sends assembled requests and records timed responses
pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    /// Executor with the default 30 second timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Send the request and wait for its response
    pub async fn execute(&self, request: &RequestDescriptor) -> ResponseData {
        send(&self.client, request).await
    }

    /// Send the request on a background task, returning a handle that can
    /// abort it while it is in flight
    pub fn spawn(&self, request: RequestDescriptor) -> ExecutionHandle {
        let (abort, registration) = AbortHandle::new_pair();
        let client = self.client.clone();
        let future = Abortable::new(async move { send(&client, &request).await }, registration);
        ExecutionHandle {
            abort,
            task: tokio::spawn(future),
        }
    }
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one in-flight execution
pub struct ExecutionHandle {
    abort: AbortHandle,
    task: JoinHandle<Result<ResponseData, Aborted>>,
}

impl ExecutionHandle {
    pub fn abort(&self) {
        self.abort.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }

    /// Wait for the response; `None` when the execution was aborted
    pub async fn wait(self) -> Option<ResponseData> {
        match self.task.await {
            Ok(Ok(response)) => Some(response),
            Ok(Err(Aborted)) => None,
            Err(join_error) => {
                warn!("Execution task failed: {}", join_error);
                None
            }
        }
    }
}

async fn send(client: &Client, request: &RequestDescriptor) -> ResponseData {
    let started = Instant::now();
    let url = request.full_url();

    info!("Executing {} {}", request.method, url);

    let mut builder = client.request(reqwest_method(request.method), &url);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if let Some(payload) = &request.body {
        builder = builder.body(payload.bytes.clone());
    }

    let response = match builder.send().await {
        Ok(response) => response,
        Err(transport_error) => {
            error!("Request failed: {}", transport_error);
            return ResponseData::failure(transport_error.to_string(), started);
        }
    };

    let status = response.status();
    let mut headers = IndexMap::new();
    for (name, value) in response.headers() {
        headers.insert(
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).to_string(),
        );
    }

    // A failed body read keeps the real status; only the body is replaced
    let body = match response.text().await {
        Ok(text) => text,
        Err(read_error) => {
            warn!("Failed to read response body: {}", read_error);
            format!("(failed to read response body: {})", read_error)
        }
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;
    debug!("Response status: {} in {}ms", status, elapsed_ms);

    ResponseData {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("").to_string(),
        headers,
        body,
        elapsed_ms,
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
        HttpMethod::Trace => reqwest::Method::TRACE,
    }
}
