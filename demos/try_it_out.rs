//! Full try-it-out flow: assemble, render, execute, abort
//!
//! The target host is unreachable on purpose, so the run demonstrates the
//! synthetic status-0 failure shape instead of depending on a live service.
//!
//! Run with: cargo run --example try_it_out

use openapi_doc::{operations, DocumentLoader};
use serde_json::json;
use try_request::{curl_command, ParamValues, RequestAssembler, RequestExecutor};

const TEST_SPEC: &str = r#"
openapi: "3.0.3"
info:
  title: User Service
  version: "1.0.0"
servers:
  - url: http://127.0.0.1:9/api/v1
paths:
  /users:
    post:
      operationId: createUser
      summary: Create a user
      parameters:
        - name: X-API-Key
          in: header
          required: true
          schema:
            type: string
        - name: X-Request-ID
          in: header
          schema:
            type: string
            format: uuid
      requestBody:
        required: true
        content:
          application/json:
            schema:
              type: object
              required: [email, name]
              properties:
                email:
                  type: string
                  format: email
                name:
                  type: string
                  minLength: 1
                age:
                  type: integer
                  minimum: 0
                  maximum: 150
                preferences:
                  type: object
                  properties:
                    theme:
                      type: string
                      enum: [light, dark, auto]
                      default: auto
                    language:
                      type: string
                      default: zh-CN
                    notifications:
                      type: boolean
                      default: true
      responses:
        '201':
          description: Created
"#;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let document = DocumentLoader::parse(TEST_SPEC).expect("Failed to parse document");
    let base_url = document.base_url().expect("Document declares no server");

    let entries = operations(&document);
    let entry = entries.first().expect("Document declares no operations");

    let mut values = ParamValues::new();
    values.insert("X-API-Key".to_string(), json!("demo-key"));
    let body = json!({
        "email": "zhangsan@example.com",
        "name": "张三",
        "preferences": {"theme": "dark"}
    });

    let assembler = RequestAssembler::new(base_url, document.components());
    let request = assembler
        .assemble_entry(entry, &values, Some(&body))
        .expect("Failed to assemble request");

    println!("=== Snippet ===");
    println!("{}", curl_command(&request));

    let executor = RequestExecutor::new();

    println!("\n=== Execute ===");
    let response = executor.execute(&request).await;
    println!("Status: {} {}", response.status, response.status_text);
    println!("Elapsed: {}ms", response.elapsed_ms);
    if response.is_network_failure() {
        println!("Network failure: {}", response.body);
    } else {
        println!("Body: {}", response.body);
    }

    println!("\n=== Abort ===");
    let handle = executor.spawn(request);
    handle.abort();
    match handle.wait().await {
        Some(response) => println!("Completed before the abort: {}", response.status),
        None => println!("Aborted: no response recorded"),
    }
}
