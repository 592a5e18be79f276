//! Render a curl snippet for a POST operation without touching the network
//!
//! Run with: cargo run --example curl_snippet

use openapi_doc::{operations, DocumentLoader};
use serde_json::json;
use try_request::{curl_command, ParamValues, RequestAssembler};

const TEST_SPEC: &str = r#"
openapi: "3.0.3"
info:
  title: User Service
  version: "1.0.0"
servers:
  - url: https://api.example.com
paths:
  /users:
    post:
      operationId: createUser
      summary: Create a user
      parameters:
        - name: page
          in: query
          description: Page number
          schema:
            type: integer
        - name: Authorization
          in: header
          required: true
          schema:
            type: string
      requestBody:
        required: true
        content:
          application/json:
            schema:
              type: object
              required: [name, email]
              properties:
                name:
                  type: string
                email:
                  type: string
                  format: email
            example:
              name: 张三
              email: zhangsan@example.com
      responses:
        '201':
          description: Created
"#;

fn main() {
    let document = DocumentLoader::parse(TEST_SPEC).expect("Failed to parse document");
    let base_url = document.base_url().expect("Document declares no server");

    let entries = operations(&document);
    let entry = entries.first().expect("Document declares no operations");

    let assembler = RequestAssembler::new(base_url, document.components());

    // Without the required Authorization header the assembly fails up front
    let missing = assembler.assemble_entry(entry, &ParamValues::new(), None);
    println!("Without credentials: {}", missing.unwrap_err());

    let mut values = ParamValues::new();
    values.insert("page".to_string(), json!(1));
    values.insert("Authorization".to_string(), json!("Bearer token-123"));

    let request = assembler
        .assemble_entry(entry, &values, None)
        .expect("Failed to assemble request");

    println!("\nAssembled {} {}", request.method, request.full_url());
    println!("\n{}", curl_command(&request));
}
