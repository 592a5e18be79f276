//! Dump the operation list, navigation tree, and synthesized examples
//! of an embedded document
//!
//! Run with: cargo run --example dump_operations

use openapi_doc::{
    operations, AuthScheme, DocumentLoader, ExampleSynthesizer, RefOr, Schema,
};

const TEST_SPEC: &str = r#"
openapi: "3.0.3"
info:
  title: Pet Store API
  version: "1.0.0"
  description: A sample Pet Store API for demonstration
servers:
  - url: https://petstore.example.com/api/v1
tags:
  - name: pets
    description: Manage pets
  - name: store
    description: Orders and inventory
security:
  - bearerAuth: []
paths:
  /pets:
    get:
      operationId: listPets
      summary: List all pets
      tags: [pets]
      parameters:
        - name: limit
          in: query
          description: Maximum number of pets to return
          schema:
            type: integer
            default: 10
        - name: species
          in: query
          description: Filter by species
          schema:
            type: string
            enum: [dog, cat, bird, fish]
      responses:
        '200':
          description: A list of pets
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/Pet'
    post:
      operationId: createPet
      summary: Create a new pet
      tags: [pets]
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/NewPet'
      responses:
        '201':
          description: Pet created
  /pets/{petId}:
    parameters:
      - name: petId
        in: path
        required: true
        schema:
          type: string
          format: uuid
    get:
      operationId: getPet
      summary: Get a pet by ID
      tags: [pets]
      responses:
        '200':
          description: The pet
    delete:
      operationId: deletePet
      summary: Remove a pet
      tags: [pets]
      responses:
        '204':
          description: Deleted
  /orders:
    post:
      operationId: placeOrder
      summary: Place an order
      tags: [store]
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Order'
      responses:
        '201':
          description: Order placed
components:
  securitySchemes:
    bearerAuth:
      type: http
      scheme: bearer
      bearerFormat: JWT
  schemas:
    Pet:
      type: object
      required: [id, name, species]
      properties:
        id:
          type: string
          format: uuid
        name:
          type: string
          example: Rex
        species:
          type: string
          enum: [dog, cat, bird, fish]
        age:
          type: integer
          minimum: 0
        owner:
          $ref: '#/components/schemas/Owner'
    NewPet:
      type: object
      required: [name, species]
      properties:
        name:
          type: string
        species:
          type: string
          enum: [dog, cat, bird, fish]
        age:
          type: integer
    Owner:
      type: object
      properties:
        name:
          type: string
        pets:
          type: array
          items:
            $ref: '#/components/schemas/Pet'
    Order:
      type: object
      required: [petId, quantity]
      properties:
        petId:
          type: string
          format: uuid
        quantity:
          type: integer
          minimum: 1
        notes:
          type: string
"#;

fn main() {
    let document = DocumentLoader::parse(TEST_SPEC).expect("Failed to parse document");

    println!("=== Document ===");
    println!("Title: {}", document.info.title);
    println!("OpenAPI: {}", document.openapi);
    if let Some(base) = document.base_url() {
        println!("Base URL: {}", base);
    }

    let entries = operations(&document);
    println!("\n=== Operations ({}) ===", entries.len());
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:3}. {} {} - {}",
            i + 1,
            entry.method,
            entry.path,
            entry.operation_id().unwrap_or("(anonymous)")
        );
    }

    let nav = openapi_doc::NavIndex::build(&document);
    println!("\n=== Navigation ===");
    for group in nav.groups() {
        println!(
            "{} - {}",
            group.tag,
            group.description.as_deref().unwrap_or("(no description)")
        );
        for entry in &group.entries {
            println!(
                "  {} {} {}",
                entry.method,
                entry.path,
                entry.summary.as_deref().unwrap_or("")
            );
        }
    }

    println!("\n=== Security ===");
    let scheme = AuthScheme::detect(document.components(), &document.security);
    println!("Detected: {:?}", scheme);
    if let Some(header) = scheme.header_name() {
        println!("Credential header: {}", header);
    }

    println!("\n=== Synthesized example for Pet ===");
    let synthesizer = ExampleSynthesizer::new(document.components());
    let pet_ref: RefOr<Schema> = RefOr::Ref {
        reference: "#/components/schemas/Pet".to_string(),
    };
    let example = synthesizer.synthesize(&pet_ref);
    println!(
        "{}",
        serde_json::to_string_pretty(&example).expect("Failed to render example")
    );
}
