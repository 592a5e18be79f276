//! Example value synthesis from schemas
//!
//! Documentation panels need a representative value for any schema an author
//! writes, including self-referencing ones. Synthesis is pure and total: it
//! terminates on cyclic graphs and never returns an error.

use crate::resolver::resolve;
use crate::types::*;
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Synthesizes representative JSON values from schema definitions
pub struct ExampleSynthesizer<'a> {
    components: Option<&'a Components>,
    /// Cap for pathological inline nesting; reference cycles are handled by
    /// the visited set, not by this limit
    max_depth: usize,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(components: Option<&'a Components>) -> Self {
        Self {
            components,
            max_depth: 16,
        }
    }

    /// Synthesize an example for a schema or reference.
    ///
    /// Author-provided `example` and `default` values win over synthesis.
    /// An unresolvable reference yields `null`; a reference revisited within
    /// one synthesis yields an empty object.
    pub fn synthesize(&self, candidate: &RefOr<Schema>) -> Value {
        let mut visited = HashSet::new();
        self.synthesize_with(candidate, &mut visited, 0)
    }

    fn synthesize_with(
        &self,
        candidate: &RefOr<Schema>,
        visited: &mut HashSet<String>,
        depth: usize,
    ) -> Value {
        if depth > self.max_depth {
            return json!({});
        }

        let schema = match candidate {
            RefOr::Item(schema) => schema,
            RefOr::Ref { reference } => {
                // Record before descending: seeing the same reference again
                // within this synthesis means the graph loops back here
                if !visited.insert(reference.clone()) {
                    return json!({});
                }
                match resolve(candidate, self.components) {
                    Some(schema) => schema,
                    None => return Value::Null,
                }
            }
        };

        if let Some(example) = &schema.example {
            return example.clone();
        }
        if let Some(default) = &schema.default {
            return default.clone();
        }
        if let Some(value) = schema.enum_values.first() {
            return value.clone();
        }
        if let Some(value) = &schema.const_value {
            return value.clone();
        }

        if !schema.all_of.is_empty() {
            return self.merge_all_of(schema, visited, depth);
        }
        if let Some(branch) = schema.one_of.first() {
            return self.synthesize_with(branch, visited, depth + 1);
        }
        if let Some(branch) = schema.any_of.first() {
            return self.synthesize_with(branch, visited, depth + 1);
        }

        match schema.schema_type {
            Some(SchemaType::String) => Value::String(string_placeholder(schema).to_string()),
            Some(SchemaType::Integer) => json!(integer_placeholder(schema)),
            Some(SchemaType::Number) => json!(number_placeholder(schema)),
            Some(SchemaType::Boolean) => Value::Bool(true),
            Some(SchemaType::Array) => self.array_value(schema, visited, depth),
            Some(SchemaType::Object) => self.object_value(schema, visited, depth),
            Some(SchemaType::Null) => Value::Null,
            None => {
                // Untyped schemas with structure still describe an object or
                // an array; everything else (including `not`) falls back to
                // the empty placeholder
                if !schema.properties.is_empty() {
                    self.object_value(schema, visited, depth)
                } else if schema.items.is_some() {
                    self.array_value(schema, visited, depth)
                } else {
                    json!({})
                }
            }
        }
    }

    fn array_value(&self, schema: &Schema, visited: &mut HashSet<String>, depth: usize) -> Value {
        match &schema.items {
            Some(items) => Value::Array(vec![self.synthesize_with(items, visited, depth + 1)]),
            None => Value::Array(Vec::new()),
        }
    }

    fn object_value(&self, schema: &Schema, visited: &mut HashSet<String>, depth: usize) -> Value {
        let mut object = Map::new();
        for (name, property) in &schema.properties {
            object.insert(name.clone(), self.synthesize_with(property, visited, depth + 1));
        }
        Value::Object(object)
    }

    /// Merge synthesized branch objects, last write wins on key collision.
    /// Inline properties declared next to `allOf` participate in the merge.
    fn merge_all_of(&self, schema: &Schema, visited: &mut HashSet<String>, depth: usize) -> Value {
        let mut merged = Map::new();
        for branch in &schema.all_of {
            if let Value::Object(fields) = self.synthesize_with(branch, visited, depth + 1) {
                for (key, value) in fields {
                    merged.insert(key, value);
                }
            }
        }
        for (name, property) in &schema.properties {
            merged.insert(name.clone(), self.synthesize_with(property, visited, depth + 1));
        }
        Value::Object(merged)
    }
}

/// One-shot synthesis without building a synthesizer by hand
pub fn example_value(candidate: &RefOr<Schema>, components: Option<&Components>) -> Value {
    ExampleSynthesizer::new(components).synthesize(candidate)
}

fn string_placeholder(schema: &Schema) -> &'static str {
    match schema.format.as_deref() {
        Some("uuid") => "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        Some("email") => "user@example.com",
        Some("date") => "2024-01-01",
        Some("date-time") => "2024-01-01T00:00:00Z",
        Some("uri") | Some("url") => "https://example.com",
        Some("hostname") => "example.com",
        Some("ipv4") => "192.168.0.1",
        Some("ipv6") => "2001:db8::1",
        Some("byte") => "ZXhhbXBsZQ==",
        Some("binary") => "binary",
        Some("password") => "********",
        _ => "string",
    }
}

fn number_placeholder(schema: &Schema) -> f64 {
    let mut value = 0.0_f64;
    if let Some(minimum) = schema.minimum {
        value = value.max(minimum);
    }
    if let Some(maximum) = schema.maximum {
        value = value.min(maximum);
    }
    value
}

fn integer_placeholder(schema: &Schema) -> i64 {
    let value = number_placeholder(schema);
    // Clamps upward come from `minimum`, downward from `maximum`; round so
    // the result stays inside the bound
    if value >= 0.0 {
        value.ceil() as i64
    } else {
        value.floor() as i64
    }
}
