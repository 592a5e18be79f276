//! Request assembly
//!
//! Turns an operation, its parameter values, and an optional body value into
//! a [`RequestDescriptor`]. Required parameters are checked up front: a
//! missing or empty value fails the whole assembly before anything is built.

use indexmap::IndexMap;
use openapi_doc::{
    resolve, Components, HttpMethod, Operation, OperationEntry, Parameter, ParameterLocation,
    ParameterStyle,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

use crate::descriptor::{RequestDescriptor, RequestPayload};
use crate::error::{AssembleError, AssembleResult};

/// User-supplied parameter values, keyed by parameter name
pub type ParamValues = IndexMap<String, Value>;

/// RFC 3986 unreserved characters stay literal; everything else is escaped
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Hop-by-hop and framing headers the HTTP client owns
const RESERVED_HEADERS: [&str; 4] = ["host", "content-length", "connection", "transfer-encoding"];

/// Builds [`RequestDescriptor`]s for operations of one document
pub struct RequestAssembler<'a> {
    base_url: &'a str,
    components: Option<&'a Components>,
    extra_headers: Vec<(String, String)>,
    force_body: bool,
}

impl<'a> RequestAssembler<'a> {
    pub fn new(base_url: &'a str, components: Option<&'a Components>) -> Self {
        Self {
            base_url,
            components,
            extra_headers: Vec::new(),
            force_body: false,
        }
    }

    /// Add a fixed header to every assembled request, e.g. an auth header.
    /// Caller headers replace parameter-derived headers of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Attach a declared body even on GET and HEAD
    pub fn force_body(mut self) -> Self {
        self.force_body = true;
        self
    }

    /// Assemble a request from an operation's own parameters
    pub fn assemble(
        &self,
        method: HttpMethod,
        path_template: &str,
        operation: &Operation,
        values: &ParamValues,
        body_value: Option<&Value>,
    ) -> AssembleResult<RequestDescriptor> {
        let parameters: Vec<&Parameter> = operation
            .parameters
            .iter()
            .filter_map(|candidate| resolve(candidate, self.components))
            .collect();
        self.assemble_resolved(method, path_template, operation, &parameters, values, body_value)
    }

    /// Assemble a request for a flattened entry, including path-level parameters
    pub fn assemble_entry(
        &self,
        entry: &OperationEntry<'_>,
        values: &ParamValues,
        body_value: Option<&Value>,
    ) -> AssembleResult<RequestDescriptor> {
        let parameters = entry.merged_parameters(self.components);
        self.assemble_resolved(
            entry.method,
            entry.path,
            entry.operation,
            &parameters,
            values,
            body_value,
        )
    }

    fn assemble_resolved(
        &self,
        method: HttpMethod,
        path_template: &str,
        operation: &Operation,
        parameters: &[&Parameter],
        values: &ParamValues,
        body_value: Option<&Value>,
    ) -> AssembleResult<RequestDescriptor> {
        for parameter in parameters {
            if parameter.is_required() && effective_value(parameter, values).is_none() {
                return Err(AssembleError::MissingRequiredParameter(
                    parameter.name.clone(),
                ));
            }
        }

        let body = self.build_body(method, operation, body_value)?;

        let mut path = path_template.to_string();
        for parameter in parameters {
            if parameter.location != ParameterLocation::Path {
                continue;
            }
            if let Some(value) = effective_value(parameter, values) {
                let placeholder = format!("{{{}}}", parameter.name);
                path = path.replace(&placeholder, &path_segment(parameter, value));
            }
        }
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);

        let mut pairs: Vec<(String, String)> = Vec::new();
        for parameter in parameters {
            if parameter.location != ParameterLocation::Query {
                continue;
            }
            if let Some(value) = effective_value(parameter, values) {
                query_pairs(parameter, value, &mut pairs);
            }
        }
        let query = encode_query(&pairs);

        let mut headers: Vec<(String, String)> = Vec::new();
        for parameter in parameters {
            if parameter.location != ParameterLocation::Header {
                continue;
            }
            if is_reserved_header(&parameter.name) {
                debug!("Skipping reserved header parameter: {}", parameter.name);
                continue;
            }
            if let Some(value) = effective_value(parameter, values) {
                headers.push((parameter.name.clone(), flat_parts(value).join(",")));
            }
        }

        let cookies: Vec<String> = parameters
            .iter()
            .filter(|parameter| parameter.location == ParameterLocation::Cookie)
            .filter_map(|parameter| {
                effective_value(parameter, values)
                    .map(|value| format!("{}={}", parameter.name, flat_parts(value).join(",")))
            })
            .collect();
        if !cookies.is_empty() {
            headers.push(("Cookie".to_string(), cookies.join("; ")));
        }

        for (name, value) in &self.extra_headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }

        // The body's content type always wins over declared header parameters
        if let Some(payload) = &body {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case("content-type"));
            headers.push(("Content-Type".to_string(), payload.content_type.clone()));
        }

        debug!("Assembled {} {}", method, url);

        Ok(RequestDescriptor {
            method,
            url,
            query,
            headers,
            body,
        })
    }

    fn build_body(
        &self,
        method: HttpMethod,
        operation: &Operation,
        body_value: Option<&Value>,
    ) -> AssembleResult<Option<RequestPayload>> {
        // GET and HEAD conventionally carry no body
        if !self.force_body && matches!(method, HttpMethod::Get | HttpMethod::Head) {
            return Ok(None);
        }

        let Some(request_body) = operation
            .request_body
            .as_ref()
            .and_then(|candidate| resolve(candidate, self.components))
        else {
            return Ok(None);
        };

        let Some((content_type, media)) = request_body.preferred_content() else {
            return Ok(None);
        };

        // The supplied value wins; the declared media example is the fallback
        let value = match body_value.or(media.example.as_ref()) {
            Some(value) => value,
            None => return Ok(None),
        };

        let bytes = serialize_body(content_type, value)?;
        Ok(Some(RequestPayload {
            content_type: content_type.to_string(),
            bytes,
        }))
    }
}

/// Supplied value for a parameter, with empty values treated as absent
fn effective_value<'v>(parameter: &Parameter, values: &'v ParamValues) -> Option<&'v Value> {
    values
        .get(&parameter.name)
        .filter(|value| !is_empty_value(value))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}

/// Flatten a value the way simple/form styles expect: scalars stand alone,
/// arrays contribute their elements, objects alternate key and value
fn flat_parts(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(scalar_string).collect(),
        Value::Object(fields) => fields
            .iter()
            .flat_map(|(key, field)| [key.clone(), scalar_string(field)])
            .collect(),
        other => vec![scalar_string(other)],
    }
}

/// Render the replacement text for a `{name}` path placeholder.
///
/// Values are percent-encoded per part; label and matrix styles add their
/// prefixes around the encoded parts. Objects always serialize in the
/// non-exploded alternating form.
fn path_segment(parameter: &Parameter, value: &Value) -> String {
    let explode = parameter.explode.unwrap_or(false);
    let parts: Vec<String> = flat_parts(value)
        .iter()
        .map(|part| utf8_percent_encode(part, PATH_SEGMENT).to_string())
        .collect();

    match parameter.effective_style() {
        ParameterStyle::Label => {
            let separator = if explode { "." } else { "," };
            format!(".{}", parts.join(separator))
        }
        ParameterStyle::Matrix => {
            if explode {
                parts
                    .iter()
                    .map(|part| format!(";{}={}", parameter.name, part))
                    .collect()
            } else {
                format!(";{}={}", parameter.name, parts.join(","))
            }
        }
        _ => parts.join(","),
    }
}

/// Append the query pairs for one parameter.
///
/// The default (form, no explode) serialization joins array elements with
/// commas; `explode: true` emits one pair per element or object field.
fn query_pairs(parameter: &Parameter, value: &Value, pairs: &mut Vec<(String, String)>) {
    let name = &parameter.name;
    let explode = parameter.explode.unwrap_or(false);

    match parameter.effective_style() {
        ParameterStyle::DeepObject => {
            if let Value::Object(fields) = value {
                for (key, field) in fields {
                    pairs.push((format!("{}[{}]", name, key), scalar_string(field)));
                }
            } else {
                pairs.push((name.clone(), scalar_string(value)));
            }
        }
        // Neither delimited style defines an escape for an item containing
        // the delimiter itself; such values need form + explode
        ParameterStyle::SpaceDelimited if !explode => {
            pairs.push((name.clone(), flat_parts(value).join(" ")));
        }
        ParameterStyle::PipeDelimited if !explode => {
            pairs.push((name.clone(), flat_parts(value).join("|")));
        }
        _ if explode => match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((name.clone(), scalar_string(item)));
                }
            }
            Value::Object(fields) => {
                for (key, field) in fields {
                    pairs.push((key.clone(), scalar_string(field)));
                }
            }
            other => pairs.push((name.clone(), scalar_string(other))),
        },
        _ => pairs.push((name.clone(), flat_parts(value).join(","))),
    }
}

fn encode_query(pairs: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

fn serialize_body(content_type: &str, value: &Value) -> AssembleResult<Vec<u8>> {
    if content_type.contains("json") {
        return Ok(serde_json::to_vec(value)?);
    }
    if content_type.contains("x-www-form-urlencoded") {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Value::Object(fields) = value {
            for (key, field) in fields {
                serializer.append_pair(key, &scalar_string(field));
            }
        }
        return Ok(serializer.finish().into_bytes());
    }
    // Text and unknown content types: strings pass through verbatim
    match value {
        Value::String(text) => Ok(text.clone().into_bytes()),
        other => Ok(serde_json::to_vec(other)?),
    }
}

fn is_reserved_header(name: &str) -> bool {
    RESERVED_HEADERS
        .iter()
        .any(|reserved| name.eq_ignore_ascii_case(reserved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_doc::{operations, OpenApiDocument};
    use serde_json::json;

    const BASE: &str = "https://api.example.com";

    fn operation(spec: Value) -> Operation {
        serde_json::from_value(spec).unwrap()
    }

    fn create_user_operation() -> Operation {
        operation(json!({
            "operationId": "createUser",
            "parameters": [
                {"name": "page", "in": "query", "schema": {"type": "integer"}},
                {"name": "Authorization", "in": "header", "required": true,
                 "schema": {"type": "string"}}
            ],
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": {
                            "type": "object",
                            "properties": {
                                "name": {"type": "string"},
                                "email": {"type": "string"}
                            }
                        },
                        "example": {"name": "张三", "email": "zhangsan@example.com"}
                    }
                }
            }
        }))
    }

    #[test]
    fn test_missing_required_header_fails() {
        // A body value alone does not satisfy the required header
        let assembler = RequestAssembler::new(BASE, None);
        let body = json!({"email": "zhangsan@example.com"});
        let error = assembler
            .assemble(
                HttpMethod::Post,
                "/users",
                &create_user_operation(),
                &ParamValues::new(),
                Some(&body),
            )
            .unwrap_err();
        match error {
            AssembleError::MissingRequiredParameter(name) => assert_eq!(name, "Authorization"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_assembles_post_with_example_body() {
        let assembler = RequestAssembler::new(BASE, None);
        let mut values = ParamValues::new();
        values.insert("Authorization".to_string(), json!("Bearer token-123"));
        values.insert("page".to_string(), json!(1));

        let request = assembler
            .assemble(
                HttpMethod::Post,
                "/users",
                &create_user_operation(),
                &values,
                None,
            )
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://api.example.com/users");
        assert_eq!(request.query, "page=1");
        assert_eq!(request.header("Authorization"), Some("Bearer token-123"));
        assert_eq!(request.header("Content-Type"), Some("application/json"));

        let body = request.body.expect("body should fall back to the example");
        let parsed: Value = serde_json::from_slice(&body.bytes).unwrap();
        assert_eq!(
            parsed,
            json!({"name": "张三", "email": "zhangsan@example.com"})
        );
    }

    #[test]
    fn test_supplied_body_overrides_example() {
        let assembler = RequestAssembler::new(BASE, None);
        let mut values = ParamValues::new();
        values.insert("Authorization".to_string(), json!("Bearer t"));
        let body = json!({"name": "Alice", "email": "alice@example.com"});

        let request = assembler
            .assemble(
                HttpMethod::Post,
                "/users",
                &create_user_operation(),
                &values,
                Some(&body),
            )
            .unwrap();

        assert_eq!(request.header("Authorization"), Some("Bearer t"));
        let parsed: Value = serde_json::from_slice(&request.body.unwrap().bytes).unwrap();
        assert_eq!(parsed, body);
    }

    #[test]
    fn test_path_parameters_are_encoded() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "userId", "in": "path", "schema": {"type": "string"}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("userId".to_string(), json!("ab/c d"));

        let request = assembler
            .assemble(HttpMethod::Get, "/users/{userId}", &operation, &values, None)
            .unwrap();
        assert_eq!(request.url, "https://api.example.com/users/ab%2Fc%20d");
    }

    #[test]
    fn test_path_parameter_is_required_even_without_flag() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "userId", "in": "path", "schema": {"type": "string"}}
            ]
        }));
        let error = assembler
            .assemble(
                HttpMethod::Get,
                "/users/{userId}",
                &operation,
                &ParamValues::new(),
                None,
            )
            .unwrap_err();
        match error {
            AssembleError::MissingRequiredParameter(name) => assert_eq!(name, "userId"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_required_value_fails() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "q", "in": "query", "required": true, "schema": {"type": "string"}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("q".to_string(), json!(""));

        assert!(assembler
            .assemble(HttpMethod::Get, "/search", &operation, &values, None)
            .is_err());
    }

    #[test]
    fn test_optional_empty_values_are_omitted() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "tags", "in": "query", "schema": {"type": "array"}},
                {"name": "name", "in": "query", "schema": {"type": "string"}},
                {"name": "limit", "in": "query", "schema": {"type": "integer"}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("tags".to_string(), json!([]));
        values.insert("name".to_string(), json!(""));
        values.insert("limit".to_string(), json!(20));

        let request = assembler
            .assemble(HttpMethod::Get, "/users", &operation, &values, None)
            .unwrap();
        assert_eq!(request.query, "limit=20");
    }

    #[test]
    fn test_array_query_defaults_to_comma_joined() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "include", "in": "query",
                 "schema": {"type": "array", "items": {"type": "string"}}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("include".to_string(), json!(["profile", "preferences"]));

        let request = assembler
            .assemble(HttpMethod::Get, "/users/42", &operation, &values, None)
            .unwrap();
        assert_eq!(request.query, "include=profile%2Cpreferences");
    }

    #[test]
    fn test_array_query_explode_repeats_the_key() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "include", "in": "query", "explode": true,
                 "schema": {"type": "array", "items": {"type": "string"}}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("include".to_string(), json!(["profile", "preferences"]));

        let request = assembler
            .assemble(HttpMethod::Get, "/users/42", &operation, &values, None)
            .unwrap();
        assert_eq!(request.query, "include=profile&include=preferences");
    }

    #[test]
    fn test_delimited_and_deep_object_styles() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "ids", "in": "query", "style": "spaceDelimited",
                 "schema": {"type": "array"}},
                {"name": "codes", "in": "query", "style": "pipeDelimited",
                 "schema": {"type": "array"}},
                {"name": "filter", "in": "query", "style": "deepObject",
                 "schema": {"type": "object"}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("ids".to_string(), json!([3, 4, 5]));
        values.insert("codes".to_string(), json!(["a", "b"]));
        values.insert("filter".to_string(), json!({"name": "x", "age": 30}));

        let request = assembler
            .assemble(HttpMethod::Get, "/items", &operation, &values, None)
            .unwrap();
        assert_eq!(
            request.query,
            "ids=3+4+5&codes=a%7Cb&filter%5Bage%5D=30&filter%5Bname%5D=x"
        );
    }

    #[test]
    fn test_delimited_item_containing_the_delimiter_collides() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "ids", "in": "query", "style": "spaceDelimited",
                 "schema": {"type": "array"}}
            ]
        }));
        let mut spaced_item = ParamValues::new();
        spaced_item.insert("ids".to_string(), json!(["3 4", "5"]));
        let mut three_items = ParamValues::new();
        three_items.insert("ids".to_string(), json!(["3", "4", "5"]));

        let with_spaced_item = assembler
            .assemble(HttpMethod::Get, "/items", &operation, &spaced_item, None)
            .unwrap();
        let with_three_items = assembler
            .assemble(HttpMethod::Get, "/items", &operation, &three_items, None)
            .unwrap();

        // The style has no escape, so the two renderings collide
        assert_eq!(with_spaced_item.query, "ids=3+4+5");
        assert_eq!(with_spaced_item.query, with_three_items.query);
    }

    #[test]
    fn test_form_explode_object_spreads_fields() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "sort", "in": "query", "explode": true,
                 "schema": {"type": "object"}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("sort".to_string(), json!({"role": "admin", "dir": "asc"}));

        let request = assembler
            .assemble(HttpMethod::Get, "/users", &operation, &values, None)
            .unwrap();
        assert_eq!(request.query, "dir=asc&role=admin");
    }

    #[test]
    fn test_reserved_header_parameters_are_skipped() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "Host", "in": "header", "schema": {"type": "string"}},
                {"name": "Content-Length", "in": "header", "schema": {"type": "string"}},
                {"name": "X-Trace", "in": "header", "schema": {"type": "string"}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("Host".to_string(), json!("evil.example.com"));
        values.insert("Content-Length".to_string(), json!("999"));
        values.insert("X-Trace".to_string(), json!("abc"));

        let request = assembler
            .assemble(HttpMethod::Get, "/users", &operation, &values, None)
            .unwrap();
        assert_eq!(request.headers, vec![("X-Trace".to_string(), "abc".to_string())]);
    }

    #[test]
    fn test_caller_headers_override_parameter_headers() {
        let assembler = RequestAssembler::new(BASE, None).header("X-API-Key", "from-caller");
        let operation = operation(json!({
            "parameters": [
                {"name": "X-API-Key", "in": "header", "schema": {"type": "string"}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("X-API-Key".to_string(), json!("from-values"));

        let request = assembler
            .assemble(HttpMethod::Get, "/users", &operation, &values, None)
            .unwrap();
        assert_eq!(
            request.headers,
            vec![("X-API-Key".to_string(), "from-caller".to_string())]
        );
    }

    #[test]
    fn test_body_content_type_wins_over_header_parameter() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "Content-Type", "in": "header", "schema": {"type": "string"}}
            ],
            "requestBody": {
                "content": {
                    "application/json": {"example": {"ok": true}}
                }
            }
        }));
        let mut values = ParamValues::new();
        values.insert("Content-Type".to_string(), json!("text/plain"));

        let request = assembler
            .assemble(HttpMethod::Post, "/echo", &operation, &values, None)
            .unwrap();
        let content_types: Vec<&str> = request
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(content_types, vec!["application/json"]);
        assert_eq!(request.headers.last().unwrap().0, "Content-Type");
    }

    #[test]
    fn test_get_carries_no_body_unless_forced() {
        let spec = json!({
            "requestBody": {
                "content": {
                    "application/json": {"example": {"q": "x"}}
                }
            }
        });
        let operation = operation(spec);
        let values = ParamValues::new();

        let plain = RequestAssembler::new(BASE, None)
            .assemble(HttpMethod::Get, "/search", &operation, &values, None)
            .unwrap();
        assert!(plain.body.is_none());
        assert!(plain.header("Content-Type").is_none());

        let forced = RequestAssembler::new(BASE, None)
            .force_body()
            .assemble(HttpMethod::Get, "/search", &operation, &values, None)
            .unwrap();
        assert!(forced.body.is_some());
    }

    #[test]
    fn test_form_urlencoded_body() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "requestBody": {
                "content": {
                    "application/x-www-form-urlencoded": {
                        "example": {"grant_type": "client_credentials", "scope": "read write"}
                    }
                }
            }
        }));

        let request = assembler
            .assemble(HttpMethod::Post, "/token", &operation, &ParamValues::new(), None)
            .unwrap();
        let body = request.body.unwrap();
        assert_eq!(body.content_type, "application/x-www-form-urlencoded");
        assert_eq!(
            body.as_text(),
            Some("grant_type=client_credentials&scope=read+write")
        );
    }

    #[test]
    fn test_cookie_parameters_fold_into_one_header() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "session", "in": "cookie", "schema": {"type": "string"}},
                {"name": "theme", "in": "cookie", "schema": {"type": "string"}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("session".to_string(), json!("abc123"));
        values.insert("theme".to_string(), json!("dark"));

        let request = assembler
            .assemble(HttpMethod::Get, "/profile", &operation, &values, None)
            .unwrap();
        assert_eq!(request.header("Cookie"), Some("session=abc123; theme=dark"));
    }

    #[test]
    fn test_assemble_entry_includes_path_level_parameters() {
        let document: OpenApiDocument = serde_json::from_value(json!({
            "openapi": "3.0.3",
            "info": {"title": "t", "version": "1.0.0"},
            "servers": [{"url": "https://api.example.com"}],
            "paths": {
                "/users/{id}": {
                    "parameters": [
                        {"name": "id", "in": "path", "required": true,
                         "schema": {"type": "string"}}
                    ],
                    "get": {"operationId": "getUser"}
                }
            }
        }))
        .unwrap();

        let entries = operations(&document);
        let entry = &entries[0];
        let assembler = RequestAssembler::new("https://api.example.com", document.components());

        let missing = assembler.assemble_entry(entry, &ParamValues::new(), None);
        assert!(missing.is_err());

        let mut values = ParamValues::new();
        values.insert("id".to_string(), json!("42"));
        let request = assembler.assemble_entry(entry, &values, None).unwrap();
        assert_eq!(request.url, "https://api.example.com/users/42");
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let assembler = RequestAssembler::new(BASE, None);
        let mut values = ParamValues::new();
        values.insert("Authorization".to_string(), json!("Bearer t"));
        values.insert("page".to_string(), json!(2));

        let first = assembler
            .assemble(HttpMethod::Post, "/users", &create_user_operation(), &values, None)
            .unwrap();
        let second = assembler
            .assemble(HttpMethod::Post, "/users", &create_user_operation(), &values, None)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_matrix_and_label_path_styles() {
        let assembler = RequestAssembler::new(BASE, None);
        let operation = operation(json!({
            "parameters": [
                {"name": "version", "in": "path", "style": "label",
                 "schema": {"type": "string"}},
                {"name": "coords", "in": "path", "style": "matrix",
                 "schema": {"type": "array"}}
            ]
        }));
        let mut values = ParamValues::new();
        values.insert("version".to_string(), json!("v2"));
        values.insert("coords".to_string(), json!([50, 100]));

        let request = assembler
            .assemble(HttpMethod::Get, "/map{version}{coords}", &operation, &values, None)
            .unwrap();
        assert_eq!(request.url, "https://api.example.com/map.v2;coords=50,100");
    }
}
