//! Lazy `$ref` resolution against the components table
//!
//! Resolution is deliberately shallow: a resolved object may itself contain
//! further references, which are resolved again at the point they are
//! consumed. A dangling or malformed reference resolves to `None` and is a
//! renderable state for callers, never a panic.

use crate::types::*;
use indexmap::IndexMap;

const REF_PREFIX: &str = "#/components/";

/// A component category addressable as `#/components/<category>/<key>`
pub trait Component: Sized {
    /// Category segment as it appears in reference paths
    const CATEGORY: &'static str;

    /// The table holding this category's named objects
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>>;
}

impl Component for Schema {
    const CATEGORY: &'static str = "schemas";
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>> {
        &components.schemas
    }
}

impl Component for Response {
    const CATEGORY: &'static str = "responses";
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>> {
        &components.responses
    }
}

impl Component for Parameter {
    const CATEGORY: &'static str = "parameters";
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>> {
        &components.parameters
    }
}

impl Component for Example {
    const CATEGORY: &'static str = "examples";
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>> {
        &components.examples
    }
}

impl Component for RequestBody {
    const CATEGORY: &'static str = "requestBodies";
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>> {
        &components.request_bodies
    }
}

impl Component for Header {
    const CATEGORY: &'static str = "headers";
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>> {
        &components.headers
    }
}

impl Component for SecurityScheme {
    const CATEGORY: &'static str = "securitySchemes";
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>> {
        &components.security_schemes
    }
}

impl Component for Link {
    const CATEGORY: &'static str = "links";
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>> {
        &components.links
    }
}

impl Component for Callback {
    const CATEGORY: &'static str = "callbacks";
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>> {
        &components.callbacks
    }
}

impl Component for PathItem {
    const CATEGORY: &'static str = "pathItems";
    fn section(components: &Components) -> &IndexMap<String, RefOr<Self>> {
        &components.path_items
    }
}

/// Extract the item key from a reference path for category `T`.
///
/// Accepts exactly `#/components/<category>/<key>`; any other shape (wrong
/// category, extra segments, empty key) is rejected.
pub fn component_key<T: Component>(reference: &str) -> Option<&str> {
    let rest = reference.strip_prefix(REF_PREFIX)?;
    let (category, key) = rest.split_once('/')?;
    if category != T::CATEGORY || key.is_empty() || key.contains('/') {
        return None;
    }
    Some(key)
}

/// Resolve a candidate to a concrete component.
///
/// Identity for concrete objects. For references, looks the key up in the
/// matching components table, following alias entries (a table entry that is
/// itself a reference) with a seen-set so alias cycles return `None`.
pub fn resolve<'a, T: Component>(
    candidate: &'a RefOr<T>,
    components: Option<&'a Components>,
) -> Option<&'a T> {
    match candidate {
        RefOr::Item(item) => Some(item),
        RefOr::Ref { reference } => resolve_reference(reference, components),
    }
}

/// Resolve a raw reference string for category `T`.
///
/// The returned borrow is tied to the components table, not to the
/// reference string, so callers may pass transient strings.
pub fn resolve_reference<'a, T: Component>(
    reference: &str,
    components: Option<&'a Components>,
) -> Option<&'a T> {
    let table = T::section(components?);
    let mut entry = table.get(component_key::<T>(reference)?)?;
    let mut seen: Vec<&str> = Vec::new();

    loop {
        match entry {
            RefOr::Item(item) => return Some(item),
            RefOr::Ref { reference } => {
                let key = component_key::<T>(reference)?;
                if seen.contains(&key) {
                    return None;
                }
                seen.push(key);
                entry = table.get(key)?;
            }
        }
    }
}

impl<T: Component> RefOr<T> {
    /// Resolve against the components table; see [`resolve`]
    pub fn resolve<'a>(&'a self, components: Option<&'a Components>) -> Option<&'a T> {
        resolve(self, components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn components_with_schemas(entries: &[(&str, serde_json::Value)]) -> Components {
        let mut schemas = IndexMap::new();
        for (name, value) in entries {
            schemas.insert(
                name.to_string(),
                serde_json::from_value(value.clone()).unwrap(),
            );
        }
        Components {
            schemas,
            ..Default::default()
        }
    }

    #[test]
    fn test_concrete_object_passes_through() {
        let candidate: RefOr<Schema> =
            serde_json::from_value(json!({"type": "string"})).unwrap();

        let resolved = resolve(&candidate, None).unwrap();
        assert_eq!(resolved.schema_type, Some(SchemaType::String));
    }

    #[test]
    fn test_resolve_simple_ref() {
        let components = components_with_schemas(&[(
            "User",
            json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "email": {"type": "string"}
                },
                "required": ["name", "email"]
            }),
        )]);

        let candidate: RefOr<Schema> =
            serde_json::from_value(json!({"$ref": "#/components/schemas/User"})).unwrap();
        let resolved = resolve(&candidate, Some(&components)).unwrap();

        assert_eq!(resolved.schema_type, Some(SchemaType::Object));
        assert!(resolved.properties.contains_key("name"));
    }

    #[test]
    fn test_missing_entry_resolves_to_none() {
        let components = components_with_schemas(&[]);
        let candidate: RefOr<Schema> =
            serde_json::from_value(json!({"$ref": "#/components/schemas/Missing"})).unwrap();

        assert!(resolve(&candidate, Some(&components)).is_none());
    }

    #[test]
    fn test_missing_table_resolves_to_none() {
        let candidate: RefOr<Schema> =
            serde_json::from_value(json!({"$ref": "#/components/schemas/User"})).unwrap();

        assert!(resolve(&candidate, None).is_none());
    }

    #[test]
    fn test_wrong_category_resolves_to_none() {
        let components = components_with_schemas(&[("User", json!({"type": "object"}))]);

        // A parameter reference must not resolve against the schemas table
        let candidate: RefOr<Parameter> =
            serde_json::from_value(json!({"$ref": "#/components/schemas/User"})).unwrap();
        assert!(resolve(&candidate, Some(&components)).is_none());
    }

    #[test]
    fn test_malformed_reference_shapes() {
        assert_eq!(component_key::<Schema>("#/components/schemas/User"), Some("User"));
        assert!(component_key::<Schema>("#/definitions/User").is_none());
        assert!(component_key::<Schema>("#/components/schemas/").is_none());
        assert!(component_key::<Schema>("#/components/schemas/User/extra").is_none());
        assert!(component_key::<Schema>("#/components/schemas").is_none());
        assert!(component_key::<Schema>("User").is_none());
    }

    #[test]
    fn test_alias_chain_resolves_to_target() {
        let components = components_with_schemas(&[
            ("UserAlias", json!({"$ref": "#/components/schemas/User"})),
            ("User", json!({"type": "object"})),
        ]);

        let candidate: RefOr<Schema> =
            serde_json::from_value(json!({"$ref": "#/components/schemas/UserAlias"})).unwrap();
        let resolved = resolve(&candidate, Some(&components)).unwrap();
        assert_eq!(resolved.schema_type, Some(SchemaType::Object));
    }

    #[test]
    fn test_alias_cycle_resolves_to_none() {
        let components = components_with_schemas(&[
            ("A", json!({"$ref": "#/components/schemas/B"})),
            ("B", json!({"$ref": "#/components/schemas/A"})),
        ]);

        let candidate: RefOr<Schema> =
            serde_json::from_value(json!({"$ref": "#/components/schemas/A"})).unwrap();
        assert!(resolve(&candidate, Some(&components)).is_none());
    }

    #[test]
    fn test_resolution_is_not_transitive() {
        // The resolved object keeps its own inner references untouched
        let components = components_with_schemas(&[(
            "User",
            json!({
                "type": "object",
                "properties": {
                    "address": {"$ref": "#/components/schemas/Address"}
                }
            }),
        )]);

        let candidate: RefOr<Schema> =
            serde_json::from_value(json!({"$ref": "#/components/schemas/User"})).unwrap();
        let resolved = resolve(&candidate, Some(&components)).unwrap();

        let address = resolved.properties.get("address").unwrap();
        assert_eq!(address.reference(), Some("#/components/schemas/Address"));
    }

    #[test]
    fn test_resolve_request_body_category() {
        let mut request_bodies = IndexMap::new();
        request_bodies.insert(
            "CreateUser".to_string(),
            serde_json::from_value(json!({
                "required": true,
                "content": {
                    "application/json": {
                        "schema": {"type": "object"}
                    }
                }
            }))
            .unwrap(),
        );
        let components = Components {
            request_bodies,
            ..Default::default()
        };

        let candidate: RefOr<RequestBody> =
            serde_json::from_value(json!({"$ref": "#/components/requestBodies/CreateUser"}))
                .unwrap();
        let resolved = candidate.resolve(Some(&components)).unwrap();
        assert!(resolved.required);
        assert!(resolved.content.contains_key("application/json"));
    }

    #[test]
    fn test_resolve_callback_category() {
        let mut callbacks = IndexMap::new();
        callbacks.insert(
            "OrderShipped".to_string(),
            serde_json::from_value(json!({
                "{$request.body#/callbackUrl}": {
                    "post": {
                        "operationId": "orderShippedNotification",
                        "responses": {"200": {"description": "Acknowledged"}}
                    }
                }
            }))
            .unwrap(),
        );
        let components = Components {
            callbacks,
            ..Default::default()
        };

        let candidate: RefOr<Callback> =
            serde_json::from_value(json!({"$ref": "#/components/callbacks/OrderShipped"}))
                .unwrap();
        let resolved = candidate.resolve(Some(&components)).unwrap();
        let (expression, item) = resolved.first().unwrap();
        assert_eq!(expression, "{$request.body#/callbackUrl}");
        let post = item.as_item().unwrap().post.as_ref().unwrap();
        assert_eq!(post.operation_id.as_deref(), Some("orderShippedNotification"));
    }
}
