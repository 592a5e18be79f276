//! Flattened operation view over the paths table

use crate::resolver::{resolve, resolve_reference};
use crate::types::*;

/// One operation row in document order
#[derive(Debug, Clone, Copy)]
pub struct OperationEntry<'a> {
    pub method: HttpMethod,
    /// Path template as authored, e.g. `/users/{id}`
    pub path: &'a str,
    pub operation: &'a Operation,
    /// Owning path item, for path-level parameters and servers
    pub path_item: &'a PathItem,
}

impl<'a> OperationEntry<'a> {
    pub fn operation_id(&self) -> Option<&'a str> {
        self.operation.operation_id.as_deref()
    }

    /// Path-level and operation-level parameters merged; the operation wins
    /// when both declare the same name and location. Unresolvable parameter
    /// references are skipped.
    pub fn merged_parameters(&self, components: Option<&'a Components>) -> Vec<&'a Parameter> {
        let mut parameters: Vec<&'a Parameter> = Vec::new();

        for candidate in self
            .path_item
            .parameters
            .iter()
            .chain(&self.operation.parameters)
        {
            if let Some(parameter) = resolve(candidate, components) {
                parameters.retain(|existing| {
                    existing.name != parameter.name || existing.location != parameter.location
                });
                parameters.push(parameter);
            }
        }

        parameters
    }

    /// Security requirements in effect: the operation's own list when
    /// declared (even if empty, which disables auth), else the document's
    pub fn effective_security(&self, document: &'a OpenApiDocument) -> &'a [SecurityRequirement] {
        match &self.operation.security {
            Some(security) => security,
            None => &document.security,
        }
    }
}

/// Flatten the paths table into document-ordered operation entries.
///
/// A path item consisting of a `$ref` is followed into
/// `components.pathItems`; when the reference does not resolve, the inline
/// item is used as-is (its declared fields still render).
pub fn operations(document: &OpenApiDocument) -> Vec<OperationEntry<'_>> {
    let components = document.components();
    let mut entries = Vec::new();

    for (path, item) in &document.paths {
        let item = effective_path_item(item, components);
        for (method, operation) in item.operations() {
            entries.push(OperationEntry {
                method,
                path,
                operation,
                path_item: item,
            });
        }
    }

    entries
}

fn effective_path_item<'a>(
    item: &'a PathItem,
    components: Option<&'a Components>,
) -> &'a PathItem {
    match item.reference.as_deref() {
        Some(reference) => resolve_reference(reference, components).unwrap_or(item),
        None => item,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DOC: &str = r##"
openapi: "3.0.3"
info:
  title: Test API
  version: "1.0.0"
paths:
  /users:
    get:
      operationId: listUsers
      parameters:
        - name: page
          in: query
          schema:
            type: integer
    post:
      operationId: createUser
  /users/{id}:
    parameters:
      - name: id
        in: path
        required: true
        schema:
          type: string
      - name: verbose
        in: query
        schema:
          type: boolean
    get:
      operationId: getUser
      parameters:
        - name: verbose
          in: query
          required: true
          schema:
            type: boolean
    delete:
      operationId: deleteUser
      security: []
  /health:
    $ref: "#/components/pathItems/Health"
components:
  pathItems:
    Health:
      get:
        operationId: healthCheck
  parameters:
    ApiVersion:
      name: X-Api-Version
      in: header
      schema:
        type: string
security:
  - bearerAuth: []
"##;

    fn document() -> OpenApiDocument {
        serde_yaml::from_str(SAMPLE_DOC).unwrap()
    }

    #[test]
    fn test_operations_in_document_order() {
        let doc = document();
        let entries = operations(&doc);

        let ids: Vec<_> = entries.iter().filter_map(|e| e.operation_id()).collect();
        assert_eq!(
            ids,
            vec!["listUsers", "createUser", "getUser", "deleteUser", "healthCheck"]
        );
        assert_eq!(entries[0].method, HttpMethod::Get);
        assert_eq!(entries[1].method, HttpMethod::Post);
        assert_eq!(entries[2].path, "/users/{id}");
    }

    #[test]
    fn test_path_item_ref_is_followed() {
        let doc = document();
        let entries = operations(&doc);

        let health = entries
            .iter()
            .find(|e| e.operation_id() == Some("healthCheck"))
            .unwrap();
        assert_eq!(health.path, "/health");
        assert_eq!(health.method, HttpMethod::Get);
    }

    #[test]
    fn test_merged_parameters_operation_overrides_path() {
        let doc = document();
        let entries = operations(&doc);
        let get_user = entries
            .iter()
            .find(|e| e.operation_id() == Some("getUser"))
            .unwrap();

        let params = get_user.merged_parameters(doc.components());
        assert_eq!(params.len(), 2);

        let id = params.iter().find(|p| p.name == "id").unwrap();
        assert_eq!(id.location, ParameterLocation::Path);

        // The operation-level declaration replaces the path-level one
        let verbose = params.iter().find(|p| p.name == "verbose").unwrap();
        assert!(verbose.required);
    }

    #[test]
    fn test_merged_parameters_resolve_references() {
        let mut doc = document();
        doc.paths["/users"].get.as_mut().unwrap().parameters.push(RefOr::Ref {
            reference: "#/components/parameters/ApiVersion".to_string(),
        });

        let components = doc.components.clone();
        let entries = operations(&doc);
        let list_users = entries
            .iter()
            .find(|e| e.operation_id() == Some("listUsers"))
            .unwrap();

        let params = list_users.merged_parameters(components.as_ref());
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["page", "X-Api-Version"]);
    }

    #[test]
    fn test_effective_security() {
        let doc = document();
        let entries = operations(&doc);

        let get_user = entries
            .iter()
            .find(|e| e.operation_id() == Some("getUser"))
            .unwrap();
        // Inherits the document requirement
        assert_eq!(get_user.effective_security(&doc).len(), 1);
        assert!(get_user.effective_security(&doc)[0].contains_key("bearerAuth"));

        // An explicit empty list disables auth
        let delete_user = entries
            .iter()
            .find(|e| e.operation_id() == Some("deleteUser"))
            .unwrap();
        assert!(delete_user.effective_security(&doc).is_empty());
    }
}
