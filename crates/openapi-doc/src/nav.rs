//! Tag-grouped navigation index for documentation shells

use crate::operations::operations;
use crate::types::{HttpMethod, OpenApiDocument};
use serde::{Deserialize, Serialize};

/// Group name for operations without tags
pub const DEFAULT_GROUP: &str = "default";

/// Ordered, tag-grouped view of a document's operations.
///
/// Group order follows the document's `tags` declaration, then first
/// encounter; operations without tags land in the `default` group, and an
/// operation with several tags appears under each. Declared tags that no
/// operation uses are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavIndex {
    groups: Vec<NavGroup>,
}

/// One sidebar group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavGroup {
    pub tag: String,
    pub description: Option<String>,
    pub entries: Vec<NavEntry>,
}

/// One sidebar row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavEntry {
    pub method: HttpMethod,
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub deprecated: bool,
}

impl NavIndex {
    /// Build the index from a parsed document
    pub fn build(document: &OpenApiDocument) -> Self {
        let mut groups: Vec<NavGroup> = document
            .tags
            .iter()
            .map(|tag| NavGroup {
                tag: tag.name.clone(),
                description: tag.description.clone(),
                entries: Vec::new(),
            })
            .collect();

        for op in operations(document) {
            let entry = NavEntry {
                method: op.method,
                path: op.path.to_string(),
                operation_id: op.operation.operation_id.clone(),
                summary: op.operation.summary.clone(),
                deprecated: op.operation.deprecated,
            };

            if op.operation.tags.is_empty() {
                push_entry(&mut groups, DEFAULT_GROUP, entry);
            } else {
                for tag in &op.operation.tags {
                    push_entry(&mut groups, tag, entry.clone());
                }
            }
        }

        groups.retain(|group| !group.entries.is_empty());
        Self { groups }
    }

    pub fn groups(&self) -> &[NavGroup] {
        &self.groups
    }

    /// First entry with the given operation id
    pub fn find(&self, operation_id: &str) -> Option<&NavEntry> {
        self.entries()
            .find(|entry| entry.operation_id.as_deref() == Some(operation_id))
    }

    /// First entry matching a method and path template
    pub fn find_route(&self, method: HttpMethod, path: &str) -> Option<&NavEntry> {
        self.entries()
            .find(|entry| entry.method == method && entry.path == path)
    }

    /// Number of rows (an operation with several tags counts once per tag)
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn entries(&self) -> impl Iterator<Item = &NavEntry> {
        self.groups.iter().flat_map(|group| group.entries.iter())
    }
}

fn push_entry(groups: &mut Vec<NavGroup>, tag: &str, entry: NavEntry) {
    if let Some(group) = groups.iter_mut().find(|group| group.tag == tag) {
        group.entries.push(entry);
    } else {
        groups.push(NavGroup {
            tag: tag.to_string(),
            description: None,
            entries: vec![entry],
        });
    }
}
