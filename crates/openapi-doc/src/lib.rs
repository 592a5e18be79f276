//! # openapi-doc
//!
//! OpenAPI 3.x document model for API explorers.
//! Loads documents, resolves `$ref` indirections lazily, synthesizes example
//! values from schemas, and builds flat operation and navigation views.

mod auth;
mod error;
mod example;
mod loader;
mod nav;
mod operations;
mod resolver;
mod types;

pub use auth::AuthScheme;
pub use error::{LoadError, LoadResult};
pub use example::{example_value, ExampleSynthesizer};
pub use loader::DocumentLoader;
pub use nav::{NavEntry, NavGroup, NavIndex, DEFAULT_GROUP};
pub use operations::{operations, OperationEntry};
pub use resolver::{component_key, resolve, resolve_reference, Component};
pub use types::*;
