//! SCIM `Schema` documents (RFC 7643 §7): the typed input to the dynamic
//! model factory ([`crate::factory::make_model`]).
//!
//! ## Organization
//!
//! - [`types`] - `Schema` / `AttributeDescriptor` / `AttributeType`
//! - [`registry`] - loads and holds `Schema` documents, by file or embedded
//! - `embedded` - the core User/Group/ServiceProviderConfig schemas as JSON
//!
//! ```
//! use scim_models::schema::SchemaRegistry;
//!
//! let registry = SchemaRegistry::with_embedded_schemas().unwrap();
//! let user_schema = registry.get_user_schema().unwrap();
//! assert_eq!(user_schema.id, "urn:ietf:params:scim:schemas:core:2.0:User");
//! ```

mod embedded;
pub mod registry;
pub mod types;

#[cfg(test)]
mod tests;

pub use registry::SchemaRegistry;
pub use types::{AttributeDescriptor, AttributeType, MetaDocument, Schema};
