//! A typed SCIM 2.0 (RFC 7643/7644) resource model with a dynamic,
//! schema-driven model factory.
//!
//! Resources decode from and encode to JSON through one shared engine
//! ([`resource::core`]), whether the resource type in question was declared
//! by hand ([`resource::wellknown`]) or generated at runtime from a
//! `Schema` document ([`factory::make_model`]). Every attribute carries its
//! RFC 7643 metadata (mutability, returned, uniqueness, case sensitivity,
//! required) as a [`descriptor::FieldDescriptor`], discoverable through
//! [`descriptor::TypeDescriptor`]'s introspection methods regardless of a
//! type's origin.
//!
//! ## Quick start
//!
//! ```
//! use scim_models::resource::{self, wellknown};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Group"],
//!     "id": "e9e30dba-f08f-4109-8486-d5c6a331660a",
//!     "displayName": "Tour Guides",
//!     "members": [
//!         {"value": "2819c223", "$ref": "https://example.com/v2/Users/2819c223", "display": "Babs Jensen"}
//!     ]
//! });
//!
//! let group = resource::core::decode(&wellknown::group(), &payload).unwrap();
//! assert_eq!(group.get_attribute("display_name").unwrap(), "Tour Guides");
//! ```
//!
//! Generating a type at runtime from a `Schema` document goes through
//! [`factory::make_model`] instead of a hand-written descriptor, but decodes
//! through the exact same [`resource::core::decode`].

pub mod annotation;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod messages;
pub mod resource;
pub mod schema;

pub use annotation::{CaseExact, Mutability, Reference, ReferenceKind, Required, Returned, Uniqueness};
pub use descriptor::{FieldDescriptor, TypeDescriptor, TypeDescriptorBuilder, ValueKind};
pub use error::{DecodeError, DecodeResult, InvalidSchemaDocument};
pub use factory::make_model;
pub use resource::{EncodeMode, ExtensionKind, ListResponse, Meta, Resource};
pub use schema::{AttributeDescriptor, AttributeType, Schema, SchemaRegistry};
