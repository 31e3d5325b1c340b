//! Core schema type definitions for SCIM resources (C5).
//!
//! `Schema` and `AttributeDescriptor` are the typed representation of a
//! SCIM `Schema` document (RFC 7643 §7): the input to the dynamic model
//! factory ([`crate::factory::make_model`]). Descriptors are created by
//! deserializing a `Schema` document and are otherwise immutable.

use crate::annotation::{Mutability, Returned, Uniqueness};
use serde::{Deserialize, Serialize};

/// A SCIM schema definition: `urn:ietf:params:scim:schemas:core:2.0:Schema`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    /// The schema URI, also used as its identifier.
    pub id: String,
    pub name: String,
    pub description: String,
    pub attributes: Vec<AttributeDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaDocument>,
}

/// A lax `meta` carried on schema documents; kept separate from
/// [`crate::resource::core::Meta`] since schema documents in the wild omit
/// `created`/`lastModified` far more often than resources do.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Describes one attribute of a SCIM resource type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    /// Wire name: camelCase, or `$ref`.
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: AttributeType,
    #[serde(default)]
    pub multi_valued: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub case_exact: bool,
    #[serde(default)]
    pub mutability: Mutability,
    #[serde(default)]
    pub returned: Returned,
    #[serde(default)]
    pub uniqueness: Uniqueness,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "canonicalValues")]
    pub canonical_values: Vec<String>,
    /// Only meaningful when `data_type == Reference`.
    #[serde(default, rename = "referenceTypes")]
    pub reference_types: Vec<String>,
    /// Only meaningful when `data_type == Complex`. SCIM 2.0 forbids
    /// nesting deeper than one level; this type accepts deeper trees
    /// (callers that hand-author such a descriptor are on their own for
    /// RFC compliance) but `make_model` never emits more than one level.
    #[serde(default, rename = "subAttributes")]
    pub sub_attributes: Vec<AttributeDescriptor>,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, data_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            data_type,
            multi_valued: false,
            required: false,
            case_exact: false,
            mutability: Mutability::default(),
            returned: Returned::default(),
            uniqueness: Uniqueness::default(),
            description: String::new(),
            canonical_values: Vec::new(),
            reference_types: Vec::new(),
            sub_attributes: Vec::new(),
        }
    }
}

/// SCIM attribute data types (RFC 7643 §2.2).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AttributeType {
    String,
    Boolean,
    Decimal,
    Integer,
    DateTime,
    Binary,
    Reference,
    Complex,
}
