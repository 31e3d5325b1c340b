//! SCIM attribute metadata carried alongside every field.
//!
//! These five enums are the orthogonal axes RFC 7643 attaches to every
//! attribute definition. They are shared by hand-written resource
//! declarations and by types produced by the dynamic model factory
//! ([`crate::factory`]), so introspection never needs to branch on a
//! type's origin.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether and how an attribute can be modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    ReadOnly,
    #[default]
    ReadWrite,
    Immutable,
    WriteOnly,
}

/// Whether an attribute is returned in a representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Returned {
    Always,
    Never,
    #[default]
    Default,
    Request,
}

/// Scope of uniqueness enforced for an attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Uniqueness {
    #[default]
    None,
    Server,
    Global,
}

/// Whether string comparison on an attribute's value is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseExact {
    True,
    #[default]
    False,
}

impl From<bool> for CaseExact {
    fn from(b: bool) -> Self {
        if b { Self::True } else { Self::False }
    }
}

impl From<CaseExact> for bool {
    fn from(c: CaseExact) -> Self {
        matches!(c, CaseExact::True)
    }
}

/// Whether an attribute must be present on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Required {
    True,
    #[default]
    False,
}

impl From<bool> for Required {
    fn from(b: bool) -> Self {
        if b { Self::True } else { Self::False }
    }
}

impl From<Required> for bool {
    fn from(r: Required) -> Self {
        matches!(r, Required::True)
    }
}

/// The structural kind a [`crate::descriptor::ValueKind::Reference`] field is
/// constrained to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Any absolute URL.
    External,
    /// Any URI, including URNs.
    Uri,
    /// The URI must identify a resource of one of the named SCIM resource
    /// types. Resolution of these tags to a concrete type is left to the
    /// caller; structurally any string is accepted.
    ResourceTypes(Vec<String>),
}

/// A tagged URI string, the wire form of a SCIM reference attribute.
///
/// Written and read as a plain JSON string; the tag determines what
/// structural validation [`Reference::parse`] performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    value: String,
}

impl Reference {
    /// Validate `value` against `kind` and wrap it.
    pub fn parse(value: String, kind: &ReferenceKind) -> Result<Self, crate::error::DecodeError> {
        match kind {
            ReferenceKind::External => {
                if url::Url::parse(&value).is_ok() {
                    Ok(Self { value })
                } else {
                    Err(crate::error::DecodeError::schema_mismatch(
                        "",
                        format!("'{value}' is not an absolute URL"),
                    ))
                }
            }
            ReferenceKind::Uri => {
                if value.contains(':') {
                    Ok(Self { value })
                } else {
                    Err(crate::error::DecodeError::schema_mismatch(
                        "",
                        format!("'{value}' is not a URI"),
                    ))
                }
            }
            // The server is the authority on resource-type references; any
            // string is structurally accepted, equality is by string value.
            ReferenceKind::ResourceTypes(_) => Ok(Self { value }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Serialize for Reference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}
