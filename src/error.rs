//! Error types for resource decoding, encoding, and dynamic model generation.
//!
//! Errors are never partially recovered: a bad payload fails the whole
//! operation, and every decode or generate error carries a dotted SCIM
//! attribute path (wire names, not internal names) identifying where it
//! occurred.

use thiserror::Error;

/// The kind of failure that occurred while decoding a JSON payload against
/// a [`crate::descriptor::TypeDescriptor`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A value fails the type-level contract: required missing, wrong JSON
    /// kind, bad enum, bad reference kind.
    #[error("{path}: schema mismatch: {message}")]
    SchemaMismatch { path: String, message: String },

    /// A strict type saw a field it cannot place.
    #[error("{path}: unknown field")]
    UnknownField { path: String },

    /// A string-enum value fell outside the declared set.
    #[error("{path}: invalid enum value '{value}'")]
    InvalidEnum { path: String, value: String },

    /// A date-time attribute could not be parsed as RFC 3339.
    #[error("{path}: invalid date-time '{value}'")]
    InvalidDateTime { path: String, value: String },

    /// Indexing a resource by a type that is not one of its declared
    /// extensions.
    #[error("'{schema_uri}' is not a declared extension of this resource")]
    ExtensionLookupFailure { schema_uri: String },
}

impl DecodeError {
    pub fn schema_mismatch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unknown_field(path: impl Into<String>) -> Self {
        Self::UnknownField { path: path.into() }
    }

    pub fn invalid_enum(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidEnum {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn invalid_date_time(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDateTime {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Prefix this error's path with `segment`, building up the dotted
    /// attribute path as decode unwinds out of nested complex attributes.
    pub fn nest(self, segment: &str) -> Self {
        let prefix = |path: String| -> String {
            if path.is_empty() {
                segment.to_string()
            } else {
                format!("{segment}.{path}")
            }
        };
        match self {
            Self::SchemaMismatch { path, message } => Self::SchemaMismatch {
                path: prefix(path),
                message,
            },
            Self::UnknownField { path } => Self::UnknownField { path: prefix(path) },
            Self::InvalidEnum { path, value } => Self::InvalidEnum {
                path: prefix(path),
                value,
            },
            Self::InvalidDateTime { path, value } => Self::InvalidDateTime {
                path: prefix(path),
                value,
            },
            other @ Self::ExtensionLookupFailure { .. } => other,
        }
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised by the dynamic model factory ([`crate::factory::make_model`])
/// when a `Schema` document cannot be turned into a type descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidSchemaDocument {
    #[error("attribute '{attribute}' has unknown type '{data_type}'")]
    UnknownType { attribute: String, data_type: String },

    #[error("attribute '{attribute}' declares subAttributes but is not type 'complex'")]
    SubAttributesOnNonComplex { attribute: String },

    #[error("attribute '{attribute}' is type 'reference' but declares no referenceTypes")]
    EmptyReferenceTypes { attribute: String },
}
