//! The dynamic model factory (C6): turns a `Schema` document into a
//! `TypeDescriptor` at runtime, sharing the same decode/encode/introspection
//! code a hand-written resource declaration uses.
//!
//! This is the part of the library that lets a caller hand it a `Schema` it
//! has never seen at compile time and get back something that decodes real
//! resource payloads exactly as a hand-written type would.

use crate::annotation::ReferenceKind;
use crate::descriptor::{FieldDescriptor, TypeDescriptor, TypeDescriptorBuilder, ValueKind};
use crate::error::InvalidSchemaDocument;
use crate::resource::wellknown;
use crate::schema::types::{AttributeDescriptor, AttributeType};
use crate::schema::Schema;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// Attribute names the carrier ([`crate::resource::core::Resource`]) always
/// handles itself; a `Schema` document that declares one is describing a
/// common attribute, not a field of the generated type.
const COMMON_ATTRIBUTES: &[&str] = &["schemas", "id", "externalId", "meta"];

/// Keyed by the schema's canonical JSON form, so concurrent calls with an
/// equal `Schema` share one generated descriptor (§5, "Ordering").
fn cache() -> &'static Mutex<HashMap<String, Arc<TypeDescriptor>>> {
    static CACHE: OnceLock<Mutex<HashMap<String, Arc<TypeDescriptor>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// `Schema.make_model()`: build (or, for a well-known schema URI, look up)
/// the resource type `schema` describes. Results are cached by the
/// schema's canonical JSON form, so repeated calls with an equal `Schema`
/// are cheap.
pub fn make_model(schema: &Schema) -> Result<Arc<TypeDescriptor>, InvalidSchemaDocument> {
    if let Some(base) = wellknown::by_schema_uri(&schema.id) {
        return Ok(base);
    }

    let cache_key = serde_json::to_string(schema).expect("Schema always serializes");
    if let Some(cached) = cache().lock().unwrap().get(&cache_key) {
        return Ok(cached.clone());
    }

    log::debug!("generating resource type for schema '{}'", schema.id);
    let mut builder = TypeDescriptorBuilder::new(schema.name.clone(), schema.id.clone()).allow_unknown_fields(true);
    for attr in &schema.attributes {
        if COMMON_ATTRIBUTES.contains(&attr.name.as_str()) {
            continue;
        }
        builder = builder.field(build_field(attr)?);
    }
    let descriptor = builder.build();
    cache().lock().unwrap().insert(cache_key, descriptor.clone());
    Ok(descriptor)
}

fn build_field(attr: &AttributeDescriptor) -> Result<FieldDescriptor, InvalidSchemaDocument> {
    if attr.data_type != AttributeType::Complex && !attr.sub_attributes.is_empty() {
        return Err(InvalidSchemaDocument::SubAttributesOnNonComplex {
            attribute: attr.name.clone(),
        });
    }

    let value_kind = match attr.data_type {
        AttributeType::String => ValueKind::Str,
        AttributeType::Boolean => ValueKind::Bool,
        AttributeType::Integer => ValueKind::Integer,
        AttributeType::Decimal => ValueKind::Decimal,
        AttributeType::DateTime => ValueKind::DateTime,
        AttributeType::Binary => ValueKind::Binary,
        AttributeType::Reference => ValueKind::Reference(reference_kind(attr)?),
        AttributeType::Complex => ValueKind::Complex(build_complex_type(attr)?),
    };

    Ok(FieldDescriptor::new(internal_name(&attr.name), attr.name.clone(), value_kind)
        .multi_valued(attr.multi_valued)
        .required(attr.required.into())
        .case_exact(attr.case_exact.into())
        .mutability(attr.mutability)
        .returned(attr.returned)
        .uniqueness(attr.uniqueness)
        .description(attr.description.clone())
        .examples(attr.canonical_values.clone()))
}

fn reference_kind(attr: &AttributeDescriptor) -> Result<ReferenceKind, InvalidSchemaDocument> {
    match attr.reference_types.as_slice() {
        [] => Err(InvalidSchemaDocument::EmptyReferenceTypes {
            attribute: attr.name.clone(),
        }),
        [only] if only == "external" => Ok(ReferenceKind::External),
        [only] if only == "uri" => Ok(ReferenceKind::Uri),
        types => Ok(ReferenceKind::ResourceTypes(types.to_vec())),
    }
}

fn build_complex_type(attr: &AttributeDescriptor) -> Result<Arc<TypeDescriptor>, InvalidSchemaDocument> {
    let mut sub_attributes = attr.sub_attributes.clone();
    if attr.multi_valued {
        synthesize_multi_valued_complex_sub_attributes(&mut sub_attributes);
    }

    let mut builder = TypeDescriptorBuilder::new(pascal_case(&attr.name), "");
    for sub in &sub_attributes {
        builder = builder.field(build_field(sub)?);
    }
    Ok(builder.build())
}

/// RFC 7643 §2.4: a multi-valued complex attribute implicitly carries
/// `type`/`primary`/`display` unless the schema already declares them.
fn synthesize_multi_valued_complex_sub_attributes(sub_attributes: &mut Vec<AttributeDescriptor>) {
    for (name, data_type) in [
        ("type", AttributeType::String),
        ("primary", AttributeType::Boolean),
        ("display", AttributeType::String),
    ] {
        if !sub_attributes.iter().any(|s| s.name == name) {
            sub_attributes.push(AttributeDescriptor::new(name, data_type));
        }
    }
}

/// camelCase wire name -> snake_case internal name, with `$ref -> ref` and
/// digit-boundary splitting (`x509Certificates -> x_509_certificates`).
fn internal_name(wire_name: &str) -> String {
    if wire_name == "$ref" {
        return "ref".to_string();
    }

    let chars: Vec<char> = wire_name.chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 {
            let prev = chars[i - 1];
            let at_boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() && c.is_ascii_digit())
                || (prev.is_ascii_digit() && c.is_alphabetic());
            if at_boundary {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// camelCase attribute name -> PascalCase nested type name
/// (`phoneNumbers -> PhoneNumbers`).
fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_name_converts_camel_case() {
        assert_eq!(internal_name("displayName"), "display_name");
        assert_eq!(internal_name("userName"), "user_name");
    }

    #[test]
    fn internal_name_handles_ref_and_digit_boundaries() {
        assert_eq!(internal_name("$ref"), "ref");
        assert_eq!(internal_name("x509Certificates"), "x_509_certificates");
    }

    #[test]
    fn pascal_case_capitalizes_first_letter() {
        assert_eq!(pascal_case("phoneNumbers"), "PhoneNumbers");
        assert_eq!(pascal_case("members"), "Members");
    }

    #[test]
    fn make_model_for_well_known_schema_returns_hand_written_base() {
        let schema = Schema {
            id: wellknown::GROUP_SCHEMA.to_string(),
            name: "Group".to_string(),
            description: String::new(),
            attributes: Vec::new(),
            meta: None,
        };
        let generated = make_model(&schema).unwrap();
        assert_eq!(generated.name, "Group");
        assert!(generated.field("members").is_some());
    }

    #[test]
    fn make_model_rejects_empty_reference_types() {
        let mut attr = AttributeDescriptor::new("manager", AttributeType::Reference);
        attr.reference_types = Vec::new();
        let schema = Schema {
            id: "urn:example:Widget".to_string(),
            name: "Widget".to_string(),
            description: String::new(),
            attributes: vec![attr],
            meta: None,
        };
        assert!(matches!(
            make_model(&schema),
            Err(InvalidSchemaDocument::EmptyReferenceTypes { .. })
        ));
    }

    #[test]
    fn make_model_rejects_sub_attributes_on_non_complex() {
        let mut attr = AttributeDescriptor::new("label", AttributeType::String);
        attr.sub_attributes = vec![AttributeDescriptor::new("inner", AttributeType::String)];
        let schema = Schema {
            id: "urn:example:Widget".to_string(),
            name: "Widget".to_string(),
            description: String::new(),
            attributes: vec![attr],
            meta: None,
        };
        assert!(matches!(
            make_model(&schema),
            Err(InvalidSchemaDocument::SubAttributesOnNonComplex { .. })
        ));
    }

    #[test]
    fn make_model_synthesizes_type_primary_display_for_multi_valued_complex() {
        let mut attr = AttributeDescriptor::new("photos", AttributeType::Complex);
        attr.multi_valued = true;
        attr.sub_attributes = vec![AttributeDescriptor::new("value", AttributeType::String)];
        let schema = Schema {
            id: "urn:example:Widget".to_string(),
            name: "Widget".to_string(),
            description: String::new(),
            attributes: vec![attr],
            meta: None,
        };
        let generated = make_model(&schema).unwrap();
        let field = generated.field("photos").unwrap();
        let ValueKind::Complex(nested) = field.root_type() else {
            panic!("expected a complex field");
        };
        assert!(nested.field("type").is_some());
        assert!(nested.field("primary").is_some());
        assert!(nested.field("display").is_some());
    }
}
