//! The `Schema` document model (C5) round-trips JSON, and the registry
//! loads the embedded core schemas with the metadata `make_model` expects.

use scim_models::schema::SchemaRegistry;
use scim_models::{AttributeType, Mutability, Returned, Uniqueness};

#[test]
fn embedded_user_schema_carries_expected_annotations() {
    let registry = SchemaRegistry::with_embedded_schemas().unwrap();
    let user_schema = registry.get_user_schema().unwrap();

    let id_attr = user_schema.attributes.iter().find(|a| a.name == "id").unwrap();
    assert_eq!(id_attr.mutability, Mutability::ReadOnly);
    assert_eq!(id_attr.returned, Returned::Always);
    assert_eq!(id_attr.uniqueness, Uniqueness::Server);

    let username_attr = user_schema.attributes.iter().find(|a| a.name == "userName").unwrap();
    assert!(username_attr.required);
}

#[test]
fn schema_document_round_trips_through_json() {
    let registry = SchemaRegistry::with_embedded_schemas().unwrap();
    let group_schema = registry.get_group_schema().unwrap();

    let encoded = serde_json::to_value(group_schema).unwrap();
    let decoded: scim_models::Schema = serde_json::from_value(encoded.clone()).unwrap();
    let re_encoded = serde_json::to_value(&decoded).unwrap();

    assert_eq!(encoded, re_encoded);
}

#[test]
fn group_schema_members_sub_attribute_declares_reference_types() {
    let registry = SchemaRegistry::with_embedded_schemas().unwrap();
    let group_schema = registry.get_group_schema().unwrap();

    let members = group_schema.attributes.iter().find(|a| a.name == "members").unwrap();
    assert_eq!(members.data_type, AttributeType::Complex);
    let ref_attr = members.sub_attributes.iter().find(|a| a.name == "$ref").unwrap();
    assert_eq!(ref_attr.reference_types, vec!["User".to_string(), "Group".to_string()]);
}
