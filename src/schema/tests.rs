use super::*;

#[test]
fn embedded_user_schema_round_trips() {
    let registry = SchemaRegistry::with_embedded_schemas().unwrap();
    let user_schema = registry.get_user_schema().unwrap();
    assert_eq!(user_schema.id, "urn:ietf:params:scim:schemas:core:2.0:User");
    assert!(user_schema.attributes.iter().any(|a| a.name == "userName"));
}

#[test]
fn embedded_group_schema_has_members_reference() {
    let registry = SchemaRegistry::with_embedded_schemas().unwrap();
    let group_schema = registry.get_group_schema().unwrap();
    let members = group_schema
        .attributes
        .iter()
        .find(|a| a.name == "members")
        .expect("members attribute");
    assert!(members.multi_valued);
    assert_eq!(members.data_type, AttributeType::Complex);
}

#[test]
fn add_schema_then_retrieve_by_id() {
    let mut registry = SchemaRegistry::new();
    assert!(registry.get_schema("urn:example:Widget").is_none());

    let schema = Schema {
        id: "urn:example:Widget".to_string(),
        name: "Widget".to_string(),
        description: "A widget".to_string(),
        attributes: vec![AttributeDescriptor::new("label", AttributeType::String)],
        meta: None,
    };
    registry.add_schema(schema);

    let fetched = registry.get_schema("urn:example:Widget").unwrap();
    assert_eq!(fetched.attributes.len(), 1);
}
