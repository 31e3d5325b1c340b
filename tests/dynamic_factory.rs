//! The dynamic model factory (C6): a `Schema` document produces a type
//! that decodes resource payloads identically to the hand-written model.

use scim_models::resource::{core, wellknown};
use scim_models::schema::SchemaRegistry;
use scim_models::{make_model, AttributeDescriptor, AttributeType};
use serde_json::json;

#[test]
fn generated_group_decodes_like_the_hand_written_group() {
    let registry = SchemaRegistry::with_embedded_schemas().unwrap();
    let group_schema = registry.get_group_schema().unwrap();

    let generated = make_model(group_schema).unwrap();

    let payload = json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Group"],
        "id": "e9e30dba-f08f-4109-8486-d5c6a331660a",
        "displayName": "Tour Guides",
        "members": [
            {
                "value": "2819c223-7f76-453a-919d-413861904646",
                "$ref": "https://example.com/v2/Users/2819c223-7f76-453a-919d-413861904646",
                "display": "Babs Jensen"
            }
        ],
        "meta": {
            "resourceType": "Group",
            "created": "2010-01-23T04:56:22Z",
            "lastModified": "2011-05-13T04:42:34Z"
        }
    });

    let from_generated = core::decode(&generated, &payload).unwrap();
    let from_hand_written = core::decode(&wellknown::group(), &payload).unwrap();

    assert_eq!(
        from_generated.get_attribute("display_name"),
        from_hand_written.get_attribute("display_name")
    );
    assert_eq!(
        from_generated.get_attribute("members"),
        from_hand_written.get_attribute("members")
    );
}

#[test]
fn generated_type_carries_the_schema_s_declared_annotations() {
    let mut attr = AttributeDescriptor::new("costCode", AttributeType::String);
    attr.required = true;
    attr.case_exact = true;

    let schema = scim_models::Schema {
        id: "urn:example:Widget".to_string(),
        name: "Widget".to_string(),
        description: String::new(),
        attributes: vec![attr],
        meta: None,
    };

    let generated = make_model(&schema).unwrap();
    let field = generated.field("cost_code").unwrap();

    assert_eq!(field.alias, "costCode");
    assert_eq!(field.required, scim_models::Required::True);
    assert_eq!(field.case_exact, scim_models::CaseExact::True);
}

#[test]
fn make_model_is_deterministic_for_equal_schemas() {
    let mut attr = AttributeDescriptor::new("nickname", AttributeType::String);
    attr.multi_valued = false;
    let schema = scim_models::Schema {
        id: "urn:example:Thing".to_string(),
        name: "Thing".to_string(),
        description: String::new(),
        attributes: vec![attr],
        meta: None,
    };

    let first = make_model(&schema).unwrap();
    let second = make_model(&schema).unwrap();

    assert_eq!(first.fields.len(), second.fields.len());
    assert_eq!(first.fields[0].internal_name, second.fields[0].internal_name);
    assert_eq!(first.fields[0].alias, second.fields[0].alias);
}
