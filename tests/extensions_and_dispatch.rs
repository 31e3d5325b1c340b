//! Enterprise extension buckets (C3 extension handling) and discriminated
//! union dispatch (C4).

use scim_models::resource::{core, wellknown, EnterpriseUser, ListResponse};
use scim_models::EncodeMode;
use serde_json::json;

#[test]
fn enterprise_extension_decodes_and_round_trips() {
    let payload = json!({
        "schemas": [
            "urn:ietf:params:scim:schemas:core:2.0:User",
            "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User"
        ],
        "id": "2819c223-7f76-453a-919d-413861904646",
        "userName": "bjensen@example.com",
        "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User": {
            "employeeNumber": "701984",
            "manager": {
                "value": "26118915-6090-4610-87e4-49d8ca9f808d",
                "$ref": "https://example.com/v2/Users/26118915-6090-4610-87e4-49d8ca9f808d"
            }
        }
    });

    let user = core::decode(&wellknown::user(), &payload).unwrap();
    let enterprise = user.get_extension::<EnterpriseUser>().unwrap().expect("extension present");

    assert_eq!(
        enterprise.get_attribute("employee_number").unwrap(),
        "701984"
    );
    let manager = enterprise.get_attribute("manager").unwrap();
    assert_eq!(
        manager.get("ref").unwrap(),
        "https://example.com/v2/Users/26118915-6090-4610-87e4-49d8ca9f808d"
    );

    let encoded = core::encode(&user, EncodeMode::Default);
    assert_eq!(encoded, payload);
}

#[test]
fn extension_lookup_fails_for_undeclared_extension() {
    let payload = json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Group"],
        "id": "e9e30dba-f08f-4109-8486-d5c6a331660a",
        "displayName": "Tour Guides"
    });
    let group = core::decode(&wellknown::group(), &payload).unwrap();

    let err = group.get_extension::<EnterpriseUser>().unwrap_err();
    assert!(matches!(err, scim_models::DecodeError::ExtensionLookupFailure { .. }));
}

#[test]
fn list_response_dispatches_each_resource_by_its_schemas_tag() {
    let payload = json!({
        "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
        "totalResults": 2,
        "Resources": [
            {
                "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
                "id": "2819c223-7f76-453a-919d-413861904646",
                "userName": "bjensen@example.com"
            },
            {
                "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Group"],
                "id": "e9e30dba-f08f-4109-8486-d5c6a331660a",
                "displayName": "Tour Guides"
            }
        ]
    });

    let candidates = vec![wellknown::user(), wellknown::group()];
    let list = ListResponse::decode(&candidates, &payload).unwrap();

    assert_eq!(list.total_results, 2);
    assert_eq!(list.resources[0].descriptor.name, "User");
    assert_eq!(list.resources[1].descriptor.name, "Group");
}

#[test]
fn list_response_rejects_an_unrecognized_schema_tag() {
    let payload = json!({
        "totalResults": 1,
        "Resources": [
            {"schemas": ["urn:example:Unknown"], "id": "x"}
        ]
    });
    let candidates = vec![wellknown::user(), wellknown::group()];
    let err = ListResponse::decode(&candidates, &payload).unwrap_err();
    assert!(matches!(err, scim_models::DecodeError::SchemaMismatch { .. }));
}
