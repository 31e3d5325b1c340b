//! End-to-end scenarios against the canonical RFC 7643 sample payloads.

use pretty_assertions::assert_eq;
use scim_models::resource::{core, wellknown};
use scim_models::EncodeMode;
use serde_json::json;

#[test]
fn group_sample_decodes_and_round_trips() {
    let payload = json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:Group"],
        "id": "e9e30dba-f08f-4109-8486-d5c6a331660a",
        "displayName": "Tour Guides",
        "members": [
            {
                "value": "2819c223-7f76-453a-919d-413861904646",
                "$ref": "https://example.com/v2/Users/2819c223-7f76-453a-919d-413861904646",
                "display": "Babs Jensen"
            },
            {
                "value": "902c246b-6245-4190-8e05-00816be7344a",
                "$ref": "https://example.com/v2/Users/902c246b-6245-4190-8e05-00816be7344a",
                "display": "Mandy Pepperidge"
            }
        ],
        "meta": {
            "resourceType": "Group",
            "created": "2010-01-23T04:56:22Z",
            "lastModified": "2011-05-13T04:42:34Z",
            "version": "W/\"3694e05e9dff590\"",
            "location": "https://example.com/v2/Groups/e9e30dba-f08f-4109-8486-d5c6a331660a"
        }
    });

    let group = core::decode(&wellknown::group(), &payload).unwrap();

    assert_eq!(group.id.as_deref(), Some("e9e30dba-f08f-4109-8486-d5c6a331660a"));
    let members = group.get_attribute("members").unwrap().as_array().unwrap();
    let first_ref = members[0].get("ref").unwrap().as_str().unwrap();
    assert_eq!(first_ref, "https://example.com/v2/Users/2819c223-7f76-453a-919d-413861904646");
    assert!(first_ref.starts_with("https://"));

    let meta = group.meta.as_ref().unwrap();
    assert_eq!(meta.created.to_rfc3339(), "2010-01-23T04:56:22+00:00");

    let encoded = core::encode(&group, EncodeMode::Default);
    assert_eq!(encoded, payload);
}

#[test]
fn user_sample_decodes_emails_addresses_and_certificates() {
    let certificate_b64 = "ZmFrZS1kZXItY2VydGlmaWNhdGUtYnl0ZXM=";

    let payload = json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
        "id": "2819c223-7f76-453a-919d-413861904646",
        "userName": "bjensen@example.com",
        "name": {
            "formatted": "Ms. Barbara J Jensen, III",
            "familyName": "Jensen",
            "givenName": "Barbara"
        },
        "emails": [
            {"value": "bjensen@example.com", "type": "work", "primary": true},
            {"value": "babs@jensen.org", "type": "home"}
        ],
        "addresses": [
            {
                "formatted": "100 Universal City Plaza\nHollywood, CA 91608 USA",
                "streetAddress": "100 Universal City Plaza",
                "locality": "Hollywood",
                "region": "CA",
                "postalCode": "91608",
                "country": "USA",
                "type": "work",
                "primary": true
            }
        ],
        "x509Certificates": [
            {"value": certificate_b64}
        ],
        "active": true
    });

    let user = core::decode(&wellknown::user(), &payload).unwrap();

    let emails = user.get_attribute("emails").unwrap().as_array().unwrap();
    assert_eq!(emails[0]["type"], "work");
    assert_eq!(emails[0]["primary"], true);

    let addresses = user.get_attribute("addresses").unwrap().as_array().unwrap();
    assert!(addresses[0]["formatted"].as_str().unwrap().contains('\n'));

    let certs = user.get_attribute("x_509_certificates").unwrap().as_array().unwrap();
    let stored_b64 = certs[0]["value"].as_str().unwrap();
    assert_eq!(stored_b64, certificate_b64);

    let encoded = core::encode(&user, EncodeMode::Default);
    assert_eq!(encoded, payload);
}

#[test]
fn required_user_name_enforced_on_decode() {
    let payload = json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
        "id": "2819c223-7f76-453a-919d-413861904646"
    });

    let err = core::decode(&wellknown::user(), &payload).unwrap_err();
    assert!(matches!(err, scim_models::DecodeError::SchemaMismatch { path, .. } if path == "userName"));
}
