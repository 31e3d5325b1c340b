//! Hand-written descriptors for the standard SCIM resource and extension
//! types (RFC 7643 §4, §6, §8.7). These are the "base of that kind" the
//! dynamic factory starts from when a `Schema` document's `id` names one of
//! them (§4.5 step 1), so a schema-driven User or Group keeps exactly the
//! shape a caller who wrote it by hand would get.

use crate::annotation::{CaseExact, Mutability, Required, ReferenceKind, Returned, Uniqueness};
use crate::descriptor::{FieldDescriptor, TypeDescriptor, TypeDescriptorBuilder, ValueKind};
use crate::resource::core::ExtensionKind;
use std::sync::Arc;

pub const USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
pub const GROUP_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
pub const ENTERPRISE_USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User";
pub const RESOURCE_TYPE_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:ResourceType";
pub const SERVICE_PROVIDER_CONFIG_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:ServiceProviderConfig";

/// The base descriptor the factory starts from for one of the well-known
/// schema URIs (§4.5 step 1), or `None` if `schema_uri` names none of them.
pub fn by_schema_uri(schema_uri: &str) -> Option<Arc<TypeDescriptor>> {
    match schema_uri {
        USER_SCHEMA => Some(user()),
        GROUP_SCHEMA => Some(group()),
        ENTERPRISE_USER_SCHEMA => Some(enterprise_user()),
        RESOURCE_TYPE_SCHEMA => Some(resource_type()),
        SERVICE_PROVIDER_CONFIG_SCHEMA => Some(service_provider_config()),
        _ => None,
    }
}

fn multi_valued_complex(name: &str, wire_extra: &[FieldDescriptor]) -> Arc<TypeDescriptor> {
    let mut fields = vec![
        FieldDescriptor::new("value", "value", ValueKind::Str),
        FieldDescriptor::new("type", "type", ValueKind::Str).mutability(Mutability::ReadWrite),
        FieldDescriptor::new("primary", "primary", ValueKind::Bool),
        FieldDescriptor::new("display", "display", ValueKind::Str).mutability(Mutability::ReadOnly),
    ];
    fields.extend(wire_extra.iter().cloned());
    TypeDescriptorBuilder::new(name, "").field_all(fields).build()
}

pub fn user() -> Arc<TypeDescriptor> {
    let name = TypeDescriptorBuilder::new("Name", "")
        .field(FieldDescriptor::new("formatted", "formatted", ValueKind::Str))
        .field(FieldDescriptor::new("family_name", "familyName", ValueKind::Str))
        .field(FieldDescriptor::new("given_name", "givenName", ValueKind::Str))
        .field(FieldDescriptor::new("middle_name", "middleName", ValueKind::Str))
        .field(FieldDescriptor::new("honorific_prefix", "honorificPrefix", ValueKind::Str))
        .field(FieldDescriptor::new("honorific_suffix", "honorificSuffix", ValueKind::Str))
        .build();

    let address = TypeDescriptorBuilder::new("Addresses", "")
        .field(FieldDescriptor::new("formatted", "formatted", ValueKind::Str))
        .field(FieldDescriptor::new("street_address", "streetAddress", ValueKind::Str))
        .field(FieldDescriptor::new("locality", "locality", ValueKind::Str))
        .field(FieldDescriptor::new("region", "region", ValueKind::Str))
        .field(FieldDescriptor::new("postal_code", "postalCode", ValueKind::Str))
        .field(FieldDescriptor::new("country", "country", ValueKind::Str))
        .field(FieldDescriptor::new("type", "type", ValueKind::Str))
        .field(FieldDescriptor::new("primary", "primary", ValueKind::Bool))
        .build();

    let certificate = multi_valued_complex("X509Certificates", &[]);
    // x509Certificates carries `value` as raw bytes, not a string identifier.
    let certificate = Arc::new(TypeDescriptor {
        fields: certificate
            .fields
            .iter()
            .map(|f| {
                if f.internal_name == "value" {
                    FieldDescriptor::new("value", "value", ValueKind::Binary)
                } else {
                    f.clone()
                }
            })
            .collect(),
        ..(*certificate).clone()
    });

    TypeDescriptorBuilder::new("User", USER_SCHEMA)
        .allow_unknown_fields(true)
        .field(
            FieldDescriptor::new("user_name", "userName", ValueKind::Str)
                .required(Required::True)
                .uniqueness(Uniqueness::Server),
        )
        .field(FieldDescriptor::new("name", "name", ValueKind::Complex(name)))
        .field(FieldDescriptor::new("display_name", "displayName", ValueKind::Str))
        .field(FieldDescriptor::new("nick_name", "nickName", ValueKind::Str))
        .field(FieldDescriptor::new("profile_url", "profileUrl", ValueKind::Reference(ReferenceKind::External)))
        .field(FieldDescriptor::new("title", "title", ValueKind::Str))
        .field(FieldDescriptor::new("user_type", "userType", ValueKind::Str))
        .field(FieldDescriptor::new("preferred_language", "preferredLanguage", ValueKind::Str))
        .field(FieldDescriptor::new("locale", "locale", ValueKind::Str))
        .field(FieldDescriptor::new("timezone", "timezone", ValueKind::Str))
        .field(FieldDescriptor::new("active", "active", ValueKind::Bool))
        .field(FieldDescriptor::new("password", "password", ValueKind::Str).mutability(Mutability::WriteOnly).returned(Returned::Never))
        .field(
            FieldDescriptor::new("emails", "emails", ValueKind::Complex(multi_valued_complex("Emails", &[])))
                .multi_valued(true),
        )
        .field(
            FieldDescriptor::new(
                "phone_numbers",
                "phoneNumbers",
                ValueKind::Complex(multi_valued_complex("PhoneNumbers", &[])),
            )
            .multi_valued(true),
        )
        .field(FieldDescriptor::new("addresses", "addresses", ValueKind::Complex(address)).multi_valued(true))
        .field(
            FieldDescriptor::new(
                "x_509_certificates",
                "x509Certificates",
                ValueKind::Complex(certificate),
            )
            .multi_valued(true),
        )
        .field(
            FieldDescriptor::new(
                "groups",
                "groups",
                ValueKind::Complex(multi_valued_complex("Groups", &[])),
            )
            .multi_valued(true)
            .mutability(Mutability::ReadOnly),
        )
        .extension(ENTERPRISE_USER_SCHEMA, enterprise_user())
        .build()
}

pub fn group() -> Arc<TypeDescriptor> {
    let member = TypeDescriptorBuilder::new("Members", "")
        .field(FieldDescriptor::new("value", "value", ValueKind::Str).mutability(Mutability::Immutable))
        .field(
            FieldDescriptor::new(
                "ref",
                "$ref",
                ValueKind::Reference(ReferenceKind::ResourceTypes(vec!["User".to_string(), "Group".to_string()])),
            )
            .mutability(Mutability::Immutable),
        )
        .field(
            FieldDescriptor::new("type", "type", ValueKind::Str)
                .mutability(Mutability::Immutable)
                .examples(vec!["User".to_string(), "Group".to_string()]),
        )
        .field(FieldDescriptor::new("display", "display", ValueKind::Str).mutability(Mutability::ReadOnly))
        .build();

    TypeDescriptorBuilder::new("Group", GROUP_SCHEMA)
        .allow_unknown_fields(true)
        .field(FieldDescriptor::new("display_name", "displayName", ValueKind::Str))
        .field(FieldDescriptor::new("members", "members", ValueKind::Complex(member)).multi_valued(true))
        .build()
}

pub fn enterprise_user() -> Arc<TypeDescriptor> {
    let manager = TypeDescriptorBuilder::new("Manager", "")
        .field(FieldDescriptor::new("value", "value", ValueKind::Str))
        .field(FieldDescriptor::new(
            "ref",
            "$ref",
            ValueKind::Reference(ReferenceKind::ResourceTypes(vec!["User".to_string()])),
        ))
        .field(FieldDescriptor::new("display_name", "displayName", ValueKind::Str).mutability(Mutability::ReadOnly))
        .build();

    TypeDescriptorBuilder::new("EnterpriseUser", ENTERPRISE_USER_SCHEMA)
        .field(FieldDescriptor::new("employee_number", "employeeNumber", ValueKind::Str))
        .field(FieldDescriptor::new("cost_center", "costCenter", ValueKind::Str))
        .field(FieldDescriptor::new("organization", "organization", ValueKind::Str))
        .field(FieldDescriptor::new("division", "division", ValueKind::Str))
        .field(FieldDescriptor::new("department", "department", ValueKind::Str))
        .field(FieldDescriptor::new("manager", "manager", ValueKind::Complex(manager)))
        .build()
}

/// Marker type for [`crate::resource::core::Resource::get_extension`] /
/// `set_extension`.
pub struct EnterpriseUser;

impl ExtensionKind for EnterpriseUser {
    fn primary_schema() -> &'static str {
        ENTERPRISE_USER_SCHEMA
    }

    fn descriptor() -> Arc<TypeDescriptor> {
        enterprise_user()
    }
}

pub fn resource_type() -> Arc<TypeDescriptor> {
    let schema_extension = TypeDescriptorBuilder::new("SchemaExtensions", "")
        .field(FieldDescriptor::new("schema", "schema", ValueKind::Str).required(Required::True))
        .field(FieldDescriptor::new("required", "required", ValueKind::Bool).required(Required::True))
        .build();

    TypeDescriptorBuilder::new("ResourceType", RESOURCE_TYPE_SCHEMA)
        .field(FieldDescriptor::new("id", "id", ValueKind::Str).case_exact(CaseExact::True))
        .field(FieldDescriptor::new("name", "name", ValueKind::Str).required(Required::True))
        .field(FieldDescriptor::new("description", "description", ValueKind::Str))
        .field(FieldDescriptor::new("endpoint", "endpoint", ValueKind::Reference(ReferenceKind::Uri)).required(Required::True))
        .field(FieldDescriptor::new("schema", "schema", ValueKind::Reference(ReferenceKind::Uri)).required(Required::True))
        .field(
            FieldDescriptor::new(
                "schema_extensions",
                "schemaExtensions",
                ValueKind::Complex(schema_extension),
            )
            .multi_valued(true),
        )
        .build()
}

pub fn service_provider_config() -> Arc<TypeDescriptor> {
    let supported_only = |name: &str| {
        TypeDescriptorBuilder::new(name, "")
            .field(FieldDescriptor::new("supported", "supported", ValueKind::Bool).required(Required::True))
            .build()
    };

    let bulk = TypeDescriptorBuilder::new("Bulk", "")
        .field(FieldDescriptor::new("supported", "supported", ValueKind::Bool).required(Required::True))
        .field(FieldDescriptor::new("max_operations", "maxOperations", ValueKind::Integer).required(Required::True))
        .field(FieldDescriptor::new("max_payload_size", "maxPayloadSize", ValueKind::Integer).required(Required::True))
        .build();

    let filter = TypeDescriptorBuilder::new("Filter", "")
        .field(FieldDescriptor::new("supported", "supported", ValueKind::Bool).required(Required::True))
        .field(FieldDescriptor::new("max_results", "maxResults", ValueKind::Integer).required(Required::True))
        .build();

    let authentication_scheme = TypeDescriptorBuilder::new("AuthenticationSchemes", "")
        .field(FieldDescriptor::new("name", "name", ValueKind::Str).required(Required::True))
        .field(FieldDescriptor::new("description", "description", ValueKind::Str).required(Required::True))
        .field(FieldDescriptor::new("spec_uri", "specUri", ValueKind::Reference(ReferenceKind::External)))
        .field(FieldDescriptor::new("documentation_uri", "documentationUri", ValueKind::Reference(ReferenceKind::External)))
        .field(FieldDescriptor::new("type", "type", ValueKind::Str).required(Required::True))
        .field(FieldDescriptor::new("primary", "primary", ValueKind::Bool))
        .build();

    TypeDescriptorBuilder::new("ServiceProviderConfig", SERVICE_PROVIDER_CONFIG_SCHEMA)
        .field(FieldDescriptor::new("documentation_uri", "documentationUri", ValueKind::Reference(ReferenceKind::External)))
        .field(FieldDescriptor::new("patch", "patch", ValueKind::Complex(supported_only("Patch"))))
        .field(FieldDescriptor::new("bulk", "bulk", ValueKind::Complex(bulk)))
        .field(FieldDescriptor::new("filter", "filter", ValueKind::Complex(filter)))
        .field(FieldDescriptor::new("change_password", "changePassword", ValueKind::Complex(supported_only("ChangePassword"))))
        .field(FieldDescriptor::new("sort", "sort", ValueKind::Complex(supported_only("Sort"))))
        .field(FieldDescriptor::new("etag", "etag", ValueKind::Complex(supported_only("ETag"))))
        .field(
            FieldDescriptor::new(
                "authentication_schemes",
                "authenticationSchemes",
                ValueKind::Complex(authentication_scheme),
            )
            .multi_valued(true)
            .required(Required::True),
        )
        .build()
}
