//! Runtime type descriptors: the shared representation behind both
//! hand-written resource declarations ([`crate::resource::wellknown`]) and
//! types produced by the dynamic model factory ([`crate::factory`]).
//!
//! A `TypeDescriptor` is a side table mapping field name -> metadata,
//! exactly as sketched in the design notes for a statically typed target:
//! introspection becomes a lookup rather than reflection over compiled
//! field annotations. Resource instances ([`crate::resource::Resource`])
//! carry their data as a field-indexed JSON map alongside an
//! `Arc<TypeDescriptor>`, so a generated type's instances flow through the
//! exact same decode/encode/introspection code as a hand-written type's.

use crate::annotation::{CaseExact, Mutability, Required, Returned, Uniqueness};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The shape of a field's value, independent of multiplicity.
#[derive(Debug, Clone)]
pub enum ValueKind {
    Str,
    Bool,
    Decimal,
    Integer,
    DateTime,
    /// Base64-encoded on the wire, raw bytes in memory.
    Binary,
    Reference(crate::annotation::ReferenceKind),
    /// A nested object type. The descriptor is shared (`Arc`) because the
    /// dynamic factory attaches the same nested descriptor to the parent
    /// as a reachable member for introspection parity with hand-written
    /// models.
    Complex(Arc<TypeDescriptor>),
}

/// Per-field SCIM metadata, attached the way the design notes describe:
/// a side table keyed by field name, rather than compile-time annotations.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// snake_case in-memory name.
    pub internal_name: String,
    /// Wire name, verbatim (e.g. `displayName`, `$ref`, `schema`).
    pub alias: String,
    pub value_kind: ValueKind,
    pub multi_valued: bool,
    pub required: Required,
    pub case_exact: CaseExact,
    pub mutability: Mutability,
    pub returned: Returned,
    pub uniqueness: Uniqueness,
    pub description: String,
    /// Canonical values, if the attribute declared any. These are
    /// suggestions, not a closed enum: non-canonical values are accepted.
    pub examples: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(internal_name: impl Into<String>, alias: impl Into<String>, value_kind: ValueKind) -> Self {
        Self {
            internal_name: internal_name.into(),
            alias: alias.into(),
            value_kind,
            multi_valued: false,
            required: Required::False,
            case_exact: CaseExact::False,
            mutability: Mutability::ReadWrite,
            returned: Returned::Default,
            uniqueness: Uniqueness::None,
            description: String::new(),
            examples: Vec::new(),
        }
    }

    pub fn multi_valued(mut self, yes: bool) -> Self {
        self.multi_valued = yes;
        self
    }

    pub fn required(mut self, r: Required) -> Self {
        self.required = r;
        self
    }

    pub fn case_exact(mut self, c: CaseExact) -> Self {
        self.case_exact = c;
        self
    }

    pub fn mutability(mut self, m: Mutability) -> Self {
        self.mutability = m;
        self
    }

    pub fn returned(mut self, r: Returned) -> Self {
        self.returned = r;
        self
    }

    pub fn uniqueness(mut self, u: Uniqueness) -> Self {
        self.uniqueness = u;
        self
    }

    pub fn description(mut self, d: impl Into<String>) -> Self {
        self.description = d.into();
        self
    }

    pub fn examples(mut self, e: Vec<String>) -> Self {
        self.examples = e;
        self
    }

    /// The root element type: for multi-valued fields this is the element
    /// kind, peeling off the implicit `List` wrapper.
    pub fn root_type(&self) -> &ValueKind {
        &self.value_kind
    }

    pub fn is_multiple(&self) -> bool {
        self.multi_valued
    }
}

/// Declares an extension schema a resource type accepts: its primary URI
/// and the descriptor for its payload.
#[derive(Debug, Clone)]
pub struct ExtensionSlot {
    pub schema_uri: String,
    pub descriptor: Arc<TypeDescriptor>,
}

/// A resource type's full field set and metadata, shared read-only by
/// every instance (§3 "Ownership").
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// The generated/declared name (e.g. `"Group"`, `"Members"`).
    pub name: String,
    /// Primary schema URI. Empty for nested complex sub-types, which have
    /// no schema of their own.
    pub primary_schema: String,
    /// Fields keyed by internal (snake_case) name, insertion-ordered.
    pub fields: Vec<FieldDescriptor>,
    /// Extension schemas this resource type accepts (only populated for
    /// top-level resource types, never for nested complex attributes).
    pub extensions: Vec<ExtensionSlot>,
    /// Unknown top-level fields are rejected unless `true`. Resource types
    /// opt in (so `schemas[]` extension buckets can appear); nested
    /// complex sub-types do not.
    pub allow_unknown_fields: bool,
}

impl TypeDescriptor {
    pub fn field(&self, internal_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.internal_name == internal_name)
    }

    pub fn field_by_alias(&self, alias: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.alias == alias)
    }

    pub fn extension(&self, schema_uri: &str) -> Option<&ExtensionSlot> {
        self.extensions.iter().find(|e| e.schema_uri == schema_uri)
    }

    /// C7: the field's root element type, peeling off multiplicity.
    pub fn get_field_root_type(&self, internal_name: &str) -> Option<&ValueKind> {
        self.field(internal_name).map(FieldDescriptor::root_type)
    }

    /// C7: true iff the field's type is a list wrapper.
    pub fn is_multiple(&self, internal_name: &str) -> bool {
        self.field(internal_name).is_some_and(FieldDescriptor::is_multiple)
    }

    /// C7: generic annotation lookup, one entry point per axis.
    pub fn get_mutability(&self, internal_name: &str) -> Mutability {
        self.field(internal_name).map(|f| f.mutability).unwrap_or_default()
    }

    pub fn get_returned(&self, internal_name: &str) -> Returned {
        self.field(internal_name).map(|f| f.returned).unwrap_or_default()
    }

    pub fn get_uniqueness(&self, internal_name: &str) -> Uniqueness {
        self.field(internal_name).map(|f| f.uniqueness).unwrap_or_default()
    }

    pub fn get_case_exact(&self, internal_name: &str) -> CaseExact {
        self.field(internal_name).map(|f| f.case_exact).unwrap_or_default()
    }

    pub fn get_required(&self, internal_name: &str) -> Required {
        self.field(internal_name).map(|f| f.required).unwrap_or_default()
    }

    /// Every nested complex type reachable from this descriptor's fields,
    /// keyed by its generated name (`Parent.ChildTypeName` parity for
    /// introspection, per §4.5 step 3).
    pub fn nested_types(&self) -> BTreeMap<String, Arc<TypeDescriptor>> {
        let mut out = BTreeMap::new();
        for f in &self.fields {
            if let ValueKind::Complex(inner) = &f.value_kind {
                out.insert(inner.name.clone(), inner.clone());
            }
        }
        out
    }
}

/// Builder for hand-written [`TypeDescriptor`]s, used by
/// [`crate::resource::wellknown`] so that standard resource declarations
/// read as plain field lists with zero bespoke validation logic of their
/// own — the framework (decode/encode/introspection) is the same one the
/// dynamic factory's output uses.
#[derive(Debug, Default)]
pub struct TypeDescriptorBuilder {
    name: String,
    primary_schema: String,
    fields: Vec<FieldDescriptor>,
    extensions: Vec<ExtensionSlot>,
    allow_unknown_fields: bool,
}

impl TypeDescriptorBuilder {
    pub fn new(name: impl Into<String>, primary_schema: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_schema: primary_schema.into(),
            fields: Vec::new(),
            extensions: Vec::new(),
            allow_unknown_fields: false,
        }
    }

    pub fn allow_unknown_fields(mut self, yes: bool) -> Self {
        self.allow_unknown_fields = yes;
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field_all(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn extension(mut self, schema_uri: impl Into<String>, descriptor: Arc<TypeDescriptor>) -> Self {
        self.extensions.push(ExtensionSlot {
            schema_uri: schema_uri.into(),
            descriptor,
        });
        self
    }

    pub fn build(self) -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor {
            name: self.name,
            primary_schema: self.primary_schema,
            fields: self.fields,
            extensions: self.extensions,
            allow_unknown_fields: self.allow_unknown_fields,
        })
    }
}
