//! The generic resource carrier, and the decode/encode engine that drives
//! it (C2 base model machinery + C3 resource framework).
//!
//! A [`Resource`] pairs a `TypeDescriptor` with field-indexed JSON data —
//! the "field-indexed record of tagged values" the design notes call for
//! when a generated type is a runtime descriptor rather than a compile-time
//! type. Hand-written resource declarations ([`crate::resource::wellknown`])
//! and the dynamic factory's output ([`crate::factory`]) both produce a
//! `TypeDescriptor` and are decoded/encoded by the exact same functions
//! here.

use crate::annotation::Reference;
use crate::descriptor::{FieldDescriptor, TypeDescriptor, ValueKind};
use crate::error::{DecodeError, DecodeResult};
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Controls which absent/unset fields are emitted by [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeMode {
    /// Absent optional fields are omitted; this is the normal wire form.
    Default,
    /// Identical to `Default` for this carrier: a field that was never
    /// decoded or set has no way to be distinguished from one explicitly
    /// cleared, so both are "unset".
    ExcludeUnset,
    /// Every declared field is emitted, `null` where absent.
    IncludeNull,
}

/// Read-only sub-record carried by every resource (§3 Meta).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub resource_type: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub location: Option<String>,
    pub version: Option<String>,
}

impl Meta {
    fn decode(raw: &Value) -> DecodeResult<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| DecodeError::schema_mismatch("meta", "expected an object"))?;
        let resource_type = obj
            .get("resourceType")
            .and_then(Value::as_str)
            .ok_or_else(|| DecodeError::schema_mismatch("meta.resourceType", "missing"))?
            .to_string();
        let created = Self::parse_timestamp(obj, "created")?;
        let last_modified = Self::parse_timestamp(obj, "lastModified")?;
        let location = obj.get("location").and_then(Value::as_str).map(str::to_string);
        let version = obj.get("version").and_then(Value::as_str).map(str::to_string);
        Ok(Self {
            resource_type,
            created,
            last_modified,
            location,
            version,
        })
    }

    fn parse_timestamp(obj: &Map<String, Value>, key: &str) -> DecodeResult<DateTime<Utc>> {
        let raw = obj
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| DecodeError::schema_mismatch(format!("meta.{key}"), "missing"))?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| DecodeError::invalid_date_time(format!("meta.{key}"), raw))
    }

    fn encode(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("resourceType".into(), Value::String(self.resource_type.clone()));
        obj.insert(
            "created".into(),
            Value::String(self.created.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        obj.insert(
            "lastModified".into(),
            Value::String(self.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        if let Some(l) = &self.location {
            obj.insert("location".into(), Value::String(l.clone()));
        }
        if let Some(v) = &self.version {
            obj.insert("version".into(), Value::String(v.clone()));
        }
        Value::Object(obj)
    }
}

/// A decoded SCIM resource: the `schemas`/`id`/`externalId`/`meta` common
/// attributes, the primary schema's other attributes keyed by their
/// internal (snake_case) name, and any populated extension buckets.
#[derive(Debug, Clone)]
pub struct Resource {
    pub descriptor: Arc<TypeDescriptor>,
    pub schemas: Vec<String>,
    pub id: Option<String>,
    pub external_id: Option<String>,
    pub meta: Option<Meta>,
    attributes: Map<String, Value>,
    extensions: Vec<(String, Resource)>,
}

/// Maps a Rust marker type to the SCIM extension it represents, so
/// `Resource::get_extension::<EnterpriseUser>()` reads the way the source
/// material's type-keyed subscripting does without Rust needing to key a
/// map by a type (design notes §9, "polymorphic extension container").
pub trait ExtensionKind {
    fn primary_schema() -> &'static str;
    fn descriptor() -> Arc<TypeDescriptor>;
}

impl Resource {
    /// Construct a resource directly (used by hand-written builders and
    /// by the factory's generated constructors), bypassing decode.
    pub fn new(descriptor: Arc<TypeDescriptor>, schemas: Vec<String>) -> Self {
        Self {
            descriptor,
            schemas,
            id: None,
            external_id: None,
            meta: None,
            attributes: Map::new(),
            extensions: Vec::new(),
        }
    }

    pub fn get_attribute(&self, internal_name: &str) -> Option<&Value> {
        self.attributes.get(internal_name)
    }

    pub fn set_attribute(&mut self, internal_name: impl Into<String>, value: Value) {
        self.attributes.insert(internal_name.into(), value);
    }

    pub fn get_extension<E: ExtensionKind>(&self) -> DecodeResult<Option<&Resource>> {
        if self.descriptor.extension(E::primary_schema()).is_none() {
            return Err(DecodeError::ExtensionLookupFailure {
                schema_uri: E::primary_schema().to_string(),
            });
        }
        Ok(self
            .extensions
            .iter()
            .find(|(uri, _)| uri == E::primary_schema())
            .map(|(_, r)| r))
    }

    pub fn set_extension<E: ExtensionKind>(&mut self, value: Resource) -> DecodeResult<()> {
        if self.descriptor.extension(E::primary_schema()).is_none() {
            return Err(DecodeError::ExtensionLookupFailure {
                schema_uri: E::primary_schema().to_string(),
            });
        }
        let uri = E::primary_schema().to_string();
        self.extensions.retain(|(u, _)| u != &uri);
        self.extensions.push((uri, value));
        Ok(())
    }

    pub fn extension_by_uri(&self, schema_uri: &str) -> Option<&Resource> {
        self.extensions.iter().find(|(u, _)| u == schema_uri).map(|(_, r)| r)
    }
}

/// C2/C3: decode a JSON object into a `Resource` against `descriptor`.
pub fn decode(descriptor: &Arc<TypeDescriptor>, json: &Value) -> DecodeResult<Resource> {
    let obj = json
        .as_object()
        .ok_or_else(|| DecodeError::schema_mismatch("", "expected a JSON object"))?;

    let schemas = match obj.get("schemas") {
        Some(v) => {
            let arr = v
                .as_array()
                .ok_or_else(|| DecodeError::schema_mismatch("schemas", "expected an array"))?;
            if arr.is_empty() {
                return Err(DecodeError::schema_mismatch("schemas", "must not be empty"));
            }
            arr.iter()
                .map(|s| {
                    s.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| DecodeError::schema_mismatch("schemas", "expected strings"))
                })
                .collect::<DecodeResult<Vec<_>>>()?
        }
        None if !descriptor.primary_schema.is_empty() => vec![descriptor.primary_schema.clone()],
        None => return Err(DecodeError::schema_mismatch("schemas", "missing")),
    };

    let id = obj.get("id").map(coerce_string).transpose()?;
    let external_id = obj.get("externalId").map(coerce_string).transpose()?;
    let meta = obj.get("meta").map(Meta::decode).transpose()?;

    let mut consumed: Vec<&str> = vec!["schemas", "id", "externalId", "meta"];
    for ext in &descriptor.extensions {
        consumed.push(ext.schema_uri.as_str());
    }

    let attributes = decode_fields(&descriptor.fields, obj, descriptor.allow_unknown_fields, &consumed)?;

    let mut extensions = Vec::new();
    for ext in &descriptor.extensions {
        if let Some(raw) = obj.get(ext.schema_uri.as_str()) {
            let nested = decode(&ext.descriptor, raw).map_err(|e| e.nest(&ext.schema_uri))?;
            extensions.push((ext.schema_uri.clone(), nested));
        }
    }

    Ok(Resource {
        descriptor: descriptor.clone(),
        schemas,
        id,
        external_id,
        meta,
        attributes,
        extensions,
    })
}

/// C2/C3: encode a `Resource` back to JSON.
pub fn encode(resource: &Resource, mode: EncodeMode) -> Value {
    encode_inner(resource, mode, true)
}

/// An extension bucket is keyed by its own schema URI already; it carries
/// no `schemas` array of its own (RFC 7644 §3.3).
fn encode_inner(resource: &Resource, mode: EncodeMode, include_schemas: bool) -> Value {
    let mut obj = Map::new();

    if include_schemas {
        let mut schemas = resource.schemas.clone();
        if schemas.is_empty() && !resource.descriptor.primary_schema.is_empty() {
            schemas.push(resource.descriptor.primary_schema.clone());
        }
        for (uri, _) in &resource.extensions {
            if !schemas.contains(uri) {
                schemas.push(uri.clone());
            }
        }
        obj.insert(
            "schemas".into(),
            Value::Array(schemas.into_iter().map(Value::String).collect()),
        );
    }

    match (&resource.id, mode) {
        (Some(id), _) => {
            obj.insert("id".into(), Value::String(id.clone()));
        }
        (None, EncodeMode::IncludeNull) => {
            obj.insert("id".into(), Value::Null);
        }
        (None, _) => {}
    }
    match (&resource.external_id, mode) {
        (Some(v), _) => {
            obj.insert("externalId".into(), Value::String(v.clone()));
        }
        (None, EncodeMode::IncludeNull) => {
            obj.insert("externalId".into(), Value::Null);
        }
        (None, _) => {}
    }
    match (&resource.meta, mode) {
        (Some(m), _) => {
            obj.insert("meta".into(), m.encode());
        }
        (None, EncodeMode::IncludeNull) => {
            obj.insert("meta".into(), Value::Null);
        }
        (None, _) => {}
    }

    let encoded_fields = encode_fields(&resource.descriptor.fields, &resource.attributes, mode);
    obj.extend(encoded_fields);

    for (uri, ext) in &resource.extensions {
        obj.insert(uri.clone(), encode_inner(ext, mode, false));
    }

    Value::Object(obj)
}

fn coerce_string(v: &Value) -> DecodeResult<String> {
    v.as_str()
        .map(str::to_string)
        .ok_or_else(|| DecodeError::schema_mismatch("", "expected a string"))
}

/// Shared by top-level resource decode (primary-schema attributes) and by
/// nested complex attribute decode: both are "a set of described fields
/// inside a JSON object".
pub fn decode_fields(
    fields: &[FieldDescriptor],
    obj: &Map<String, Value>,
    allow_unknown_fields: bool,
    extra_consumed_keys: &[&str],
) -> DecodeResult<Map<String, Value>> {
    let mut out = Map::new();
    for field in fields {
        let raw = obj.get(&field.alias).or_else(|| obj.get(&field.internal_name));
        match raw {
            None => {
                if bool::from(field.required) {
                    return Err(DecodeError::schema_mismatch(
                        field.alias.clone(),
                        "required attribute is missing",
                    ));
                }
            }
            Some(raw) => {
                let value = decode_value(field, raw).map_err(|e| e.nest(&field.alias))?;
                out.insert(field.internal_name.clone(), value);
            }
        }
    }

    if !allow_unknown_fields {
        for key in obj.keys() {
            let is_known = fields.iter().any(|f| &f.alias == key || &f.internal_name == key)
                || extra_consumed_keys.contains(&key.as_str());
            if !is_known {
                return Err(DecodeError::unknown_field(key.clone()));
            }
        }
    }

    Ok(out)
}

fn decode_value(field: &FieldDescriptor, raw: &Value) -> DecodeResult<Value> {
    if field.multi_valued {
        let arr = raw
            .as_array()
            .ok_or_else(|| DecodeError::schema_mismatch("", "must be multi-valued (array)"))?;
        let mut items = Vec::with_capacity(arr.len());
        for item in arr {
            items.push(decode_scalar(&field.value_kind, item)?);
        }
        Ok(Value::Array(items))
    } else {
        if raw.is_array() {
            return Err(DecodeError::schema_mismatch("", "must be single-valued (not array)"));
        }
        decode_scalar(&field.value_kind, raw)
    }
}

fn decode_scalar(kind: &ValueKind, raw: &Value) -> DecodeResult<Value> {
    match kind {
        ValueKind::Str => raw
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| DecodeError::schema_mismatch("", "expected a string")),
        ValueKind::Bool => raw
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| DecodeError::schema_mismatch("", "expected a boolean")),
        ValueKind::Integer => {
            if raw.as_i64().is_some() {
                Ok(raw.clone())
            } else {
                Err(DecodeError::schema_mismatch("", "expected an integer"))
            }
        }
        ValueKind::Decimal => {
            if raw.as_f64().is_some() {
                Ok(raw.clone())
            } else {
                Err(DecodeError::schema_mismatch("", "expected a decimal"))
            }
        }
        ValueKind::DateTime => {
            let raw_str = raw
                .as_str()
                .ok_or_else(|| DecodeError::schema_mismatch("", "expected a date-time string"))?;
            let parsed = DateTime::parse_from_rfc3339(raw_str)
                .map_err(|_| DecodeError::invalid_date_time("", raw_str))?;
            Ok(Value::String(
                parsed.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true),
            ))
        }
        ValueKind::Binary => {
            let raw_str = raw
                .as_str()
                .ok_or_else(|| DecodeError::schema_mismatch("", "expected a base64 string"))?;
            base64::engine::general_purpose::STANDARD
                .decode(raw_str)
                .map_err(|_| DecodeError::schema_mismatch("", "invalid base64"))?;
            Ok(Value::String(raw_str.to_string()))
        }
        ValueKind::Reference(ref_kind) => {
            let raw_str = raw
                .as_str()
                .ok_or_else(|| DecodeError::schema_mismatch("", "expected a reference string"))?;
            let reference = Reference::parse(raw_str.to_string(), ref_kind)?;
            Ok(Value::String(reference.into_string()))
        }
        ValueKind::Complex(inner) => {
            let obj = raw
                .as_object()
                .ok_or_else(|| DecodeError::schema_mismatch("", "expected a complex object"))?;
            let fields = decode_fields(&inner.fields, obj, false, &[])?;
            Ok(Value::Object(fields))
        }
    }
}

/// Encode a field-indexed map (internal names -> values) back to its wire
/// form (alias-keyed), recursing into nested complex attributes.
pub fn encode_fields(fields: &[FieldDescriptor], attrs: &Map<String, Value>, mode: EncodeMode) -> Map<String, Value> {
    let mut out = Map::new();
    for field in fields {
        match attrs.get(&field.internal_name) {
            Some(value) => {
                out.insert(field.alias.clone(), encode_value(field, value, mode));
            }
            None if mode == EncodeMode::IncludeNull => {
                out.insert(field.alias.clone(), Value::Null);
            }
            None => {}
        }
    }
    out
}

fn encode_value(field: &FieldDescriptor, value: &Value, mode: EncodeMode) -> Value {
    if field.multi_valued {
        let Value::Array(items) = value else {
            return value.clone();
        };
        Value::Array(items.iter().map(|i| encode_scalar(&field.value_kind, i, mode)).collect())
    } else {
        encode_scalar(&field.value_kind, value, mode)
    }
}

fn encode_scalar(kind: &ValueKind, value: &Value, mode: EncodeMode) -> Value {
    match kind {
        ValueKind::Complex(inner) => match value {
            Value::Object(obj) => Value::Object(encode_fields(&inner.fields, obj, mode)),
            other => other.clone(),
        },
        _ => value.clone(),
    }
}
