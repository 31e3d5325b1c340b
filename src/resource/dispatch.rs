//! Discriminated union dispatch (C4): choosing a concrete resource type
//! from a payload's `schemas[0]`, and the `ListResponse` container built on
//! top of it (RFC 7644 §3.4.2).

use crate::descriptor::TypeDescriptor;
use crate::error::{DecodeError, DecodeResult};
use crate::resource::core::{self, EncodeMode, Resource};
use serde_json::{Map, Value};
use std::sync::Arc;

pub const LIST_RESPONSE_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

/// Decode `json` against whichever of `candidates` has a `primary_schema`
/// equal to `json.schemas[0]`. Fails with `SchemaMismatch` if `schemas` is
/// absent or names no candidate.
pub fn dispatch(candidates: &[Arc<TypeDescriptor>], json: &Value) -> DecodeResult<Resource> {
    let tag = json
        .get("schemas")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::schema_mismatch("schemas", "missing or empty"))?;

    let descriptor = candidates
        .iter()
        .find(|d| d.primary_schema == tag)
        .ok_or_else(|| DecodeError::schema_mismatch("schemas", format!("no candidate resource type for '{tag}'")))?;

    core::decode(descriptor, json)
}

/// A paged, heterogeneous collection of resources, each dispatched
/// independently against `candidates`.
#[derive(Debug, Clone)]
pub struct ListResponse {
    pub total_results: i64,
    pub items_per_page: Option<i64>,
    pub start_index: Option<i64>,
    pub resources: Vec<Resource>,
}

impl ListResponse {
    pub fn decode(candidates: &[Arc<TypeDescriptor>], json: &Value) -> DecodeResult<Self> {
        let obj = json
            .as_object()
            .ok_or_else(|| DecodeError::schema_mismatch("", "expected an object"))?;

        let total_results = obj
            .get("totalResults")
            .and_then(Value::as_i64)
            .ok_or_else(|| DecodeError::schema_mismatch("totalResults", "missing"))?;
        let items_per_page = obj.get("itemsPerPage").and_then(Value::as_i64);
        let start_index = obj.get("startIndex").and_then(Value::as_i64);

        let resources = match obj.get("Resources").and_then(Value::as_array) {
            Some(arr) => arr
                .iter()
                .map(|item| dispatch(candidates, item).map_err(|e| e.nest("Resources")))
                .collect::<DecodeResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            total_results,
            items_per_page,
            start_index,
            resources,
        })
    }

    pub fn encode(&self, mode: EncodeMode) -> Value {
        let mut obj = Map::new();
        obj.insert(
            "schemas".into(),
            Value::Array(vec![Value::String(LIST_RESPONSE_SCHEMA.to_string())]),
        );
        obj.insert("totalResults".into(), Value::from(self.total_results));
        if let Some(v) = self.items_per_page {
            obj.insert("itemsPerPage".into(), Value::from(v));
        }
        if let Some(v) = self.start_index {
            obj.insert("startIndex".into(), Value::from(v));
        }
        obj.insert(
            "Resources".into(),
            Value::Array(self.resources.iter().map(|r| core::encode(r, mode)).collect()),
        );
        Value::Object(obj)
    }
}
