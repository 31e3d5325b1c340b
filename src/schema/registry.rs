//! Loads and holds `Schema` documents for use by [`crate::factory::make_model`].
//!
//! The registry does no validation of its own: a `Schema` document is only
//! as good as the type descriptor `make_model` builds from it, and that
//! happens lazily, on first request for a given schema URI.

use super::{embedded, types::Schema};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Holds `Schema` documents by their URI (`Schema.id`).
///
/// Starts empty or pre-populated with the embedded core schemas; callers add
/// their own via [`SchemaRegistry::add_schema`] or a schema directory.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    core_user_schema: Option<Schema>,
    core_group_schema: Option<Schema>,
    service_provider_config_schema: Option<Schema>,
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// An empty registry with no schemas loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the core User and Group schemas
    /// (RFC 7643 §8.7.1, §8.7.2) embedded in this crate.
    pub fn with_embedded_schemas() -> Result<Self, serde_json::Error> {
        let core_user_schema = Self::load_schema_from_str(embedded::core_user_schema())?;
        let core_group_schema = Self::load_schema_from_str(embedded::core_group_schema())?;
        let service_provider_config_schema =
            Self::load_schema_from_str(embedded::service_provider_config_schema())?;

        let mut schemas = HashMap::new();
        schemas.insert(core_user_schema.id.clone(), core_user_schema.clone());
        schemas.insert(core_group_schema.id.clone(), core_group_schema.clone());
        schemas.insert(
            service_provider_config_schema.id.clone(),
            service_provider_config_schema.clone(),
        );

        Ok(Self {
            core_user_schema: Some(core_user_schema),
            core_group_schema: Some(core_group_schema),
            service_provider_config_schema: Some(service_provider_config_schema),
            schemas,
        })
    }

    /// Load `User.json` and `Group.json` from a directory of `Schema` documents.
    pub fn from_schema_dir<P: AsRef<Path>>(schema_dir: P) -> Result<Self, SchemaLoadError> {
        let core_user_schema = Self::load_schema_from_file(schema_dir.as_ref().join("User.json"))?;
        let core_group_schema = Self::load_schema_from_file(schema_dir.as_ref().join("Group.json"))?;

        let mut schemas = HashMap::new();
        schemas.insert(core_user_schema.id.clone(), core_user_schema.clone());
        schemas.insert(core_group_schema.id.clone(), core_group_schema.clone());

        Ok(Self {
            core_user_schema: Some(core_user_schema),
            core_group_schema: Some(core_group_schema),
            service_provider_config_schema: None,
            schemas,
        })
    }

    fn load_schema_from_file<P: AsRef<Path>>(path: P) -> Result<Schema, SchemaLoadError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::load_schema_from_str(&content)?)
    }

    fn load_schema_from_str(content: &str) -> Result<Schema, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// All schemas currently registered.
    pub fn get_schemas(&self) -> Vec<&Schema> {
        self.schemas.values().collect()
    }

    /// Look up a schema by its URI.
    pub fn get_schema(&self, id: &str) -> Option<&Schema> {
        self.schemas.get(id)
    }

    /// The embedded or loaded core User schema, if this registry has one.
    pub fn get_user_schema(&self) -> Option<&Schema> {
        self.core_user_schema.as_ref()
    }

    /// The embedded or loaded core Group schema, if this registry has one.
    pub fn get_group_schema(&self) -> Option<&Schema> {
        self.core_group_schema.as_ref()
    }

    /// The embedded ServiceProviderConfig schema, if this registry has one.
    pub fn get_service_provider_config_schema(&self) -> Option<&Schema> {
        self.service_provider_config_schema.as_ref()
    }

    /// Register a schema, making it available to [`crate::factory::make_model`].
    pub fn add_schema(&mut self, schema: Schema) {
        if self.schemas.contains_key(&schema.id) {
            log::warn!("replacing already-registered schema '{}'", schema.id);
        } else {
            log::debug!("registering schema '{}'", schema.id);
        }
        self.schemas.insert(schema.id.clone(), schema);
    }
}

/// Failure loading a `Schema` document from disk.
#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    #[error("reading schema file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing schema document: {0}")]
    Parse(#[from] serde_json::Error),
}
