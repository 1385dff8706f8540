//! Message registry content
//!
//! The registry document maps message keys to templates plus metadata
//! (severity, resolution, argument counts). Messages are kept raw and
//! parsed per key on demand, since registries routinely carry hundreds of
//! entries of which a caller touches a handful.

use crate::connector::Connector;
use crate::error::Result;
use crate::resource::common::HEALTH_VALUE_MAP;
use crate::resource::{FetchPolicy, Resource};
use crate::schema::{AttributeSet, Field, Schema};
use std::sync::{Arc, OnceLock};

/// Schema for a message registry document.
pub fn schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(Schema::new(vec![
                Field::new("identity", "Id").required(),
                Field::new("name", "Name"),
                Field::new("description", "Description"),
                Field::new("language", "Language"),
                Field::new("owning_entity", "OwningEntity"),
                Field::new("registry_prefix", "RegistryPrefix"),
                Field::new("registry_version", "RegistryVersion"),
                Field::new("messages", "Messages"),
            ]))
        })
        .clone()
}

fn message_schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(Schema::new(vec![
                Field::new("description", "Description"),
                Field::new("message", "Message"),
                Field::new("number_of_args", "NumberOfArgs"),
                Field::new("param_types", "ParamTypes"),
                Field::new("resolution", "Resolution"),
                // Vendors extend severity beyond the standard vocabulary.
                Field::new("severity", "Severity")
                    .enum_map(HEALTH_VALUE_MAP)
                    .passthrough_unknown(),
            ]))
        })
        .clone()
}

/// One message record parsed out of the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryMessage {
    attrs: AttributeSet,
}

impl RegistryMessage {
    pub fn description(&self) -> Option<&str> {
        self.attrs.str("description")
    }

    /// Message template with `%1`-style argument placeholders.
    pub fn message(&self) -> Option<&str> {
        self.attrs.str("message")
    }

    pub fn number_of_args(&self) -> Option<i64> {
        self.attrs.int("number_of_args")
    }

    pub fn param_types(&self) -> Vec<&str> {
        self.attrs.string_list("param_types")
    }

    pub fn resolution(&self) -> Option<&str> {
        self.attrs.str("resolution")
    }

    pub fn severity(&self) -> Option<&str> {
        self.attrs.str("severity")
    }
}

/// Typed view over a fetched message registry resource.
pub struct MessageRegistry {
    resource: Resource,
}

impl MessageRegistry {
    pub fn new(
        conn: Arc<dyn Connector>,
        path: impl Into<String>,
        redfish_version: impl Into<String>,
        policy: FetchPolicy,
    ) -> Result<Self> {
        let resource = Resource::new(conn, path, redfish_version, schema(), policy)?;
        Ok(Self { resource })
    }

    /// Attach the typed view to a resource resolved elsewhere, e.g. by
    /// [`MessageRegistryFile::get_message_registry`](crate::registry::MessageRegistryFile::get_message_registry).
    pub fn from_resource(resource: Resource) -> Self {
        Self { resource }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn ensure_fetched(&mut self) -> Result<&AttributeSet> {
        self.resource.ensure_fetched()
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.resource.refresh()
    }

    pub fn identity(&self) -> Option<&str> {
        self.resource.attributes()?.str("identity")
    }

    pub fn language(&self) -> Option<&str> {
        self.resource.attributes()?.str("language")
    }

    pub fn registry_prefix(&self) -> Option<&str> {
        self.resource.attributes()?.str("registry_prefix")
    }

    pub fn registry_version(&self) -> Option<&str> {
        self.resource.attributes()?.str("registry_version")
    }

    pub fn owning_entity(&self) -> Option<&str> {
        self.resource.attributes()?.str("owning_entity")
    }

    /// Parse one message record by key. `Ok(None)` when the registry is
    /// unfetched or the key is absent.
    pub fn message(&self, key: &str) -> Result<Option<RegistryMessage>> {
        let Some(attrs) = self.resource.attributes() else {
            return Ok(None);
        };
        let Some(messages) = attrs.value("messages") else {
            return Ok(None);
        };
        let Some(raw) = messages.get(key) else {
            return Ok(None);
        };
        let parsed = message_schema()
            .parse(raw)
            .map_err(|e| e.with_resource(self.resource.path()))?;
        Ok(Some(RegistryMessage { attrs: parsed }))
    }
}
