//! Message registry discovery
//!
//! A registry file resource describes where the actual registry content
//! for each language can be obtained, via up to three alternative URIs per
//! location record. [`MessageRegistryFile::get_message_registry`] walks
//! those records and materializes the registry resource with the matching
//! reader strategy.

use crate::connector::Connector;
use crate::error::Result;
use crate::registry::message_registry;
use crate::resource::{
    FetchPolicy, JsonArchiveReader, JsonPublicFileReader, Resource, ResourceCollection,
};
use crate::schema::{AttributeSet, Field, Schema};
use std::sync::{Arc, OnceLock};

/// Language tag registries use for their untranslated location record.
pub const DEFAULT_LANGUAGE: &str = "default";

/// What to do when the requested language has no location record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageFallback {
    /// Exact matches only.
    Strict,
    /// Fall back to records tagged [`DEFAULT_LANGUAGE`].
    #[default]
    UseDefault,
}

fn location_schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(Schema::new(vec![
                Field::new("language", "Language"),
                Field::new("uri", "Uri"),
                Field::new("publication_uri", "PublicationUri"),
                Field::new("archive_uri", "ArchiveUri"),
                Field::new("archive_file", "ArchiveFile"),
            ]))
        })
        .clone()
}

/// Schema for a message registry file document.
pub fn schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(Schema::new(vec![
                Field::new("identity", "Id").required(),
                Field::new("name", "Name"),
                Field::new("description", "Description"),
                Field::new("languages", "Languages"),
                Field::new("registry", "Registry"),
                Field::new("location", "Location").nested_list(location_schema()),
            ]))
        })
        .clone()
}

/// One entry describing where to obtain the registry for one language.
///
/// All three URI fields may independently be null; a record with none of
/// them carries no usable location.
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
    attrs: &'a AttributeSet,
}

impl<'a> Location<'a> {
    pub fn language(&self) -> Option<&'a str> {
        self.attrs.str("language")
    }

    /// Service-relative URI of the registry document.
    pub fn uri(&self) -> Option<&'a str> {
        self.attrs.str("uri")
    }

    /// Absolute, publicly reachable URI of the registry document.
    pub fn publication_uri(&self) -> Option<&'a str> {
        self.attrs.str("publication_uri")
    }

    /// Service-relative URI of an archive containing the registry.
    pub fn archive_uri(&self) -> Option<&'a str> {
        self.attrs.str("archive_uri")
    }

    /// Entry name within the archive at [`Location::archive_uri`].
    pub fn archive_file(&self) -> Option<&'a str> {
        self.attrs.str("archive_file")
    }
}

/// Typed view over a message registry file resource.
pub struct MessageRegistryFile {
    resource: Resource,
}

impl MessageRegistryFile {
    pub fn new(
        conn: Arc<dyn Connector>,
        path: impl Into<String>,
        redfish_version: impl Into<String>,
        policy: FetchPolicy,
    ) -> Result<Self> {
        let resource = Resource::new(conn, path, redfish_version, schema(), policy)?;
        Ok(Self { resource })
    }

    /// Attach the typed view to an already-constructed resource, e.g. a
    /// collection member.
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

    pub fn name(&self) -> Option<&str> {
        self.resource.attributes()?.str("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.resource.attributes()?.str("description")
    }

    /// Languages the registry is available in.
    pub fn languages(&self) -> Vec<&str> {
        match self.resource.attributes() {
            Some(attrs) => attrs.string_list("languages"),
            None => Vec::new(),
        }
    }

    /// Registry identifier, e.g. `Test.1.0`.
    pub fn registry(&self) -> Option<&str> {
        self.resource.attributes()?.str("registry")
    }

    /// Location records in document order. Empty until fetched.
    pub fn location(&self) -> Vec<Location<'_>> {
        match self.resource.attributes() {
            Some(attrs) => attrs
                .nested_list("location")
                .iter()
                .map(|attrs| Location { attrs })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Resolve the registry resource for `language`, falling back to
    /// [`DEFAULT_LANGUAGE`] records.
    ///
    /// For each candidate record the branches are tried in fixed priority
    /// order, first match wins: service-relative `uri` over the primary
    /// connector, then `archive_uri`/`archive_file` with archive
    /// extraction, then `publication_uri` over `public_connector` (skipped
    /// when no public connector is given). The returned resource is
    /// unfetched; only the way its bytes will be obtained differs per
    /// branch.
    ///
    /// `None` means no usable location exists. That is an expected outcome
    /// (localization gaps), logged as a warning, not an error.
    pub fn get_message_registry(
        &self,
        language: &str,
        public_connector: Option<Arc<dyn Connector>>,
    ) -> Option<Resource> {
        self.get_message_registry_with_fallback(language, LanguageFallback::default(), public_connector)
    }

    /// [`MessageRegistryFile::get_message_registry`] with an explicit
    /// language fallback policy.
    pub fn get_message_registry_with_fallback(
        &self,
        language: &str,
        fallback: LanguageFallback,
        public_connector: Option<Arc<dyn Connector>>,
    ) -> Option<Resource> {
        let locations = self.location();
        let mut candidates: Vec<&Location<'_>> = locations
            .iter()
            .filter(|l| l.language() == Some(language))
            .collect();
        if fallback == LanguageFallback::UseDefault && language != DEFAULT_LANGUAGE {
            candidates.extend(
                locations
                    .iter()
                    .filter(|l| l.language() == Some(DEFAULT_LANGUAGE)),
            );
        }

        let version = self.resource.redfish_version();
        for location in candidates {
            if let Some(uri) = location.uri() {
                return Some(Resource::lazy(
                    self.resource.connector().clone(),
                    uri,
                    version,
                    message_registry::schema(),
                ));
            }
            if let (Some(archive_uri), Some(archive_file)) =
                (location.archive_uri(), location.archive_file())
            {
                return Some(
                    Resource::lazy(
                        self.resource.connector().clone(),
                        archive_uri,
                        version,
                        message_registry::schema(),
                    )
                    .with_reader(Box::new(JsonArchiveReader::new(archive_file))),
                );
            }
            if let Some(publication_uri) = location.publication_uri() {
                if let Some(public) = &public_connector {
                    return Some(
                        Resource::lazy(
                            public.clone(),
                            publication_uri,
                            version,
                            message_registry::schema(),
                        )
                        .with_reader(Box::new(JsonPublicFileReader)),
                    );
                }
            }
        }

        tracing::warn!(language, "no location defined for language");
        None
    }
}

/// Collection of message registry files.
pub struct MessageRegistryFileCollection {
    collection: ResourceCollection,
}

impl MessageRegistryFileCollection {
    pub fn new(
        conn: Arc<dyn Connector>,
        path: impl Into<String>,
        redfish_version: impl Into<String>,
        policy: FetchPolicy,
    ) -> Result<Self> {
        let collection = ResourceCollection::new(conn, path, redfish_version, schema(), policy)?;
        Ok(Self { collection })
    }

    pub fn name(&self) -> Option<&str> {
        self.collection.name()
    }

    pub fn member_identities(&self) -> Vec<&str> {
        self.collection.member_identities()
    }

    pub fn ensure_fetched(&mut self) -> Result<&AttributeSet> {
        self.collection.ensure_fetched()
    }

    /// Lazily instantiate one registry file per member URI.
    pub fn members(&self) -> impl Iterator<Item = MessageRegistryFile> + '_ {
        self.collection
            .members()
            .map(MessageRegistryFile::from_resource)
    }
}
