//! Resource lifecycle
//!
//! A [`Resource`] binds a URI, a transport, a protocol-version tag and a
//! schema. Fetching is explicit: `fetch`/`refresh` always hit the
//! transport and swap the whole raw-document/attribute-set pair at once,
//! `ensure_fetched` fetches only the first time, and `attributes` never
//! fetches. There is no hidden fetch-on-read.

use crate::connector::Connector;
use crate::error::{Error, Result};
use crate::resource::reader::{JsonDataReader, ResourceReader};
use crate::schema::{AttributeSet, Field, Schema};
use serde_json::Value;
use std::sync::{Arc, OnceLock};

/// Whether construction parses immediately or defers to first use.
///
/// Eager construction surfaces malformed-document errors at construction
/// time; lazy defers both the fetch and any error to the first explicit
/// `fetch`/`ensure_fetched`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    Eager,
    Lazy,
}

struct Fetched {
    raw: Value,
    attributes: AttributeSet,
}

/// One fetched-and-parsed JSON document exposed as typed attributes.
pub struct Resource {
    conn: Arc<dyn Connector>,
    path: String,
    redfish_version: String,
    schema: Arc<Schema>,
    reader: Box<dyn ResourceReader>,
    state: Option<Fetched>,
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.path)
            .field("redfish_version", &self.redfish_version)
            .field("fetched", &self.state.is_some())
            .finish()
    }
}

impl Resource {
    /// Construct a resource; `FetchPolicy::Eager` fetches and parses
    /// before returning.
    pub fn new(
        conn: Arc<dyn Connector>,
        path: impl Into<String>,
        redfish_version: impl Into<String>,
        schema: Arc<Schema>,
        policy: FetchPolicy,
    ) -> Result<Self> {
        let mut resource = Self::lazy(conn, path, redfish_version, schema);
        if policy == FetchPolicy::Eager {
            resource.fetch()?;
        }
        Ok(resource)
    }

    /// Construct an unfetched resource with the default reader.
    pub fn lazy(
        conn: Arc<dyn Connector>,
        path: impl Into<String>,
        redfish_version: impl Into<String>,
        schema: Arc<Schema>,
    ) -> Self {
        Self {
            conn,
            path: path.into(),
            redfish_version: redfish_version.into(),
            schema,
            reader: Box::new(JsonDataReader),
            state: None,
        }
    }

    /// Replace how the document bytes are obtained. Parsing is unaffected.
    /// Set before the first fetch.
    pub fn with_reader(mut self, reader: Box<dyn ResourceReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Protocol-version tag, carried through unmodified.
    pub fn redfish_version(&self) -> &str {
        &self.redfish_version
    }

    pub fn connector(&self) -> &Arc<dyn Connector> {
        &self.conn
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn is_fetched(&self) -> bool {
        self.state.is_some()
    }

    /// Fetch the document and rebuild the attribute set, replacing both
    /// together. Always re-fetches; callers decide when to call.
    pub fn fetch(&mut self) -> Result<()> {
        let raw = self
            .reader
            .read(self.conn.as_ref(), &self.path)
            .map_err(Error::Transport)?;
        let attributes = self
            .schema
            .parse(&raw)
            .map_err(|e| e.with_resource(&self.path))?;
        self.state = Some(Fetched { raw, attributes });
        Ok(())
    }

    /// Alias of [`Resource::fetch`].
    pub fn refresh(&mut self) -> Result<()> {
        self.fetch()
    }

    /// Fetch only when no document has been fetched yet.
    pub fn ensure_fetched(&mut self) -> Result<&AttributeSet> {
        if self.state.is_none() {
            self.fetch()?;
        }
        Ok(&self
            .state
            .as_ref()
            .expect("state populated by fetch")
            .attributes)
    }

    /// Parsed attributes of the last fetch, if any. Never fetches.
    pub fn attributes(&self) -> Option<&AttributeSet> {
        self.state.as_ref().map(|s| &s.attributes)
    }

    /// Raw document of the last fetch, if any.
    pub fn raw(&self) -> Option<&Value> {
        self.state.as_ref().map(|s| &s.raw)
    }
}

fn member_ref_schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(Schema::new(vec![
                Field::new("identity", vec!["@odata.id"]).required()
            ]))
        })
        .clone()
}

/// Schema shared by every Redfish collection document.
pub fn collection_schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(Schema::new(vec![
                Field::new("name", "Name"),
                Field::new("members_identities", "Members")
                    .nested_list(member_ref_schema())
                    .required(),
            ]))
        })
        .clone()
}

/// A resource whose payload is primarily a list of member URIs.
///
/// The collection owns no member instances: every [`members`] call starts
/// a fresh traversal and constructs new, unfetched resources, so listing a
/// large collection never forces eager fetches.
///
/// [`members`]: ResourceCollection::members
pub struct ResourceCollection {
    resource: Resource,
    member_schema: Arc<Schema>,
}

impl std::fmt::Debug for ResourceCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCollection")
            .field("resource", &self.resource)
            .finish()
    }
}

impl ResourceCollection {
    pub fn new(
        conn: Arc<dyn Connector>,
        path: impl Into<String>,
        redfish_version: impl Into<String>,
        member_schema: Arc<Schema>,
        policy: FetchPolicy,
    ) -> Result<Self> {
        let resource = Resource::new(conn, path, redfish_version, collection_schema(), policy)?;
        Ok(Self {
            resource,
            member_schema,
        })
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

    pub fn name(&self) -> Option<&str> {
        self.resource.attributes()?.str("name")
    }

    /// Member URIs in document order, duplicates kept. Empty until the
    /// collection itself has been fetched.
    pub fn member_identities(&self) -> Vec<&str> {
        match self.resource.attributes() {
            Some(attrs) => attrs
                .nested_list("members_identities")
                .iter()
                .filter_map(|entry| entry.str("identity"))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Lazily instantiate one unfetched [`Resource`] per member URI, with
    /// this collection's connector and protocol-version. Iteration never
    /// fetches; each member fetches independently when the consumer forces
    /// it.
    pub fn members(&self) -> impl Iterator<Item = Resource> + '_ {
        self.member_identities().into_iter().map(move |uri| {
            Resource::lazy(
                self.resource.conn.clone(),
                uri,
                self.resource.redfish_version.clone(),
                self.member_schema.clone(),
            )
        })
    }
}
