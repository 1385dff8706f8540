//! Client-side model layer for Redfish-style hardware management APIs.
//!
//! Resources are JSON documents fetched from a service and exposed as
//! typed, validated attribute sets. Resource types are declared as data
//! (ordered field descriptors) and consumed by one generic parser, so
//! adding a type means writing a schema, not a subclass.
//!
//! # Example
//!
//! ```no_run
//! use redfish_model::chassis::Thermal;
//! use redfish_model::{FetchPolicy, HttpConnector};
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let conn = Arc::new(HttpConnector::new("https://bmc.example.com")?);
//!     let thermal = Thermal::new(
//!         conn,
//!         "/redfish/v1/Chassis/Blade1/Thermal",
//!         "1.5.0",
//!         FetchPolicy::Eager,
//!     )?;
//!     for fan in thermal.fans() {
//!         println!("{:?}: {:?} RPM", fan.name(), fan.reading());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Fetching is always explicit and synchronous: `fetch`/`refresh` hit the
//! transport and atomically replace the cached document and attributes,
//! `ensure_fetched` fetches at most once, and plain accessors never
//! trigger I/O. Concurrency, retries and timeouts belong to the
//! transport, not this layer.

pub mod chassis;
pub mod connector;
pub mod error;
pub mod registry;
pub mod resource;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use connector::{Connector, HttpConnector, Response};
pub use error::{Error, ParseError, ParseErrorReason, Result};
pub use resource::{
    collection_schema, FetchPolicy, JsonArchiveReader, JsonDataReader, JsonPublicFileReader,
    Resource, ResourceCollection, ResourceReader,
};
pub use schema::{Attr, AttributeSet, Coercion, Field, FieldPath, Schema};
