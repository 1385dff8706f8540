//! Resource abstraction layer
//!
//! This module provides the generic fetch-and-parse machinery shared by
//! every Redfish resource type. Concrete types (thermal, registry files)
//! are schema declarations consumed by [`crate::schema`], not subclasses.
//!
//! # Architecture
//!
//! - [`base`] - Resource and collection lifecycle (explicit fetch, cached
//!   attributes, lazy member iteration)
//! - [`reader`] - Pluggable strategies for obtaining document bytes
//!   (direct, archive extraction, public out-of-band)
//! - [`common`] - Wire-value mappings and the shared status sub-schema

mod base;
pub mod common;
mod reader;

pub use base::{collection_schema, FetchPolicy, Resource, ResourceCollection};
pub use reader::{JsonArchiveReader, JsonDataReader, JsonPublicFileReader, ResourceReader};
