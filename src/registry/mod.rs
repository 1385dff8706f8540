//! Message registry resources
//!
//! Registry files describe where registry content lives per language;
//! resolution walks a location record's alternative URIs in priority
//! order and attaches the matching reader strategy to the target
//! resource.
//!
//! - [`message_registry_file`] - registry file documents, location
//!   records, and the language-to-registry locator
//! - [`message_registry`] - the registry content itself, with per-key
//!   message lookup

pub mod message_registry;
pub mod message_registry_file;

pub use message_registry::{MessageRegistry, RegistryMessage};
pub use message_registry_file::{
    LanguageFallback, Location, MessageRegistryFile, MessageRegistryFileCollection,
    DEFAULT_LANGUAGE,
};
