//! Reader strategies for obtaining resource payloads
//!
//! A reader changes how the bytes of a document are obtained, never how
//! they are parsed. The default reader fetches and decodes directly; the
//! archive reader extracts a named entry from a fetched zip payload; the
//! public-file reader fetches an absolute URI through an out-of-band
//! connector.

use crate::connector::Connector;
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{Cursor, Read};

/// Pluggable byte/JSON retrieval strategy for a [`Resource`](crate::Resource).
pub trait ResourceReader: Send + Sync {
    /// Obtain the JSON document for `path` via `conn`.
    fn read(&self, conn: &dyn Connector, path: &str) -> Result<Value>;
}

/// Default strategy: fetch `path` and decode the body as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDataReader;

impl ResourceReader for JsonDataReader {
    fn read(&self, conn: &dyn Connector, path: &str) -> Result<Value> {
        conn.get(path)?.json()
    }
}

/// Extracts one named entry from a fetched zip archive.
#[derive(Debug, Clone)]
pub struct JsonArchiveReader {
    archive_file: String,
}

impl JsonArchiveReader {
    pub fn new(archive_file: impl Into<String>) -> Self {
        Self {
            archive_file: archive_file.into(),
        }
    }

    pub fn archive_file(&self) -> &str {
        &self.archive_file
    }
}

impl ResourceReader for JsonArchiveReader {
    fn read(&self, conn: &dyn Connector, path: &str) -> Result<Value> {
        let response = conn.get(path)?;
        let mut archive = zip::ZipArchive::new(Cursor::new(response.bytes()))
            .with_context(|| format!("Payload at {path} is not a readable archive"))?;
        let mut entry = archive.by_name(&self.archive_file).with_context(|| {
            format!(
                "Entry `{}` not found in archive {path}",
                self.archive_file
            )
        })?;
        let mut body = Vec::new();
        entry
            .read_to_end(&mut body)
            .context("Failed to read archive entry")?;
        serde_json::from_slice(&body)
            .with_context(|| format!("Archive entry `{}` is not valid JSON", self.archive_file))
    }
}

/// Fetches a public file by absolute URI via its own connector, bypassing
/// the authenticated service transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPublicFileReader;

impl ResourceReader for JsonPublicFileReader {
    fn read(&self, conn: &dyn Connector, path: &str) -> Result<Value> {
        conn.get(path)?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{zip_archive, StaticConnector};
    use serde_json::json;

    #[test]
    fn test_data_reader_decodes_json() {
        let conn = StaticConnector::new();
        conn.insert_json("/redfish/v1/Chassis/1", &json!({"Id": "1"}));

        let doc = JsonDataReader.read(&conn, "/redfish/v1/Chassis/1").unwrap();
        assert_eq!(doc["Id"], "1");
    }

    #[test]
    fn test_data_reader_propagates_transport_error() {
        let conn = StaticConnector::new();
        assert!(JsonDataReader.read(&conn, "/missing").is_err());
    }

    #[test]
    fn test_archive_reader_extracts_named_entry() {
        let conn = StaticConnector::new();
        let payload = zip_archive(&[
            ("Other.1.0.json", br#"{"Id": "Other"}"#),
            ("Test.1.0.json", br#"{"Id": "Test.1.0.0"}"#),
        ]);
        conn.insert_bytes("/redfish/v1/Registries/Archive.zip", payload);

        let reader = JsonArchiveReader::new("Test.1.0.json");
        let doc = reader
            .read(&conn, "/redfish/v1/Registries/Archive.zip")
            .unwrap();
        assert_eq!(doc["Id"], "Test.1.0.0");
    }

    #[test]
    fn test_archive_reader_missing_entry_fails() {
        let conn = StaticConnector::new();
        let payload = zip_archive(&[("Other.1.0.json", br#"{}"#)]);
        conn.insert_bytes("/redfish/v1/Registries/Archive.zip", payload);

        let reader = JsonArchiveReader::new("Test.1.0.json");
        let err = reader
            .read(&conn, "/redfish/v1/Registries/Archive.zip")
            .unwrap_err();
        assert!(err.to_string().contains("Test.1.0.json"));
    }

    #[test]
    fn test_archive_reader_rejects_non_archive_payload() {
        let conn = StaticConnector::new();
        conn.insert_json("/redfish/v1/Registries/Archive.zip", &json!({"Id": "x"}));

        let reader = JsonArchiveReader::new("Test.1.0.json");
        assert!(reader
            .read(&conn, "/redfish/v1/Registries/Archive.zip")
            .is_err());
    }

    #[test]
    fn test_public_reader_uses_given_connector() {
        let public = StaticConnector::new();
        public.insert_json(
            "https://example.com/Registries/Test.1.0.json",
            &json!({"Id": "Test.1.0.0"}),
        );

        let doc = JsonPublicFileReader
            .read(&public, "https://example.com/Registries/Test.1.0.json")
            .unwrap();
        assert_eq!(doc["Id"], "Test.1.0.0");
        assert_eq!(
            public.calls(),
            ["https://example.com/Registries/Test.1.0.json"]
        );
    }
}
