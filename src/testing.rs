//! Canned connector and fixtures shared by unit tests.

use crate::connector::{Connector, Response};
use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::Mutex;

/// In-memory connector returning canned bodies by exact URI.
pub struct StaticConnector {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    calls: Mutex<Vec<String>>,
}

impl StaticConnector {
    pub fn new() -> Self {
        Self {
            bodies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn insert_json(&self, uri: &str, doc: &Value) {
        self.insert_bytes(uri, serde_json::to_vec(doc).unwrap());
    }

    pub fn insert_bytes(&self, uri: &str, body: Vec<u8>) {
        self.bodies.lock().unwrap().insert(uri.to_string(), body);
    }

    /// URIs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Connector for StaticConnector {
    fn get(&self, uri: &str) -> Result<Response> {
        self.calls.lock().unwrap().push(uri.to_string());
        match self.bodies.lock().unwrap().get(uri) {
            Some(body) => Ok(Response::new(body.clone())),
            None => Err(anyhow!("no canned response for {uri}")),
        }
    }
}

/// Build an in-memory zip archive from (entry name, body) pairs.
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in entries {
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file(*name, options).unwrap();
        writer.write_all(body).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
