//! Error taxonomy for the model layer
//!
//! Two failure channels exist: transport errors are opaque and propagate
//! unmodified from the connector, parse errors are structured and name the
//! offending field. An unresolved registry location is neither - it is a
//! `None` return plus a logged warning (see the registry module).

use std::fmt;
use thiserror::Error;

/// Why a field failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorReason {
    /// Required field with no matching path and no default.
    Missing,
    /// Value present but the wrong shape for the declared coercion.
    TypeMismatch,
    /// Raw string not found in the declared enum mapping.
    InvalidEnum,
}

impl ParseErrorReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing required value",
            Self::TypeMismatch => "type mismatch",
            Self::InvalidEnum => "unknown enum value",
        }
    }
}

impl fmt::Display for ParseErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured attribute-parse failure.
///
/// `field` is the dotted attribute path (`fans[0].status.state`); `resource`
/// is attached by the owning [`Resource`](crate::Resource) once the parse is
/// tied to a fetched document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} for field `{field}`{}", resource_note(.resource))]
pub struct ParseError {
    pub field: String,
    pub reason: ParseErrorReason,
    pub resource: Option<String>,
}

fn resource_note(resource: &Option<String>) -> String {
    match resource {
        Some(path) => format!(" (resource {path})"),
        None => String::new(),
    }
}

impl ParseError {
    pub fn new(field: impl Into<String>, reason: ParseErrorReason) -> Self {
        Self {
            field: field.into(),
            reason,
            resource: None,
        }
    }

    /// Attach the path of the resource whose document failed to parse.
    pub fn with_resource(mut self, path: impl Into<String>) -> Self {
        self.resource = Some(path.into());
        self
    }
}

/// Top-level error type for fetch/parse operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Propagated unmodified from the transport collaborator.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
