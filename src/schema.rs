//! Schema-driven attribute parsing
//!
//! A resource type is declared as data: an ordered list of [`Field`]
//! descriptors, each naming where a value lives in the raw JSON document
//! and how to coerce it. One generic [`Schema::parse`] consumes any such
//! declaration, so concrete resource types (thermal, registry files, ...)
//! carry no parsing machinery of their own.
//!
//! Parsing is pure: the raw document is supplied by the caller, never
//! fetched here.

use crate::error::{ParseError, ParseErrorReason};
use serde_json::Value;
use std::sync::Arc;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a field inside the raw document.
///
/// Built from dot/bracket notation (`Status.Health`, `Members[0]`) or, for
/// keys that themselves contain dots (`@odata.id`), from verbatim segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        let mut segments = Vec::new();
        for part in path.split('.') {
            let (key, mut tail) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if !key.is_empty() {
                segments.push(PathSegment::Key(key.to_string()));
            }
            while tail.starts_with('[') {
                let Some(close) = tail.find(']') else { break };
                match tail[1..close].parse::<usize>() {
                    Ok(idx) => segments.push(PathSegment::Index(idx)),
                    Err(_) => segments.push(PathSegment::Key(tail[1..close].to_string())),
                }
                tail = &tail[close + 1..];
            }
        }
        Self { segments }
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self::from(path.as_str())
    }
}

impl From<Vec<&str>> for FieldPath {
    fn from(keys: Vec<&str>) -> Self {
        Self {
            segments: keys
                .into_iter()
                .map(|k| PathSegment::Key(k.to_string()))
                .collect(),
        }
    }
}

/// Walk a path into the document. JSON `null` counts as absent.
fn lookup<'a>(doc: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = doc;
    for segment in &path.segments {
        current = match segment {
            PathSegment::Key(key) => current.get(key.as_str())?,
            PathSegment::Index(idx) => current.get(*idx)?,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// How a raw value becomes an attribute.
#[derive(Debug, Clone)]
pub enum Coercion {
    /// Keep the raw JSON value as-is.
    Identity,
    /// Map a wire string through a declared table (`"Enabled"` -> `"enabled"`).
    EnumMap {
        map: &'static [(&'static str, &'static str)],
        passthrough_unknown: bool,
    },
    /// Parse a sub-object with its own schema.
    Nested(Arc<Schema>),
    /// Parse each element of an array with a nested schema, in document order.
    NestedList(Arc<Schema>),
}

/// Declares how to extract and coerce one attribute from a raw document.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    path: FieldPath,
    coercion: Coercion,
    required: bool,
    default: Option<Value>,
}

impl Field {
    /// Optional identity field at `path`.
    pub fn new(name: impl Into<String>, path: impl Into<FieldPath>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            coercion: Coercion::Identity,
            required: false,
            default: None,
        }
    }

    /// Fail the whole parse when the path is absent and no default exists.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value substituted when the path is absent.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn enum_map(mut self, map: &'static [(&'static str, &'static str)]) -> Self {
        self.coercion = Coercion::EnumMap {
            map,
            passthrough_unknown: false,
        };
        self
    }

    /// Let unknown wire values through unmapped instead of failing.
    pub fn passthrough_unknown(mut self) -> Self {
        if let Coercion::EnumMap {
            passthrough_unknown,
            ..
        } = &mut self.coercion
        {
            *passthrough_unknown = true;
        }
        self
    }

    pub fn nested(mut self, schema: Arc<Schema>) -> Self {
        self.coercion = Coercion::Nested(schema);
        self
    }

    pub fn nested_list(mut self, schema: Arc<Schema>) -> Self {
        self.coercion = Coercion::NestedList(schema);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn coerce(&self, value: &Value, label: &str) -> Result<Attr, ParseError> {
        match &self.coercion {
            Coercion::Identity => Ok(Attr::Value(value.clone())),
            Coercion::EnumMap {
                map,
                passthrough_unknown,
            } => {
                let raw = value
                    .as_str()
                    .ok_or_else(|| ParseError::new(label, ParseErrorReason::TypeMismatch))?;
                match map.iter().find(|(wire, _)| *wire == raw) {
                    Some((_, mapped)) => Ok(Attr::Value(Value::String((*mapped).to_string()))),
                    None if *passthrough_unknown => Ok(Attr::Value(value.clone())),
                    None => Err(ParseError::new(label, ParseErrorReason::InvalidEnum)),
                }
            }
            Coercion::Nested(schema) => {
                if !value.is_object() {
                    return Err(ParseError::new(label, ParseErrorReason::TypeMismatch));
                }
                Ok(Attr::Set(schema.parse_prefixed(value, label)?))
            }
            Coercion::NestedList(schema) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| ParseError::new(label, ParseErrorReason::TypeMismatch))?;
                let mut parsed = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    let item_label = format!("{label}[{idx}]");
                    if !item.is_object() {
                        return Err(ParseError::new(item_label, ParseErrorReason::TypeMismatch));
                    }
                    parsed.push(schema.parse_prefixed(item, &item_label)?);
                }
                Ok(Attr::List(parsed))
            }
        }
    }
}

/// One parsed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    Value(Value),
    Set(AttributeSet),
    List(Vec<AttributeSet>),
}

/// Immutable result of parsing one document against one schema.
///
/// Entries keep schema declaration order. A fresh set is built on every
/// fetch; nothing here mutates in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeSet {
    entries: Vec<(String, Attr)>,
}

impl AttributeSet {
    pub fn get(&self, name: &str) -> Option<&Attr> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, attr)| attr)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.get(name)? {
            Attr::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.value(name)?.as_str()
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.value(name)?.as_i64()
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.value(name)?.as_f64()
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.value(name)?.as_bool()
    }

    pub fn nested(&self, name: &str) -> Option<&AttributeSet> {
        match self.get(name)? {
            Attr::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Elements of a nested-list attribute; empty when absent.
    pub fn nested_list(&self, name: &str) -> &[AttributeSet] {
        match self.get(name) {
            Some(Attr::List(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// String elements of an identity-coerced JSON array attribute.
    pub fn string_list(&self, name: &str) -> Vec<&str> {
        self.value(name)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attr)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }
}

/// Ordered field declarations for one resource type.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Parse a raw document into an attribute set.
    ///
    /// Fails fast on the first missing required field, in declaration
    /// order.
    pub fn parse(&self, raw: &Value) -> Result<AttributeSet, ParseError> {
        self.parse_prefixed(raw, "")
    }

    fn parse_prefixed(&self, raw: &Value, prefix: &str) -> Result<AttributeSet, ParseError> {
        let mut attrs = AttributeSet::default();
        for field in &self.fields {
            let label = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{prefix}.{}", field.name)
            };

            let attr = match lookup(raw, &field.path) {
                Some(value) => field.coerce(value, &label)?,
                None => {
                    if field.required && field.default.is_none() {
                        return Err(ParseError::new(label, ParseErrorReason::Missing));
                    }
                    match &field.coercion {
                        // Absent list fields coerce to an empty sequence, never null.
                        Coercion::NestedList(_) => Attr::List(Vec::new()),
                        _ => Attr::Value(field.default.clone().unwrap_or(Value::Null)),
                    }
                }
            };
            attrs.entries.push((field.name.clone(), attr));
        }
        Ok(attrs)
    }
}
