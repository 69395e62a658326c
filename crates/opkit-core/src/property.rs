//! Properties: the typed, visibility-flagged value slots an operation
//! declares as its inputs and outputs.
//!
//! The type surface is a closed tag set (`PropertyType`) paired with a
//! tagged value variant (`Value`). Providers with domain-specific value
//! kinds (an authenticated-user handle, say) use the `Opaque` tag; such
//! values travel through the registry untouched and only render in
//! reports when they offer a display summary themselves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::errors::PropertyError;

/// The closed set of property type tags.
///
/// `Opaque` carries a provider-defined kind string; two opaque tags are
/// compatible only when their kind strings match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Text,
    TextList,
    Bytes,
    Int32,
    Int64,
    Bool,
    Opaque(String),
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Text => write!(f, "text"),
            PropertyType::TextList => write!(f, "text-list"),
            PropertyType::Bytes => write!(f, "bytes"),
            PropertyType::Int32 => write!(f, "int32"),
            PropertyType::Int64 => write!(f, "int64"),
            PropertyType::Bool => write!(f, "bool"),
            PropertyType::Opaque(kind) => write!(f, "opaque({kind})"),
        }
    }
}

/// A provider-defined value carried through the registry without the
/// core interpreting it.
pub trait OpaqueValue: fmt::Debug + Send + Sync {
    /// The kind string matched against `PropertyType::Opaque`.
    fn kind(&self) -> &str;

    /// A short user-facing rendering, if the value has one.
    ///
    /// Values returning `None` are skipped (with a debug log) when a
    /// report is built from visible-after properties.
    fn summary(&self) -> Option<String> {
        None
    }
}

/// A typed property value.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    TextList(Vec<String>),
    Bytes(Vec<u8>),
    Int32(i32),
    Int64(i64),
    Bool(bool),
    Opaque(Arc<dyn OpaqueValue>),
}

impl Value {
    /// The tag this value carries, for validation against a property's
    /// declared type.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Value::Text(_) => PropertyType::Text,
            Value::TextList(_) => PropertyType::TextList,
            Value::Bytes(_) => PropertyType::Bytes,
            Value::Int32(_) => PropertyType::Int32,
            Value::Int64(_) => PropertyType::Int64,
            Value::Bool(_) => PropertyType::Bool,
            Value::Opaque(value) => PropertyType::Opaque(value.kind().to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Value::TextList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_int32(&self) -> Option<i32> {
        match self {
            Value::Int32(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Arc<dyn OpaqueValue>> {
        match self {
            Value::Opaque(value) => Some(value),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::TextList(a), Value::TextList(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            // Opaque values have no structural equality; identity stands in.
            (Value::Opaque(a), Value::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Which audience may see an operation or property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Only reachable when the binder runs in internal mode.
    Internal,
    /// Part of the normal user-facing surface.
    External,
}

impl Audience {
    pub fn is_external(self) -> bool {
        matches!(self, Audience::External)
    }
}

/// Visibility flags for one property: its audience plus two independent
/// lifecycle bits — settable before execution, reportable after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyUsage {
    pub audience: Audience,
    /// Settable as an input before `exec`.
    pub before: bool,
    /// Reportable as an output after the result completes.
    pub after: bool,
}

impl PropertyUsage {
    /// An input-only property.
    pub fn input(audience: Audience) -> Self {
        Self {
            audience,
            before: true,
            after: false,
        }
    }

    /// An output-only property.
    pub fn output(audience: Audience) -> Self {
        Self {
            audience,
            before: false,
            after: true,
        }
    }

    /// A property used both as input and output.
    pub fn io(audience: Audience) -> Self {
        Self {
            audience,
            before: true,
            after: true,
        }
    }

    /// True when a caller operating in the given mode may assign this
    /// property before execution.
    pub fn is_settable(&self, internal: bool) -> bool {
        self.before && (internal || self.audience.is_external())
    }

    /// True when a caller operating in the given mode may read this
    /// property into a report after execution.
    pub fn is_reportable(&self, internal: bool) -> bool {
        self.after && (internal || self.audience.is_external())
    }
}

/// A single named, typed, access-controlled value slot.
///
/// Absence of a value is distinct from any zero value: a property starts
/// empty and only holds a value once `set` accepts one.
#[derive(Debug, Clone)]
pub struct Property {
    id: String,
    description: String,
    property_type: PropertyType,
    usage: PropertyUsage,
    value: Option<Value>,
}

impl Property {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        property_type: PropertyType,
        usage: PropertyUsage,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            property_type,
            usage,
            value: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human description, surfaced as flag help text by the binder.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn property_type(&self) -> &PropertyType {
        &self.property_type
    }

    pub fn usage(&self) -> PropertyUsage {
        self.usage
    }

    pub fn get(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Assign a value, validating its tag against the declared type.
    ///
    /// A mismatched tag fails with [`PropertyError::TypeMismatch`] and
    /// leaves the prior value (or absence) unchanged.
    pub fn set(&mut self, value: Value) -> Result<(), PropertyError> {
        let actual = value.property_type();
        if actual != self.property_type {
            return Err(PropertyError::TypeMismatch {
                id: self.id.clone(),
                expected: self.property_type.clone(),
                actual,
            });
        }
        self.value = Some(value);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}
