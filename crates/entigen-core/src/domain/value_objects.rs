//! Domain value objects: ValueKind, TypeRef, NamingConvention, UnsupportedShapePolicy.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! `TypeRef` is the resolved type of one field; an `Object` reference names
//! a schema in the registry instead of embedding it, so the type tree never
//! owns another schema.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── ValueKind ────────────────────────────────────────────────────────────────

/// Coarse classification of a sampled JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Object,
    Null,
}

impl ValueKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Object => "object",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TypeRef ──────────────────────────────────────────────────────────────────

/// Resolved type of a field or list element.
///
/// `Dynamic` comes from a sampled `null`; `Unknown` marks an element type
/// that could not be observed (empty array, or a degraded shape). The two
/// render the same in Dart but stay distinct here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "of", rename_all = "lowercase")]
pub enum TypeRef {
    String,
    Integer,
    Float,
    Boolean,
    Dynamic,
    Unknown,
    List(Box<TypeRef>),
    /// Name-based reference to a schema in the same registry.
    Object(String),
}

impl TypeRef {
    pub fn list_of(element: TypeRef) -> Self {
        Self::List(Box::new(element))
    }

    pub fn object(class_name: impl Into<String>) -> Self {
        Self::Object(class_name.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String => ValueKind::String,
            Self::Integer => ValueKind::Integer,
            Self::Float => ValueKind::Float,
            Self::Boolean => ValueKind::Boolean,
            Self::Dynamic | Self::Unknown => ValueKind::Null,
            Self::List(_) => ValueKind::List,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// The class this type points at, looking through any list nesting.
    pub fn referenced_class(&self) -> Option<&str> {
        match self {
            Self::Object(name) => Some(name),
            Self::List(inner) => inner.referenced_class(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("String"),
            Self::Integer => f.write_str("Integer"),
            Self::Float => f.write_str("Float"),
            Self::Boolean => f.write_str("Boolean"),
            Self::Dynamic => f.write_str("Dynamic"),
            Self::Unknown => f.write_str("Unknown"),
            Self::List(inner) => write!(f, "List<{inner}>"),
            Self::Object(name) => f.write_str(name),
        }
    }
}

// ── NamingConvention ─────────────────────────────────────────────────────────

/// Suffix tokens of the entity/model layer convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    pub entity_suffix: String,
    pub model_suffix: String,
}

impl NamingConvention {
    pub fn new(entity_suffix: impl Into<String>, model_suffix: impl Into<String>) -> Self {
        Self {
            entity_suffix: entity_suffix.into(),
            model_suffix: model_suffix.into(),
        }
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new("Entity", "Model")
    }
}

// ── UnsupportedShapePolicy ───────────────────────────────────────────────────

/// What inference does with a value shape it cannot type.
///
/// Unsupported shapes are a list whose first element is `null` and list
/// nesting deeper than two levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsupportedShapePolicy {
    /// Substitute `TypeRef::Unknown` and keep going.
    #[default]
    Degrade,
    /// Abort the run with `DomainError::UnsupportedValueShape`.
    FailFast,
}

impl UnsupportedShapePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Degrade => "degrade",
            Self::FailFast => "fail-fast",
        }
    }
}

impl fmt::Display for UnsupportedShapePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
