//! JSON shape inference.
//!
//! Walks one sample document depth-first and turns every object it meets
//! into a [`Schema`]. Each recursive call returns its own registry fragment
//! and the caller merges it, so a nested class always lands in the registry
//! before the class that refers to it, and the root lands last.
//!
//! Policies kept on purpose:
//! - Arrays are typed from their first element only; homogeneity is assumed.
//! - Numbers are classified by value: `2.0` has no fractional part and is an
//!   `Integer`, exactly like `2`.
//! - Nested class names come from the field key alone, so equal keys at
//!   different depths collide and the later schema wins.

use serde_json::{Map, Number, Value};
use tracing::{debug, instrument, warn};

use crate::domain::{
    entities::{FieldSpec, Schema, SchemaRegistry},
    error::DomainError,
    naming::{canonical_root_name, derive_name},
    value_objects::{NamingConvention, TypeRef, UnsupportedShapePolicy},
};

/// Deepest list nesting that gets a concrete type (`List<List<T>>`).
pub const MAX_LIST_DEPTH: usize = 2;

type Classified = (TypeRef, Option<SchemaRegistry>);

/// Infer schemas with the default naming convention and shape policy.
pub fn infer(root_name: &str, root: &Value) -> Result<SchemaRegistry, DomainError> {
    Inferencer::default().infer(root_name, root)
}

/// Configurable inference entry point.
#[derive(Debug, Clone, Default)]
pub struct Inferencer {
    convention: NamingConvention,
    policy: UnsupportedShapePolicy,
}

impl Inferencer {
    pub fn new(convention: NamingConvention, policy: UnsupportedShapePolicy) -> Self {
        Self { convention, policy }
    }

    pub fn convention(&self) -> &NamingConvention {
        &self.convention
    }

    pub fn policy(&self) -> UnsupportedShapePolicy {
        self.policy
    }

    /// Build the registry for one sample document.
    ///
    /// The root schema is keyed under the canonical root class name
    /// (see [`canonical_root_name`]).
    #[instrument(skip_all, fields(root = %root_name, policy = %self.policy))]
    pub fn infer(&self, root_name: &str, root: &Value) -> Result<SchemaRegistry, DomainError> {
        let class_name = canonical_root_name(root_name, &self.convention)?;

        let Value::Object(map) = root else {
            return Err(DomainError::InvalidInputKind {
                found: json_kind(root),
            });
        };

        let (fields, mut registry) = self.infer_fields(map)?;
        debug!(class = %class_name, fields = fields.len(), "root schema inferred");
        registry.register(Schema::root(class_name, fields));

        debug!(
            schemas = registry.len(),
            collisions = registry.collisions().len(),
            "inference finished"
        );
        Ok(registry)
    }

    fn infer_object(
        &self,
        class_name: String,
        map: &Map<String, Value>,
    ) -> Result<SchemaRegistry, DomainError> {
        let (fields, mut fragment) = self.infer_fields(map)?;
        debug!(class = %class_name, fields = fields.len(), "nested schema inferred");
        fragment.register(Schema::new(class_name, fields));
        Ok(fragment)
    }

    fn infer_fields(
        &self,
        map: &Map<String, Value>,
    ) -> Result<(Vec<FieldSpec>, SchemaRegistry), DomainError> {
        let mut registry = SchemaRegistry::new();
        let mut fields = Vec::with_capacity(map.len());

        for (key, value) in map {
            let (ty, fragment) = self.classify(key, value, 0)?;
            if let Some(fragment) = fragment {
                registry.merge(fragment);
            }
            fields.push(FieldSpec::new(key, ty));
        }

        Ok((fields, registry))
    }

    /// `list_depth` counts the arrays enclosing `value` inside the current field.
    fn classify(&self, key: &str, value: &Value, list_depth: usize) -> Result<Classified, DomainError> {
        match value {
            Value::String(_) => Ok((TypeRef::String, None)),
            Value::Number(n) => Ok((classify_number(n), None)),
            Value::Bool(_) => Ok((TypeRef::Boolean, None)),
            Value::Null if list_depth > 0 => self.unsupported(key, "list whose first element is null"),
            Value::Null => Ok((TypeRef::Dynamic, None)),
            Value::Object(map) => {
                let class_name = derive_name(key, &self.convention);
                let fragment = self.infer_object(class_name.clone(), map)?;
                Ok((TypeRef::Object(class_name), Some(fragment)))
            }
            Value::Array(_) if list_depth >= MAX_LIST_DEPTH => self.unsupported(
                key,
                &format!("list nested deeper than {MAX_LIST_DEPTH} levels"),
            ),
            Value::Array(items) => {
                let Some(first) = items.first() else {
                    return Ok((TypeRef::list_of(TypeRef::Unknown), None));
                };
                let (element, fragment) = self.classify(key, first, list_depth + 1)?;
                Ok((TypeRef::list_of(element), fragment))
            }
        }
    }

    fn unsupported(&self, key: &str, shape: &str) -> Result<Classified, DomainError> {
        match self.policy {
            UnsupportedShapePolicy::Degrade => {
                warn!(field = %key, shape, "unsupported shape, element typed as unknown");
                Ok((TypeRef::Unknown, None))
            }
            UnsupportedShapePolicy::FailFast => Err(DomainError::UnsupportedValueShape {
                field: key.to_string(),
                shape: shape.to_string(),
            }),
        }
    }
}

fn classify_number(n: &Number) -> TypeRef {
    if n.is_i64() || n.is_u64() {
        return TypeRef::Integer;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => TypeRef::Integer,
        _ => TypeRef::Float,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
