use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::domain::value_objects::{TypeRef, ValueKind};

/// One field of an inferred class.
///
/// `name` is the JSON key exactly as sampled; turning it into a target
/// language identifier is the emitter's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub ty: TypeRef,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        self.ty.kind()
    }

    /// Element type, for list fields only.
    pub fn element_type(&self) -> Option<&TypeRef> {
        match &self.ty {
            TypeRef::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// Referenced class, for object fields only.
    pub fn reference_type(&self) -> Option<&str> {
        match &self.ty {
            TypeRef::Object(name) => Some(name),
            _ => None,
        }
    }
}

/// One inferred class shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub class_name: String,
    pub fields: Vec<FieldSpec>,
    pub is_root: bool,
}

impl Schema {
    pub fn new(class_name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            class_name: class_name.into(),
            fields,
            is_root: false,
        }
    }

    pub fn root(class_name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            is_root: true,
            ..Self::new(class_name, fields)
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Classes this schema refers to, in field order, without duplicates.
    pub fn referenced_classes(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for field in &self.fields {
            if let Some(name) = field.ty.referenced_class() {
                if !out.contains(&name) {
                    out.push(name);
                }
            }
        }
        out
    }
}

/// Insertion-ordered set of schemas produced by one inference run.
///
/// Registering a class name that is already present replaces the old schema
/// and moves the entry to the end; the replaced name is remembered in
/// [`SchemaRegistry::collisions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    collisions: Vec<String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema. Returns the schema it replaced, if any.
    pub fn register(&mut self, schema: Schema) -> Option<Schema> {
        let replaced = self.schemas.shift_remove(&schema.class_name);
        if replaced.is_some() {
            warn!(
                class = %schema.class_name,
                "class name collision, later schema replaces earlier one"
            );
            self.collisions.push(schema.class_name.clone());
        }
        self.schemas.insert(schema.class_name.clone(), schema);
        replaced
    }

    /// Merge a fragment returned by a nested inference call.
    ///
    /// Fragment entries are registered in their own order, so the collision
    /// rule is the same as for [`SchemaRegistry::register`].
    pub fn merge(&mut self, fragment: SchemaRegistry) {
        self.collisions.extend(fragment.collisions);
        for (_, schema) in fragment.schemas {
            self.register(schema);
        }
    }

    pub fn get(&self, class_name: &str) -> Option<&Schema> {
        self.schemas.get(class_name)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.schemas.contains_key(class_name)
    }

    /// The schema flagged as root, if one was registered.
    pub fn root(&self) -> Option<&Schema> {
        self.schemas.values().find(|s| s.is_root)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Class names that were registered more than once, in collision order.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl IntoIterator for SchemaRegistry {
    type Item = Schema;
    type IntoIter = indexmap::map::IntoValues<String, Schema>;

    fn into_iter(self) -> Self::IntoIter {
        self.schemas.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_accessors_match_type() {
        let list = FieldSpec::new("tags", TypeRef::list_of(TypeRef::String));
        assert_eq!(list.value_kind(), ValueKind::List);
        assert_eq!(list.element_type(), Some(&TypeRef::String));
        assert_eq!(list.reference_type(), None);

        let obj = FieldSpec::new("address", TypeRef::object("AddressEntity"));
        assert_eq!(obj.reference_type(), Some("AddressEntity"));
        assert_eq!(obj.element_type(), None);
    }

    #[test]
    fn register_keeps_insertion_order() {
        let mut reg = SchemaRegistry::new();
        reg.register(Schema::new("AEntity", vec![]));
        reg.register(Schema::new("BEntity", vec![]));
        assert_eq!(reg.class_names().collect::<Vec<_>>(), ["AEntity", "BEntity"]);
        assert!(reg.collisions().is_empty());
    }

    #[test]
    fn register_overwrites_and_records_collision() {
        let mut reg = SchemaRegistry::new();
        reg.register(Schema::new("DataEntity", vec![FieldSpec::new("a", TypeRef::String)]));
        reg.register(Schema::new("OtherEntity", vec![]));
        let replaced = reg.register(Schema::new(
            "DataEntity",
            vec![FieldSpec::new("b", TypeRef::Integer)],
        ));

        assert!(replaced.is_some_and(|s| s.field("a").is_some()));
        assert_eq!(reg.len(), 2);
        assert!(reg.get("DataEntity").unwrap().field("b").is_some());
        assert_eq!(reg.class_names().collect::<Vec<_>>(), ["OtherEntity", "DataEntity"]);
        assert_eq!(reg.collisions(), ["DataEntity"]);
    }

    #[test]
    fn merge_carries_fragment_collisions() {
        let mut fragment = SchemaRegistry::new();
        fragment.register(Schema::new("XEntity", vec![]));
        fragment.register(Schema::new("XEntity", vec![]));

        let mut reg = SchemaRegistry::new();
        reg.register(Schema::new("XEntity", vec![]));
        reg.merge(fragment);

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.collisions(), ["XEntity", "XEntity"]);
    }

    #[test]
    fn referenced_classes_are_deduplicated() {
        let schema = Schema::root(
            "UserEntity",
            vec![
                FieldSpec::new("home", TypeRef::object("AddressEntity")),
                FieldSpec::new("others", TypeRef::list_of(TypeRef::object("AddressEntity"))),
                FieldSpec::new("name", TypeRef::String),
            ],
        );
        assert_eq!(schema.referenced_classes(), ["AddressEntity"]);
    }
}
