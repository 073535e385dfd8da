//! Template emitter.
//!
//! Turns a [`SchemaRegistry`] into Dart source files:
//!
//! | Schema | Files |
//! |--------|-------|
//! | root | `<stem>_entity` (Entity layer) + `<stem>_model` (Model layer) |
//! | every other schema | `<stem>_entity` value class (Entity layer) |
//!
//! Entity and model reference each other by name only (`fromModel`/`toModel`,
//! `fromEntity`/`toEntity`); the model wraps the entity by composition.
//! Rendering is pure string building, no I/O.
//!
//! An object field whose class leads back to its own class through object
//! fields (`data.meta.data`) is declared nullable with a `null` default, so
//! `empty()` never recurses.

mod dart;
mod entity;
mod model;
mod value_class;

pub use dart::{dart_type, default_value, field_identifier};

use std::collections::HashSet;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::{
    entities::{FieldSpec, GeneratedFiles, RenderedFile, Schema, SchemaRegistry},
    error::DomainError,
    naming::{entity_file_stem, model_file_stem, model_name},
    value_objects::{NamingConvention, TypeRef},
};

const DEFAULT_ENTITY_IMPORT_PREFIX: &str = "../entities";
const DEFAULT_MODEL_IMPORT_PREFIX: &str = "../models";

/// Render with the default convention and options.
pub fn render(root_class_name: &str, registry: &SchemaRegistry) -> Result<GeneratedFiles, DomainError> {
    Emitter::default().render(root_class_name, registry)
}

/// Emission switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Emit Hive storage annotations on the root entity.
    pub hive: bool,
    pub hive_type_id: u32,
    /// Path from the model folder to the entity folder. Unset means derived
    /// from the output folders, or `../entities` when those are unknown.
    pub entity_import_prefix: Option<String>,
    /// Path from the entity folder to the model folder, `../models` by default.
    pub model_import_prefix: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            hive: true,
            hive_type_id: 3,
            entity_import_prefix: None,
            model_import_prefix: None,
        }
    }
}

impl EmitOptions {
    pub fn entity_import_prefix(&self) -> &str {
        self.entity_import_prefix
            .as_deref()
            .unwrap_or(DEFAULT_ENTITY_IMPORT_PREFIX)
    }

    pub fn model_import_prefix(&self) -> &str {
        self.model_import_prefix
            .as_deref()
            .unwrap_or(DEFAULT_MODEL_IMPORT_PREFIX)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Emitter {
    convention: NamingConvention,
    options: EmitOptions,
}

impl Emitter {
    pub fn new(convention: NamingConvention, options: EmitOptions) -> Self {
        Self {
            convention,
            options,
        }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    pub fn convention(&self) -> &NamingConvention {
        &self.convention
    }

    /// Same emitter with unset import prefixes derived from where each layer
    /// is written. Prefixes that are already set are kept.
    ///
    /// Both folders must be relative, or both absolute; otherwise the
    /// defaults stay in place.
    pub fn for_folders(&self, entity_dir: &Path, model_dir: &Path) -> Emitter {
        let mut options = self.options.clone();
        if options.entity_import_prefix.is_none() {
            options.entity_import_prefix = relative_import(model_dir, entity_dir);
        }
        if options.model_import_prefix.is_none() {
            options.model_import_prefix = relative_import(entity_dir, model_dir);
        }
        debug!(?options, "import prefixes resolved from output folders");
        Emitter::new(self.convention.clone(), options)
    }

    /// Render every schema of the registry.
    ///
    /// Files come out in registry order: nested value classes first, then
    /// the root entity and its model.
    #[instrument(skip_all, fields(root = %root_class_name, schemas = registry.len()))]
    pub fn render(
        &self,
        root_class_name: &str,
        registry: &SchemaRegistry,
    ) -> Result<GeneratedFiles, DomainError> {
        let root = registry
            .get(root_class_name)
            .ok_or_else(|| DomainError::MissingRootSchema {
                class_name: root_class_name.to_string(),
            })?;

        let cx = Context::new(self, registry, &root.class_name);
        let mut files = GeneratedFiles::new();
        for schema in registry.iter().filter(|s| s.class_name != root.class_name) {
            self.push(&mut files, value_class::render(&cx, schema));
        }
        self.push(&mut files, entity::render(&cx, root));
        self.push(&mut files, model::render(&cx, root));

        debug!(files = files.len(), "rendering finished");
        Ok(files)
    }

    fn push(&self, files: &mut GeneratedFiles, file: RenderedFile) {
        debug!(file = %file.identifier, bytes = file.size(), "file rendered");
        if let Some(previous) = files.insert(file) {
            warn!(
                file = %previous.identifier,
                "file identifier collision, later file overwrites earlier one"
            );
        }
    }

    fn entity_stem(&self, class_name: &str) -> String {
        entity_file_stem(class_name, &self.convention)
    }

    fn model_stem(&self, class_name: &str) -> String {
        model_file_stem(class_name, &self.convention)
    }

    /// Sibling imports for the classes `schema` refers to, skipping itself.
    fn nested_imports(&self, schema: &Schema, prefix: Option<&str>) -> Vec<String> {
        schema
            .referenced_classes()
            .into_iter()
            .filter(|name| *name != schema.class_name)
            .map(|name| {
                let stem = self.entity_stem(name);
                match prefix {
                    Some(prefix) => import_line(&format!("{prefix}/{stem}.dart")),
                    None => import_line(&format!("{stem}.dart")),
                }
            })
            .collect()
    }
}

/// Registry-wide facts the per-schema templates need.
struct Context<'a> {
    emitter: &'a Emitter,
    codec: dart::Codec,
    /// `(class, field)` pairs declared nullable to break `empty()` cycles.
    optional: HashSet<(String, String)>,
}

impl<'a> Context<'a> {
    fn new(emitter: &'a Emitter, registry: &SchemaRegistry, root: &str) -> Self {
        let optional = cyclic_fields(registry);
        if !optional.is_empty() {
            debug!(fields = optional.len(), "object fields made nullable to break cycles");
        }
        Self {
            emitter,
            codec: dart::Codec::new(root, model_name(root, &emitter.convention)),
            optional,
        }
    }

    fn is_optional(&self, schema: &Schema, field: &FieldSpec) -> bool {
        self.optional
            .contains(&(schema.class_name.clone(), field.name.clone()))
    }

    fn optional_flags(&self, schema: &Schema) -> Vec<bool> {
        schema
            .fields
            .iter()
            .map(|field| self.is_optional(schema, field))
            .collect()
    }
}

/// Object fields whose class reaches back to the owning class through
/// object fields. List fields never recurse in `empty()` and are ignored.
fn cyclic_fields(registry: &SchemaRegistry) -> HashSet<(String, String)> {
    let mut out = HashSet::new();
    for schema in registry.iter() {
        for field in &schema.fields {
            if let TypeRef::Object(target) = &field.ty {
                if reaches(registry, target, &schema.class_name) {
                    out.insert((schema.class_name.clone(), field.name.clone()));
                }
            }
        }
    }
    out
}

fn reaches(registry: &SchemaRegistry, from: &str, to: &str) -> bool {
    let mut seen = HashSet::new();
    let mut stack = vec![from];
    while let Some(class) = stack.pop() {
        if class == to {
            return true;
        }
        if !seen.insert(class) {
            continue;
        }
        if let Some(schema) = registry.get(class) {
            stack.extend(schema.fields.iter().filter_map(|f| match &f.ty {
                TypeRef::Object(name) => Some(name.as_str()),
                _ => None,
            }));
        }
    }
    false
}

/// `/`-separated import path from folder `from` to folder `to`.
///
/// Lexical only: `None` when one path is absolute and the other is not, or
/// when `from` climbs above its starting point.
fn relative_import(from: &Path, to: &Path) -> Option<String> {
    if from.is_absolute() != to.is_absolute() {
        return None;
    }
    let from = normalise(from);
    let to = normalise(to);

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    if from[common..].iter().any(|part| part == "..") {
        return None;
    }
    let mut parts: Vec<String> = vec!["..".into(); from.len() - common];
    parts.extend(to[common..].iter().cloned());

    Some(if parts.is_empty() {
        ".".into()
    } else {
        parts.join("/")
    })
}

/// Path components as strings with `.` dropped and `..` applied where possible.
fn normalise(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.last().is_some_and(|last| last.as_str() != "..") {
                    parts.pop();
                } else {
                    parts.push("..".into());
                }
            }
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::RootDir | Component::Prefix(_) => {
                parts.push(component.as_os_str().to_string_lossy().into_owned());
            }
        }
    }
    parts
}

#[cfg(test)]
impl<'a> Context<'a> {
    /// Context for rendering `schema` on its own, as the root when it is one.
    fn for_schema(emitter: &'a Emitter, schema: &Schema) -> Self {
        let mut registry = SchemaRegistry::new();
        registry.register(schema.clone());
        let root = if schema.is_root { schema.class_name.as_str() } else { "" };
        Self::new(emitter, &registry, root)
    }
}

// ── source building ──────────────────────────────────────────────────────────

/// Line-oriented source buffer.
#[derive(Debug, Default)]
struct Source {
    buf: String,
}

impl Source {
    fn line(&mut self, line: impl AsRef<str>) {
        self.buf.push_str(line.as_ref());
        self.buf.push('\n');
    }

    fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write a group of lines followed by a blank line; nothing when empty.
    fn block(&mut self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        for line in lines {
            self.line(line);
        }
        self.blank();
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn import_line(path: &str) -> String {
    format!("import {};", dart::string_literal(path))
}

/// `final T ident;` with the unknown-element note where it applies.
fn field_declaration(field: &FieldSpec, ident: &str, optional: bool) -> String {
    let decl = format!("  final {} {ident};", dart::declared_type(&field.ty, optional));
    if dart::has_unknown_element(&field.ty) {
        format!("{decl} {}", dart::UNKNOWN_ELEMENT_NOTE)
    } else {
        decl
    }
}

/// Const constructor requiring every field.
fn constructor(out: &mut Source, class_name: &str, idents: &[String]) {
    if idents.is_empty() {
        out.line(format!("  const {class_name}();"));
        return;
    }
    out.line(format!("  const {class_name}({{"));
    for ident in idents {
        out.line(format!("    required this.{ident},"));
    }
    out.line("  });");
}

/// Constructor call with named arguments, formatted as an expression body.
fn call_with_args(callee: &str, args: &[(String, String)]) -> String {
    if args.is_empty() {
        return format!("{callee}()");
    }
    let mut call = format!("{callee}(\n");
    for (name, value) in args {
        call.push_str(&format!("        {name}: {value},\n"));
    }
    call.push_str("      )");
    call
}

/// `factory X.empty()` built from the kind defaults; optional fields get `null`.
fn empty_factory(
    out: &mut Source,
    class_name: &str,
    fields: &[FieldSpec],
    idents: &[String],
    optional: &[bool],
) {
    let args: Vec<_> = fields
        .iter()
        .zip(idents)
        .zip(optional)
        .map(|((field, ident), &optional)| {
            let value = if optional {
                "null".to_string()
            } else {
                default_value(&field.ty)
            };
            (ident.clone(), value)
        })
        .collect();
    out.line(format!(
        "  factory {class_name}.empty() => {};",
        call_with_args(class_name, &args)
    ));
}
