//! Root entity file.

use super::{Context, Source, constructor, empty_factory, field_declaration, import_line};
use crate::domain::{
    emitter::dart::field_identifiers,
    entities::{Layer, RenderedFile, Schema},
    naming::model_name,
};

pub(super) fn render(cx: &Context<'_>, schema: &Schema) -> RenderedFile {
    let emitter = cx.emitter;
    let class = &schema.class_name;
    let model = model_name(class, &emitter.convention);
    let stem = emitter.entity_stem(class);
    let idents = field_identifiers(&schema.fields);
    let optional = cx.optional_flags(schema);
    let opts = &emitter.options;

    let mut out = Source::default();

    let mut imports = Vec::new();
    if opts.hive {
        imports.push(import_line("package:hive/hive.dart"));
    }
    out.block(&imports);

    let mut local = vec![import_line(&format!(
        "{}/{}.dart",
        opts.model_import_prefix(),
        emitter.model_stem(class)
    ))];
    local.extend(emitter.nested_imports(schema, None));
    out.block(&local);

    if opts.hive {
        out.line(format!("part '{stem}.g.dart';"));
        out.blank();
        out.line(format!("@HiveType(typeId: {})", opts.hive_type_id));
    }
    out.line(format!("class {class} {{"));

    let fields = schema.fields.iter().zip(&idents).zip(&optional);
    for (index, ((field, ident), &optional)) in fields.enumerate() {
        if opts.hive {
            out.line(format!("  @HiveField({index})"));
        }
        out.line(field_declaration(field, ident, optional));
    }
    if !schema.fields.is_empty() {
        out.blank();
    }

    constructor(&mut out, class, &idents);
    out.blank();
    out.line(format!("  factory {class}.fromModel({model} model) => model.toEntity();"));
    out.blank();
    out.line(format!("  {model} toModel() => {model}.fromEntity(this);"));
    out.blank();
    empty_factory(&mut out, class, &schema.fields, &idents, &optional);
    out.line("}");

    RenderedFile {
        identifier: stem,
        class_name: class.clone(),
        layer: Layer::Entity,
        content: out.finish(),
    }
}
