//! Nested value classes with hand-written JSON conversion.

use super::{
    Context, Source, call_with_args, constructor, dart, empty_factory, field_declaration,
    import_line,
};
use crate::domain::entities::{Layer, RenderedFile, Schema};

pub(super) fn render(cx: &Context<'_>, schema: &Schema) -> RenderedFile {
    let emitter = cx.emitter;
    let class = &schema.class_name;
    let idents = dart::field_identifiers(&schema.fields);
    let optional = cx.optional_flags(schema);

    let mut imports = emitter.nested_imports(schema, None);
    // A reference back to the root converts through the root model.
    if let Some(root) = schema
        .referenced_classes()
        .into_iter()
        .find(|name| cx.codec.is_root(name))
    {
        imports.push(import_line(&format!(
            "{}/{}.dart",
            emitter.options.model_import_prefix(),
            emitter.model_stem(root)
        )));
    }

    let mut out = Source::default();
    out.block(&imports);

    out.line(format!("class {class} {{"));
    for ((field, ident), &optional) in schema.fields.iter().zip(&idents).zip(&optional) {
        out.line(field_declaration(field, ident, optional));
    }
    if !schema.fields.is_empty() {
        out.blank();
    }

    constructor(&mut out, class, &idents);
    out.blank();
    empty_factory(&mut out, class, &schema.fields, &idents, &optional);
    out.blank();

    let decoded: Vec<_> = schema
        .fields
        .iter()
        .zip(&idents)
        .zip(&optional)
        .map(|((field, ident), &optional)| {
            (ident.clone(), cx.codec.decode_field(&field.ty, &field.name, optional))
        })
        .collect();
    out.line(format!(
        "  factory {class}.fromJson(Map<String, dynamic> json) => {};",
        call_with_args(class, &decoded)
    ));
    out.blank();

    if schema.fields.is_empty() {
        out.line("  Map<String, dynamic> toJson() => <String, dynamic>{};");
    } else {
        out.line("  Map<String, dynamic> toJson() => <String, dynamic>{");
        for ((field, ident), &optional) in schema.fields.iter().zip(&idents).zip(&optional) {
            out.line(format!(
                "        {}: {},",
                dart::string_literal(&field.name),
                cx.codec.encode_value(&field.ty, ident, optional)
            ));
        }
        out.line("      };");
    }
    out.line("}");

    RenderedFile {
        identifier: emitter.entity_stem(class),
        class_name: class.clone(),
        layer: Layer::Entity,
        content: out.finish(),
    }
}
