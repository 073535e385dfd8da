//! Root model file.
//!
//! The model carries the same fields as the entity, annotated for
//! `json_serializable`. `fromMap`/`toMap` delegate to the generated
//! `_$XFromJson`/`_$XToJson` functions that `build_runner` writes into the
//! part file.

use super::{Context, Source, call_with_args, constructor, dart, field_declaration, import_line};
use crate::domain::{
    entities::{FieldSpec, Layer, RenderedFile, Schema},
    naming::model_name,
    value_objects::TypeRef,
};

pub(super) fn render(cx: &Context<'_>, schema: &Schema) -> RenderedFile {
    let emitter = cx.emitter;
    let entity = &schema.class_name;
    let model = model_name(entity, &emitter.convention);
    let stem = emitter.model_stem(entity);
    let idents = dart::field_identifiers(&schema.fields);
    let optional = cx.optional_flags(schema);
    let prefix = emitter.options.entity_import_prefix();

    let mut out = Source::default();
    out.block(&[import_line("package:json_annotation/json_annotation.dart")]);

    let mut local = vec![import_line(&format!(
        "{prefix}/{}.dart",
        emitter.entity_stem(entity)
    ))];
    local.extend(emitter.nested_imports(schema, Some(prefix)));
    out.block(&local);

    out.line(format!("part '{stem}.g.dart';"));
    out.blank();
    out.line("@JsonSerializable(explicitToJson: true)");
    out.line(format!("class {model} {{"));

    for ((field, ident), &optional) in schema.fields.iter().zip(&idents).zip(&optional) {
        if let Some(annotation) = json_key(field, ident) {
            out.line(format!("  {annotation}"));
        }
        out.line(field_declaration(field, ident, optional));
    }
    if !schema.fields.is_empty() {
        out.blank();
    }

    constructor(&mut out, &model, &idents);
    out.blank();

    let from_entity: Vec<_> = idents
        .iter()
        .map(|ident| (ident.clone(), format!("entity.{ident}")))
        .collect();
    out.line(format!(
        "  factory {model}.fromEntity({entity} entity) => {};",
        call_with_args(&model, &from_entity)
    ));
    out.blank();

    let to_entity: Vec<_> = idents
        .iter()
        .map(|ident| (ident.clone(), ident.clone()))
        .collect();
    out.line(format!(
        "  {entity} toEntity() => {};",
        call_with_args(entity, &to_entity)
    ));
    out.blank();

    out.line(format!(
        "  factory {model}.fromMap(Map<String, dynamic> json) => _${model}FromJson(json);"
    ));
    out.blank();
    out.line(format!(
        "  Map<String, dynamic> toMap() => _${model}ToJson(this);"
    ));

    for ((field, ident), &optional) in schema.fields.iter().zip(&idents).zip(&optional) {
        if needs_converter(&field.ty) {
            out.blank();
            converters(&mut out, &cx.codec, &field.ty, ident, optional);
        }
    }
    out.line("}");

    RenderedFile {
        identifier: stem,
        class_name: model,
        layer: Layer::Model,
        content: out.finish(),
    }
}

fn needs_converter(ty: &TypeRef) -> bool {
    ty.referenced_class().is_some()
}

/// `@JsonKey(...)` for a field, when the defaults do not fit.
fn json_key(field: &FieldSpec, ident: &str) -> Option<String> {
    let mut args = Vec::new();
    if ident != field.name {
        args.push(format!("name: {}", dart::string_literal(&field.name)));
    }
    if needs_converter(&field.ty) {
        args.push(format!("fromJson: {ident}FromMap"));
        args.push(format!("toJson: {ident}ToMap"));
    }
    (!args.is_empty()).then(|| format!("@JsonKey({})", args.join(", ")))
}

/// Static helpers named by the field's `@JsonKey` converters.
fn converters(
    out: &mut Source,
    codec: &dart::Codec,
    ty: &TypeRef,
    ident: &str,
    optional: bool,
) {
    let dart_ty = dart::declared_type(ty, optional);
    match ty {
        TypeRef::List(inner) => {
            out.line(format!(
                "  static {dart_ty} {ident}FromMap(List<dynamic> json) =>\n      json.map((e0) => {}).toList();",
                codec.decode_element(inner, 0)
            ));
            out.blank();
            out.line(format!(
                "  static List<dynamic> {ident}ToMap({dart_ty} value) => {};",
                codec.encode_value(ty, "value", false)
            ));
        }
        TypeRef::Object(class) if optional => {
            out.line(format!(
                "  static {dart_ty} {ident}FromMap(Map<String, dynamic>? json) =>\n      json == null ? null : {};",
                codec.from_map(class, "json")
            ));
            out.blank();
            out.line(format!(
                "  static Map<String, dynamic>? {ident}ToMap({dart_ty} value) => {};",
                codec.encode_value(ty, "value", true)
            ));
        }
        TypeRef::Object(class) => {
            out.line(format!(
                "  static {dart_ty} {ident}FromMap(Map<String, dynamic> json) =>\n      {};",
                codec.from_map(class, "json")
            ));
            out.blank();
            out.line(format!(
                "  static Map<String, dynamic> {ident}ToMap({dart_ty} value) => {};",
                codec.encode_value(ty, "value", false)
            ));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emitter::Emitter;
    use pretty_assertions::assert_eq;

    fn render(emitter: &Emitter, schema: &Schema) -> RenderedFile {
        let cx = Context::for_schema(emitter, schema);
        super::render(&cx, schema)
    }

    #[test]
    fn renders_model_by_composition() {
        let schema = Schema::root(
            "UserEntity",
            vec![
                FieldSpec::new("uuid", TypeRef::String),
                FieldSpec::new("first_name", TypeRef::String),
            ],
        );
        let file = render(&Emitter::default(), &schema);

        let expected = "\
import 'package:json_annotation/json_annotation.dart';

import '../entities/user_entity.dart';

part 'user_model.g.dart';

@JsonSerializable(explicitToJson: true)
class UserModel {
  final String uuid;
  @JsonKey(name: 'first_name')
  final String firstName;

  const UserModel({
    required this.uuid,
    required this.firstName,
  });

  factory UserModel.fromEntity(UserEntity entity) => UserModel(
        uuid: entity.uuid,
        firstName: entity.firstName,
      );

  UserEntity toEntity() => UserEntity(
        uuid: uuid,
        firstName: firstName,
      );

  factory UserModel.fromMap(Map<String, dynamic> json) => _$UserModelFromJson(json);

  Map<String, dynamic> toMap() => _$UserModelToJson(this);
}
";
        assert_eq!(file.content, expected);
        assert_eq!(file.layer, Layer::Model);
        assert!(!file.content.contains("extends"));
    }

    #[test]
    fn object_fields_get_converters() {
        let schema = Schema::root(
            "OrderEntity",
            vec![
                FieldSpec::new("customer", TypeRef::object("CustomerEntity")),
                FieldSpec::new("items", TypeRef::list_of(TypeRef::object("ItemsEntity"))),
            ],
        );
        let content = render(&Emitter::default(), &schema).content;

        assert!(content.contains("import '../entities/customer_entity.dart';"));
        assert!(content.contains("import '../entities/items_entity.dart';"));
        assert!(content.contains("  @JsonKey(fromJson: customerFromMap, toJson: customerToMap)\n  final CustomerEntity customer;"));
        assert!(content.contains("  static CustomerEntity customerFromMap(Map<String, dynamic> json) =>\n      CustomerEntity.fromJson(json);"));
        assert!(content.contains("  static Map<String, dynamic> customerToMap(CustomerEntity value) => value.toJson();"));
        assert!(content.contains(
            "json.map((e0) => ItemsEntity.fromJson(e0 as Map<String, dynamic>)).toList();"
        ));
        assert!(content.contains(
            "  static List<dynamic> itemsToMap(List<ItemsEntity> value) => value.map((e0) => e0.toJson()).toList();"
        ));
    }

    #[test]
    fn self_reference_converts_through_the_model() {
        let schema = Schema::root(
            "DataEntity",
            vec![
                FieldSpec::new("data", TypeRef::object("DataEntity")),
                FieldSpec::new("token", TypeRef::String),
            ],
        );
        let content = render(&Emitter::default(), &schema).content;

        assert!(content.contains("  @JsonKey(fromJson: dataFromMap, toJson: dataToMap)\n  final DataEntity? data;"));
        assert!(content.contains(
            "  static DataEntity? dataFromMap(Map<String, dynamic>? json) =>\n      json == null ? null : DataModel.fromMap(json).toEntity();"
        ));
        assert!(content.contains(
            "  static Map<String, dynamic>? dataToMap(DataEntity? value) => value?.toModel().toMap();"
        ));
        assert!(!content.contains("DataEntity.fromJson"));
        assert!(!content.contains("value.toJson()"));
    }

    #[test]
    fn renamed_converted_field_merges_annotation() {
        let field = FieldSpec::new("home_address", TypeRef::object("HomeAddressEntity"));
        assert_eq!(
            json_key(&field, "homeAddress").unwrap(),
            "@JsonKey(name: 'home_address', fromJson: homeAddressFromMap, toJson: homeAddressToMap)"
        );
        assert_eq!(json_key(&FieldSpec::new("id", TypeRef::Integer), "id"), None);
    }
}
