//! Dart spelling of inferred types: type names, defaults, identifiers and
//! the per-kind conversion expressions used by `fromJson` / `toJson`.

use std::collections::HashSet;

use crate::domain::{
    entities::FieldSpec,
    naming::to_camel_case,
    value_objects::TypeRef,
};

const RESERVED: &[&str] = &[
    "abstract", "as", "assert", "async", "await", "base", "break", "case", "catch", "class",
    "const", "continue", "covariant", "default", "deferred", "do", "dynamic", "else", "enum",
    "export", "extends", "extension", "external", "factory", "false", "final", "finally", "for",
    "Function", "get", "hide", "if", "implements", "import", "in", "interface", "is", "late",
    "library", "mixin", "new", "null", "of", "on", "operator", "part", "required", "rethrow",
    "return", "sealed", "set", "show", "static", "super", "switch", "sync", "this", "throw",
    "true", "try", "typedef", "var", "void", "when", "while", "with", "yield",
];

/// Comment appended to declarations whose element type could not be typed,
/// either because the array was empty or its first element was unsupported.
pub const UNKNOWN_ELEMENT_NOTE: &str = "// element type unknown: not inferred from the sample";

/// Dart type for a resolved field type.
pub fn dart_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::String => "String".into(),
        TypeRef::Integer => "int".into(),
        TypeRef::Float => "double".into(),
        TypeRef::Boolean => "bool".into(),
        TypeRef::Dynamic | TypeRef::Unknown => "dynamic".into(),
        TypeRef::List(inner) => format!("List<{}>", dart_type(inner)),
        TypeRef::Object(name) => name.clone(),
    }
}

/// True when some list layer of `ty` ends in an unobserved element.
pub fn has_unknown_element(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::List(inner) => matches!(**inner, TypeRef::Unknown) || has_unknown_element(inner),
        _ => false,
    }
}

/// Declared type of a field; optional fields get a trailing `?`.
pub fn declared_type(ty: &TypeRef, optional: bool) -> String {
    if optional {
        format!("{}?", dart_type(ty))
    } else {
        dart_type(ty)
    }
}

/// Literal used by `empty()` for a field of this type.
pub fn default_value(ty: &TypeRef) -> String {
    match ty {
        TypeRef::String => "''".into(),
        TypeRef::Integer | TypeRef::Float => "0".into(),
        TypeRef::Boolean => "false".into(),
        TypeRef::Dynamic | TypeRef::Unknown => "null".into(),
        TypeRef::List(_) => "[]".into(),
        TypeRef::Object(name) => format!("{name}.empty()"),
    }
}

/// Dart identifier for a JSON key.
///
/// `first_name` → `firstName`, `2fa` → `n2fa`, `class` → `class$`.
pub fn field_identifier(key: &str) -> String {
    let mut ident = to_camel_case(key);
    if ident.is_empty() {
        ident.push_str("field");
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, 'n');
    }
    if RESERVED.contains(&ident.as_str()) {
        ident.push('$');
    }
    ident
}

/// Identifiers for every field of a schema, in field order.
///
/// Keys that map to the same identifier (`first_name` and `firstName`) get a
/// numeric suffix so the class still compiles.
pub fn field_identifiers(fields: &[FieldSpec]) -> Vec<String> {
    let mut taken = HashSet::with_capacity(fields.len());
    fields
        .iter()
        .map(|field| {
            let base = field_identifier(&field.name);
            let mut ident = base.clone();
            let mut n = 2;
            while !taken.insert(ident.clone()) {
                ident = format!("{base}{n}");
                n += 1;
            }
            ident
        })
        .collect()
}

/// Single-quoted Dart string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

// ── conversions ──────────────────────────────────────────────────────────────

/// Builds the JSON conversion expressions for one registry.
///
/// Value classes carry `fromJson`/`toJson`; the root entity does not, so a
/// reference back to the root goes through its model instead.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    root: String,
    root_model: String,
}

impl Codec {
    pub fn new(root: impl Into<String>, root_model: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            root_model: root_model.into(),
        }
    }

    pub fn is_root(&self, class_name: &str) -> bool {
        class_name == self.root
    }

    /// `map` (a JSON object expression) turned into an instance of `class`.
    pub fn from_map(&self, class_name: &str, map: &str) -> String {
        if self.is_root(class_name) {
            format!("{}.fromMap({map}).toEntity()", self.root_model)
        } else {
            format!("{class_name}.fromJson({map})")
        }
    }

    /// `value` of type `class` turned into a JSON object.
    ///
    /// Pass `x?` as the value for a null-aware chain.
    pub fn to_map(&self, class_name: &str, value: &str) -> String {
        if self.is_root(class_name) {
            format!("{value}.toModel().toMap()")
        } else {
            format!("{value}.toJson()")
        }
    }

    /// Expression reading `json[key]`, falling back to the kind default when
    /// the key is absent or null. Optional object fields fall back to `null`.
    pub fn decode_field(&self, ty: &TypeRef, key: &str, optional: bool) -> String {
        let source = format!("json[{}]", string_literal(key));
        match ty {
            TypeRef::String => format!("{source} as String? ?? ''"),
            TypeRef::Integer => format!("({source} as num?)?.toInt() ?? 0"),
            TypeRef::Float => format!("({source} as num?)?.toDouble() ?? 0"),
            TypeRef::Boolean => format!("{source} as bool? ?? false"),
            TypeRef::Dynamic | TypeRef::Unknown => source,
            TypeRef::Object(name) => {
                let fallback = if optional {
                    "null".to_string()
                } else {
                    default_value(ty)
                };
                format!(
                    "{source} == null ? {fallback} : {}",
                    self.from_map(name, &format!("{source} as Map<String, dynamic>"))
                )
            }
            TypeRef::List(inner) => match inner.as_ref() {
                TypeRef::Dynamic | TypeRef::Unknown => format!("({source} as List<dynamic>?) ?? []"),
                inner => format!(
                    "({source} as List<dynamic>?)?.map((e0) => {}).toList() ?? []",
                    self.decode_element(inner, 0)
                ),
            },
        }
    }

    /// Expression converting the list element `e{depth}` to its Dart type.
    pub fn decode_element(&self, ty: &TypeRef, depth: usize) -> String {
        let var = format!("e{depth}");
        match ty {
            TypeRef::String => format!("{var} as String"),
            TypeRef::Integer => format!("({var} as num).toInt()"),
            TypeRef::Float => format!("({var} as num).toDouble()"),
            TypeRef::Boolean => format!("{var} as bool"),
            TypeRef::Dynamic | TypeRef::Unknown => var,
            TypeRef::Object(name) => self.from_map(name, &format!("{var} as Map<String, dynamic>")),
            TypeRef::List(inner) => match inner.as_ref() {
                TypeRef::Dynamic | TypeRef::Unknown => format!("{var} as List<dynamic>"),
                inner => format!(
                    "({var} as List<dynamic>).map((e{next}) => {}).toList()",
                    self.decode_element(inner, depth + 1),
                    next = depth + 1
                ),
            },
        }
    }

    /// Expression turning `value` into a JSON-compatible Dart value.
    pub fn encode_value(&self, ty: &TypeRef, value: &str, optional: bool) -> String {
        match ty {
            TypeRef::Object(name) if optional => self.to_map(name, &format!("{value}?")),
            _ => self.encode_at(ty, value, 0),
        }
    }

    fn encode_at(&self, ty: &TypeRef, value: &str, depth: usize) -> String {
        match ty {
            TypeRef::Object(name) => self.to_map(name, value),
            TypeRef::List(inner) if inner.referenced_class().is_some() => {
                let var = format!("e{depth}");
                format!(
                    "{value}.map(({var}) => {}).toList()",
                    self.encode_at(inner, &var, depth + 1)
                )
            }
            _ => value.to_string(),
        }
    }
}
