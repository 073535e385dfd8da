//! Class-name and file-name derivation.
//!
//! Every function here is pure: the same key always yields the same class
//! name, and nothing counts or remembers earlier calls. Uniqueness is the
//! registry's concern, not the namer's.

use crate::domain::{error::DomainError, value_objects::NamingConvention};

/// Derive the class name for a nested object found under `key`.
///
/// | Key | Class |
/// |-----|-------|
/// | `address` | `AddressEntity` |
/// | `billing_address` | `BillingAddressEntity` |
/// | `lineItems` | `LineItemsEntity` |
/// | `名前` | `FieldEntity` |
pub fn derive_name(key: &str, convention: &NamingConvention) -> String {
    let mut base = to_class_case(key);
    if base.is_empty() {
        base.push_str("Field");
    }
    format!("{base}{}", convention.entity_suffix)
}

/// Canonical root class name: strip the entity suffix if present, PascalCase
/// the rest, then append the suffix again.
///
/// `user` → `UserEntity`, `UserEntity` → `UserEntity`, `car_model` → `CarModelEntity`.
pub fn canonical_root_name(
    name: &str,
    convention: &NamingConvention,
) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidClassName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }

    let base = strip_suffix(trimmed, &convention.entity_suffix);
    let base = to_class_case(base);
    if base.is_empty() {
        return Err(DomainError::InvalidClassName {
            name: name.into(),
            reason: format!(
                "no ASCII letter or digit left once the '{}' suffix is removed",
                convention.entity_suffix
            ),
        });
    }

    Ok(format!("{base}{}", convention.entity_suffix))
}

/// Class name without the entity suffix: `UserProfileEntity` → `UserProfile`.
pub fn base_name<'a>(class_name: &'a str, convention: &NamingConvention) -> &'a str {
    strip_suffix(class_name, &convention.entity_suffix)
}

/// Model class paired with an entity: `UserEntity` → `UserModel`.
pub fn model_name(class_name: &str, convention: &NamingConvention) -> String {
    format!(
        "{}{}",
        base_name(class_name, convention),
        convention.model_suffix
    )
}

/// Filename stem for an entity-layer class: `UserProfileEntity` → `user_profile_entity`.
pub fn entity_file_stem(class_name: &str, convention: &NamingConvention) -> String {
    file_stem(class_name, &convention.entity_suffix, convention)
}

/// Filename stem for the model paired with `class_name`: `UserEntity` → `user_model`.
pub fn model_file_stem(class_name: &str, convention: &NamingConvention) -> String {
    file_stem(class_name, &convention.model_suffix, convention)
}

fn file_stem(class_name: &str, suffix: &str, convention: &NamingConvention) -> String {
    let base = to_snake_case(base_name(class_name, convention));
    let suffix = to_snake_case(suffix);
    match (base.is_empty(), suffix.is_empty()) {
        (true, _) => suffix,
        (_, true) => base,
        _ => format!("{base}_{suffix}"),
    }
}

fn strip_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return name;
    }
    name.strip_suffix(suffix).unwrap_or(name)
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// PascalCase built from the same words as [`to_snake_case`].
///
/// `lineItems` → `LineItems`, `userID` → `UserId`, `HTTPServer` → `HttpServer`.
/// A leading digit gets an `N` prefix since class names cannot start with one.
///
/// The result segments back into exactly the words it was joined from, so two
/// different class names never share a file stem.
pub fn to_class_case(s: &str) -> String {
    let mut words = split_words(s);
    if let Some(first) = words.first_mut() {
        if first.starts_with(|c: char| c.is_ascii_digit()) {
            first.insert(0, 'n');
        }
    }
    let mut out = pascal_join(&words);
    // Single-letter words fuse on re-splitting (`a_b` → `AB` → `ab`); each
    // pass only merges words, so this settles quickly.
    loop {
        let again = pascal_join(&split_words(&out));
        if again == out {
            return out;
        }
        out = again;
    }
}

fn pascal_join(words: &[String]) -> String {
    let mut out = String::new();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Convert a string to lowerCamelCase.
///
/// | Input | Output |
/// |-------|--------|
/// | "first_name" | "firstName" |
/// | "first-name" | "firstName" |
/// | "HTTPStatus" | "httpStatus" |
pub fn to_camel_case(s: &str) -> String {
    let mut words = split_words(s).into_iter();
    let mut out = words.next().unwrap_or_default();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Convert a string to snake_case.
///
/// | Input | Output |
/// |-------|--------|
/// | "UserProfile" | "user_profile" |
/// | "HTTPRequest" | "http_request" |
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Split a string into lowercase ASCII words.
///
/// ## Word Boundary Detection
///
/// 1. **Separators:** anything that is not an ASCII letter or digit, so
///    `café` yields `caf` and a key with no ASCII letters yields nothing
/// 2. **Case transition (camelCase):** `aB` → split between `a` and `B`
/// 3. **Acronym boundary:** `HTTPRequest` → split between `P` and `R`
///    (detected by `Upper Upper Lower` pattern)
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(current.to_ascii_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // "myApp" → "my" + "App"
            if (c.is_ascii_lowercase() || c.is_ascii_digit()) && next.is_ascii_uppercase() {
                current.push(c);
                words.push(current.to_ascii_lowercase());
                current.clear();
                continue;
            }

            // "HTTPServer" → "HTTP" + "Server"
            if c.is_ascii_uppercase()
                && next.is_ascii_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_ascii_lowercase())
            {
                current.push(c);
                words.push(current.to_ascii_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_ascii_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> NamingConvention {
        NamingConvention::default()
    }

    #[test]
    fn derive_name_capitalizes_and_suffixes() {
        assert_eq!(derive_name("address", &conv()), "AddressEntity");
        assert_eq!(derive_name("items", &conv()), "ItemsEntity");
        assert_eq!(derive_name("billing_address", &conv()), "BillingAddressEntity");
        assert_eq!(derive_name("lineItems", &conv()), "LineItemsEntity");
        assert_eq!(derive_name("first-name", &conv()), "FirstNameEntity");
    }

    #[test]
    fn derive_name_is_idempotent() {
        let first = derive_name("data", &conv());
        let second = derive_name("data", &conv());
        assert_eq!(first, second);
    }

    #[test]
    fn derive_name_handles_leading_digit() {
        assert_eq!(derive_name("2fa", &conv()), "N2faEntity");
    }

    #[test]
    fn root_name_is_canonicalised() {
        assert_eq!(canonical_root_name("user", &conv()).unwrap(), "UserEntity");
        assert_eq!(canonical_root_name("UserEntity", &conv()).unwrap(), "UserEntity");
        assert_eq!(canonical_root_name("car_model", &conv()).unwrap(), "CarModelEntity");
        assert_eq!(canonical_root_name("  Car ", &conv()).unwrap(), "CarEntity");
    }

    #[test]
    fn root_name_rejects_empty_and_bare_suffix() {
        assert!(matches!(
            canonical_root_name("   ", &conv()),
            Err(DomainError::InvalidClassName { .. })
        ));
        assert!(matches!(
            canonical_root_name("Entity", &conv()),
            Err(DomainError::InvalidClassName { .. })
        ));
        assert!(canonical_root_name("--", &conv()).is_err());
        assert!(canonical_root_name("名前", &conv()).is_err());
    }

    #[test]
    fn acronym_and_camel_keys_share_a_class() {
        assert_eq!(derive_name("userID", &conv()), "UserIdEntity");
        assert_eq!(derive_name("userId", &conv()), "UserIdEntity");
        assert_eq!(derive_name("user_id", &conv()), "UserIdEntity");
        assert_eq!(derive_name("HTTPServer", &conv()), "HttpServerEntity");
    }

    #[test]
    fn class_names_resegment_to_their_own_words() {
        for key in ["userID", "a_b", "a_b_cd", "2_b", "v2Api", "XMLHttpRequest", "x"] {
            let class = to_class_case(key);
            assert_eq!(to_class_case(&class), class, "{key}");
            assert_eq!(to_class_case(&to_snake_case(&class)), class, "{key}");
        }
        assert_eq!(to_class_case("a_b"), "Ab");
        assert_eq!(to_class_case("2_b"), "N2B");
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        assert_eq!(to_class_case("café"), "Caf");
        assert_eq!(to_snake_case("prix_été"), "prix_t");
        assert_eq!(derive_name("名前", &conv()), "FieldEntity");
        assert_eq!(entity_file_stem(&derive_name("名前", &conv()), &conv()), "field_entity");
    }

    #[test]
    fn file_stems_follow_layer_suffix() {
        assert_eq!(entity_file_stem("UserProfileEntity", &conv()), "user_profile_entity");
        assert_eq!(model_file_stem("UserProfileEntity", &conv()), "user_profile_model");
        assert_eq!(entity_file_stem("AddressEntity", &conv()), "address_entity");
    }

    #[test]
    fn model_name_swaps_suffix() {
        assert_eq!(model_name("UserEntity", &conv()), "UserModel");
        let custom = NamingConvention::new("Record", "Dto");
        assert_eq!(model_name("UserRecord", &custom), "UserDto");
        assert_eq!(model_file_stem("UserRecord", &custom), "user_dto");
    }

    #[test]
    fn case_helpers() {
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_camel_case("first_name"), "firstName");
        assert_eq!(to_camel_case("HTTPStatus"), "httpStatus");
        assert_eq!(to_camel_case("createdAt"), "createdAt");
        assert_eq!(to_class_case("user_info"), "UserInfo");
    }
}
