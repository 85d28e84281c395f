// crates/profinet-rs-gsdml/src/resolver/utils.rs

//! Attribute parsing helpers shared by the resolver stages.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::warn;
use profinet_rs::SchemaError;
use profinet_rs::schema::TextCatalog;
use profinet_rs::types::parse_integer;

/// Returns the attribute value, treating an empty string as missing.
pub(super) fn require<'a>(
    value: Option<&'a String>,
    element: &'static str,
    attribute: &'static str,
    owner: &str,
) -> Result<&'a str, SchemaError> {
    match value.map(|s| s.trim()) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(SchemaError::MissingAttribute {
            element,
            attribute,
            id: owner.to_string(),
        }),
    }
}

/// Parses a decimal or `0x` hexadecimal attribute into the target integer type.
pub(super) fn parse_number<T: TryFrom<i64>>(
    attribute: &'static str,
    value: &str,
) -> Result<T, SchemaError> {
    parse_integer(value)
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| SchemaError::InvalidAttributeFormat {
            attribute,
            value: value.to_string(),
        })
}

/// Parses an optional numeric attribute.
pub(super) fn parse_optional<T: TryFrom<i64>>(
    attribute: &'static str,
    value: Option<&String>,
) -> Result<Option<T>, SchemaError> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| parse_number(attribute, s))
        .transpose()
}

/// Parses an `xsd:boolean` attribute, using `default` when it is absent.
pub(super) fn parse_bool(
    attribute: &'static str,
    value: Option<&String>,
    default: bool,
) -> Result<bool, SchemaError> {
    match value.map(|s| s.trim()) {
        None | Some("") => Ok(default),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(SchemaError::InvalidAttributeFormat {
            attribute,
            value: other.to_string(),
        }),
    }
}

/// Converts a `Const@Data` list such as `"0x00,0x1A,0x3"` to bytes.
pub(super) fn parse_const_data(value: &str) -> Result<Vec<u8>, SchemaError> {
    let invalid = || SchemaError::InvalidAttributeFormat {
        attribute: "Data",
        value: value.to_string(),
    };

    let mut digits = String::new();
    for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let hex = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .ok_or_else(invalid)?;
        match hex.len() {
            1 => {
                digits.push('0');
                digits.push_str(hex);
            }
            2 => digits.push_str(hex),
            _ => return Err(invalid()),
        }
    }
    hex::decode(&digits).map_err(|_| invalid())
}

/// Resolves a text id, falling back to the id itself when the document has
/// no text for it.
pub(super) fn text_or_id(texts: &TextCatalog, text_id: &str) -> String {
    match texts.resolve_text(text_id) {
        Some(text) => text.to_string(),
        None => {
            warn!("No text for TextId '{}', using the id as display name", text_id);
            text_id.to_string()
        }
    }
}
