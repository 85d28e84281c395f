// crates/profinet-rs/src/value.rs

use crate::types::{DataType, parse_integer};
use alloc::string::{String, ToString};
use core::fmt;

/// A parameter value as exchanged with callers of the transcoder.
///
/// `Text` carries either a VisibleString or the display text of a symbolic value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    Bit(bool),
    BitArea(u8),
    UInt8(u8),
    UInt16(u16),
    Int16(i16),
    Int32(i32),
    Text(String),
}

impl ParameterValue {
    /// The numeric value widened to `i64`. `None` for `Text`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParameterValue::Bit(v) => Some(*v as i64),
            ParameterValue::BitArea(v) | ParameterValue::UInt8(v) => Some(*v as i64),
            ParameterValue::UInt16(v) => Some(*v as i64),
            ParameterValue::Int16(v) => Some(*v as i64),
            ParameterValue::Int32(v) => Some(*v as i64),
            ParameterValue::Text(_) => None,
        }
    }

    /// The raw string form used to match GSDML value-list `Content` codes:
    /// bits as `0`/`1`, integers in decimal, text verbatim.
    pub fn raw_string(&self) -> String {
        match self {
            ParameterValue::Text(s) => s.clone(),
            other => other.as_i64().unwrap_or_default().to_string(),
        }
    }

    /// Short name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterValue::Bit(_) => "Bit",
            ParameterValue::BitArea(_) => "BitArea",
            ParameterValue::UInt8(_) => "Unsigned8",
            ParameterValue::UInt16(_) => "Unsigned16",
            ParameterValue::Int16(_) => "Integer16",
            ParameterValue::Int32(_) => "Integer32",
            ParameterValue::Text(_) => "Text",
        }
    }

    /// Builds the typed value for `data_type` from an `i64`, if it is representable.
    ///
    /// BitArea is only checked against a full byte here; the field's bit length
    /// is enforced by the codec.
    pub fn from_i64(data_type: DataType, v: i64) -> Option<Self> {
        match data_type {
            DataType::Bit => match v {
                0 => Some(ParameterValue::Bit(false)),
                1 => Some(ParameterValue::Bit(true)),
                _ => None,
            },
            DataType::BitArea => u8::try_from(v).ok().map(ParameterValue::BitArea),
            DataType::Unsigned8 => u8::try_from(v).ok().map(ParameterValue::UInt8),
            DataType::Unsigned16 => u16::try_from(v).ok().map(ParameterValue::UInt16),
            DataType::Integer16 => i16::try_from(v).ok().map(ParameterValue::Int16),
            DataType::Integer32 => i32::try_from(v).ok().map(ParameterValue::Int32),
            DataType::VisibleString => None,
        }
    }

    /// Parses the textual form found in GSDML attributes (`DefaultValue`, `Content`)
    /// into a typed value.
    pub fn parse(data_type: DataType, s: &str) -> Option<Self> {
        match data_type {
            DataType::VisibleString => Some(ParameterValue::Text(s.to_string())),
            numeric => parse_integer(s).and_then(|v| Self::from_i64(numeric, v)),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bit(v) => write!(f, "{}", *v as u8),
            ParameterValue::Text(s) => f.write_str(s),
            other => write!(f, "{}", other.as_i64().unwrap_or_default()),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(v: bool) -> Self {
        ParameterValue::Bit(v)
    }
}

impl From<u8> for ParameterValue {
    fn from(v: u8) -> Self {
        ParameterValue::UInt8(v)
    }
}

impl From<u16> for ParameterValue {
    fn from(v: u16) -> Self {
        ParameterValue::UInt16(v)
    }
}

impl From<i16> for ParameterValue {
    fn from(v: i16) -> Self {
        ParameterValue::Int16(v)
    }
}

impl From<i32> for ParameterValue {
    fn from(v: i32) -> Self {
        ParameterValue::Int32(v)
    }
}

impl From<&str> for ParameterValue {
    fn from(v: &str) -> Self {
        ParameterValue::Text(v.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(v: String) -> Self {
        ParameterValue::Text(v)
    }
}
