// crates/profinet-rs/src/types.rs

use crate::error::SchemaError;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

// --- Protocol Constants ---

/// Lowest valid PROFIsafe F-address (F_Source_Add / F_Dest_Add).
pub const F_ADDRESS_MIN: u32 = 1;

/// Highest valid PROFIsafe F-address (F_Source_Add / F_Dest_Add).
pub const F_ADDRESS_MAX: u32 = 65534;

/// Default lower bound of the F-watchdog time in milliseconds.
pub const F_WD_TIME_MIN: u32 = 1;

/// Default upper bound of the F-watchdog time in milliseconds.
pub const F_WD_TIME_MAX: u32 = 65535;

/// The data types a parameter record field may carry.
///
/// The names match the GSDML `Ref@DataType` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Bit,
    BitArea,
    Unsigned8,
    Unsigned16,
    Integer16,
    Integer32,
    VisibleString,
}

impl DataType {
    /// The GSDML spelling of this data type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Bit => "Bit",
            DataType::BitArea => "BitArea",
            DataType::Unsigned8 => "Unsigned8",
            DataType::Unsigned16 => "Unsigned16",
            DataType::Integer16 => "Integer16",
            DataType::Integer32 => "Integer32",
            DataType::VisibleString => "VisibleString",
        }
    }

    /// Number of bytes occupied by a fixed-width type. `None` for VisibleString.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            DataType::Bit | DataType::BitArea | DataType::Unsigned8 => Some(1),
            DataType::Unsigned16 | DataType::Integer16 => Some(2),
            DataType::Integer32 => Some(4),
            DataType::VisibleString => None,
        }
    }

    /// Inclusive numeric range representable by this type.
    ///
    /// BitArea uses the full byte here; the real limit depends on its bit length.
    pub fn numeric_range(&self) -> Option<(i64, i64)> {
        match self {
            DataType::Bit => Some((0, 1)),
            DataType::BitArea | DataType::Unsigned8 => Some((0, u8::MAX as i64)),
            DataType::Unsigned16 => Some((0, u16::MAX as i64)),
            DataType::Integer16 => Some((i16::MIN as i64, i16::MAX as i64)),
            DataType::Integer32 => Some((i32::MIN as i64, i32::MAX as i64)),
            DataType::VisibleString => None,
        }
    }

    /// True for all types except VisibleString.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, DataType::VisibleString)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bit" => Ok(DataType::Bit),
            "BitArea" => Ok(DataType::BitArea),
            "Unsigned8" => Ok(DataType::Unsigned8),
            "Unsigned16" => Ok(DataType::Unsigned16),
            "Integer16" => Ok(DataType::Integer16),
            "Integer32" => Ok(DataType::Integer32),
            "VisibleString" => Ok(DataType::VisibleString),
            other => Err(SchemaError::UnknownDataType(other.to_string())),
        }
    }
}

/// One entry of an `AllowedValues` list: a single value or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSpan {
    pub min: i64,
    pub max: i64,
}

/// Parsed form of the GSDML `AllowedValues` attribute, e.g. `"0..65535"` or `"1 2 5..7"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowedValues {
    spans: Vec<ValueSpan>,
}

impl AllowedValues {
    /// A single inclusive range.
    pub fn range(min: i64, max: i64) -> Self {
        Self {
            spans: alloc::vec![ValueSpan { min, max }],
        }
    }

    /// True if `value` lies in any span.
    pub fn contains(&self, value: i64) -> bool {
        self.spans.iter().any(|s| s.min <= value && value <= s.max)
    }

    /// Smallest allowed value.
    pub fn min(&self) -> Option<i64> {
        self.spans.iter().map(|s| s.min).min()
    }

    /// Largest allowed value.
    pub fn max(&self) -> Option<i64> {
        self.spans.iter().map(|s| s.max).max()
    }

    pub fn spans(&self) -> &[ValueSpan] {
        &self.spans
    }
}

impl FromStr for AllowedValues {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchemaError::InvalidAttributeFormat {
            attribute: "AllowedValues",
            value: s.to_string(),
        };

        let mut spans = Vec::new();
        for token in s.split_whitespace() {
            let span = match token.split_once("..") {
                Some((lo, hi)) => {
                    let min = parse_integer(lo).ok_or_else(invalid)?;
                    let max = parse_integer(hi).ok_or_else(invalid)?;
                    if min > max {
                        return Err(invalid());
                    }
                    ValueSpan { min, max }
                }
                None => {
                    let v = parse_integer(token).ok_or_else(invalid)?;
                    ValueSpan { min: v, max: v }
                }
            };
            spans.push(span);
        }

        if spans.is_empty() {
            return Err(invalid());
        }
        Ok(Self { spans })
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal integer, as used throughout GSDML attributes.
pub fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()
    } else {
        s.parse::<i64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_from_str() {
        assert_eq!("BitArea".parse::<DataType>(), Ok(DataType::BitArea));
        assert_eq!(
            "Float32".parse::<DataType>(),
            Err(SchemaError::UnknownDataType("Float32".into()))
        );
    }

    #[test]
    fn test_allowed_values_range_and_list() {
        let av: AllowedValues = "1 3 10..20".parse().unwrap();
        assert!(av.contains(1));
        assert!(!av.contains(2));
        assert!(av.contains(15));
        assert!(!av.contains(21));
        assert_eq!(av.min(), Some(1));
        assert_eq!(av.max(), Some(20));
    }

    #[test]
    fn test_allowed_values_hex_and_negative() {
        let av: AllowedValues = "-100..0x10".parse().unwrap();
        assert!(av.contains(-100));
        assert!(av.contains(16));
        assert!(!av.contains(17));
    }

    #[test]
    fn test_allowed_values_rejects_garbage() {
        assert!("".parse::<AllowedValues>().is_err());
        assert!("5..1".parse::<AllowedValues>().is_err());
        assert!("a..b".parse::<AllowedValues>().is_err());
    }
}
