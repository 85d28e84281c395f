// crates/profinet-rs/src/transcoder.rs

//! Moves values between parameter record buffers and named fields.
//!
//! `decode` reads a buffer into a map of field name to value. `encode` applies
//! a set of changes on top of a baseline buffer and returns the new record.
//! Encoding is all-or-nothing: the baseline is only borrowed, and the working
//! copy is dropped on the first error.

use crate::codec;
use crate::error::{CodecError, EncodeFailure, ParamError, ParamResult};
use crate::hal::RecordAccess;
use crate::schema::{FieldDescriptor, ParameterBlock};
use crate::types::{DataType, parse_integer};
use crate::value::ParameterValue;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::{debug, trace, warn};

/// Reads one field with the codec accessor for its data type.
pub(crate) fn read_field(buf: &[u8], field: &FieldDescriptor) -> Result<ParameterValue, CodecError> {
    let offset = field.byte_offset;
    let bit_offset = field.bit_offset.unwrap_or(0);
    let value = match field.data_type {
        DataType::Bit => ParameterValue::Bit(codec::get_bit(buf, offset, bit_offset)?),
        DataType::BitArea => ParameterValue::BitArea(codec::get_bit_area(
            buf,
            offset,
            bit_offset,
            field.bit_length.unwrap_or(8),
        )?),
        DataType::Unsigned8 => ParameterValue::UInt8(codec::get_u8(buf, offset)?),
        DataType::Unsigned16 => ParameterValue::UInt16(codec::get_u16(buf, offset)?),
        DataType::Integer16 => ParameterValue::Int16(codec::get_i16(buf, offset)?),
        DataType::Integer32 => ParameterValue::Int32(codec::get_i32(buf, offset)?),
        DataType::VisibleString => ParameterValue::Text(codec::get_string(
            buf,
            offset,
            field.string_length.unwrap_or(0),
        )?),
    };
    Ok(value)
}

/// Writes `value` into the field, narrowing numbers to the field's type.
///
/// Unlike `codec::set_string`, an overlong string is refused here.
pub(crate) fn write_field(
    buf: &mut [u8],
    field: &FieldDescriptor,
    value: &ParameterValue,
) -> Result<(), EncodeFailure> {
    let expected = field.data_type.as_str();
    let offset = field.byte_offset;

    if field.data_type == DataType::VisibleString {
        let ParameterValue::Text(s) = value else {
            return Err(EncodeFailure::TypeMismatch { expected });
        };
        let max = field.string_length.unwrap_or(0);
        if s.len() > max {
            return Err(EncodeFailure::StringTooLong {
                length: s.len(),
                max,
            });
        }
        codec::set_string(buf, offset, max, s)?;
        return Ok(());
    }

    let narrowed = value
        .as_i64()
        .and_then(|v| ParameterValue::from_i64(field.data_type, v))
        .ok_or(EncodeFailure::TypeMismatch { expected })?;

    let bit_offset = field.bit_offset.unwrap_or(0);
    match narrowed {
        ParameterValue::Bit(b) => codec::set_bit(buf, offset, bit_offset, b)?,
        ParameterValue::BitArea(v) => {
            codec::set_bit_area(buf, offset, bit_offset, field.bit_length.unwrap_or(8), v)?
        }
        ParameterValue::UInt8(v) => codec::set_u8(buf, offset, v)?,
        ParameterValue::UInt16(v) => codec::set_u16(buf, offset, v)?,
        ParameterValue::Int16(v) => codec::set_i16(buf, offset, v)?,
        ParameterValue::Int32(v) => codec::set_i32(buf, offset, v)?,
        ParameterValue::Text(_) => return Err(EncodeFailure::TypeMismatch { expected }),
    }
    Ok(())
}

fn check_length(block: &ParameterBlock, buffer: &[u8]) -> ParamResult<()> {
    if buffer.len() < block.length() {
        return Err(ParamError::InsufficientData {
            required: block.length(),
            actual: buffer.len(),
        });
    }
    Ok(())
}

/// Reported in place of a field the codec cannot read.
pub const UNREADABLE: &str = "<unreadable>";

fn unreadable() -> ParameterValue {
    ParameterValue::Text(UNREADABLE.to_string())
}

/// Decodes the fields of `block` from `buffer`.
///
/// With `requested`, only the named fields are returned; any name the block
/// does not define fails the whole call before anything is decoded. A value
/// whose raw form matches an entry of the field's value mapping is returned
/// as `Text` holding the display text.
///
/// Every selected field is present in the result. Non-ASCII bytes in a
/// string are replaced with U+FFFD, and a field the codec cannot read at all
/// is reported as [`UNREADABLE`].
pub fn decode(
    block: &ParameterBlock,
    buffer: &[u8],
    requested: Option<&BTreeSet<String>>,
) -> ParamResult<BTreeMap<String, ParameterValue>> {
    check_length(block, buffer)?;

    if let Some(names) = requested {
        if let Some(unknown) = names.iter().find(|n| !block.contains(n)) {
            return Err(ParamError::FieldNotFound(unknown.clone()));
        }
    }

    let mut result = BTreeMap::new();
    for field in block.fields() {
        if requested.is_some_and(|names| !names.contains(&field.name)) {
            continue;
        }

        let raw = match read_field(buffer, field) {
            Ok(v) => v,
            Err(CodecError::NonAscii) => {
                warn!(
                    "Record {}: field '{}' holds non-ASCII bytes",
                    block.record_index(),
                    field.name
                );
                codec::get_string_lossy(
                    buffer,
                    field.byte_offset,
                    field.string_length.unwrap_or(0),
                )
                .map_or_else(|_| unreadable(), ParameterValue::Text)
            }
            Err(e) => {
                warn!(
                    "Record {}: field '{}' is unreadable: {}",
                    block.record_index(),
                    field.name,
                    e
                );
                unreadable()
            }
        };

        let value = match &field.value_mapping {
            Some(mapping) => match mapping.display_for(&raw.raw_string()) {
                Some(text) => ParameterValue::Text(text.to_string()),
                None => raw,
            },
            None => raw,
        };

        trace!("Decoded '{}' = {}", field.name, value);
        result.insert(field.name.clone(), value);
    }
    Ok(result)
}

/// Turns a caller value into the typed value to write, applying the value
/// mapping and the allowed-values check.
fn resolve_value(field: &FieldDescriptor, value: &ParameterValue) -> ParamResult<ParameterValue> {
    let encode_err = |reason| ParamError::Encode {
        field: field.name.clone(),
        reason,
    };

    let text = match (value, &field.value_mapping) {
        (ParameterValue::Text(display), Some(mapping)) => Some(
            mapping
                .code_for(display)
                .ok_or_else(|| ParamError::InvalidSymbol {
                    field: field.name.clone(),
                    symbol: display.clone(),
                })?,
        ),
        (ParameterValue::Text(s), None) => Some(s.as_str()),
        _ => None,
    };

    let number = match text {
        Some(s) if field.data_type.is_numeric() => Some(
            parse_integer(s).ok_or_else(|| encode_err(EncodeFailure::NotNumeric(s.to_string())))?,
        ),
        Some(s) => return Ok(ParameterValue::Text(s.to_string())),
        None => value.as_i64(),
    };

    let Some(v) = number else {
        return Ok(value.clone());
    };

    // Range is checked before narrowing to the field width.
    if let Some(allowed) = &field.allowed_values {
        if !allowed.contains(v) {
            return Err(ParamError::RangeViolation {
                field: field.name.clone(),
                value: v,
            });
        }
    }
    ParameterValue::from_i64(field.data_type, v).ok_or_else(|| {
        encode_err(EncodeFailure::TypeMismatch {
            expected: field.data_type.as_str(),
        })
    })
}

/// Applies `values` on top of `baseline` and returns the resulting record.
///
/// The returned buffer has the baseline's length. Fields marked as not
/// changeable are refused with `ReadOnly`. On error nothing is returned and
/// the baseline is untouched.
pub fn encode(
    block: &ParameterBlock,
    baseline: &[u8],
    values: &BTreeMap<String, ParameterValue>,
) -> ParamResult<Vec<u8>> {
    if values.is_empty() {
        return Err(ParamError::EmptyInput);
    }
    check_length(block, baseline)?;

    let mut working = baseline.to_vec();
    for (name, value) in values {
        let field = block
            .field(name)
            .ok_or_else(|| ParamError::FieldNotFound(name.clone()))?;
        if !field.changeable {
            return Err(ParamError::ReadOnly(name.clone()));
        }
        let resolved = resolve_value(field, value)?;
        write_field(&mut working, field, &resolved).map_err(|reason| ParamError::Encode {
            field: name.clone(),
            reason,
        })?;
        trace!("Encoded '{}' = {}", name, resolved);
    }

    debug!(
        "Record {}: encoded {} value(s)",
        block.record_index(),
        values.len()
    );
    Ok(working)
}

/// A parameter block paired with the transcoding operations on it.
#[derive(Debug, Clone, Copy)]
pub struct ParameterTranscoder<'a> {
    block: &'a ParameterBlock,
}

impl<'a> ParameterTranscoder<'a> {
    pub fn new(block: &'a ParameterBlock) -> Self {
        Self { block }
    }

    pub fn block(&self) -> &'a ParameterBlock {
        self.block
    }

    pub fn field(&self, name: &str) -> Option<&'a FieldDescriptor> {
        self.block.field(name)
    }

    pub fn decode_all(&self, buffer: &[u8]) -> ParamResult<BTreeMap<String, ParameterValue>> {
        decode(self.block, buffer, None)
    }

    /// Decodes only `names`.
    pub fn decode(
        &self,
        buffer: &[u8],
        names: &[&str],
    ) -> ParamResult<BTreeMap<String, ParameterValue>> {
        let requested: BTreeSet<String> = names.iter().map(|n| n.to_string()).collect();
        decode(self.block, buffer, Some(&requested))
    }

    pub fn encode(
        &self,
        baseline: &[u8],
        values: &BTreeMap<String, ParameterValue>,
    ) -> ParamResult<Vec<u8>> {
        encode(self.block, baseline, values)
    }

    /// Every field decoded from the block's default record.
    pub fn default_values(&self) -> ParamResult<BTreeMap<String, ParameterValue>> {
        self.decode_all(&self.block.default_buffer())
    }
}

/// Reads the record of `block` from the device and decodes it.
pub fn read_parameters<A: RecordAccess + ?Sized>(
    access: &mut A,
    block: &ParameterBlock,
    requested: Option<&BTreeSet<String>>,
) -> ParamResult<BTreeMap<String, ParameterValue>> {
    let buffer = access.read_record(block.record_index(), 0, block.length())?;
    decode(block, &buffer, requested)
}

/// Reads the current record, applies `values` and writes the result back.
///
/// Returns the record as written.
pub fn write_parameters<A: RecordAccess + ?Sized>(
    access: &mut A,
    block: &ParameterBlock,
    values: &BTreeMap<String, ParameterValue>,
) -> ParamResult<Vec<u8>> {
    let baseline = access.read_record(block.record_index(), 0, block.length())?;
    let encoded = encode(block, &baseline, values)?;
    access.write_record(block.record_index(), 0, &encoded)?;
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Assignment, ValueMapping};
    use crate::types::AllowedValues;
    use alloc::vec;

    fn mode_mapping() -> ValueMapping {
        ValueMapping::new(&[
            Assignment {
                raw_code: "0".into(),
                display_text: "off".into(),
            },
            Assignment {
                raw_code: "1".into(),
                display_text: "slow".into(),
            },
            Assignment {
                raw_code: "5".into(),
                display_text: "fast".into(),
            },
        ])
    }

    fn block() -> ParameterBlock {
        ParameterBlock::new(
            200,
            12,
            vec![
                FieldDescriptor::new("Enable", DataType::Bit, 0).with_bit_offset(0),
                FieldDescriptor::new("Mode", DataType::BitArea, 0)
                    .with_bit_offset(2)
                    .with_bit_length(3)
                    .with_value_mapping("VI_Mode", mode_mapping()),
                FieldDescriptor::new("Limit", DataType::Unsigned16, 1)
                    .with_allowed_values(AllowedValues::range(0, 1000)),
                FieldDescriptor::new("Offset", DataType::Integer16, 3),
                FieldDescriptor::new("Counter", DataType::Integer32, 5),
                FieldDescriptor::new("Tag", DataType::VisibleString, 9).with_string_length(3),
            ],
        )
        .unwrap()
    }

    fn sample() -> Vec<u8> {
        vec![
            0b0001_0101, 0x01, 0xF4, 0xFF, 0xFE, 0x00, 0x00, 0x01, 0x00, b'A', b'B', 0x00,
        ]
    }

    fn values(pairs: &[(&str, ParameterValue)]) -> BTreeMap<String, ParameterValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_decode_all_fields() {
        let decoded = decode(&block(), &sample(), None).unwrap();
        assert_eq!(decoded.len(), 6);
        assert_eq!(decoded["Enable"], ParameterValue::Bit(true));
        assert_eq!(decoded["Mode"], ParameterValue::Text("fast".into()));
        assert_eq!(decoded["Limit"], ParameterValue::UInt16(500));
        assert_eq!(decoded["Offset"], ParameterValue::Int16(-2));
        assert_eq!(decoded["Counter"], ParameterValue::Int32(256));
        assert_eq!(decoded["Tag"], ParameterValue::Text("AB".into()));
    }

    #[test]
    fn test_decode_unmapped_raw_value_stays_numeric() {
        let mut buf = sample();
        // Mode = 3 has no assignment.
        buf[0] = 0b0000_1100;
        let decoded = decode(&block(), &buf, None).unwrap();
        assert_eq!(decoded["Mode"], ParameterValue::BitArea(3));
    }

    #[test]
    fn test_decode_requested_subset() {
        let requested: BTreeSet<String> = ["Limit".to_string()].into_iter().collect();
        let decoded = decode(&block(), &sample(), Some(&requested)).unwrap();
        assert_eq!(decoded.len(), 1);
        assert!(decoded.contains_key("Limit"));
    }

    #[test]
    fn test_decode_unknown_requested_field() {
        let requested: BTreeSet<String> = ["Limit".to_string(), "NoSuchField".to_string()]
            .into_iter()
            .collect();
        assert_eq!(
            decode(&block(), &sample(), Some(&requested)),
            Err(ParamError::FieldNotFound("NoSuchField".into()))
        );
    }

    #[test]
    fn test_decode_short_buffer() {
        assert_eq!(
            decode(&block(), &[0u8; 11], None),
            Err(ParamError::InsufficientData {
                required: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn test_encode_short_baseline() {
        assert_eq!(
            encode(
                &block(),
                &[0u8; 11],
                &values(&[("Limit", ParameterValue::UInt16(1))])
            ),
            Err(ParamError::InsufficientData {
                required: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn test_decode_non_ascii_string_keeps_field() {
        let block = ParameterBlock::new(
            30,
            4,
            vec![
                FieldDescriptor::new("Tag", DataType::VisibleString, 0).with_string_length(3),
                FieldDescriptor::new("Level", DataType::Unsigned8, 3),
            ],
        )
        .unwrap();
        let requested: BTreeSet<String> = ["Tag".to_string()].into_iter().collect();
        let decoded = decode(&block, &[b'A', 0xB0, b'C', 7], Some(&requested)).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded["Tag"], ParameterValue::Text("A\u{FFFD}C".into()));
    }

    #[test]
    fn test_encode_refuses_read_only_field() {
        let block = ParameterBlock::new(
            31,
            2,
            vec![
                FieldDescriptor::new("Scale", DataType::Unsigned8, 0).with_access(false, true),
                FieldDescriptor::new("Level", DataType::Unsigned8, 1),
            ],
        )
        .unwrap();
        let baseline = [1u8, 2];
        assert_eq!(
            encode(
                &block,
                &baseline,
                &values(&[
                    ("Level", ParameterValue::UInt8(5)),
                    ("Scale", ParameterValue::UInt8(9)),
                ])
            ),
            Err(ParamError::ReadOnly("Scale".into()))
        );
        assert_eq!(baseline, [1, 2]);
    }

    #[test]
    fn test_encode_symbolic_value() {
        let baseline = sample();
        let encoded = encode(
            &block(),
            &baseline,
            &values(&[("Mode", ParameterValue::Text("slow".into()))]),
        )
        .unwrap();
        assert_eq!(encoded[0], 0b0000_0101);
        assert_eq!(&encoded[1..], &baseline[1..]);
    }

    #[test]
    fn test_encode_unknown_symbol() {
        let result = encode(
            &block(),
            &sample(),
            &values(&[("Mode", ParameterValue::Text("medium".into()))]),
        );
        assert_eq!(
            result,
            Err(ParamError::InvalidSymbol {
                field: "Mode".into(),
                symbol: "medium".into()
            })
        );
    }

    #[test]
    fn test_encode_numeric_text_without_mapping() {
        let encoded = encode(
            &block(),
            &sample(),
            &values(&[("Limit", ParameterValue::Text("750".into()))]),
        )
        .unwrap();
        assert_eq!(&encoded[1..3], &[0x02, 0xEE]);

        let result = encode(
            &block(),
            &sample(),
            &values(&[("Limit", ParameterValue::Text("lots".into()))]),
        );
        assert!(matches!(
            result,
            Err(ParamError::Encode {
                reason: EncodeFailure::NotNumeric(_),
                ..
            })
        ));
    }

    #[test]
    fn test_encode_range_violation() {
        let baseline = sample();
        let result = encode(
            &block(),
            &baseline,
            &values(&[("Limit", ParameterValue::Int32(1001))]),
        );
        assert_eq!(
            result,
            Err(ParamError::RangeViolation {
                field: "Limit".into(),
                value: 1001
            })
        );
        assert_eq!(baseline, sample());
    }

    #[test]
    fn test_encode_narrowing_failure() {
        let result = encode(
            &block(),
            &sample(),
            &values(&[("Offset", ParameterValue::Int32(40000))]),
        );
        assert_eq!(
            result,
            Err(ParamError::Encode {
                field: "Offset".into(),
                reason: EncodeFailure::TypeMismatch {
                    expected: "Integer16"
                }
            })
        );
    }

    #[test]
    fn test_encode_rejects_overlong_string() {
        let result = encode(
            &block(),
            &sample(),
            &values(&[("Tag", ParameterValue::Text("ABCD".into()))]),
        );
        assert_eq!(
            result,
            Err(ParamError::Encode {
                field: "Tag".into(),
                reason: EncodeFailure::StringTooLong { length: 4, max: 3 }
            })
        );
    }

    #[test]
    fn test_encode_string_type_mismatch() {
        let result = encode(
            &block(),
            &sample(),
            &values(&[("Tag", ParameterValue::UInt8(1))]),
        );
        assert!(matches!(
            result,
            Err(ParamError::Encode {
                reason: EncodeFailure::TypeMismatch { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_encode_empty_and_unknown() {
        assert_eq!(
            encode(&block(), &sample(), &BTreeMap::new()),
            Err(ParamError::EmptyInput)
        );
        assert_eq!(
            encode(
                &block(),
                &sample(),
                &values(&[("Ghost", ParameterValue::UInt8(1))])
            ),
            Err(ParamError::FieldNotFound("Ghost".into()))
        );
    }

    #[test]
    fn test_transcoder_default_values() {
        let block = ParameterBlock::new(
            10,
            3,
            vec![
                FieldDescriptor::new("Level", DataType::Unsigned8, 0).with_default("7"),
                FieldDescriptor::new("Time", DataType::Unsigned16, 1).with_default("0x0100"),
            ],
        )
        .unwrap();
        let transcoder = ParameterTranscoder::new(&block);
        let defaults = transcoder.default_values().unwrap();
        assert_eq!(defaults["Level"], ParameterValue::UInt8(7));
        assert_eq!(defaults["Time"], ParameterValue::UInt16(256));
        assert_eq!(
            transcoder.decode(&[1, 0, 2], &["Time"]).unwrap()["Time"],
            ParameterValue::UInt16(2)
        );
    }

    struct MockDevice {
        records: BTreeMap<u16, Vec<u8>>,
        writes: usize,
    }

    impl RecordAccess for MockDevice {
        fn read_record(
            &mut self,
            record_index: u16,
            byte_offset: usize,
            length: usize,
        ) -> Result<Vec<u8>, ParamError> {
            let record = self
                .records
                .get(&record_index)
                .ok_or(ParamError::Store("no such record"))?;
            Ok(record[byte_offset..byte_offset + length].to_vec())
        }

        fn write_record(
            &mut self,
            record_index: u16,
            byte_offset: usize,
            data: &[u8],
        ) -> Result<(), ParamError> {
            let record = self
                .records
                .get_mut(&record_index)
                .ok_or(ParamError::Store("no such record"))?;
            record[byte_offset..byte_offset + data.len()].copy_from_slice(data);
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_read_write_through_record_access() {
        let mut device = MockDevice {
            records: [(200u16, sample())].into_iter().collect(),
            writes: 0,
        };
        let block = block();

        write_parameters(
            &mut device,
            &block,
            &values(&[("Counter", ParameterValue::Int32(-1))]),
        )
        .unwrap();
        assert_eq!(device.writes, 1);

        let decoded = read_parameters(&mut device, &block, None).unwrap();
        assert_eq!(decoded["Counter"], ParameterValue::Int32(-1));
        assert_eq!(decoded["Limit"], ParameterValue::UInt16(500));
    }

    #[test]
    fn test_failed_write_does_not_reach_device() {
        let mut device = MockDevice {
            records: [(200u16, sample())].into_iter().collect(),
            writes: 0,
        };
        let result = write_parameters(
            &mut device,
            &block(),
            &values(&[("Limit", ParameterValue::UInt16(5000))]),
        );
        assert!(result.is_err());
        assert_eq!(device.writes, 0);
        assert_eq!(device.records[&200], sample());
    }
}
