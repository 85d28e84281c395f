// crates/profinet-rs/src/schema/block.rs

use super::catalog::ValueMapping;
use crate::codec;
use crate::error::SchemaError;
use crate::transcoder;
use crate::types::{AllowedValues, DataType};
use crate::value::ParameterValue;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use log::{trace, warn};

/// Describes one named field inside a parameter record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Display name, unique within its block.
    pub name: String,
    /// The text id the name was resolved from.
    pub text_id: String,
    pub data_type: DataType,
    pub byte_offset: usize,
    /// Bit position for Bit and BitArea fields (0 = LSB).
    pub bit_offset: Option<u8>,
    /// Number of bits of a BitArea field.
    pub bit_length: Option<u8>,
    /// Byte length of a VisibleString field.
    pub string_length: Option<usize>,
    /// Raw textual default, as written in the device description.
    pub default_value: String,
    pub allowed_values: Option<AllowedValues>,
    /// Id of the value item the mapping was resolved from.
    pub value_item: Option<String>,
    pub value_mapping: Option<ValueMapping>,
    pub changeable: bool,
    pub visible: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, data_type: DataType, byte_offset: usize) -> Self {
        let name = name.into();
        Self {
            text_id: name.clone(),
            name,
            data_type,
            byte_offset,
            bit_offset: None,
            bit_length: None,
            string_length: None,
            default_value: String::new(),
            allowed_values: None,
            value_item: None,
            value_mapping: None,
            changeable: true,
            visible: true,
        }
    }

    pub fn with_text_id(mut self, text_id: impl Into<String>) -> Self {
        self.text_id = text_id.into();
        self
    }

    pub fn with_bit_offset(mut self, bit_offset: u8) -> Self {
        self.bit_offset = Some(bit_offset);
        self
    }

    pub fn with_bit_length(mut self, bit_length: u8) -> Self {
        self.bit_length = Some(bit_length);
        self
    }

    pub fn with_string_length(mut self, length: usize) -> Self {
        self.string_length = Some(length);
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    pub fn with_allowed_values(mut self, allowed: AllowedValues) -> Self {
        self.allowed_values = Some(allowed);
        self
    }

    pub fn with_value_mapping(mut self, value_item: impl Into<String>, mapping: ValueMapping) -> Self {
        self.value_item = Some(value_item.into());
        self.value_mapping = Some(mapping);
        self
    }

    pub fn with_access(mut self, changeable: bool, visible: bool) -> Self {
        self.changeable = changeable;
        self.visible = visible;
        self
    }

    /// Bytes occupied by the field. Zero for a VisibleString without a length.
    pub fn width(&self) -> usize {
        codec::field_width(self.data_type, self.string_length).unwrap_or(0)
    }

    /// The typed default value, or `None` when the default is empty or unparsable.
    pub fn default_typed(&self) -> Option<ParameterValue> {
        if self.default_value.is_empty() && self.data_type.is_numeric() {
            return None;
        }
        ParameterValue::parse(self.data_type, &self.default_value)
    }

    /// Checks that the optional attributes match the data type and that the
    /// field lies within a record of `record_length` bytes.
    pub fn validate(&self, record_index: u16, record_length: usize) -> Result<(), SchemaError> {
        let shape = |reason: &'static str| SchemaError::InvalidFieldShape {
            field: self.name.clone(),
            reason,
        };

        match self.data_type {
            DataType::Bit => {
                if self.bit_offset.unwrap_or(0) > 7 {
                    return Err(shape("BitOffset must be within 0..=7"));
                }
            }
            DataType::BitArea => {
                let offset = self.bit_offset.unwrap_or(0);
                let length = self
                    .bit_length
                    .ok_or_else(|| shape("BitArea requires BitLength"))?;
                if offset > 7 {
                    return Err(shape("BitOffset must be within 0..=7"));
                }
                if length == 0 || length > 8 {
                    return Err(shape("BitLength must be within 1..=8"));
                }
                if offset + length > 8 {
                    return Err(shape("BitOffset + BitLength exceeds 8"));
                }
            }
            DataType::VisibleString => match self.string_length {
                Some(0) | None => return Err(shape("VisibleString requires a non-zero Length")),
                Some(_) => {}
            },
            DataType::Unsigned8 | DataType::Unsigned16 | DataType::Integer16 | DataType::Integer32 => {}
        }

        let end = self.byte_offset.checked_add(self.width());
        if end.is_none_or(|end| end > record_length) {
            return Err(SchemaError::FieldOutOfRange {
                field: self.name.clone(),
                record_index,
            });
        }

        let default_fits = match (self.default_typed(), self.bit_length) {
            (Some(ParameterValue::BitArea(v)), Some(len)) => u16::from(v) < (1u16 << len),
            (Some(_), _) => true,
            (None, _) => self.default_value.is_empty(),
        };
        if !default_fits {
            return Err(SchemaError::InvalidAttributeFormat {
                attribute: "DefaultValue",
                value: self.default_value.clone(),
            });
        }

        Ok(())
    }
}

/// Constant bytes the device description places into a record (`Const` element).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstData {
    pub byte_offset: usize,
    pub data: Vec<u8>,
}

/// A parameter record: its index, declared length and field layout.
///
/// Built once per record by the loader and read-only afterwards. Field names
/// are unique; lookups by name go through an index built at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBlock {
    record_index: u16,
    name: Option<String>,
    length: usize,
    fields: Vec<FieldDescriptor>,
    constants: Vec<ConstData>,
    by_name: BTreeMap<String, usize>,
}

impl ParameterBlock {
    /// Validates the fields against `length` and builds the name index.
    ///
    /// A field whose name is already taken gets a `_1`, `_2`, … suffix.
    pub fn new(
        record_index: u16,
        length: usize,
        mut fields: Vec<FieldDescriptor>,
    ) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::EmptyParameterBlock {
                module: String::new(),
                record_index,
            });
        }

        let mut by_name = BTreeMap::new();
        for (i, field) in fields.iter_mut().enumerate() {
            if by_name.contains_key(&field.name) {
                let base = field.name.clone();
                let mut n = 1usize;
                let unique = loop {
                    let candidate = format!("{}_{}", base, n);
                    if !by_name.contains_key(&candidate) {
                        break candidate;
                    }
                    n += 1;
                };
                warn!(
                    "Record {}: duplicate field name '{}' renamed to '{}'",
                    record_index, base, unique
                );
                field.name = unique;
            }
            field.validate(record_index, length)?;
            by_name.insert(field.name.clone(), i);
        }

        trace!("Record {}: {} field(s) over {} byte(s)", record_index, fields.len(), length);

        Ok(Self {
            record_index,
            name: None,
            length,
            fields,
            constants: Vec::new(),
            by_name,
        })
    }

    /// Attaches the record's display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches constant data, checking that it lies inside the record.
    pub fn with_constants(mut self, constants: Vec<ConstData>) -> Result<Self, SchemaError> {
        for c in &constants {
            let end = c.byte_offset.checked_add(c.data.len());
            if end.is_none_or(|end| end > self.length) {
                return Err(SchemaError::FieldOutOfRange {
                    field: format!("Const@{}", c.byte_offset),
                    record_index: self.record_index,
                });
            }
        }
        self.constants = constants;
        Ok(self)
    }

    pub fn record_index(&self) -> u16 {
        self.record_index
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared record length in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Fields in document order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn constants(&self) -> &[ConstData] {
        &self.constants
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The record as the device description initialises it: constant data
    /// first, then every field's default value.
    pub fn default_buffer(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.length];
        for c in &self.constants {
            buf[c.byte_offset..c.byte_offset + c.data.len()].copy_from_slice(&c.data);
        }
        for field in &self.fields {
            if let Some(value) = field.default_typed() {
                if let Err(e) = transcoder::write_field(&mut buf, field, &value) {
                    warn!(
                        "Record {}: default of '{}' not applied: {}",
                        self.record_index, field.name, e
                    );
                }
            }
        }
        buf
    }
}
