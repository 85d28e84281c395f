// crates/profinet-rs-gsdml/src/resolver/record.rs

//! Compiles `<ParameterRecordDataItem>` elements into parameter blocks.

use super::utils::{parse_bool, parse_const_data, parse_number, parse_optional, require, text_or_id};
use crate::model::record::{Const, ParameterRecordDataItem, Ref};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::trace;
use profinet_rs::schema::{ConstData, FieldDescriptor, ParameterBlock, TextCatalog, ValueCatalog, ValueMapping};
use profinet_rs::{AllowedValues, DataType, SchemaError};

fn resolve_ref(
    r: &Ref,
    texts: &TextCatalog,
    values: &ValueCatalog,
    owner: &str,
) -> Result<FieldDescriptor, SchemaError> {
    let text_id = require(r.text_id.as_ref(), "Ref", "TextId", owner)?;
    let data_type: DataType = require(r.data_type.as_ref(), "Ref", "DataType", text_id)?.parse()?;
    let byte_offset: usize =
        parse_number("ByteOffset", require(r.byte_offset.as_ref(), "Ref", "ByteOffset", text_id)?)?;

    let mut field = FieldDescriptor::new(text_or_id(texts, text_id), data_type, byte_offset)
        .with_text_id(text_id)
        .with_access(
            parse_bool("Changeable", r.changeable.as_ref(), true)?,
            parse_bool("Visible", r.visible.as_ref(), true)?,
        );

    if let Some(bit_offset) = parse_optional::<u8>("BitOffset", r.bit_offset.as_ref())? {
        field = field.with_bit_offset(bit_offset);
    }
    match parse_optional::<u8>("BitLength", r.bit_length.as_ref())? {
        Some(bit_length) => field = field.with_bit_length(bit_length),
        None if data_type == DataType::BitArea => {
            return Err(SchemaError::MissingAttribute {
                element: "Ref",
                attribute: "BitLength",
                id: text_id.to_string(),
            });
        }
        None => {}
    }
    match parse_optional::<usize>("Length", r.length.as_ref())? {
        Some(length) => field = field.with_string_length(length),
        None if data_type == DataType::VisibleString => {
            return Err(SchemaError::MissingAttribute {
                element: "Ref",
                attribute: "Length",
                id: text_id.to_string(),
            });
        }
        None => {}
    }

    if let Some(default) = &r.default_value {
        field = field.with_default(default.as_str());
    }
    if let Some(allowed) = r.allowed_values.as_deref().filter(|s| !s.trim().is_empty()) {
        field = field.with_allowed_values(allowed.parse::<AllowedValues>()?);
    }
    if let Some(target) = r.value_item_target.as_deref().filter(|s| !s.is_empty()) {
        let assignments = values
            .resolve_value_item(target)
            .ok_or_else(|| SchemaError::UnknownValueItem(target.to_string()))?;
        field = field.with_value_mapping(target, ValueMapping::new(assignments));
    }

    trace!(
        "Field '{}' {} @ {}",
        field.name, field.data_type, field.byte_offset
    );
    Ok(field)
}

fn resolve_const(c: &Const, owner: &str) -> Result<ConstData, SchemaError> {
    let byte_offset = match c.byte_offset.as_deref() {
        Some(s) if !s.trim().is_empty() => parse_number("ByteOffset", s)?,
        _ => 0,
    };
    let data = parse_const_data(require(c.data.as_ref(), "Const", "Data", owner)?)?;
    Ok(ConstData { byte_offset, data })
}

/// Builds one parameter block. `module` is the owning module id, used in errors.
pub(super) fn resolve_record(
    item: &ParameterRecordDataItem,
    module: &str,
    texts: &TextCatalog,
    values: &ValueCatalog,
) -> Result<ParameterBlock, SchemaError> {
    let record_index: u16 = parse_number(
        "Index",
        require(item.index.as_ref(), "ParameterRecordDataItem", "Index", module)?,
    )?;
    let length: usize = parse_number(
        "Length",
        require(item.length.as_ref(), "ParameterRecordDataItem", "Length", module)?,
    )?;

    if item.refs.is_empty() {
        return Err(SchemaError::EmptyParameterBlock {
            module: module.to_string(),
            record_index,
        });
    }

    let fields = item
        .refs
        .iter()
        .map(|r| resolve_ref(r, texts, values, module))
        .collect::<Result<Vec<_>, _>>()?;
    let constants = item
        .constants
        .iter()
        .map(|c| resolve_const(c, module))
        .collect::<Result<Vec<_>, _>>()?;

    let mut block = ParameterBlock::new(record_index, length, fields)?.with_constants(constants)?;
    if let Some(name_id) = item.name.as_ref().and_then(|n| n.text_id.as_deref()) {
        let name: String = text_or_id(texts, name_id);
        block = block.with_name(name);
    }
    Ok(block)
}
