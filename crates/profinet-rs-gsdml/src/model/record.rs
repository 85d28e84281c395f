// crates/profinet-rs-gsdml/src/model/record.rs

//! `<ParameterRecordDataItem>` and its `<Const>` and `<Ref>` children.

use super::common::TextRef;
use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

/// `<Const ByteOffset="0" Data="0x00,0x01"/>`
#[derive(Debug, Deserialize, Default)]
pub struct Const {
    #[serde(rename = "@ByteOffset", default)]
    pub byte_offset: Option<String>,
    #[serde(rename = "@Data", default)]
    pub data: Option<String>,
}

/// `<Ref>`: one field of a parameter record. All attributes are kept as
/// strings; the resolver parses and validates them.
#[derive(Debug, Deserialize, Default)]
pub struct Ref {
    #[serde(rename = "@DataType", default)]
    pub data_type: Option<String>,
    #[serde(rename = "@ByteOffset", default)]
    pub byte_offset: Option<String>,
    #[serde(rename = "@BitOffset", default)]
    pub bit_offset: Option<String>,
    #[serde(rename = "@BitLength", default)]
    pub bit_length: Option<String>,
    #[serde(rename = "@Length", default)]
    pub length: Option<String>,
    #[serde(rename = "@DefaultValue", default)]
    pub default_value: Option<String>,
    #[serde(rename = "@AllowedValues", default)]
    pub allowed_values: Option<String>,
    #[serde(rename = "@ValueItemTarget", default)]
    pub value_item_target: Option<String>,
    #[serde(rename = "@TextId", default)]
    pub text_id: Option<String>,
    #[serde(rename = "@Changeable", default)]
    pub changeable: Option<String>,
    #[serde(rename = "@Visible", default)]
    pub visible: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ParameterRecordDataItem {
    #[serde(rename = "@Index", default)]
    pub index: Option<String>,
    #[serde(rename = "@Length", default)]
    pub length: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<TextRef>,
    #[serde(rename = "Const", default)]
    pub constants: Vec<Const>,
    #[serde(rename = "Ref", default)]
    pub refs: Vec<Ref>,
}
