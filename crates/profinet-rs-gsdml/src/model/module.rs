// crates/profinet-rs-gsdml/src/model/module.rs

//! Device access points, modules and submodules.

use super::common::{TextRef, ValueAttr};
use super::record::ParameterRecordDataItem;
use super::safety::FParameterRecordDataItem;
use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

/// `<ModuleInfo>`: display name, info text and order number.
#[derive(Debug, Deserialize, Default)]
pub struct ModuleInfo {
    #[serde(rename = "Name", default)]
    pub name: Option<TextRef>,
    #[serde(rename = "InfoText", default)]
    pub info_text: Option<TextRef>,
    #[serde(rename = "OrderNumber", default)]
    pub order_number: Option<ValueAttr>,
}

/// `<RecordDataList>` of a submodule.
#[derive(Debug, Deserialize, Default)]
pub struct RecordDataList {
    #[serde(rename = "ParameterRecordDataItem", default)]
    pub parameter_record_data_item: Vec<ParameterRecordDataItem>,
    #[serde(rename = "F_ParameterRecordDataItem", default)]
    pub f_parameter_record_data_item: Vec<FParameterRecordDataItem>,
}

#[derive(Debug, Deserialize, Default)]
pub struct VirtualSubmoduleItem {
    #[serde(rename = "@ID", default)]
    pub id: Option<String>,
    #[serde(rename = "RecordDataList", default)]
    pub record_data_list: Option<RecordDataList>,
}

#[derive(Debug, Deserialize, Default)]
pub struct VirtualSubmoduleList {
    #[serde(rename = "VirtualSubmoduleItem", default)]
    pub virtual_submodule_item: Vec<VirtualSubmoduleItem>,
}

/// `<SubmoduleItemRef SubmoduleItemTarget="..."/>` inside `<UseableSubmodules>`.
#[derive(Debug, Deserialize, Default)]
pub struct SubmoduleItemRef {
    #[serde(rename = "@SubmoduleItemTarget", default)]
    pub submodule_item_target: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UseableSubmodules {
    #[serde(rename = "SubmoduleItemRef", default)]
    pub submodule_item_ref: Vec<SubmoduleItemRef>,
}

/// Fields shared by `<DeviceAccessPointItem>` and `<ModuleItem>`.
#[derive(Debug, Deserialize, Default)]
pub struct ModuleItem {
    #[serde(rename = "@ID", default)]
    pub id: Option<String>,

    #[serde(rename = "@ModuleIdentNumber", default)]
    pub module_ident_number: Option<String>,

    #[serde(rename = "ModuleInfo", default)]
    pub module_info: Option<ModuleInfo>,

    #[serde(rename = "VirtualSubmoduleList", default)]
    pub virtual_submodule_list: Option<VirtualSubmoduleList>,

    #[serde(rename = "UseableSubmodules", default)]
    pub useable_submodules: Option<UseableSubmodules>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DeviceAccessPointList {
    #[serde(rename = "DeviceAccessPointItem", default)]
    pub device_access_point_item: Vec<ModuleItem>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ModuleList {
    #[serde(rename = "ModuleItem", default)]
    pub module_item: Vec<ModuleItem>,
}

/// `<SubmoduleList>`: pluggable submodules referenced from modules.
#[derive(Debug, Deserialize, Default)]
pub struct SubmoduleList {
    #[serde(rename = "SubmoduleItem", default)]
    pub submodule_item: Vec<VirtualSubmoduleItem>,
}
