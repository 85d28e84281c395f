// crates/profinet-rs-gsdml/src/model/identity.rs

//! Contains model structs related to `<DeviceIdentity>`.

use super::common::{TextRef, ValueAttr};
use alloc::string::String;
use serde::Deserialize;

/// `<DeviceIdentity VendorID="0x002A" DeviceID="0x0101">`.
#[derive(Debug, Deserialize, Default)]
pub struct DeviceIdentity {
    #[serde(rename = "@VendorID", default)]
    pub vendor_id: Option<String>,

    #[serde(rename = "@DeviceID", default)]
    pub device_id: Option<String>,

    #[serde(rename = "InfoText", default)]
    pub info_text: Option<TextRef>,

    #[serde(rename = "VendorName", default)]
    pub vendor_name: Option<ValueAttr>,
}
