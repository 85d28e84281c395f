//! Internal `serde` data structures that map directly to the GSDML XML schema.
//!
//! Only the part of `GSDML-DeviceProfile` that describes identity, modules,
//! parameter records, value lists and texts is modelled. Everything else in
//! the document is skipped by the deserializer. These structs are not part of
//! the public API; the resolver turns them into the `profinet-rs` schema model.

#![allow(clippy::pedantic)] // XML schema naming conventions differ from Rust

use serde::Deserialize;

pub mod common;
pub mod identity;
pub mod module;
pub mod record;
pub mod safety;

pub use common::{ExternalTextList, ValueList};
pub use identity::DeviceIdentity;
pub use module::{DeviceAccessPointList, ModuleList, SubmoduleList};

/// The root `<ISO15745Profile>` element of a GSDML file.
#[derive(Debug, Deserialize, Default)]
#[serde(rename = "ISO15745Profile")]
pub struct Iso15745Profile {
    #[serde(rename = "ProfileBody", default)]
    pub profile_body: Option<ProfileBody>,
}

/// `<ProfileBody>`: identity plus the application process.
#[derive(Debug, Deserialize, Default)]
pub struct ProfileBody {
    #[serde(rename = "DeviceIdentity", default)]
    pub device_identity: Option<DeviceIdentity>,

    #[serde(rename = "ApplicationProcess", default)]
    pub application_process: Option<ApplicationProcess>,
}

/// `<ApplicationProcess>`: every list the parameter engine reads.
#[derive(Debug, Deserialize, Default)]
pub struct ApplicationProcess {
    #[serde(rename = "DeviceAccessPointList", default)]
    pub device_access_point_list: Option<DeviceAccessPointList>,

    #[serde(rename = "ModuleList", default)]
    pub module_list: Option<ModuleList>,

    #[serde(rename = "SubmoduleList", default)]
    pub submodule_list: Option<SubmoduleList>,

    #[serde(rename = "ValueList", default)]
    pub value_list: Option<ValueList>,

    #[serde(rename = "ExternalTextList", default)]
    pub external_text_list: Option<ExternalTextList>,
}
