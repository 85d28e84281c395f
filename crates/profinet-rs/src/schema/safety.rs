// crates/profinet-rs/src/schema/safety.rs

//! The fixed PROFIsafe F-parameter record of a module.

use crate::types::AllowedValues;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Names of the F-parameters a safety module exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SafetyAttributeName {
    FSil,
    FCrcLength,
    FBlockId,
    FParVersion,
    FSourceAdd,
    FDestAdd,
    FWdTime,
    FParCrc,
    FIParCrc,
    FCheckIPar,
}

impl SafetyAttributeName {
    /// Every attribute, in record order.
    pub const ALL: [SafetyAttributeName; 10] = [
        SafetyAttributeName::FSil,
        SafetyAttributeName::FCrcLength,
        SafetyAttributeName::FBlockId,
        SafetyAttributeName::FParVersion,
        SafetyAttributeName::FSourceAdd,
        SafetyAttributeName::FDestAdd,
        SafetyAttributeName::FWdTime,
        SafetyAttributeName::FParCrc,
        SafetyAttributeName::FIParCrc,
        SafetyAttributeName::FCheckIPar,
    ];

    /// The GSDML element name, e.g. `F_Source_Add`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyAttributeName::FSil => "F_SIL",
            SafetyAttributeName::FCrcLength => "F_CRC_Length",
            SafetyAttributeName::FBlockId => "F_Block_ID",
            SafetyAttributeName::FParVersion => "F_Par_Version",
            SafetyAttributeName::FSourceAdd => "F_Source_Add",
            SafetyAttributeName::FDestAdd => "F_Dest_Add",
            SafetyAttributeName::FWdTime => "F_WD_Time",
            SafetyAttributeName::FParCrc => "F_Par_CRC",
            SafetyAttributeName::FIParCrc => "F_iPar_CRC",
            SafetyAttributeName::FCheckIPar => "F_Check_iPar",
        }
    }

    /// Only the addresses, the watchdog time and the iPar CRC may be written.
    pub fn is_writable(&self) -> bool {
        matches!(
            self,
            SafetyAttributeName::FSourceAdd
                | SafetyAttributeName::FDestAdd
                | SafetyAttributeName::FWdTime
                | SafetyAttributeName::FIParCrc
        )
    }

    /// True for attributes whose value is a symbol (`SIL3`, `3-Byte-CRC`, ...).
    pub fn is_symbolic(&self) -> bool {
        matches!(
            self,
            SafetyAttributeName::FSil
                | SafetyAttributeName::FCrcLength
                | SafetyAttributeName::FCheckIPar
        )
    }
}

impl fmt::Display for SafetyAttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafetyAttributeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SafetyAttributeName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// One F-parameter as declared by the device description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyAttribute {
    pub default_value: String,
    pub allowed_values: Option<AllowedValues>,
    pub changeable: bool,
    pub visible: bool,
}

impl SafetyAttribute {
    pub fn new(default_value: impl Into<String>) -> Self {
        Self {
            default_value: default_value.into(),
            allowed_values: None,
            changeable: true,
            visible: true,
        }
    }

    pub fn with_allowed_values(mut self, allowed: AllowedValues) -> Self {
        self.allowed_values = Some(allowed);
        self
    }
}

/// The F-parameter record of a safety module (`F_ParameterRecordDataItem`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyParameterBlock {
    pub record_index: u16,
    /// CRC over the F-parameter description, if the document provides one.
    pub desc_crc: Option<u32>,
    pub f_sil: SafetyAttribute,
    pub f_crc_length: SafetyAttribute,
    pub f_block_id: SafetyAttribute,
    pub f_par_version: SafetyAttribute,
    pub f_source_add: SafetyAttribute,
    pub f_dest_add: SafetyAttribute,
    pub f_wd_time: SafetyAttribute,
    pub f_par_crc: SafetyAttribute,
    pub f_ipar_crc: Option<SafetyAttribute>,
    pub f_check_ipar: Option<SafetyAttribute>,
}

impl SafetyParameterBlock {
    /// The declaration of `name`, or `None` for an optional attribute the
    /// document omits.
    pub fn attribute(&self, name: SafetyAttributeName) -> Option<&SafetyAttribute> {
        match name {
            SafetyAttributeName::FSil => Some(&self.f_sil),
            SafetyAttributeName::FCrcLength => Some(&self.f_crc_length),
            SafetyAttributeName::FBlockId => Some(&self.f_block_id),
            SafetyAttributeName::FParVersion => Some(&self.f_par_version),
            SafetyAttributeName::FSourceAdd => Some(&self.f_source_add),
            SafetyAttributeName::FDestAdd => Some(&self.f_dest_add),
            SafetyAttributeName::FWdTime => Some(&self.f_wd_time),
            SafetyAttributeName::FParCrc => Some(&self.f_par_crc),
            SafetyAttributeName::FIParCrc => self.f_ipar_crc.as_ref(),
            SafetyAttributeName::FCheckIPar => self.f_check_ipar.as_ref(),
        }
    }

    /// Declared attributes in record order.
    pub fn attributes(&self) -> impl Iterator<Item = (SafetyAttributeName, &SafetyAttribute)> {
        SafetyAttributeName::ALL
            .iter()
            .filter_map(move |&name| self.attribute(name).map(|a| (name, a)))
    }
}
