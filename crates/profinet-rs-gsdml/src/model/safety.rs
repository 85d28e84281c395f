// crates/profinet-rs-gsdml/src/model/safety.rs

//! `<F_ParameterRecordDataItem>`: the PROFIsafe F-parameter record.

use alloc::string::String;
use serde::Deserialize;

/// One F-parameter element (`<F_SIL>`, `<F_WD_Time>`, ...). They all share
/// the same attribute set.
#[derive(Debug, Deserialize, Default)]
pub struct FParameter {
    #[serde(rename = "@DefaultValue", default)]
    pub default_value: Option<String>,
    #[serde(rename = "@AllowedValues", default)]
    pub allowed_values: Option<String>,
    #[serde(rename = "@Changeable", default)]
    pub changeable: Option<String>,
    #[serde(rename = "@Visible", default)]
    pub visible: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FParameterRecordDataItem {
    #[serde(rename = "@Index", default)]
    pub index: Option<String>,
    #[serde(rename = "@F_ParamDescCRC", default)]
    pub f_param_desc_crc: Option<String>,

    #[serde(rename = "F_Check_iPar", default)]
    pub f_check_ipar: Option<FParameter>,
    #[serde(rename = "F_SIL", default)]
    pub f_sil: Option<FParameter>,
    #[serde(rename = "F_CRC_Length", default)]
    pub f_crc_length: Option<FParameter>,
    #[serde(rename = "F_Block_ID", default)]
    pub f_block_id: Option<FParameter>,
    #[serde(rename = "F_Par_Version", default)]
    pub f_par_version: Option<FParameter>,
    #[serde(rename = "F_Source_Add", default)]
    pub f_source_add: Option<FParameter>,
    #[serde(rename = "F_Dest_Add", default)]
    pub f_dest_add: Option<FParameter>,
    #[serde(rename = "F_WD_Time", default)]
    pub f_wd_time: Option<FParameter>,
    #[serde(rename = "F_iPar_CRC", default)]
    pub f_ipar_crc: Option<FParameter>,
    #[serde(rename = "F_Par_CRC", default)]
    pub f_par_crc: Option<FParameter>,
}
