// crates/profinet-rs-gsdml/src/resolver/safety.rs

//! Compiles `<F_ParameterRecordDataItem>` into a `SafetyParameterBlock`.

use super::utils::{parse_bool, parse_number, require};
use crate::model::safety::{FParameter, FParameterRecordDataItem};
use log::debug;
use profinet_rs::schema::{SafetyAttribute, SafetyAttributeName, SafetyParameterBlock};
use profinet_rs::{AllowedValues, SchemaError};

/// PROFIsafe defaults for attributes the document may omit.
const DEFAULT_F_SIL: &str = "SIL3";
const DEFAULT_F_CRC_LENGTH: &str = "3-Byte-CRC";
const DEFAULT_F_BLOCK_ID: &str = "0";
const DEFAULT_F_PAR_VERSION: &str = "1";

fn resolve_attribute(
    name: SafetyAttributeName,
    p: &FParameter,
    fallback: Option<&str>,
) -> Result<SafetyAttribute, SchemaError> {
    let default_value = match (p.default_value.as_deref(), fallback) {
        (Some(v), _) if !v.is_empty() => v,
        (_, Some(fallback)) => fallback,
        _ => {
            return Err(SchemaError::MissingAttribute {
                element: name.as_str(),
                attribute: "DefaultValue",
                id: "".into(),
            });
        }
    };

    let mut attribute = SafetyAttribute::new(default_value);
    attribute.changeable = parse_bool("Changeable", p.changeable.as_ref(), name.is_writable())?;
    attribute.visible = parse_bool("Visible", p.visible.as_ref(), true)?;

    // Symbolic attributes list names (`SIL1 SIL2`), not numbers.
    if !name.is_symbolic() {
        if let Some(allowed) = p.allowed_values.as_deref().filter(|s| !s.trim().is_empty()) {
            attribute = attribute.with_allowed_values(allowed.parse::<AllowedValues>()?);
        }
    }
    Ok(attribute)
}

fn mandatory(
    name: SafetyAttributeName,
    p: Option<&FParameter>,
) -> Result<SafetyAttribute, SchemaError> {
    let p = p.ok_or(SchemaError::MissingElement {
        element: name.as_str(),
    })?;
    resolve_attribute(name, p, None)
}

fn with_default(
    name: SafetyAttributeName,
    p: Option<&FParameter>,
    fallback: &'static str,
) -> Result<SafetyAttribute, SchemaError> {
    match p {
        Some(p) => resolve_attribute(name, p, Some(fallback)),
        None => {
            let mut attribute = SafetyAttribute::new(fallback);
            attribute.changeable = false;
            Ok(attribute)
        }
    }
}

fn optional(
    name: SafetyAttributeName,
    p: Option<&FParameter>,
) -> Result<Option<SafetyAttribute>, SchemaError> {
    p.map(|p| resolve_attribute(name, p, Some("0"))).transpose()
}

pub(super) fn resolve_safety_record(
    item: &FParameterRecordDataItem,
    module: &str,
) -> Result<SafetyParameterBlock, SchemaError> {
    use SafetyAttributeName as N;

    let record_index: u16 = parse_number(
        "Index",
        require(item.index.as_ref(), "F_ParameterRecordDataItem", "Index", module)?,
    )?;
    let desc_crc = match item.f_param_desc_crc.as_deref() {
        Some(s) if !s.trim().is_empty() => Some(parse_number::<u32>("F_ParamDescCRC", s)?),
        _ => None,
    };

    let block = SafetyParameterBlock {
        record_index,
        desc_crc,
        f_sil: with_default(N::FSil, item.f_sil.as_ref(), DEFAULT_F_SIL)?,
        f_crc_length: with_default(N::FCrcLength, item.f_crc_length.as_ref(), DEFAULT_F_CRC_LENGTH)?,
        f_block_id: with_default(N::FBlockId, item.f_block_id.as_ref(), DEFAULT_F_BLOCK_ID)?,
        f_par_version: with_default(N::FParVersion, item.f_par_version.as_ref(), DEFAULT_F_PAR_VERSION)?,
        f_source_add: mandatory(N::FSourceAdd, item.f_source_add.as_ref())?,
        f_dest_add: mandatory(N::FDestAdd, item.f_dest_add.as_ref())?,
        f_wd_time: mandatory(N::FWdTime, item.f_wd_time.as_ref())?,
        f_par_crc: mandatory(N::FParCrc, item.f_par_crc.as_ref())?,
        f_ipar_crc: optional(N::FIParCrc, item.f_ipar_crc.as_ref())?,
        f_check_ipar: optional(N::FCheckIPar, item.f_check_ipar.as_ref())?,
    };

    debug!("Module '{}': F-parameter record {}", module, record_index);
    Ok(block)
}
