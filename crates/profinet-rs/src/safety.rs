// crates/profinet-rs/src/safety.rs

//! Get/set access to the PROFIsafe F-parameters of a safety module.
//!
//! F-parameters do not go through the generic transcoder. Their names are
//! fixed, only a few of them are writable, and their values live in an
//! external `SafetyAttributeStore` rather than in a record buffer.

use crate::error::{EncodeFailure, ParamError, ParamResult};
use crate::hal::SafetyAttributeStore;
use crate::schema::{ModuleDescriptor, SafetyAttribute, SafetyAttributeName, SafetyParameterBlock};
use crate::types::{
    AllowedValues, F_ADDRESS_MAX, F_ADDRESS_MIN, F_WD_TIME_MAX, F_WD_TIME_MIN, parse_integer,
};
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use log::{debug, trace};

/// The value of one F-parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyValue {
    Unsigned(u32),
    /// Symbolic values such as `SIL3` or `3-Byte-CRC`.
    Text(String),
}

impl SafetyValue {
    /// Interprets a declared default: a number when it parses as one, text otherwise.
    fn from_default(attribute: &SafetyAttribute) -> Self {
        parse_integer(&attribute.default_value)
            .and_then(|v| u32::try_from(v).ok())
            .map(SafetyValue::Unsigned)
            .unwrap_or_else(|| SafetyValue::Text(attribute.default_value.clone()))
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            SafetyValue::Unsigned(v) => Some(*v),
            SafetyValue::Text(s) => parse_integer(s).and_then(|v| u32::try_from(v).ok()),
        }
    }
}

impl fmt::Display for SafetyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyValue::Unsigned(v) => write!(f, "{}", v),
            SafetyValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u32> for SafetyValue {
    fn from(v: u32) -> Self {
        SafetyValue::Unsigned(v)
    }
}

/// Limits applied when writing F-parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyConfig {
    /// Smallest accepted F_WD_Time in milliseconds.
    pub watchdog_min_ms: u32,
    /// Largest accepted F_WD_Time in milliseconds.
    pub watchdog_max_ms: u32,
    /// When set, F_WD_Time must also be one of these values.
    pub watchdog_values: Option<AllowedValues>,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            watchdog_min_ms: F_WD_TIME_MIN,
            watchdog_max_ms: F_WD_TIME_MAX,
            watchdog_values: None,
        }
    }
}

impl SafetyConfig {
    /// Narrows the default watchdog range to the `AllowedValues` the block
    /// declares for F_WD_Time, and keeps those values for membership checks.
    pub fn from_block(block: &SafetyParameterBlock) -> Self {
        let mut config = Self::default();
        if let Some(allowed) = &block.f_wd_time.allowed_values {
            config.watchdog_values = Some(allowed.clone());
            if let Some(min) = allowed.min().and_then(|v| u32::try_from(v).ok()) {
                config.watchdog_min_ms = config.watchdog_min_ms.max(min);
            }
            if let Some(max) = allowed.max().and_then(|v| u32::try_from(v).ok()) {
                config.watchdog_max_ms = config.watchdog_max_ms.min(max);
            }
        }
        config
    }
}

fn safety_block(descriptor: &ModuleDescriptor) -> ParamResult<&SafetyParameterBlock> {
    descriptor
        .safety_block
        .as_ref()
        .ok_or_else(|| ParamError::UnsupportedParameter(descriptor.id.clone()))
}

/// Resolves `name` to a declared attribute of `block`.
fn declared<'b>(
    block: &'b SafetyParameterBlock,
    name: &str,
) -> ParamResult<(SafetyAttributeName, &'b SafetyAttribute)> {
    let parsed: SafetyAttributeName = name
        .parse()
        .map_err(ParamError::UnsupportedParameter)?;
    let attribute = block
        .attribute(parsed)
        .ok_or_else(|| ParamError::UnsupportedParameter(name.to_string()))?;
    Ok((parsed, attribute))
}

/// Reads F-parameters of a safety module.
///
/// Values come from `store`; an attribute the store does not hold reports
/// its declared default. Without `requested`, every declared attribute is returned.
pub fn get_safety<S: SafetyAttributeStore + ?Sized>(
    descriptor: &ModuleDescriptor,
    store: &S,
    requested: Option<&BTreeSet<String>>,
) -> ParamResult<BTreeMap<String, SafetyValue>> {
    let block = safety_block(descriptor)?;

    let selected: Vec<(SafetyAttributeName, &SafetyAttribute)> = match requested {
        Some(names) => names
            .iter()
            .map(|n| declared(block, n))
            .collect::<ParamResult<_>>()?,
        None => block.attributes().collect(),
    };

    let mut result = BTreeMap::new();
    for (name, attribute) in selected {
        let value = store
            .get_attribute(name.as_str())
            .unwrap_or_else(|| SafetyValue::from_default(attribute));
        trace!("{} {} = {}", descriptor.id, name, value);
        result.insert(name.as_str().to_string(), value);
    }
    Ok(result)
}

/// Checks one write request and returns the numeric value to store.
///
/// A name is writable when it is one of the PROFIsafe writable F-parameters
/// and the device description does not mark it `Changeable="false"`.
fn validate_write(
    block: &SafetyParameterBlock,
    config: &SafetyConfig,
    name: &str,
    value: &SafetyValue,
) -> ParamResult<(SafetyAttributeName, u32)> {
    let (parsed, attribute) = declared(block, name)?;
    if !parsed.is_writable() || !attribute.changeable {
        return Err(ParamError::UnsupportedParameter(name.to_string()));
    }

    let v = value.as_u32().ok_or_else(|| ParamError::Encode {
        field: name.to_string(),
        reason: EncodeFailure::NotNumeric(value.to_string()),
    })?;

    let bounds = match parsed {
        SafetyAttributeName::FSourceAdd | SafetyAttributeName::FDestAdd => {
            Some((F_ADDRESS_MIN, F_ADDRESS_MAX))
        }
        SafetyAttributeName::FWdTime => Some((config.watchdog_min_ms, config.watchdog_max_ms)),
        _ => None,
    };
    if let Some((min, max)) = bounds {
        let listed = parsed != SafetyAttributeName::FWdTime
            || config
                .watchdog_values
                .as_ref()
                .is_none_or(|allowed| allowed.contains(i64::from(v)));
        if v < min || v > max || !listed {
            return Err(ParamError::SafetyRange {
                attribute: parsed.as_str(),
                value: v,
                min,
                max,
            });
        }
    }
    Ok((parsed, v))
}

/// Writes F-parameters using the watchdog limits of the module's safety block.
pub fn set_safety<S: SafetyAttributeStore + ?Sized>(
    descriptor: &ModuleDescriptor,
    store: &mut S,
    values: &BTreeMap<String, SafetyValue>,
) -> ParamResult<()> {
    let config = SafetyConfig::from_block(safety_block(descriptor)?);
    set_safety_with(descriptor, store, values, &config)
}

/// Writes F-parameters with explicit limits.
///
/// Every value is validated before the first write reaches the store.
pub fn set_safety_with<S: SafetyAttributeStore + ?Sized>(
    descriptor: &ModuleDescriptor,
    store: &mut S,
    values: &BTreeMap<String, SafetyValue>,
    config: &SafetyConfig,
) -> ParamResult<()> {
    let block = safety_block(descriptor)?;
    if values.is_empty() {
        return Err(ParamError::EmptyInput);
    }

    let writes = values
        .iter()
        .map(|(name, value)| validate_write(block, config, name, value))
        .collect::<ParamResult<Vec<_>>>()?;

    for (name, v) in writes {
        store.set_attribute(name.as_str(), SafetyValue::Unsigned(v))?;
        trace!("{} {} <- {}", descriptor.id, name, v);
    }
    debug!("{}: wrote {} F-parameter(s)", descriptor.id, values.len());
    Ok(())
}
