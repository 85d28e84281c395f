// crates/profinet-rs/src/hal.rs

//! Traits for the collaborators this crate talks to but does not implement.

use crate::error::ParamError;
use crate::safety::SafetyValue;
use alloc::vec::Vec;

/// Reads and writes raw parameter records on a device instance.
///
/// Implemented by the device communication layer (e.g. PROFINET acyclic
/// read/write services). The engine never opens connections itself.
pub trait RecordAccess {
    /// Reads `length` bytes of record `record_index`, starting at `byte_offset`.
    fn read_record(
        &mut self,
        record_index: u16,
        byte_offset: usize,
        length: usize,
    ) -> Result<Vec<u8>, ParamError>;

    /// Writes `data` to record `record_index`, starting at `byte_offset`.
    fn write_record(
        &mut self,
        record_index: u16,
        byte_offset: usize,
        data: &[u8],
    ) -> Result<(), ParamError>;
}

/// Holds the current F-parameter values of one safety module instance.
pub trait SafetyAttributeStore {
    /// The stored value, or `None` if the attribute was never set.
    fn get_attribute(&self, name: &str) -> Option<SafetyValue>;

    fn set_attribute(&mut self, name: &str, value: SafetyValue) -> Result<(), &'static str>;
}
