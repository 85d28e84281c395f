#![cfg_attr(not(feature = "std"), no_std)]

// 'alloc' is used for owned strings, buffers and lookup tables
extern crate alloc;

// --- Foundation Modules ---
pub mod error;
pub mod types;
pub mod value;
pub mod hal;

// --- Wire Level ---
pub mod codec;

// --- Device Description Model ---
pub mod schema;

// --- Parameter Access ---
pub mod transcoder;
pub mod safety;

// --- Top-level Exports ---
pub use error::{CodecError, EncodeFailure, ParamError, ParamResult, SchemaError};
pub use types::{AllowedValues, DataType};
pub use value::ParameterValue;
pub use hal::{RecordAccess, SafetyAttributeStore};
pub use schema::{
    DeviceDescription, DeviceIdentity, FieldDescriptor, ModuleCatalog, ModuleDescriptor,
    ModuleKind, ParameterBlock, SafetyParameterBlock,
};
pub use transcoder::{ParameterTranscoder, decode, encode, read_parameters, write_parameters};
pub use safety::{SafetyConfig, SafetyValue, get_safety, set_safety, set_safety_with};
