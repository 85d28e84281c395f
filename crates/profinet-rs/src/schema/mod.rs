// crates/profinet-rs/src/schema/mod.rs

//! The compiled, read-only model of a device description.
//!
//! A `DeviceDescription` is produced once per document by a loader and then
//! shared between all device instances of that type.

pub mod block;
pub mod catalog;
pub mod safety;

pub use block::{ConstData, FieldDescriptor, ParameterBlock};
pub use catalog::{Assignment, TextCatalog, ValueCatalog, ValueMapping};
pub use safety::{SafetyAttribute, SafetyAttributeName, SafetyParameterBlock};

use crate::error::SchemaError;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Who made the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub vendor_id: u16,
    pub device_id: u16,
    pub vendor_name: String,
    pub info_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    DeviceAccessPoint,
    Module,
}

/// A device access point or a pluggable module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub id: String,
    pub ident_number: u32,
    pub kind: ModuleKind,
    /// Display name resolved from `ModuleInfo/Name`.
    pub name: String,
    pub info_text: Option<String>,
    pub order_number: Option<String>,
    /// Parameter records in document order.
    pub parameter_blocks: Vec<ParameterBlock>,
    pub safety_block: Option<SafetyParameterBlock>,
}

impl ModuleDescriptor {
    /// The first parameter record. Most modules carry exactly one.
    pub fn parameter_block(&self) -> Option<&ParameterBlock> {
        self.parameter_blocks.first()
    }

    pub fn parameter_block_by_index(&self, record_index: u16) -> Option<&ParameterBlock> {
        self.parameter_blocks
            .iter()
            .find(|b| b.record_index() == record_index)
    }

    pub fn is_safety_module(&self) -> bool {
        self.safety_block.is_some()
    }
}

/// All access points and modules of a device, indexed by id and by display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCatalog {
    modules: Vec<ModuleDescriptor>,
    by_id: BTreeMap<String, usize>,
    by_name: BTreeMap<String, usize>,
}

impl ModuleCatalog {
    /// Requires at least one device access point and unique ids.
    ///
    /// Names may repeat; a name lookup returns the first module in document order.
    pub fn new(modules: Vec<ModuleDescriptor>) -> Result<Self, SchemaError> {
        if !modules
            .iter()
            .any(|m| m.kind == ModuleKind::DeviceAccessPoint)
        {
            return Err(SchemaError::MissingElement {
                element: "DeviceAccessPointItem",
            });
        }

        let mut by_id = BTreeMap::new();
        let mut by_name = BTreeMap::new();
        for (i, module) in modules.iter().enumerate() {
            if by_id.insert(module.id.clone(), i).is_some() {
                return Err(SchemaError::DuplicateId(module.id.clone()));
            }
            by_name.entry(module.name.clone()).or_insert(i);
        }

        Ok(Self {
            modules,
            by_id,
            by_name,
        })
    }

    /// Looks `key` up as an id first, then as a display name.
    pub fn get(&self, key: &str) -> Option<&ModuleDescriptor> {
        self.by_id
            .get(key)
            .or_else(|| self.by_name.get(key))
            .map(|&i| &self.modules[i])
    }

    pub fn by_id(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.by_id.get(id).map(|&i| &self.modules[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.by_name.get(name).map(|&i| &self.modules[i])
    }

    /// The first device access point in document order.
    pub fn device_access_point(&self) -> Option<&ModuleDescriptor> {
        self.modules
            .iter()
            .find(|m| m.kind == ModuleKind::DeviceAccessPoint)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Root of the compiled model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescription {
    identity: DeviceIdentity,
    texts: TextCatalog,
    values: ValueCatalog,
    modules: ModuleCatalog,
}

impl DeviceDescription {
    pub fn new(
        identity: DeviceIdentity,
        texts: TextCatalog,
        values: ValueCatalog,
        modules: ModuleCatalog,
    ) -> Self {
        Self {
            identity,
            texts,
            values,
            modules,
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn texts(&self) -> &TextCatalog {
        &self.texts
    }

    pub fn values(&self) -> &ValueCatalog {
        &self.values
    }

    pub fn modules(&self) -> &ModuleCatalog {
        &self.modules
    }

    /// Shorthand for `modules().get(key)`.
    pub fn module(&self, key: &str) -> Option<&ModuleDescriptor> {
        self.modules.get(key)
    }
}
