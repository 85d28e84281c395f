// crates/profinet-rs-gsdml/src/cache.rs

//! Loads each device type's description once and shares it.

use crate::parser::{load_gsdml_from_file, load_gsdml_from_str};
use log::{debug, info};
use profinet_rs::SchemaError;
use profinet_rs::schema::DeviceDescription;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// `(vendor_id, device_id)`
pub type DeviceKey = (u16, u16);

/// Device descriptions keyed by device type.
///
/// A second document describing an already cached device type does not
/// replace the first one.
#[derive(Debug, Default)]
pub struct GsdmlCache {
    entries: BTreeMap<DeviceKey, Arc<DeviceDescription>>,
    paths: BTreeMap<PathBuf, DeviceKey>,
}

impl GsdmlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the description loaded from `path`, parsing the file only the
    /// first time it is seen.
    pub fn get_or_load(&mut self, path: impl AsRef<Path>) -> Result<Arc<DeviceDescription>, SchemaError> {
        let path = path.as_ref();
        if let Some(entry) = self.paths.get(path).and_then(|key| self.entries.get(key)) {
            return Ok(Arc::clone(entry));
        }

        let description = load_gsdml_from_file(path)?;
        let key = Self::key_of(&description);
        self.paths.insert(path.to_path_buf(), key);
        Ok(self.insert(description))
    }

    /// Parses `xml` and returns the cached entry for its device type.
    ///
    /// The device type is only known after parsing, so the document is always
    /// parsed; an already cached description is returned in place of the new one.
    pub fn get_or_load_str(&mut self, xml: &str) -> Result<Arc<DeviceDescription>, SchemaError> {
        let description = load_gsdml_from_str(xml)?;
        Ok(self.insert(description))
    }

    /// Adds a description and returns the cached entry for its device type.
    pub fn insert(&mut self, description: DeviceDescription) -> Arc<DeviceDescription> {
        let key = Self::key_of(&description);
        let entry = self.entries.entry(key).or_insert_with(|| {
            info!(
                "Cached device type {:#06x}:{:#06x} ({})",
                key.0,
                key.1,
                description.identity().vendor_name
            );
            Arc::new(description)
        });
        Arc::clone(entry)
    }

    pub fn get(&self, vendor_id: u16, device_id: u16) -> Option<Arc<DeviceDescription>> {
        self.entries.get(&(vendor_id, device_id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        debug!("Clearing {} cached device type(s)", self.entries.len());
        self.entries.clear();
        self.paths.clear();
    }

    fn key_of(description: &DeviceDescription) -> DeviceKey {
        let identity = description.identity();
        (identity.vendor_id, identity.device_id)
    }
}
