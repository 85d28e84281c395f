// src/lib.rs

#![cfg_attr(not(feature = "std"), no_std)]
#![doc = "Loads the parameter subset of PROFINET GSDML device description files."]
#![doc = ""]
#![doc = "This `no_std + alloc` library compiles a GSDML document into the"]
#![doc = "`profinet-rs` schema model (modules, parameter records, value lists,"]
#![doc = "texts and F-parameters)."]
#![doc = ""]
#![doc = "It provides:"]
#![doc = "- `load_gsdml_from_str`: Parsing a GSDML document held in memory."]
#![doc = "- `load_gsdml_from_file` (feature `std`): Parsing a GSDML file."]
#![doc = "- `GsdmlCache` (feature `std`): One shared description per device type."]

extern crate alloc;

// --- Crate Modules ---

#[cfg(feature = "std")]
mod cache;
mod model;
mod parser;
mod resolver;

// --- Public API Re-exports ---

#[cfg(feature = "std")]
pub use cache::{DeviceKey, GsdmlCache};
pub use parser::load_gsdml_from_str;
#[cfg(feature = "std")]
pub use parser::load_gsdml_from_file;
