// crates/profinet-rs-gsdml/src/resolver/mod.rs

//! Turns the deserialized GSDML model into the `profinet-rs` schema model.
//!
//! Resolution is strict: the first invalid element aborts the whole load and
//! no partial description is returned.

use crate::model::{self, Iso15745Profile};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use log::debug;
use profinet_rs::SchemaError;
use profinet_rs::schema::{DeviceDescription, DeviceIdentity, ModuleCatalog, ModuleKind, TextCatalog};

// --- Sub-modules ---

mod catalog;
mod module;
mod record;
mod safety;
mod utils;

use module::{ModuleContext, resolve_module};
use utils::{parse_number, require, text_or_id};

fn resolve_identity(
    identity: &model::DeviceIdentity,
    texts: &TextCatalog,
) -> Result<DeviceIdentity, SchemaError> {
    let vendor_id = parse_number(
        "VendorID",
        require(identity.vendor_id.as_ref(), "DeviceIdentity", "VendorID", "")?,
    )?;
    let device_id = parse_number(
        "DeviceID",
        require(identity.device_id.as_ref(), "DeviceIdentity", "DeviceID", "")?,
    )?;
    let vendor_name = identity
        .vendor_name
        .as_ref()
        .and_then(|v| v.value.clone())
        .unwrap_or_default();
    let info_text = identity
        .info_text
        .as_ref()
        .and_then(|t| t.text_id.as_deref())
        .map(|t| text_or_id(texts, t));

    Ok(DeviceIdentity {
        vendor_id,
        device_id,
        vendor_name,
        info_text,
    })
}

/// Resolves the final `DeviceDescription` from the raw deserialized profile.
pub(crate) fn resolve_description(profile: &Iso15745Profile) -> Result<DeviceDescription, SchemaError> {
    let body = profile
        .profile_body
        .as_ref()
        .ok_or(SchemaError::MissingElement {
            element: "ProfileBody",
        })?;
    let app = body
        .application_process
        .as_ref()
        .ok_or(SchemaError::MissingElement {
            element: "ApplicationProcess",
        })?;

    // --- Pass 1: catalogs ---
    let texts = catalog::resolve_texts(app.external_text_list.as_ref());
    let values = catalog::resolve_values(app.value_list.as_ref(), &texts)?;

    let identity = resolve_identity(
        body.device_identity
            .as_ref()
            .ok_or(SchemaError::MissingElement {
                element: "DeviceIdentity",
            })?,
        &texts,
    )?;

    // --- Pass 2: access points and modules ---
    let daps = &app
        .device_access_point_list
        .as_ref()
        .ok_or(SchemaError::MissingElement {
            element: "DeviceAccessPointList",
        })?
        .device_access_point_item;
    if daps.is_empty() {
        return Err(SchemaError::MissingElement {
            element: "DeviceAccessPointItem",
        });
    }

    let modules = {
        let ctx = ModuleContext {
            texts: &texts,
            values: &values,
            submodules: app
                .submodule_list
                .iter()
                .flat_map(|l| l.submodule_item.iter())
                .filter_map(|s| s.id.as_deref().map(|id| (id, s)))
                .collect::<BTreeMap<_, _>>(),
        };

        let mut modules = Vec::new();
        for item in daps {
            modules.push(resolve_module(item, ModuleKind::DeviceAccessPoint, &ctx)?);
        }
        for item in app.module_list.iter().flat_map(|l| l.module_item.iter()) {
            modules.push(resolve_module(item, ModuleKind::Module, &ctx)?);
        }
        ModuleCatalog::new(modules)?
    };

    debug!(
        "Loaded device {:#06x}:{:#06x} ({}) with {} module(s)",
        identity.vendor_id,
        identity.device_id,
        identity.vendor_name,
        modules.len()
    );

    Ok(DeviceDescription::new(identity, texts, values, modules))
}
