// crates/profinet-rs-gsdml/src/resolver/module.rs

//! Resolves access points and modules into `ModuleDescriptor`s.

use super::record::resolve_record;
use super::safety::resolve_safety_record;
use super::utils::{parse_number, require, text_or_id};
use crate::model::module::{ModuleItem, RecordDataList, VirtualSubmoduleItem};
use alloc::collections::BTreeMap;
use alloc::string::ToString;
use alloc::vec::Vec;
use log::{debug, warn};
use profinet_rs::SchemaError;
use profinet_rs::schema::{ModuleDescriptor, ModuleKind, TextCatalog, ValueCatalog};

/// Read-only inputs shared by every module.
pub(super) struct ModuleContext<'a> {
    pub texts: &'a TextCatalog,
    pub values: &'a ValueCatalog,
    /// `SubmoduleList` entries by ID.
    pub submodules: BTreeMap<&'a str, &'a VirtualSubmoduleItem>,
}

/// Record lists of the module's own virtual submodules, followed by those of
/// the pluggable submodules it references.
fn record_lists<'a>(item: &'a ModuleItem, ctx: &ModuleContext<'a>, id: &str) -> Vec<&'a RecordDataList> {
    let mut lists: Vec<&RecordDataList> = item
        .virtual_submodule_list
        .iter()
        .flat_map(|l| l.virtual_submodule_item.iter())
        .filter_map(|s| s.record_data_list.as_ref())
        .collect();

    for target in item
        .useable_submodules
        .iter()
        .flat_map(|u| u.submodule_item_ref.iter())
        .filter_map(|r| r.submodule_item_target.as_deref())
    {
        match ctx.submodules.get(target) {
            Some(sub) => lists.extend(sub.record_data_list.as_ref()),
            None => warn!("Module '{}': unknown SubmoduleItemTarget '{}' ignored", id, target),
        }
    }
    lists
}

pub(super) fn resolve_module(
    item: &ModuleItem,
    kind: ModuleKind,
    ctx: &ModuleContext<'_>,
) -> Result<ModuleDescriptor, SchemaError> {
    let element = match kind {
        ModuleKind::DeviceAccessPoint => "DeviceAccessPointItem",
        ModuleKind::Module => "ModuleItem",
    };
    let id = require(item.id.as_ref(), element, "ID", "")?;
    let ident_number: u32 = parse_number(
        "ModuleIdentNumber",
        require(item.module_ident_number.as_ref(), element, "ModuleIdentNumber", id)?,
    )?;

    let info = item
        .module_info
        .as_ref()
        .ok_or(SchemaError::MissingElement {
            element: "ModuleInfo",
        })?;
    let name_id = require(
        info.name.as_ref().and_then(|n| n.text_id.as_ref()),
        "Name",
        "TextId",
        id,
    )?;
    let info_text = info
        .info_text
        .as_ref()
        .and_then(|t| t.text_id.as_deref())
        .map(|t| text_or_id(ctx.texts, t));
    let order_number = info
        .order_number
        .as_ref()
        .and_then(|o| o.value.clone());

    let mut parameter_blocks = Vec::new();
    let mut safety_block = None;
    for list in record_lists(item, ctx, id) {
        for record in &list.parameter_record_data_item {
            parameter_blocks.push(resolve_record(record, id, ctx.texts, ctx.values)?);
        }
        for f_record in &list.f_parameter_record_data_item {
            let block = resolve_safety_record(f_record, id)?;
            if safety_block.is_some() {
                warn!(
                    "Module '{}': additional F-parameter record {} ignored",
                    id, block.record_index
                );
                continue;
            }
            safety_block = Some(block);
        }
    }

    debug!(
        "{} '{}': {} parameter record(s){}",
        element,
        id,
        parameter_blocks.len(),
        if safety_block.is_some() { ", F-parameters" } else { "" }
    );

    Ok(ModuleDescriptor {
        id: id.to_string(),
        ident_number,
        kind,
        name: text_or_id(ctx.texts, name_id),
        info_text,
        order_number,
        parameter_blocks,
        safety_block,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::common::TextRef;
    use crate::model::module::{ModuleInfo, SubmoduleItemRef, UseableSubmodules};
    use crate::model::record::{ParameterRecordDataItem, Ref};
    use alloc::string::String;
    use alloc::vec;

    fn record(index: &str) -> ParameterRecordDataItem {
        ParameterRecordDataItem {
            index: Some(index.into()),
            length: Some("1".into()),
            name: None,
            constants: Vec::new(),
            refs: vec![Ref {
                text_id: Some("IDT_VALUE".into()),
                data_type: Some("Unsigned8".into()),
                byte_offset: Some("0".into()),
                ..Default::default()
            }],
        }
    }

    fn module_item(id: Option<&str>) -> ModuleItem {
        ModuleItem {
            id: id.map(String::from),
            module_ident_number: Some("0x00000020".into()),
            module_info: Some(ModuleInfo {
                name: Some(TextRef {
                    text_id: Some("IDT_DO8".into()),
                }),
                info_text: None,
                order_number: None,
            }),
            virtual_submodule_list: None,
            useable_submodules: None,
        }
    }

    #[test]
    fn test_module_without_id() {
        let texts = TextCatalog::new();
        let values = ValueCatalog::new();
        let ctx = ModuleContext {
            texts: &texts,
            values: &values,
            submodules: BTreeMap::new(),
        };
        assert!(matches!(
            resolve_module(&module_item(None), ModuleKind::Module, &ctx),
            Err(SchemaError::MissingAttribute {
                element: "ModuleItem",
                attribute: "ID",
                ..
            })
        ));
    }

    #[test]
    fn test_records_from_useable_submodules() {
        let mut texts = TextCatalog::new();
        texts.insert("IDT_DO8", "DO 8x24V");
        let values = ValueCatalog::new();
        let sub = VirtualSubmoduleItem {
            id: Some("SUB_DO8".into()),
            record_data_list: Some(RecordDataList {
                parameter_record_data_item: vec![record("200")],
                f_parameter_record_data_item: Vec::new(),
            }),
        };
        let ctx = ModuleContext {
            texts: &texts,
            values: &values,
            submodules: [("SUB_DO8", &sub)].into_iter().collect(),
        };

        let mut item = module_item(Some("MOD_DO8"));
        item.useable_submodules = Some(UseableSubmodules {
            submodule_item_ref: vec![
                SubmoduleItemRef {
                    submodule_item_target: Some("SUB_DO8".into()),
                },
                SubmoduleItemRef {
                    submodule_item_target: Some("SUB_MISSING".into()),
                },
            ],
        });

        let module = resolve_module(&item, ModuleKind::Module, &ctx).unwrap();
        assert_eq!(module.name, "DO 8x24V");
        assert_eq!(module.ident_number, 0x20);
        assert_eq!(module.parameter_blocks.len(), 1);
        assert_eq!(module.parameter_blocks[0].record_index(), 200);
    }
}
