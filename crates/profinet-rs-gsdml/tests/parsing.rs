// crates/profinet-rs-gsdml/tests/parsing.rs

use profinet_rs::schema::{ModuleKind, SafetyAttributeName};
use profinet_rs::{
    DataType, ParamError, ParameterTranscoder, ParameterValue, SafetyValue, get_safety, set_safety,
};
use profinet_rs_gsdml::{GsdmlCache, load_gsdml_from_file, load_gsdml_from_str};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

const FIXTURE: &str = "GSDML-V2.35-Acme-PumpIO-20240115.xml";

fn test_file_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);
    path
}

/// Helper function to load a test file from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let path = test_file_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_identity_and_module_catalog() {
    init_logger();
    let device = load_gsdml_from_str(&load_test_file(FIXTURE)).expect("Failed to parse fixture");

    let identity = device.identity();
    assert_eq!(identity.vendor_id, 0x00AB);
    assert_eq!(identity.device_id, 0x0102);
    assert_eq!(identity.vendor_name, "Acme Automation");
    assert_eq!(
        identity.info_text.as_deref(),
        Some("Remote I/O station for pump control")
    );

    let modules = device.modules();
    assert_eq!(modules.len(), 4);
    let dap = modules.device_access_point().expect("DAP missing");
    assert_eq!(dap.id, "DAP1");
    assert_eq!(dap.kind, ModuleKind::DeviceAccessPoint);
    assert_eq!(dap.name, "PumpIO Head");
    assert_eq!(dap.order_number.as_deref(), Some("PIO-100"));

    // Lookup by id and by display name.
    assert_eq!(device.module("MOD_AI4").unwrap().ident_number, 0x10);
    assert_eq!(device.module("AI 4x U/I").unwrap().id, "MOD_AI4");
    assert!(device.module("MOD_NONE").is_none());
}

#[test]
fn test_parameter_block_layout() {
    let device = load_gsdml_from_str(&load_test_file(FIXTURE)).unwrap();
    let ai = device.module("MOD_AI4").unwrap();
    let block = ai.parameter_block().expect("AI module has no record");

    assert_eq!(block.record_index(), 100);
    assert_eq!(block.length(), 12);
    assert_eq!(block.name(), Some("Channel settings"));

    let names: Vec<&str> = block.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Measuring range", "Measuring range_1", "Offset", "Scale", "Tag"]
    );

    let second = block.field("Measuring range_1").unwrap();
    assert_eq!(second.data_type, DataType::BitArea);
    assert_eq!(second.bit_offset, Some(3));
    assert_eq!(second.bit_length, Some(3));
    assert_eq!(second.value_item.as_deref(), Some("VI_Range"));

    let scale = block.field("Scale").unwrap();
    assert!(!scale.changeable);

    let tag = block.field("Tag").unwrap();
    assert_eq!(tag.string_length, Some(4));
}

#[test]
fn test_value_list_and_texts() {
    let device = load_gsdml_from_str(&load_test_file(FIXTURE)).unwrap();
    let range = device.values().resolve_value_item("VI_Range").unwrap();
    assert_eq!(range.len(), 4);
    assert_eq!(range[2].display_text, "4..20 mA");
    // No text for IDT_RANGE_PT100: the id stands in.
    assert_eq!(range[3].display_text, "IDT_RANGE_PT100");

    assert_eq!(device.texts().resolve_text_in("de", "IDT_ON"), Some("ein"));
    assert_eq!(device.texts().resolve_text_in("de", "IDT_DAP"), Some("PumpIO Head"));
}

#[test]
fn test_default_record_from_constants_and_defaults() {
    let device = load_gsdml_from_str(&load_test_file(FIXTURE)).unwrap();

    let dap_block = device.module("DAP1").unwrap().parameter_block().unwrap();
    assert_eq!(dap_block.default_buffer(), vec![0x01, 0x5A, 0x00, 0x64]);

    let ai_block = device.module("MOD_AI4").unwrap().parameter_block().unwrap();
    assert_eq!(
        ai_block.default_buffer(),
        vec![0x12, 0x00, 0xFF, 0x9C, 0, 0, 0, 0, b'A', b'I', 0, 0]
    );

    let defaults = ParameterTranscoder::new(dap_block).default_values().unwrap();
    assert_eq!(defaults["Diagnostics"], ParameterValue::Text("on".into()));
    assert_eq!(defaults["Update cycle"], ParameterValue::UInt16(100));
}

#[test]
fn test_transcode_with_loaded_schema() {
    let device = load_gsdml_from_str(&load_test_file(FIXTURE)).unwrap();
    let block = device.module("MOD_AI4").unwrap().parameter_block().unwrap();
    let transcoder = ParameterTranscoder::new(block);

    let baseline = block.default_buffer();
    let mut changes = BTreeMap::new();
    changes.insert(
        "Measuring range_1".to_string(),
        ParameterValue::Text("0..10 V".into()),
    );
    changes.insert("Offset".to_string(), ParameterValue::Int16(250));
    let encoded = transcoder.encode(&baseline, &changes).unwrap();

    // Bits 3..=5 now hold 1, bits 0..=2 still hold 2.
    assert_eq!(encoded[0], 0b0000_1010);
    assert_eq!(&encoded[2..4], &[0x00, 0xFA]);

    let decoded = transcoder.decode_all(&encoded).unwrap();
    assert_eq!(
        decoded["Measuring range"],
        ParameterValue::Text("4..20 mA".into())
    );
    assert_eq!(
        decoded["Measuring range_1"],
        ParameterValue::Text("0..10 V".into())
    );
    assert_eq!(decoded["Tag"], ParameterValue::Text("AI".into()));

    // Scale is declared Changeable="false".
    let mut read_only = BTreeMap::new();
    read_only.insert("Scale".to_string(), ParameterValue::Int32(9));
    assert_eq!(
        transcoder.encode(&baseline, &read_only),
        Err(ParamError::ReadOnly("Scale".into()))
    );

    let mut out_of_range = BTreeMap::new();
    out_of_range.insert("Offset".to_string(), ParameterValue::Int16(2000));
    assert_eq!(
        transcoder.encode(&baseline, &out_of_range),
        Err(ParamError::RangeViolation {
            field: "Offset".into(),
            value: 2000
        })
    );
}

#[test]
fn test_records_of_referenced_submodules() {
    let device = load_gsdml_from_str(&load_test_file(FIXTURE)).unwrap();
    let do8 = device.module("MOD_DO8").unwrap();
    assert_eq!(do8.parameter_blocks.len(), 1);
    let block = do8.parameter_block_by_index(200).unwrap();
    assert_eq!(block.name(), Some("Substitute values"));
    assert!(block.field("Substitute value").is_some());
}

#[derive(Default)]
struct MemoryStore(BTreeMap<String, SafetyValue>);

impl profinet_rs::SafetyAttributeStore for MemoryStore {
    fn get_attribute(&self, name: &str) -> Option<SafetyValue> {
        self.0.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: SafetyValue) -> Result<(), &'static str> {
        self.0.insert(name.to_string(), value);
        Ok(())
    }
}

#[test]
fn test_safety_block() {
    let device = load_gsdml_from_str(&load_test_file(FIXTURE)).unwrap();
    let fdi = device.module("F-DI 8x24V").unwrap();
    assert!(fdi.is_safety_module());
    assert!(fdi.parameter_blocks.is_empty());

    let block = fdi.safety_block.as_ref().unwrap();
    assert_eq!(block.record_index, 128);
    assert_eq!(block.desc_crc, Some(12345));
    assert_eq!(block.f_sil.default_value, "SIL2");
    assert_eq!(block.f_block_id.default_value, "0");
    assert_eq!(
        block
            .attribute(SafetyAttributeName::FCheckIPar)
            .map(|a| a.default_value.as_str()),
        Some("NoCheck")
    );

    let mut store = MemoryStore::default();
    let mut writes = BTreeMap::new();
    writes.insert("F_Dest_Add".to_string(), SafetyValue::Unsigned(7));
    writes.insert("F_WD_Time".to_string(), SafetyValue::Unsigned(500));
    set_safety(fdi, &mut store, &writes).unwrap();

    let values = get_safety(fdi, &store, None).unwrap();
    assert_eq!(values["F_Dest_Add"], SafetyValue::Unsigned(7));
    assert_eq!(values["F_Source_Add"], SafetyValue::Unsigned(2000));
    assert_eq!(values["F_SIL"], SafetyValue::Text("SIL2".into()));

    // Outside the declared F_WD_Time range.
    let mut too_fast = BTreeMap::new();
    too_fast.insert("F_WD_Time".to_string(), SafetyValue::Unsigned(10));
    assert!(matches!(
        set_safety(fdi, &mut store, &too_fast),
        Err(ParamError::SafetyRange { min: 20, max: 1000, .. })
    ));

    // Modules without F-parameters are refused.
    let ai = device.module("MOD_AI4").unwrap();
    assert!(matches!(
        get_safety(ai, &store, None),
        Err(ParamError::UnsupportedParameter(_))
    ));
}

#[test]
fn test_cache_shares_one_description_per_device_type() {
    let mut cache = GsdmlCache::new();
    let first = cache.get_or_load(test_file_path(FIXTURE)).unwrap();
    let second = cache.get_or_load(test_file_path(FIXTURE)).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    // Same identity from another source resolves to the cached entry.
    let third = cache.get_or_load_str(&load_test_file(FIXTURE)).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &third));
    assert_eq!(cache.len(), 1);
    assert!(cache.get(0x00AB, 0x0102).is_some());
    assert!(cache.get(0x00AB, 0x0103).is_none());

    assert!(load_gsdml_from_file(test_file_path("missing.xml")).is_err());
}
