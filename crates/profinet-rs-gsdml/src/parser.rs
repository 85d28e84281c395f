// crates/profinet-rs-gsdml/src/parser.rs

use crate::model::Iso15745Profile;
use crate::resolver;
use alloc::string::ToString;
use log::debug;
use profinet_rs::SchemaError;
use profinet_rs::schema::DeviceDescription;

/// Parses a GSDML document and compiles its parameter subset.
///
/// # Errors
/// Returns a `SchemaError` if the XML is malformed or any element the
/// parameter engine relies on is missing or invalid. No partial model is
/// returned.
pub fn load_gsdml_from_str(xml_content: &str) -> Result<DeviceDescription, SchemaError> {
    // 1. Deserialize the raw XML string into our internal model.
    let profile: Iso15745Profile =
        quick_xml::de::from_str(xml_content).map_err(|e| SchemaError::Xml(e.to_string()))?;

    // 2. Validate and compile.
    let description = resolver::resolve_description(&profile)?;
    debug!(
        "GSDML loaded: {} module(s), {} text(s)",
        description.modules().len(),
        description.texts().len()
    );
    Ok(description)
}

/// Reads and parses a GSDML file.
#[cfg(feature = "std")]
pub fn load_gsdml_from_file(
    path: impl AsRef<std::path::Path>,
) -> Result<DeviceDescription, SchemaError> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path)
        .map_err(|e| SchemaError::Io(alloc::format!("{}: {}", path.display(), e)))?;
    load_gsdml_from_str(&xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            load_gsdml_from_str("<ISO15745Profile><ProfileBody>"),
            Err(SchemaError::Xml(_))
        ));
    }

    #[test]
    fn test_missing_application_process() {
        let xml = r#"<ISO15745Profile><ProfileBody>
            <DeviceIdentity VendorID="0x1" DeviceID="0x2"/>
        </ProfileBody></ISO15745Profile>"#;
        assert_eq!(
            load_gsdml_from_str(xml),
            Err(SchemaError::MissingElement {
                element: "ApplicationProcess"
            })
        );
    }
}
