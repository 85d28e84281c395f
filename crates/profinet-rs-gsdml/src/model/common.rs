// crates/profinet-rs-gsdml/src/model/common.rs

//! Text references, value lists and the external text list.

use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

/// Any element that only carries a `TextId` (`<Name>`, `<InfoText>`).
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TextRef {
    #[serde(rename = "@TextId", default)]
    pub text_id: Option<String>,
}

/// Any element that only carries a `Value` (`<VendorName>`, `<OrderNumber>`).
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ValueAttr {
    #[serde(rename = "@Value", default)]
    pub value: Option<String>,
}

// --- ValueList ---

/// `<Assign Content="1" TextId="IDT_On"/>`
#[derive(Debug, Deserialize, Default)]
pub struct Assign {
    #[serde(rename = "@Content", default)]
    pub content: Option<String>,
    #[serde(rename = "@TextId", default)]
    pub text_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Assignments {
    #[serde(rename = "Assign", default)]
    pub assign: Vec<Assign>,
}

/// `<ValueItem ID="...">` with its assignments.
#[derive(Debug, Deserialize, Default)]
pub struct ValueItem {
    #[serde(rename = "@ID", default)]
    pub id: Option<String>,
    #[serde(rename = "Assignments", default)]
    pub assignments: Option<Assignments>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ValueList {
    #[serde(rename = "ValueItem", default)]
    pub value_item: Vec<ValueItem>,
}

// --- ExternalTextList ---

/// `<Text TextId="..." Value="..."/>`
#[derive(Debug, Deserialize, Default)]
pub struct Text {
    #[serde(rename = "@TextId", default)]
    pub text_id: Option<String>,
    #[serde(rename = "@Value", default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PrimaryLanguage {
    #[serde(rename = "Text", default)]
    pub text: Vec<Text>,
}

/// A secondary language section, e.g. `<Language xml:lang="de">`.
#[derive(Debug, Deserialize, Default)]
pub struct Language {
    #[serde(rename = "@xml:lang", default)]
    pub lang: Option<String>,
    #[serde(rename = "Text", default)]
    pub text: Vec<Text>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ExternalTextList {
    #[serde(rename = "PrimaryLanguage", default)]
    pub primary_language: Option<PrimaryLanguage>,
    #[serde(rename = "Language", default)]
    pub language: Vec<Language>,
}
