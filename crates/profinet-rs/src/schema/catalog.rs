// crates/profinet-rs/src/schema/catalog.rs

//! Text and value catalogs of a device description.
//!
//! Both are filled once by the loader and only read afterwards.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Maps language-neutral text ids to display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextCatalog {
    primary: BTreeMap<String, String>,
    languages: BTreeMap<String, BTreeMap<String, String>>,
}

impl TextCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a primary-language text. A later entry with the same id replaces the earlier one.
    pub fn insert(&mut self, text_id: impl Into<String>, value: impl Into<String>) {
        self.primary.insert(text_id.into(), value.into());
    }

    /// Adds a text for a secondary language (e.g. `"de"`).
    pub fn insert_localized(
        &mut self,
        language: impl Into<String>,
        text_id: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.languages
            .entry(language.into())
            .or_default()
            .insert(text_id.into(), value.into());
    }

    /// Looks up a primary-language text. A missing id simply means no text is available.
    pub fn resolve_text(&self, text_id: &str) -> Option<&str> {
        self.primary.get(text_id).map(String::as_str)
    }

    /// Looks up a text in `language`, falling back to the primary language.
    pub fn resolve_text_in(&self, language: &str, text_id: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|texts| texts.get(text_id))
            .map(String::as_str)
            .or_else(|| self.resolve_text(text_id))
    }

    /// Secondary languages present in the document.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }
}

/// One `(raw code → display text)` pair of a value item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub raw_code: String,
    pub display_text: String,
}

/// Maps value-item ids to their ordered assignment lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueCatalog {
    items: BTreeMap<String, Vec<Assignment>>,
}

impl ValueCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value_item_id: impl Into<String>, assignments: Vec<Assignment>) {
        self.items.insert(value_item_id.into(), assignments);
    }

    pub fn resolve_value_item(&self, value_item_id: &str) -> Option<&[Assignment]> {
        self.items.get(value_item_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A value item resolved for one field, indexed in both directions.
///
/// When a code or a display text appears twice, the first assignment wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueMapping {
    assignments: Vec<Assignment>,
    by_code: BTreeMap<String, usize>,
    by_text: BTreeMap<String, usize>,
}

impl ValueMapping {
    pub fn new(assignments: &[Assignment]) -> Self {
        let mut by_code = BTreeMap::new();
        let mut by_text = BTreeMap::new();
        for (i, a) in assignments.iter().enumerate() {
            by_code.entry(a.raw_code.clone()).or_insert(i);
            by_text.entry(a.display_text.clone()).or_insert(i);
        }
        Self {
            assignments: assignments.to_vec(),
            by_code,
            by_text,
        }
    }

    /// Display text for a raw code, e.g. `"1"` → `"enabled"`.
    pub fn display_for(&self, raw_code: &str) -> Option<&str> {
        self.by_code
            .get(raw_code)
            .map(|&i| self.assignments[i].display_text.as_str())
    }

    /// Raw code for a display text, e.g. `"enabled"` → `"1"`.
    pub fn code_for(&self, display_text: &str) -> Option<&str> {
        self.by_text
            .get(display_text)
            .map(|&i| self.assignments[i].raw_code.as_str())
    }

    /// Assignments in document order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn assign(code: &str, text: &str) -> Assignment {
        Assignment {
            raw_code: code.into(),
            display_text: text.into(),
        }
    }

    #[test]
    fn test_resolve_text_missing_is_none() {
        let mut texts = TextCatalog::new();
        texts.insert("IDT_A", "Alpha");
        assert_eq!(texts.resolve_text("IDT_A"), Some("Alpha"));
        assert_eq!(texts.resolve_text("IDT_B"), None);
    }

    #[test]
    fn test_resolve_text_in_falls_back_to_primary() {
        let mut texts = TextCatalog::new();
        texts.insert("IDT_A", "Alpha");
        texts.insert("IDT_B", "Beta");
        texts.insert_localized("de", "IDT_A", "Alfa");
        assert_eq!(texts.resolve_text_in("de", "IDT_A"), Some("Alfa"));
        assert_eq!(texts.resolve_text_in("de", "IDT_B"), Some("Beta"));
        assert_eq!(texts.resolve_text_in("fr", "IDT_A"), Some("Alpha"));
        assert_eq!(texts.languages().collect::<Vec<_>>(), vec!["de"]);
    }

    #[test]
    fn test_value_catalog_preserves_order() {
        let mut values = ValueCatalog::new();
        values.insert("VI_Mode", vec![assign("2", "fast"), assign("0", "off")]);
        let list = values.resolve_value_item("VI_Mode").unwrap();
        assert_eq!(list[0].raw_code, "2");
        assert_eq!(list[1].display_text, "off");
        assert!(values.resolve_value_item("VI_Other").is_none());
    }

    #[test]
    fn test_value_mapping_both_directions() {
        let mapping = ValueMapping::new(&[
            assign("0", "disabled"),
            assign("1", "enabled"),
            assign("2", "enabled"),
        ]);
        assert_eq!(mapping.display_for("1"), Some("enabled"));
        assert_eq!(mapping.code_for("enabled"), Some("1"));
        assert_eq!(mapping.display_for("7"), None);
        assert_eq!(mapping.code_for("unknown"), None);
        assert_eq!(mapping.assignments().len(), 3);
    }
}
