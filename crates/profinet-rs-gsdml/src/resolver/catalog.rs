// crates/profinet-rs-gsdml/src/resolver/catalog.rs

//! Builds the text and value catalogs from `ExternalTextList` and `ValueList`.

use super::utils::{require, text_or_id};
use crate::model::common::{ExternalTextList, Text, ValueList};
use alloc::vec::Vec;
use log::{debug, warn};
use profinet_rs::SchemaError;
use profinet_rs::schema::{Assignment, TextCatalog, ValueCatalog};

fn text_entries(texts: &[Text]) -> impl Iterator<Item = (&str, &str)> {
    texts.iter().filter_map(|t| match (&t.text_id, &t.value) {
        (Some(id), Some(value)) => Some((id.as_str(), value.as_str())),
        _ => {
            warn!("Skipping <Text> without TextId or Value");
            None
        }
    })
}

pub(super) fn resolve_texts(list: Option<&ExternalTextList>) -> TextCatalog {
    let mut catalog = TextCatalog::new();
    let Some(list) = list else {
        warn!("Document has no ExternalTextList; display names fall back to text ids");
        return catalog;
    };

    if let Some(primary) = &list.primary_language {
        for (id, value) in text_entries(&primary.text) {
            catalog.insert(id, value);
        }
    }
    for language in &list.language {
        let Some(lang) = language.lang.as_deref() else {
            warn!("Skipping <Language> without xml:lang");
            continue;
        };
        for (id, value) in text_entries(&language.text) {
            catalog.insert_localized(lang, id, value);
        }
    }

    debug!("Loaded {} primary text(s)", catalog.len());
    catalog
}

pub(super) fn resolve_values(
    list: Option<&ValueList>,
    texts: &TextCatalog,
) -> Result<ValueCatalog, SchemaError> {
    let mut catalog = ValueCatalog::new();
    let Some(list) = list else {
        return Ok(catalog);
    };

    for item in &list.value_item {
        let id = require(item.id.as_ref(), "ValueItem", "ID", "")?;
        let assignments = item
            .assignments
            .iter()
            .flat_map(|a| a.assign.iter())
            .map(|assign| {
                let raw_code = require(assign.content.as_ref(), "Assign", "Content", id)?;
                let text_id = require(assign.text_id.as_ref(), "Assign", "TextId", id)?;
                Ok(Assignment {
                    raw_code: raw_code.into(),
                    display_text: text_or_id(texts, text_id),
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;
        catalog.insert(id, assignments);
    }

    debug!("Loaded {} value item(s)", catalog.len());
    Ok(catalog)
}
