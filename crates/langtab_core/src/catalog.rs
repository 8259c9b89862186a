//! Catalog document loading.
//!
//! One YAML document holds one record for one locale: a flat mapping from
//! identifier keys to text values. Values are compiled on the way in, so a
//! loaded record already separates plain entries from formatted ones.

use std::path::Path;

use indexmap::IndexMap;

use crate::error::LangtabError;
use crate::locale::LocaleId;
use crate::template::{self, Entry, Template};

/// One (locale, record) document, entries in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub plain: IndexMap<String, String>,
    pub formatted: IndexMap<String, Template>,
}

/// Every locale's record for one record name. The first entry is the
/// default locale; the rest follow discovery order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub name: String,
    pub locales: Vec<(LocaleId, Record)>,
}

/// True for `[A-Za-z_][A-Za-z0-9_]*`, the grammar shared by record keys,
/// record file stems, and placeholder names.
pub fn is_identifier(s: &str) -> bool {
    let mut it = s.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Decodes and compiles one record document.
///
/// The document must be a flat string-to-string mapping; an empty document
/// is an empty record. `path` only feeds error messages.
pub fn parse_record(text: &str, path: &Path, wide: bool) -> Result<Record, LangtabError> {
    let doc = serde_yaml::from_str::<serde_yaml::Value>(text).map_err(|source| {
        LangtabError::Decode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let mapping = match doc {
        serde_yaml::Value::Mapping(mapping) => mapping,
        serde_yaml::Value::Null => serde_yaml::Mapping::new(),
        _ => {
            return Err(LangtabError::NotAMapping {
                path: path.to_path_buf(),
            })
        }
    };

    let mut record = Record::default();
    for (k, v) in mapping {
        let Some(key) = k.as_str().filter(|key| is_identifier(key)) else {
            return Err(LangtabError::InvalidKey {
                key: describe_key(&k),
                path: path.to_path_buf(),
            });
        };
        let Some(value) = v.as_str() else {
            return Err(LangtabError::ValueNotText {
                key: key.to_string(),
                path: path.to_path_buf(),
            });
        };
        match template::compile(value, wide) {
            Entry::Plain(text) => {
                record.plain.insert(key.to_string(), text);
            }
            Entry::Formatted(template) => {
                record.formatted.insert(key.to_string(), template);
            }
        }
    }
    Ok(record)
}

/// Renders a rejected key for the error message; non-string keys are shown
/// in their YAML form.
fn describe_key(key: &serde_yaml::Value) -> String {
    match key.as_str() {
        Some(s) => s.to_string(),
        None => serde_yaml::to_string(key)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
