//! Song header types.

use serde::{Deserialize, Serialize};

/// A single `KEY=VALUE` header field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderField {
    /// Field key, e.g. `TITLE`
    pub key: String,

    /// Resolved field value (embedded newlines already decoded)
    pub value: String,
}

/// The parsed header of a song file.
///
/// Fields keep the order in which they appeared in the input, so a header
/// can be re-serialized without reshuffling. Only fields with a non-blank
/// value are stored; a key whose value trims to empty counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Ordered header fields
    pub fields: Vec<HeaderField>,
}

impl Header {
    pub const TITLE: &'static str = "TITLE";
    pub const TITLE_ORIGINAL: &'static str = "TITLE_ORIGINAL";
    pub const LANG_ORIGINAL: &'static str = "LANG_ORIGINAL";
    pub const YEAR_ORIGINAL: &'static str = "YEAR_ORIGINAL";
    pub const YEAR_TRANSLATION: &'static str = "YEAR_TRANSLATION";
    pub const GERMAN_TRANSLATION: &'static str = "GERMAN_TRANSLATION";
    pub const REF_NO: &'static str = "REF_NO";
    pub const CAPO: &'static str = "CAPO";
    pub const AUTHORS: &'static str = "AUTHORS";
    pub const COPYRIGHT: &'static str = "COPYRIGHT";
    pub const TAB_INDENT: &'static str = "TAB_INDENT";

    /// Create a new empty header.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field, preserving insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(HeaderField {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Get a field value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// Check whether a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the header has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Re-serialize the header as `KEY=VALUE` lines in field order.
    ///
    /// Embedded newlines in values are re-encoded as the literal `\n`
    /// sequence, so the output parses back to the same header.
    pub fn to_lines(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| format!("{}={}", f.key, f.value.replace('\n', "\\n")))
            .collect()
    }
}
