//! Header parsing.
//!
//! The header is a fixed-order `KEY=VALUE` prologue. Parsing is a pure
//! function over the input lines: it never mutates its input and reports
//! how many lines it consumed, so the caller can hand the remainder to
//! the stanza splitter.

use crate::error::{Error, Result};
use crate::model::Header;

/// One expected header field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field key, matched as a `KEY=` line prefix
    pub key: String,

    /// Whether the field must be present with a non-blank value
    pub required: bool,

    /// Whether the value must parse as a number
    pub numeric: bool,
}

impl FieldSpec {
    /// A field that must be present and non-blank.
    pub fn required(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            required: true,
            numeric: false,
        }
    }

    /// A field that may be absent.
    pub fn optional(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            required: false,
            numeric: false,
        }
    }

    /// Require the value to parse as a number.
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }
}

/// The ordered set of fields a header may carry.
///
/// Keys are matched strictly in schema order: a line is consumed only when
/// the next unconsumed line starts with the current key's `KEY=` prefix,
/// so an out-of-order field ends the header early.
#[derive(Debug, Clone)]
pub struct HeaderSchema {
    /// Expected fields in order
    pub fields: Vec<FieldSpec>,
}

impl HeaderSchema {
    /// Create the standard schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema with no fields, for building a custom order.
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field spec.
    pub fn with_field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }
}

impl Default for HeaderSchema {
    fn default() -> Self {
        Self::empty()
            .with_field(FieldSpec::required(Header::TITLE))
            .with_field(FieldSpec::optional(Header::TITLE_ORIGINAL))
            .with_field(FieldSpec::optional(Header::LANG_ORIGINAL))
            .with_field(FieldSpec::optional(Header::YEAR_ORIGINAL))
            .with_field(FieldSpec::optional(Header::YEAR_TRANSLATION))
            .with_field(FieldSpec::optional(Header::GERMAN_TRANSLATION))
            .with_field(FieldSpec::optional(Header::REF_NO))
            .with_field(FieldSpec::optional(Header::CAPO))
            .with_field(FieldSpec::required(Header::AUTHORS))
            .with_field(FieldSpec::required(Header::COPYRIGHT))
            .with_field(FieldSpec::optional(Header::TAB_INDENT).numeric())
    }
}

/// Parse the header prologue from the start of `lines`.
///
/// Returns the parsed header and the number of lines consumed. Values are
/// stored untrimmed with literal `\n` sequences decoded to newlines; a
/// value that trims to empty leaves the field absent (the line is still
/// consumed). A missing or blank required field is an error naming the
/// field and the 1-based line where it was expected.
pub fn parse_header(lines: &[&str], schema: &HeaderSchema) -> Result<(Header, usize)> {
    let mut header = Header::new();
    let mut consumed = 0;

    for spec in &schema.fields {
        let prefix = format!("{}=", spec.key);
        let line = lines.get(consumed).copied().unwrap_or("");

        let Some(raw) = line.strip_prefix(prefix.as_str()) else {
            if spec.required {
                return Err(Error::MissingField {
                    field: spec.key.clone(),
                    line: consumed + 1,
                });
            }
            continue;
        };
        consumed += 1;

        let value = raw.replace("\\n", "\n");
        if value.trim().is_empty() {
            if spec.required {
                return Err(Error::MissingField {
                    field: spec.key.clone(),
                    line: consumed,
                });
            }
            continue;
        }
        if spec.numeric && value.trim().parse::<f64>().is_err() {
            return Err(Error::InvalidNumber {
                field: spec.key.clone(),
                value: value.trim().to_string(),
            });
        }
        header.push(spec.key.clone(), value);
    }

    Ok((header, consumed))
}
