//! Name-alias table.
//!
//! Song titles in raw exports do not always match the catalog. The alias
//! file bridges them, one record per line:
//!
//! ```text
//! # comment
//! fileTitle=dbTitle
//! fileTitle=dbTitle=outputFilename
//! ```
//!
//! A literal `\n` in the catalog title decodes to a newline (some catalog
//! titles wrap across cell lines). The optional third segment overrides
//! the generated output filename.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One alias record.
#[derive(Debug, Clone)]
pub struct Alias {
    /// The title used for the catalog lookup
    pub db_title: String,

    /// Output filename override, if any
    pub output_filename: Option<String>,
}

/// Maps file titles to their catalog titles.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, Alias>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    /// Parse a table from text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            // no inline comments, a '#' may be part of a song name
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(3, '=');
            let file_title = parts.next().unwrap_or_default();
            let Some(db_title) = parts.next() else {
                return Err(Error::Alias(format!("missing '=' in line {line:?}")));
            };
            let output_filename = parts.next().map(str::to_string);
            entries.insert(
                file_title.to_string(),
                Alias {
                    db_title: db_title.replace("\\n", "\n"),
                    output_filename,
                },
            );
        }
        Ok(Self { entries })
    }

    /// Look up an alias for a file title.
    pub fn resolve(&self, file_title: &str) -> Option<&Alias> {
        self.entries.get(file_title)
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
