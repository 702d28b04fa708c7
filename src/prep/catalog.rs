//! Spreadsheet metadata catalog.
//!
//! Song metadata lives in an Excel workbook maintained outside this
//! tool. The catalog is loaded once per batch and only read afterwards,
//! so lookups are safe to share across threads.

use crate::error::{Error, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashMap;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// Default number of rows to skip before the header row.
pub const DEFAULT_HEADER_OFFSET: usize = 8;

/// Default prefix word tried by the last lookup probe.
pub const DEFAULT_TITLE_PREFIX: &str = "Neu";

/// Internal column names recognized by a column map.
pub mod columns {
    pub const TITLE: &str = "TITLE";
    pub const TITLE_ORIGINAL: &str = "TITLE_ORIGINAL";
    pub const COUNTRY: &str = "COUNTRY";
    pub const YEAR_ORIGINAL: &str = "YEAR_ORIGINAL";
    pub const YEAR_TRANSLATION: &str = "YEAR_TRANSLATION";
    pub const REF_NO: &str = "REF_NO";
    pub const COPYRIGHT: &str = "COPYRIGHT";
}

/// Options for loading a catalog workbook.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Rows to skip before the header row
    pub header_offset: usize,

    /// Spreadsheet column header → internal name (see [`columns`])
    pub columns: HashMap<String, String>,

    /// Prefix word for the last lookup probe; empty disables the probe
    pub title_prefix: String,
}

impl CatalogOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of rows to skip before the header row.
    pub fn with_header_offset(mut self, offset: usize) -> Self {
        self.header_offset = offset;
        self
    }

    /// Set the column map.
    pub fn with_columns(mut self, columns: HashMap<String, String>) -> Self {
        self.columns = columns;
        self
    }

    /// Set the prefix word for the last lookup probe.
    pub fn with_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.title_prefix = prefix.into();
        self
    }
}

impl Default for CatalogOptions {
    fn default() -> Self {
        let columns = [
            ("Ref.-Nr.:", columns::REF_NO),
            ("Titel", columns::TITLE),
            ("Originaltitel", columns::TITLE_ORIGINAL),
            ("Ursprungsland", columns::COUNTRY),
            ("Ursprungsjahr", columns::YEAR_ORIGINAL),
            ("Übersetzungsjahr", columns::YEAR_TRANSLATION),
            ("Gesamte Copyrightangabe © (extern)", columns::COPYRIGHT),
        ]
        .into_iter()
        .map(|(header, internal)| (header.to_string(), internal.to_string()))
        .collect();

        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            columns,
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
        }
    }
}

/// One catalog row.
#[derive(Debug, Clone, Default)]
pub struct CatalogEntry {
    /// Song title as listed in the catalog
    pub title: String,

    /// Original (untranslated) title
    pub title_original: Option<String>,

    /// Country code of the original
    pub country: Option<String>,

    /// Year of the original
    pub year_original: Option<String>,

    /// Year of the translation
    pub year_translation: Option<String>,

    /// Reference number
    pub reference: Option<String>,

    /// Multi-line cell, first line authors, second line copyright
    pub copyright: Option<String>,
}

/// The loaded song catalog: entries plus a normalized-title index.
#[derive(Debug, Clone)]
pub struct SongCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
    title_prefix: String,
}

impl SongCatalog {
    /// Load a catalog from a workbook file.
    ///
    /// Reads the first worksheet, skips `header_offset` rows, maps the
    /// header row through the column map, and indexes the remaining rows
    /// by normalized title. Rows without a title are skipped. A missing
    /// `TITLE` or `COPYRIGHT` column is a load error.
    pub fn open(path: impl AsRef<Path>, options: &CatalogOptions) -> Result<Self> {
        let mut workbook = open_workbook_auto(path.as_ref())?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::Catalog("workbook has no worksheets".to_string()))??;

        let mut rows = range.rows().skip(options.header_offset);
        let header_row = rows.next().ok_or_else(|| {
            Error::Catalog(format!(
                "no header row after skipping {} rows",
                options.header_offset
            ))
        })?;

        let mut col_for: HashMap<usize, String> = HashMap::new();
        for (i, cell) in header_row.iter().enumerate() {
            if let Some(header) = cell_to_string(cell) {
                if let Some(internal) = options.columns.get(header.trim()) {
                    col_for.insert(i, internal.clone());
                }
            }
        }
        for required in [columns::TITLE, columns::COPYRIGHT] {
            if !col_for.values().any(|name| name == required) {
                return Err(Error::Catalog(format!(
                    "required column {required} not found in header row"
                )));
            }
        }

        let mut entries = Vec::new();
        for row in rows {
            let mut entry = CatalogEntry::default();
            for (i, cell) in row.iter().enumerate() {
                let Some(internal) = col_for.get(&i) else {
                    continue;
                };
                let Some(value) = cell_to_string(cell) else {
                    continue;
                };
                match internal.as_str() {
                    columns::TITLE => entry.title = value,
                    columns::TITLE_ORIGINAL => entry.title_original = Some(value),
                    columns::COUNTRY => entry.country = Some(value),
                    columns::YEAR_ORIGINAL => entry.year_original = Some(value),
                    columns::YEAR_TRANSLATION => entry.year_translation = Some(value),
                    columns::REF_NO => entry.reference = Some(value),
                    columns::COPYRIGHT => entry.copyright = Some(value),
                    _ => {}
                }
            }
            if entry.title.trim().is_empty() {
                continue;
            }
            entries.push(entry);
        }
        log::debug!("loaded {} catalog entries", entries.len());

        Ok(Self::from_entries(entries).with_title_prefix(options.title_prefix.clone()))
    }

    /// Build a catalog from entries directly.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut index = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            let key = normalize_key(&entry.title);
            if index.contains_key(&key) {
                log::warn!("duplicate catalog title {:?}, keeping the first", entry.title);
                continue;
            }
            index.insert(key, i);
        }
        Self {
            entries,
            index,
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
        }
    }

    /// Set the prefix word for the last lookup probe.
    pub fn with_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.title_prefix = prefix.into();
        self
    }

    /// Look up a song by title.
    ///
    /// Titles are compared trimmed, case-insensitively, and in NFC. On a
    /// miss, two fallback probes run in order: the en dash (U+2013)
    /// normalized to `-`, then the configured prefix word prepended.
    pub fn lookup(&self, title: &str) -> Result<&CatalogEntry> {
        let key = normalize_key(title);
        if let Some(&i) = self.index.get(&key) {
            return Ok(&self.entries[i]);
        }

        let dashed = key.replace('\u{2013}', "-");
        if dashed != key {
            if let Some(&i) = self.index.get(&dashed) {
                log::debug!("catalog hit for {title:?} via dash normalization");
                return Ok(&self.entries[i]);
            }
        }

        if !self.title_prefix.is_empty() {
            let prefixed = normalize_key(&format!("{} {}", self.title_prefix, title));
            if let Some(&i) = self.index.get(&prefixed) {
                log::debug!(
                    "catalog hit for {title:?} via {:?} prefix",
                    self.title_prefix
                );
                return Ok(&self.entries[i]);
            }
        }

        Err(Error::TitleNotFound {
            title: title.to_string(),
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_key(title: &str) -> String {
    title.trim().nfc().collect::<String>().to_lowercase()
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        // reference numbers and years come in as floats
        Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        other => Some(other.to_string()),
    }
}
