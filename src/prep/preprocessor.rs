//! Raw export preprocessing pipeline.
//!
//! Turns a raw lyric export from the song database into an annotated
//! record: a metadata header block, one blank line, and the cleaned
//! body. Metadata comes from the spreadsheet catalog, bridged through
//! an optional alias table when file and catalog titles differ.

use crate::error::{Error, Result};
use crate::model::Header;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

use super::{AliasTable, SongCatalog, Substitutions};

/// Reference number stand-in for songs the catalog lists without one.
pub const NO_REFERENCE: &str = "NOREF";

/// Options for the preprocessing pipeline.
#[derive(Debug, Clone)]
pub struct PrepOptions {
    /// Ordered literal substitutions applied to the body
    pub substitutions: Substitutions,

    /// Country code → language code for `LANG_ORIGINAL`
    pub language_map: HashMap<String, String>,
}

impl PrepOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body substitution rules.
    pub fn with_substitutions(mut self, substitutions: Substitutions) -> Self {
        self.substitutions = substitutions;
        self
    }

    /// Set the country → language map.
    pub fn with_language_map(mut self, map: HashMap<String, String>) -> Self {
        self.language_map = map;
        self
    }
}

impl Default for PrepOptions {
    fn default() -> Self {
        let language_map = [
            ("AT", "DE"),
            ("DE", "DE"),
            ("EN", "EN"),
            ("USA", "EN"),
            ("FR", "FR"),
            ("IT", "IT"),
            ("NL", "NL"),
            ("PL", "PL"),
        ]
        .into_iter()
        .map(|(country, lang)| (country.to_string(), lang.to_string()))
        .collect();

        Self {
            substitutions: Substitutions::default(),
            language_map,
        }
    }
}

/// One preprocessed song, ready to be written as an annotated record.
#[derive(Debug, Clone)]
pub struct PreparedSong {
    /// Emitted metadata header
    pub header: Header,

    /// Cleaned lyric body
    pub body: String,

    /// Suggested output filename
    pub filename: String,
}

impl PreparedSong {
    /// Render the record: header lines, one blank line, body.
    pub fn to_text(&self) -> String {
        format!("{}\n\n{}", self.header.to_lines().join("\n"), self.body)
    }

    /// Write the record under `dir` using the suggested filename.
    pub fn save(&self, dir: &Path, overwrite: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        if path.exists() && !overwrite {
            return Err(Error::OutputExists(path));
        }
        fs::write(&path, self.to_text())?;
        Ok(path)
    }
}

/// Preprocessor for raw song exports.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    catalog: SongCatalog,
    aliases: AliasTable,
    options: PrepOptions,
}

impl Preprocessor {
    /// Create a preprocessor over a loaded catalog.
    pub fn new(catalog: SongCatalog) -> Self {
        Self {
            catalog,
            aliases: AliasTable::new(),
            options: PrepOptions::default(),
        }
    }

    /// Attach a name-alias table.
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Set the pipeline options.
    pub fn with_options(mut self, options: PrepOptions) -> Self {
        self.options = options;
        self
    }

    /// Preprocess one raw export file.
    ///
    /// Returns `Ok(None)` for files whose name does not match the raw
    /// export pattern; those are logged and skipped, not failed.
    pub fn preprocess_file(&self, path: &Path) -> Result<Option<PreparedSong>> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidFilename(path.display().to_string()))?;
        if !is_valid_export_name(name) {
            log::warn!("skipping {name:?}: not a raw song export");
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        self.preprocess_text(&text).map(Some)
    }

    /// Preprocess raw export text into an annotated record.
    pub fn preprocess_text(&self, text: &str) -> Result<PreparedSong> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let text: String = text.nfc().collect();
        let mut lines: Vec<String> = text.lines().map(|l| l.trim().to_string()).collect();

        let title = match lines.iter().position(|l| l == "Titel:") {
            Some(i) => {
                let title = lines.get(i + 1).cloned().ok_or(Error::NoTitleLine)?;
                // label, title, and the blank line after them
                lines.drain(i..(i + 3).min(lines.len()));
                title
            }
            // unlabeled exports start with the title line, which stays in the body
            None => lines.first().cloned().ok_or(Error::NoTitleLine)?,
        };
        log::debug!("preprocessing {title:?}");

        let body = self.options.substitutions.apply(&lines.join("\n"));

        let alias = self.aliases.resolve(&title);
        let lookup_title = alias.map(|a| a.db_title.as_str()).unwrap_or(&title);
        let entry = self.catalog.lookup(lookup_title)?;

        let cell = entry.copyright.as_deref().unwrap_or_default();
        let cell_lines: Vec<&str> = cell.lines().map(str::trim).collect();
        if cell_lines.len() < 2 {
            return Err(Error::Catalog(format!(
                "copyright cell for {lookup_title:?} needs an authors and a copyright line"
            )));
        }

        let reference = entry
            .reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(NO_REFERENCE);

        let mut header = Header::new();
        header.push(Header::TITLE, title.as_str());
        if let Some(original) = entry.title_original.as_deref() {
            header.push(Header::TITLE_ORIGINAL, original.trim());
            let country = entry
                .country
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty());
            if let Some(country) = country {
                header.push(Header::LANG_ORIGINAL, self.map_language(country)?);
            }
        }
        if let Some(year) = entry.year_original.as_deref() {
            header.push(Header::YEAR_ORIGINAL, year);
        }
        if let Some(year) = entry.year_translation.as_deref() {
            header.push(Header::YEAR_TRANSLATION, year);
        }
        header.push(Header::REF_NO, reference);
        header.push(Header::AUTHORS, cell_lines[0]);
        header.push(Header::COPYRIGHT, cell_lines[1]);

        let filename = match alias.and_then(|a| a.output_filename.clone()) {
            Some(name) => name,
            None => format!("{} {}.txt", title.replace(':', ""), reference),
        };

        Ok(PreparedSong {
            header,
            body,
            filename,
        })
    }

    fn map_language(&self, code: &str) -> Result<String> {
        self.options.language_map.get(code).cloned().ok_or_else(|| {
            let mut known: Vec<&str> = self
                .options
                .language_map
                .keys()
                .map(String::as_str)
                .collect();
            known.sort_unstable();
            Error::UnmappedCountry {
                code: code.to_string(),
                known: known.join(", "),
            }
        })
    }
}

/// Check a filename against the raw export pattern `…_AP_<digits>.txt`.
pub fn is_valid_export_name(name: &str) -> bool {
    let chars: Vec<char> = name.chars().collect();
    let n = chars.len();
    n >= 14 && chars[n - 14..n - 10] == ['_', 'A', 'P', '_']
}

#[cfg(test)]
mod tests {
    use super::super::CatalogEntry;
    use super::*;

    const RAW: &str = "Titel:\nAmazing Grace\n\nREFRAIN:\nAmazing grace, how sweet\n\nVerse:\nI once was lost\n";

    fn catalog() -> SongCatalog {
        SongCatalog::from_entries(vec![
            CatalogEntry {
                title: "Amazing Grace".to_string(),
                title_original: Some("Amazing Grace".to_string()),
                country: Some("EN".to_string()),
                year_original: Some("1779".to_string()),
                year_translation: Some("1956".to_string()),
                reference: Some("101".to_string()),
                copyright: Some("J. Newton\nPublic Domain".to_string()),
            },
            CatalogEntry {
                title: "Stille Nacht".to_string(),
                copyright: Some("J. Mohr\nPublic Domain".to_string()),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_preprocess_labeled_export() {
        let song = Preprocessor::new(catalog()).preprocess_text(RAW).unwrap();
        assert_eq!(
            song.header.to_lines(),
            [
                "TITLE=Amazing Grace",
                "TITLE_ORIGINAL=Amazing Grace",
                "LANG_ORIGINAL=EN",
                "YEAR_ORIGINAL=1779",
                "YEAR_TRANSLATION=1956",
                "REF_NO=101",
                "AUTHORS=J. Newton",
                "COPYRIGHT=Public Domain",
            ]
        );
        assert_eq!(song.body, "R. Amazing grace, how sweet\n\nI once was lost");
        assert_eq!(song.filename, "Amazing Grace 101.txt");
    }

    #[test]
    fn test_record_shape() {
        let song = Preprocessor::new(catalog()).preprocess_text(RAW).unwrap();
        let text = song.to_text();
        assert!(text.starts_with("TITLE=Amazing Grace\n"));
        assert!(text.contains("COPYRIGHT=Public Domain\n\nR. Amazing grace"));
    }

    #[test]
    fn test_unlabeled_export_keeps_title_line() {
        let song = Preprocessor::new(catalog())
            .preprocess_text("Stille Nacht\nheilige Nacht")
            .unwrap();
        assert_eq!(song.header.get(Header::TITLE), Some("Stille Nacht"));
        // without the label nothing is removed
        assert_eq!(song.body, "Stille Nacht\nheilige Nacht");
    }

    #[test]
    fn test_missing_reference_falls_back_to_noref() {
        let song = Preprocessor::new(catalog())
            .preprocess_text("Titel:\nStille Nacht\n\ntext")
            .unwrap();
        assert_eq!(song.header.get(Header::REF_NO), Some("NOREF"));
        assert!(!song.header.contains(Header::TITLE_ORIGINAL));
        assert!(!song.header.contains(Header::LANG_ORIGINAL));
        assert_eq!(song.filename, "Stille Nacht NOREF.txt");
    }

    #[test]
    fn test_padded_title_original_cell_is_trimmed() {
        let catalog = SongCatalog::from_entries(vec![CatalogEntry {
            title: "Song".to_string(),
            title_original: Some("  Amazing Grace  ".to_string()),
            year_original: Some(" 1779 ".to_string()),
            copyright: Some("a\nb".to_string()),
            ..Default::default()
        }]);
        let song = Preprocessor::new(catalog)
            .preprocess_text("Titel:\nSong\n\ntext")
            .unwrap();

        assert_eq!(song.header.get(Header::TITLE_ORIGINAL), Some("Amazing Grace"));
        // years pass through verbatim
        assert_eq!(song.header.get(Header::YEAR_ORIGINAL), Some(" 1779 "));
    }

    #[test]
    fn test_colon_removed_from_filename() {
        let catalog = SongCatalog::from_entries(vec![CatalogEntry {
            title: "Neu: Er ist da".to_string(),
            reference: Some("77".to_string()),
            copyright: Some("a\nb".to_string()),
            ..Default::default()
        }]);
        let song = Preprocessor::new(catalog)
            .preprocess_text("Titel:\nNeu: Er ist da\n\ntext")
            .unwrap();
        assert_eq!(song.filename, "Neu Er ist da 77.txt");
    }

    #[test]
    fn test_alias_bridges_lookup_and_overrides_filename() {
        let aliases =
            AliasTable::parse("Er ist da=Neu: Er ist da=Er ist da 77.txt").unwrap();
        let catalog = SongCatalog::from_entries(vec![CatalogEntry {
            title: "Neu: Er ist da".to_string(),
            reference: Some("77".to_string()),
            copyright: Some("a\nb".to_string()),
            ..Default::default()
        }]);
        let song = Preprocessor::new(catalog)
            .with_aliases(aliases)
            .preprocess_text("Titel:\nEr ist da\n\ntext")
            .unwrap();
        assert_eq!(song.header.get(Header::TITLE), Some("Er ist da"));
        assert_eq!(song.header.get(Header::REF_NO), Some("77"));
        assert_eq!(song.filename, "Er ist da 77.txt");
    }

    #[test]
    fn test_unmapped_country() {
        let catalog = SongCatalog::from_entries(vec![CatalogEntry {
            title: "Song".to_string(),
            title_original: Some("Orig".to_string()),
            country: Some("XX".to_string()),
            copyright: Some("a\nb".to_string()),
            ..Default::default()
        }]);
        let err = Preprocessor::new(catalog)
            .preprocess_text("Titel:\nSong\n\ntext")
            .unwrap_err();
        match err {
            Error::UnmappedCountry { code, known } => {
                assert_eq!(code, "XX");
                assert!(known.contains("USA"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_copyright_cell() {
        let catalog = SongCatalog::from_entries(vec![CatalogEntry {
            title: "Song".to_string(),
            copyright: Some("only authors".to_string()),
            ..Default::default()
        }]);
        let err = Preprocessor::new(catalog)
            .preprocess_text("Titel:\nSong\n\ntext")
            .unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn test_empty_input() {
        let err = Preprocessor::new(catalog()).preprocess_text("").unwrap_err();
        assert!(matches!(err, Error::NoTitleLine));
    }

    #[test]
    fn test_export_name_gate() {
        assert!(is_valid_export_name("Lied_AP_123456.txt"));
        assert!(is_valid_export_name("Größer_AP_000001.txt"));
        assert!(!is_valid_export_name("Lied_AP_12345.txt"));
        assert!(!is_valid_export_name("Lied 101.txt"));
        assert!(!is_valid_export_name("short.txt"));
    }

    #[test]
    fn test_save_refuses_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let song = Preprocessor::new(catalog()).preprocess_text(RAW).unwrap();
        let path = song.save(dir.path(), false).unwrap();
        assert!(path.ends_with("Amazing Grace 101.txt"));

        let err = song.save(dir.path(), false).unwrap_err();
        assert!(matches!(err, Error::OutputExists(_)));

        song.save(dir.path(), true).unwrap();
    }
}
