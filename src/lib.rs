//! # songsheet
//!
//! Song sheet generation library for Rust.
//!
//! This library parses annotated song lyric text files and renders them
//! as formatted DOCX song sheets. A companion preprocessing pipeline
//! turns raw lyric exports plus a spreadsheet metadata catalog into the
//! annotated format.
//!
//! ## Quick Start
//!
//! ```no_run
//! use songsheet::{parse_file, render};
//!
//! fn main() -> songsheet::Result<()> {
//!     // Parse an annotated lyric file
//!     let song = parse_file("Amazing Grace 101.txt")?;
//!
//!     // Render it as a DOCX song sheet
//!     let options = render::RenderOptions::default();
//!     let bytes = render::to_docx(&song, &options)?;
//!     std::fs::write("Amazing Grace 101.docx", bytes)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Annotated text format**: `KEY=VALUE` header plus lyric stanzas
//! - **Bold phrase markup**: `<b>…</b>` markers, rebalanced across line breaks
//! - **Styled DOCX output**: title, authors, lyrics, and copyright styles
//! - **Preprocessing pipeline**: raw exports + Excel catalog → annotated files
//! - **Optional cleanup**: uppercasing of line starts and stanza labels

pub mod error;
pub mod model;
pub mod parser;
pub mod prep;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Header, HeaderField, Paragraph, Run, Song, Span, Stanza};
pub use parser::{FieldSpec, HeaderSchema, SongParser};
pub use prep::{
    AliasTable, CatalogOptions, PrepOptions, PreparedSong, Preprocessor, SongCatalog,
    Substitutions,
};
pub use render::{DocxRenderer, PageGeometry, RenderOptions};

use std::path::{Path, PathBuf};

/// Parse an annotated lyric file and return a structured song.
///
/// # Arguments
///
/// * `path` - Path to the annotated text file
///
/// # Example
///
/// ```no_run
/// use songsheet::parse_file;
///
/// let song = parse_file("Amazing Grace 101.txt").unwrap();
/// println!("{}", song.title());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Song> {
    SongParser::new().parse_file(path)
}

/// Parse annotated lyric text.
///
/// # Example
///
/// ```
/// use songsheet::parse_str;
///
/// let song = parse_str("TITLE=Hymn\nAUTHORS=Trad.\nCOPYRIGHT=Public Domain\n\nfirst verse").unwrap();
/// assert_eq!(song.title(), "Hymn");
/// ```
pub fn parse_str(text: &str) -> Result<Song> {
    SongParser::new().parse_str(text)
}

/// Parse an annotated lyric file with a custom header schema.
pub fn parse_file_with_schema<P: AsRef<Path>>(path: P, schema: HeaderSchema) -> Result<Song> {
    SongParser::new().with_schema(schema).parse_file(path)
}

/// Convert an annotated lyric file to a DOCX song sheet.
///
/// The output file lands in `output_dir` under the input's stem with a
/// `.docx` extension. An existing output is an error unless the options
/// request overwriting.
///
/// # Example
///
/// ```no_run
/// use songsheet::{convert_file, RenderOptions};
///
/// let options = RenderOptions::new().with_capitalize(true);
/// let path = convert_file("Amazing Grace 101.txt", "out", &options).unwrap();
/// println!("wrote {}", path.display());
/// ```
pub fn convert_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let song = parse_file(input)?;
    let bytes = render::to_docx(&song, options)?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidFilename(input.display().to_string()))?;
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{stem}.docx"));
    if path.exists() && !options.overwrite {
        return Err(Error::OutputExists(path));
    }
    std::fs::write(&path, bytes)?;
    log::debug!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "TITLE=Hymn\nAUTHORS=Trad.\nCOPYRIGHT=Public Domain\n\nfirst line\nsecond line\n\nnext stanza";

    #[test]
    fn test_parse_str_minimal() {
        let song = parse_str(SAMPLE).unwrap();
        assert_eq!(song.title(), "Hymn");
        assert_eq!(song.stanzas.len(), 2);
    }

    #[test]
    fn test_parse_str_missing_title() {
        let result = parse_str("AUTHORS=Trad.\nCOPYRIGHT=PD\n\ntext");
        assert!(matches!(result, Err(Error::MissingField { .. })));
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert!(!options.capitalize);
        assert!(!options.overwrite);
        assert_eq!(options.tab_indent_cm, render::DEFAULT_TAB_INDENT_CM);
    }

    #[test]
    fn test_convert_file_writes_docx() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Hymn 1.txt");
        std::fs::write(&input, SAMPLE).unwrap();

        let out = dir.path().join("out");
        let options = RenderOptions::default();
        let path = convert_file(&input, &out, &options).unwrap();
        assert!(path.ends_with("Hymn 1.docx"));
        assert!(path.exists());

        let err = convert_file(&input, &out, &options).unwrap_err();
        assert!(matches!(err, Error::OutputExists(_)));

        let options = RenderOptions::new().with_overwrite(true);
        convert_file(&input, &out, &options).unwrap();
    }
}
