//! Song file parsing.

use crate::error::Result;
use crate::model::Song;
use crate::parser::{parse_header, split_stanzas, HeaderSchema};
use std::fs;
use std::path::Path;

/// Parser for annotated song text files.
///
/// Reads the fixed-order header prologue, then splits the remaining
/// lines into stanzas. Bold markup stays untouched in the stanza text;
/// it is resolved at render time.
#[derive(Debug, Clone, Default)]
pub struct SongParser {
    schema: HeaderSchema,
}

impl SongParser {
    /// Create a parser with the standard header schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom header schema.
    pub fn with_schema(mut self, schema: HeaderSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Parse a song from a file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Song> {
        let text = fs::read_to_string(path.as_ref())?;
        self.parse_str(&text)
    }

    /// Parse a song from text.
    pub fn parse_str(&self, text: &str) -> Result<Song> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<&str> = text.lines().collect();

        let (header, consumed) = parse_header(&lines, &self.schema)?;
        let stanzas = split_stanzas(&lines[consumed..]);
        log::debug!(
            "parsed song with {} header fields, {} stanzas",
            header.len(),
            stanzas.len()
        );

        Ok(Song::new(header, stanzas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
TITLE=amazing grace
AUTHORS=J. Newton
COPYRIGHT=Public Domain

Amazing grace, how <b>sweet</b> the sound.

That saved a wretch like me.
";

    #[test]
    fn test_parse_sample() {
        let song = SongParser::new().parse_str(SAMPLE).unwrap();
        assert_eq!(song.title(), "amazing grace");
        assert_eq!(song.stanzas.len(), 2);
        assert_eq!(song.stanzas[0].text, "Amazing grace, how <b>sweet</b> the sound.");
        assert_eq!(song.stanzas[1].text, "That saved a wretch like me.");
    }

    #[test]
    fn test_bom_is_stripped() {
        let text = format!("\u{feff}{SAMPLE}");
        let song = SongParser::new().parse_str(&text).unwrap();
        assert_eq!(song.title(), "amazing grace");
    }

    #[test]
    fn test_missing_copyright() {
        let text = "TITLE=x\nAUTHORS=a\n\nbody";
        let err = SongParser::new().parse_str(text).unwrap_err();
        assert!(err.to_string().contains("COPYRIGHT"));
    }
}
