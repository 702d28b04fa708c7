//! Song-level types.

use super::Header;
use serde::{Deserialize, Serialize};

/// A stanza: consecutive non-blank lines joined by `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stanza {
    /// Stanza text, lines joined by `\n`, still carrying bold markup
    pub text: String,
}

impl Stanza {
    /// Create a new stanza.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Iterate over the stanza's lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Check if the stanza has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A parsed song: header plus stanzas, immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Header fields
    pub header: Header,

    /// Stanzas in input order; only the last may be empty
    pub stanzas: Vec<Stanza>,
}

impl Song {
    /// Create a new song.
    pub fn new(header: Header, stanzas: Vec<Stanza>) -> Self {
        Self { header, stanzas }
    }

    /// The song title.
    pub fn title(&self) -> &str {
        self.header.get(Header::TITLE).unwrap_or_default()
    }

    /// The reference number, if any.
    pub fn reference(&self) -> Option<&str> {
        self.header.get(Header::REF_NO)
    }

    /// The authors line.
    pub fn authors(&self) -> &str {
        self.header.get(Header::AUTHORS).unwrap_or_default()
    }

    /// The copyright notice.
    pub fn copyright(&self) -> &str {
        self.header.get(Header::COPYRIGHT).unwrap_or_default()
    }

    /// The capo position, if any.
    pub fn capo(&self) -> Option<&str> {
        self.header.get(Header::CAPO)
    }

    /// The tab stop position in centimetres, if the header sets one.
    ///
    /// The value was validated as numeric at parse time.
    pub fn tab_indent(&self) -> Option<f64> {
        self.header
            .get(Header::TAB_INDENT)
            .and_then(|v| v.trim().parse().ok())
    }

    /// Stanzas worth rendering: the full list minus a trailing empty
    /// stanza, which the splitter emits when the body ends on a blank line.
    pub fn renderable_stanzas(&self) -> &[Stanza] {
        match self.stanzas.last() {
            Some(last) if last.is_empty() => &self.stanzas[..self.stanzas.len() - 1],
            _ => &self.stanzas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Header {
        let mut header = Header::new();
        header.push(Header::TITLE, "Amazing Grace");
        header.push(Header::AUTHORS, "J. Newton");
        header.push(Header::COPYRIGHT, "Public Domain");
        header
    }

    #[test]
    fn test_accessors() {
        let song = Song::new(sample_header(), vec![Stanza::new("line one\nline two")]);
        assert_eq!(song.title(), "Amazing Grace");
        assert_eq!(song.authors(), "J. Newton");
        assert_eq!(song.reference(), None);
        assert_eq!(song.tab_indent(), None);
    }

    #[test]
    fn test_renderable_drops_trailing_empty_stanza() {
        let song = Song::new(
            sample_header(),
            vec![Stanza::new("first"), Stanza::new("second"), Stanza::new("")],
        );
        assert_eq!(song.stanzas.len(), 3);
        assert_eq!(song.renderable_stanzas().len(), 2);

        let song = Song::new(sample_header(), vec![Stanza::new("only")]);
        assert_eq!(song.renderable_stanzas().len(), 1);
    }

    #[test]
    fn test_song_serialization_round_trip() {
        let song = Song::new(sample_header(), vec![Stanza::new("line one\nline two")]);

        let json = serde_json::to_string(&song).unwrap();
        assert!(json.contains("\"key\":\"TITLE\""));

        let back: Song = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title(), "Amazing Grace");
        assert_eq!(back.stanzas, song.stanzas);
    }
}
