//! Song markup parsing.

mod header;
mod song_parser;
mod spans;
mod stanza;

pub use header::{parse_header, FieldSpec, HeaderSchema};
pub use song_parser::SongParser;
pub use spans::find_bold_spans;
pub use stanza::split_stanzas;

pub(crate) use spans::find_bold_spans_in_chars;
