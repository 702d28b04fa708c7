//! Preprocessing pipeline for raw song exports.
//!
//! Raw exports carry only the lyric text; the metadata (reference
//! number, authors, copyright, origin) lives in a separate spreadsheet
//! catalog. This module joins the two into annotated records that the
//! parser accepts.

mod aliases;
mod catalog;
mod preprocessor;
mod substitutions;

pub use aliases::{Alias, AliasTable};
pub use catalog::{
    columns, CatalogEntry, CatalogOptions, SongCatalog, DEFAULT_HEADER_OFFSET,
    DEFAULT_TITLE_PREFIX,
};
pub use preprocessor::{
    is_valid_export_name, PrepOptions, PreparedSong, Preprocessor, NO_REFERENCE,
};
pub use substitutions::Substitutions;
