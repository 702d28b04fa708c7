//! Error types for the songsheet library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for songsheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing, preparing, or rendering songs.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A mandatory header field is missing or empty.
    #[error("missing mandatory header field {field} at line {line}")]
    MissingField { field: String, line: usize },

    /// A header field that must be numeric did not parse.
    #[error("header field {field} is not a number: {value:?}")]
    InvalidNumber { field: String, value: String },

    /// Opening and closing bold markers are unbalanced.
    #[error("unbalanced bold markers: {open} <b> vs {close} </b>")]
    TagCountMismatch { open: usize, close: usize },

    /// Bold marker positions are not strictly increasing.
    #[error("bold markers out of order at offsets {offsets:?}")]
    UnorderedMarkers { offsets: Vec<usize> },

    /// A song title was not found in the metadata catalog.
    #[error("title not found in catalog: {title:?}")]
    TitleNotFound { title: String },

    /// A country code has no language mapping.
    #[error("no language mapping for country {code:?} (known: {known})")]
    UnmappedCountry { code: String, known: String },

    /// The output file already exists and overwriting was not requested.
    #[error("output file already exists: {0}")]
    OutputExists(PathBuf),

    /// The input filename does not match the expected raw-export pattern.
    #[error("unexpected input filename: {0}")]
    InvalidFilename(String),

    /// The raw export contains no usable title line.
    #[error("input contains no title line")]
    NoTitleLine,

    /// Problem loading or interpreting the metadata catalog.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Malformed name-alias file.
    #[error("alias file error: {0}")]
    Alias(String),

    /// Error packaging the output document.
    #[error("document write error: {0}")]
    DocWrite(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::DocWrite(err.to_string())
    }
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Catalog(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TagCountMismatch { open: 2, close: 1 };
        assert_eq!(err.to_string(), "unbalanced bold markers: 2 <b> vs 1 </b>");

        let err = Error::MissingField {
            field: "COPYRIGHT".into(),
            line: 10,
        };
        assert_eq!(
            err.to_string(),
            "missing mandatory header field COPYRIGHT at line 10"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_calamine_error_becomes_catalog() {
        let err: Error = calamine::Error::Msg("workbook is broken").into();
        assert!(matches!(err, Error::Catalog(_)));
    }
}
