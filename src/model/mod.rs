//! Data model for parsed songs.
//!
//! This module defines the intermediate representation that bridges the
//! markup parser and document rendering: a [`Song`] is a [`Header`] plus
//! stanzas, and rendering turns stanza lines into [`Paragraph`]s of
//! plain and bold [`Run`]s.

mod header;
mod paragraph;
mod song;
mod span;

pub use header::{Header, HeaderField};
pub use paragraph::{Paragraph, Run};
pub use song::{Song, Stanza};
pub use span::Span;
