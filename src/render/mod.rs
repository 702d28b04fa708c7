//! Rendering module for converting songs to output documents.

mod docx;
mod options;
mod reflow;
mod wordml;

pub use docx::{to_docx, DocxRenderer};
pub use options::{RenderOptions, DEFAULT_TAB_INDENT_CM};
pub use reflow::{rebalance_lines, reflow_stanza};
pub use wordml::{cm_to_twips, DocBuilder, DocRun, PageGeometry, StyleDef};
