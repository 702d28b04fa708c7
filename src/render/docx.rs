//! DOCX rendering for songs.

use super::{reflow_stanza, DocBuilder, DocRun, RenderOptions, StyleDef};
use crate::error::Result;
use crate::model::Song;

const STYLE_TITLE: &str = "title";
const STYLE_AUTHORS: &str = "authors";
const STYLE_TEXT: &str = "text";
const STYLE_COPYRIGHT: &str = "copyright";
const STYLE_EMPTY_LINE: &str = "empty_line";

/// Convert a song to `.docx` bytes.
pub fn to_docx(song: &Song, options: &RenderOptions) -> Result<Vec<u8>> {
    let renderer = DocxRenderer::new(options.clone());
    renderer.render(song)
}

/// DOCX renderer.
///
/// Lays a song out as one page-flow of styled paragraphs: title line
/// with the highlighted reference number, authors line with the capo
/// note, stanzas separated by spacer lines, copyright at the end.
pub struct DocxRenderer {
    options: RenderOptions,
}

impl DocxRenderer {
    /// Create a new DOCX renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a song to `.docx` bytes.
    pub fn render(&self, song: &Song) -> Result<Vec<u8>> {
        let tab_indent_cm = song.tab_indent().unwrap_or(self.options.tab_indent_cm);
        let mut doc = DocBuilder::new()
            .with_geometry(self.options.geometry.clone())
            .with_tab_stop_cm(tab_indent_cm);

        doc.add_style(StyleDef::new(STYLE_TITLE, "Arial", 12.0).bold().with_color("333333"));
        doc.add_style(StyleDef::new(STYLE_AUTHORS, "Arial", 8.0));
        doc.add_style(StyleDef::new(STYLE_TEXT, "Arial", 11.0));
        doc.add_style(StyleDef::new(STYLE_COPYRIGHT, "Arial", 8.0));
        doc.add_style(StyleDef::new(STYLE_EMPTY_LINE, "Arial", 6.0));

        let mut title_runs = vec![DocRun::text(song.title().to_uppercase())];
        if let Some(reference) = song.reference() {
            title_runs.push(DocRun::tab());
            title_runs.push(DocRun::highlighted(reference));
        }
        doc.add_paragraph(STYLE_TITLE, &title_runs);

        let mut author_runs = vec![DocRun::text(song.authors())];
        if let Some(capo) = song.capo() {
            author_runs.push(DocRun::tab());
            author_runs.push(DocRun::text(format!("Capo {capo}")));
        }
        doc.add_paragraph(STYLE_AUTHORS, &author_runs);

        doc.add_paragraph(STYLE_EMPTY_LINE, &[]);

        for (i, stanza) in song.renderable_stanzas().iter().enumerate() {
            if i > 0 {
                doc.add_paragraph(STYLE_EMPTY_LINE, &[]);
            }
            for paragraph in reflow_stanza(&stanza.text, &self.options)? {
                let runs: Vec<DocRun> = paragraph
                    .runs
                    .iter()
                    .map(|run| {
                        if run.bold {
                            DocRun::bold(&run.text)
                        } else {
                            DocRun::text(&run.text)
                        }
                    })
                    .collect();
                doc.add_paragraph(STYLE_TEXT, &runs);
            }
        }

        doc.add_paragraph(STYLE_EMPTY_LINE, &[]);
        doc.add_paragraph(STYLE_COPYRIGHT, &[DocRun::text(song.copyright())]);

        doc.to_bytes()
    }
}
