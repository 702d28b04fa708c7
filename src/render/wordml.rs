//! Minimal WordprocessingML writer.
//!
//! Builds the XML parts a Word document needs and packages them into the
//! `.docx` zip container. Covers exactly the features the song renderer
//! uses: paragraph styles, plain/bold/highlighted runs, tabs, line
//! breaks, one left tab stop, page size and margins.

use crate::error::Result;
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const TWIPS_PER_CM: f64 = 1440.0 / 2.54;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Convert centimetres to twips (twentieths of a point).
pub fn cm_to_twips(cm: f64) -> u32 {
    (cm * TWIPS_PER_CM).round() as u32
}

/// Escape text for XML content and attribute values.
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Page size and margins, in twips.
#[derive(Debug, Clone)]
pub struct PageGeometry {
    /// Page width
    pub width: u32,

    /// Page height
    pub height: u32,

    /// Uniform margin on all four sides
    pub margin: u32,
}

impl Default for PageGeometry {
    /// Letter paper with 2.5 cm margins.
    fn default() -> Self {
        Self {
            width: 12240,
            height: 15840,
            margin: cm_to_twips(2.5),
        }
    }
}

/// A paragraph style definition.
#[derive(Debug, Clone)]
pub struct StyleDef {
    /// Style id referenced by paragraphs
    pub id: String,

    /// Font family
    pub font: String,

    /// Font size in points
    pub size_pt: f32,

    /// Bold weight
    pub bold: bool,

    /// Text colour as a hex triplet, e.g. `333333`
    pub color: Option<String>,
}

impl StyleDef {
    /// Create a new style.
    pub fn new(id: impl Into<String>, font: impl Into<String>, size_pt: f32) -> Self {
        Self {
            id: id.into(),
            font: font.into(),
            size_pt,
            bold: false,
            color: None,
        }
    }

    /// Make the style bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the text colour.
    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }
}

/// A run to place in a paragraph.
#[derive(Debug, Clone)]
pub struct DocRun {
    /// Run text; `\t` and `\n` become tab and break elements
    pub text: String,

    /// Bold formatting
    pub bold: bool,

    /// Yellow highlight
    pub highlight: bool,
}

impl DocRun {
    /// A plain text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            highlight: false,
        }
    }

    /// A bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::text(text)
        }
    }

    /// A yellow-highlighted text run.
    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            highlight: true,
            ..Self::text(text)
        }
    }

    /// A run holding a single tab.
    pub fn tab() -> Self {
        Self::text("\t")
    }
}

/// Incremental builder for a one-part Word document.
#[derive(Debug, Clone, Default)]
pub struct DocBuilder {
    styles: Vec<StyleDef>,
    body: String,
    geometry: PageGeometry,
    tab_stop: Option<u32>,
}

impl DocBuilder {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Add a left tab stop at the given position to every paragraph.
    pub fn with_tab_stop_cm(mut self, cm: f64) -> Self {
        self.tab_stop = Some(cm_to_twips(cm));
        self
    }

    /// Register a paragraph style.
    pub fn add_style(&mut self, style: StyleDef) {
        self.styles.push(style);
    }

    /// Append a paragraph. An empty run list yields an empty paragraph,
    /// which still takes up one line of the style's height.
    pub fn add_paragraph(&mut self, style_id: &str, runs: &[DocRun]) {
        self.body.push_str("<w:p><w:pPr>");
        self.body
            .push_str(&format!("<w:pStyle w:val=\"{}\"/>", xml_escape(style_id)));
        self.body
            .push_str("<w:spacing w:before=\"0\" w:after=\"0\" w:line=\"240\" w:lineRule=\"auto\"/>");
        if let Some(pos) = self.tab_stop {
            self.body
                .push_str(&format!("<w:tabs><w:tab w:val=\"left\" w:pos=\"{pos}\"/></w:tabs>"));
        }
        self.body.push_str("</w:pPr>");
        for run in runs {
            self.push_run(run);
        }
        self.body.push_str("</w:p>");
    }

    fn push_run(&mut self, run: &DocRun) {
        self.body.push_str("<w:r>");
        if run.bold || run.highlight {
            self.body.push_str("<w:rPr>");
            if run.bold {
                self.body.push_str("<w:b/>");
            }
            if run.highlight {
                self.body.push_str("<w:highlight w:val=\"yellow\"/>");
            }
            self.body.push_str("</w:rPr>");
        }
        let mut text = String::new();
        for c in run.text.chars() {
            match c {
                '\t' => {
                    flush_text(&mut self.body, &mut text);
                    self.body.push_str("<w:tab/>");
                }
                '\n' => {
                    flush_text(&mut self.body, &mut text);
                    self.body.push_str("<w:br/>");
                }
                _ => text.push(c),
            }
        }
        flush_text(&mut self.body, &mut text);
        self.body.push_str("</w:r>");
    }

    /// Package the document as `.docx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(CONTENT_TYPES_XML.as_bytes())?;
        zip.start_file("_rels/.rels", options)?;
        zip.write_all(ROOT_RELS_XML.as_bytes())?;
        zip.start_file("word/_rels/document.xml.rels", options)?;
        zip.write_all(DOCUMENT_RELS_XML.as_bytes())?;
        zip.start_file("word/styles.xml", options)?;
        zip.write_all(self.styles_xml().as_bytes())?;
        zip.start_file("word/document.xml", options)?;
        zip.write_all(self.document_xml().as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn document_xml(&self) -> String {
        let g = &self.geometry;
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}<w:sectPr><w:pgSz w:w=\"{w}\" w:h=\"{h}\"/><w:pgMar w:top=\"{m}\" \
             w:right=\"{m}\" w:bottom=\"{m}\" w:left=\"{m}\" w:header=\"708\" w:footer=\"708\" \
             w:gutter=\"0\"/></w:sectPr></w:body></w:document>",
            body = self.body,
            w = g.width,
            h = g.height,
            m = g.margin,
        )
    }

    fn styles_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <w:styles xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">",
        );
        for style in &self.styles {
            let sz = (style.size_pt * 2.0).round() as u32;
            xml.push_str(&format!(
                "<w:style w:type=\"paragraph\" w:styleId=\"{id}\"><w:name w:val=\"{id}\"/><w:rPr>\
                 <w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\"/>",
                id = xml_escape(&style.id),
                font = xml_escape(&style.font),
            ));
            if style.bold {
                xml.push_str("<w:b/>");
            }
            if let Some(color) = &style.color {
                xml.push_str(&format!("<w:color w:val=\"{}\"/>", xml_escape(color)));
            }
            xml.push_str(&format!("<w:sz w:val=\"{sz}\"/><w:szCs w:val=\"{sz}\"/></w:rPr></w:style>"));
        }
        xml.push_str("</w:styles>");
        xml
    }
}

fn flush_text(body: &mut String, text: &mut String) {
    if !text.is_empty() {
        body.push_str("<w:t xml:space=\"preserve\">");
        body.push_str(&xml_escape(text));
        body.push_str("</w:t>");
        text.clear();
    }
}
