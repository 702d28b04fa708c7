//! Rendering options and configuration.

use super::PageGeometry;

/// Default tab stop position in centimetres.
pub const DEFAULT_TAB_INDENT_CM: f64 = 11.65;

/// Options for rendering songs to documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Apply the capitalization transform during re-flow
    pub capitalize: bool,

    /// Letters recognized as stanza labels (`X: `) by the transform
    pub label_letters: String,

    /// Tab stop position in centimetres when the header sets none
    pub tab_indent_cm: f64,

    /// Overwrite an existing output file
    pub overwrite: bool,

    /// Page size and margins
    pub geometry: PageGeometry,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the capitalization transform.
    pub fn with_capitalize(mut self, capitalize: bool) -> Self {
        self.capitalize = capitalize;
        self
    }

    /// Set the label letters recognized by the capitalization transform.
    pub fn with_label_letters(mut self, letters: impl Into<String>) -> Self {
        self.label_letters = letters.into();
        self
    }

    /// Set the fallback tab stop position in centimetres.
    pub fn with_tab_indent(mut self, cm: f64) -> Self {
        self.tab_indent_cm = cm;
        self
    }

    /// Allow overwriting existing output files.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            capitalize: false,
            label_letters: "ABCRV".to_string(),
            tab_indent_cm: DEFAULT_TAB_INDENT_CM,
            overwrite: false,
            geometry: PageGeometry::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_capitalize(true)
            .with_label_letters("RV")
            .with_tab_indent(10.0)
            .with_overwrite(true);

        assert!(options.capitalize);
        assert_eq!(options.label_letters, "RV");
        assert_eq!(options.tab_indent_cm, 10.0);
        assert!(options.overwrite);
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert!(!options.capitalize);
        assert_eq!(options.tab_indent_cm, DEFAULT_TAB_INDENT_CM);
        assert!(!options.overwrite);
    }
}
