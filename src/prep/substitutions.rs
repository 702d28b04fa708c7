//! Literal text substitution rules.

/// An ordered list of literal `(pattern, replacement)` rewrite rules.
///
/// Rules are plain data applied in order over the whole body text, so a
/// variant pipeline can swap them out without code changes. The default
/// set cleans up raw song exports: stray no-break spaces and combining
/// marks, and label lines rewritten to the short forms the song sheets
/// use.
#[derive(Debug, Clone)]
pub struct Substitutions {
    rules: Vec<(String, String)>,
}

impl Substitutions {
    /// Create an empty rule list.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    pub fn with_rule(mut self, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.rules.push((pattern.into(), replacement.into()));
        self
    }

    /// Apply all rules in order.
    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (pattern, replacement) in &self.rules {
            text = text.replace(pattern.as_str(), replacement);
        }
        text
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Substitutions {
    fn default() -> Self {
        Self::empty()
            .with_rule("\u{a0}", " ")
            .with_rule("\u{35c}", "")
            .with_rule("Verse:\n", "")
            .with_rule("REFRAIN:", "Refrain:")
            .with_rule("Refrain:\n", "R. ")
            .with_rule("CODA:", "Coda:")
            .with_rule("BRIDGE:", "Bridge:")
    }
}
