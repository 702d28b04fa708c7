//! Line re-flow.
//!
//! A stanza is stored as one text blob with embedded newlines, but each
//! line becomes its own paragraph in the output document. A bold span
//! that crosses a line break must therefore be closed at the end of one
//! line and reopened at the start of the next, so that per-line span
//! resolution still sees balanced markers.

use super::RenderOptions;
use crate::error::Result;
use crate::model::{Paragraph, Run, Span};
use crate::parser::find_bold_spans_in_chars;
use regex::Regex;

const OPEN_LEN: usize = 3; // "<b>"
const CLOSE_LEN: usize = 4; // "</b>"

/// Re-flow one stanza into per-line paragraphs.
///
/// Resolves the stanza's bold spans, injects synthetic markers at
/// span-crossing line breaks, optionally applies the capitalization
/// transform, then re-resolves spans per line and emits plain/bold runs.
/// An empty line yields an empty paragraph.
pub fn reflow_stanza(text: &str, options: &RenderOptions) -> Result<Vec<Paragraph>> {
    let chars: Vec<char> = text.chars().collect();
    let spans = find_bold_spans_in_chars(&chars)?;

    let newline_offsets: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == '\n')
        .map(|(i, _)| i)
        .collect();
    let lines: Vec<String> = text.split('\n').map(str::to_string).collect();

    let mut lines = rebalance_lines(&lines, &spans, &newline_offsets);
    if options.capitalize {
        let capitalizer = Capitalizer::new(&options.label_letters);
        for line in &mut lines {
            *line = capitalizer.apply(line);
        }
    }

    lines.iter().map(|line| line_to_paragraph(line)).collect()
}

/// Inject synthetic markers where a bold span crosses a line break.
///
/// `newline_offsets[i]` is the char offset, in the original stanza text,
/// of the break between `lines[i]` and `lines[i + 1]`. A break strictly
/// inside a span gets `</b>` appended to the line before it and `<b>`
/// prepended to the line after it. Pure: returns new lines, inputs stay
/// untouched. With no spans the lines are returned verbatim.
pub fn rebalance_lines(lines: &[String], spans: &[Span], newline_offsets: &[usize]) -> Vec<String> {
    let mut lines = lines.to_vec();
    if spans.is_empty() {
        return lines;
    }

    for (i, &offset) in newline_offsets.iter().enumerate() {
        if spans.iter().any(|span| span.surrounds(offset)) {
            lines[i].push_str("</b>");
            lines[i + 1].insert_str(0, "<b>");
        }
    }
    lines
}

/// Resolve a line's spans and emit its runs.
fn line_to_paragraph(line: &str) -> Result<Paragraph> {
    let chars: Vec<char> = line.chars().collect();
    let spans = find_bold_spans_in_chars(&chars)?;

    let mut runs = Vec::new();
    let mut pos = 0;
    for span in &spans {
        if span.start > pos {
            runs.push(Run::plain(slice_text(&chars, pos, span.start)));
        }
        runs.push(Run::bold(slice_text(&chars, span.start + OPEN_LEN, span.end)));
        pos = span.end + CLOSE_LEN;
    }
    if pos < chars.len() {
        runs.push(Run::plain(slice_text(&chars, pos, chars.len())));
    }

    Ok(Paragraph::from_runs(runs))
}

fn slice_text(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end].iter().collect()
}

/// The capitalization transform.
///
/// Upper-cases the first character of a non-empty line, and the character
/// after every `X: ` label marker, where `X` is one of the configured
/// letters. Substitutions are single-character only: a character whose
/// uppercase mapping is longer (such as `ß`) is left unchanged so that
/// character offsets stay valid.
struct Capitalizer {
    label_re: Option<Regex>,
}

impl Capitalizer {
    fn new(letters: &str) -> Self {
        let letters: String = letters.chars().filter(|c| c.is_ascii_alphabetic()).collect();
        let label_re = if letters.is_empty() {
            None
        } else {
            Regex::new(&format!("[{letters}]: .")).ok()
        };
        Self { label_re }
    }

    fn apply(&self, line: &str) -> String {
        if line.is_empty() {
            return String::new();
        }
        let mut chars: Vec<char> = line.chars().collect();
        upcase_at(&mut chars, 0);

        if let Some(re) = &self.label_re {
            let staged: String = chars.iter().collect();
            for m in re.find_iter(&staged) {
                // the target is the last char of the match; regex offsets
                // are bytes, span positions are chars
                let target = staged[..m.end()].chars().count() - 1;
                upcase_at(&mut chars, target);
            }
            return chars.into_iter().collect();
        }
        chars.into_iter().collect()
    }
}

fn upcase_at(chars: &mut [char], index: usize) {
    let mut upper = chars[index].to_uppercase();
    if let (Some(u), None) = (upper.next(), upper.next()) {
        chars[index] = u;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::find_bold_spans;

    fn reflow(text: &str) -> Vec<Paragraph> {
        reflow_stanza(text, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_zero_spans_is_identity() {
        let paragraphs = reflow("first line\nsecond line");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].runs, [Run::plain("first line")]);
        assert_eq!(paragraphs[1].runs, [Run::plain("second line")]);
    }

    #[test]
    fn test_span_within_line() {
        let paragraphs = reflow("sing <b>loud</b> now");
        assert_eq!(
            paragraphs[0].runs,
            [Run::plain("sing "), Run::bold("loud"), Run::plain(" now")]
        );
    }

    #[test]
    fn test_span_crossing_line_break() {
        let paragraphs = reflow("sing <b>loud\nand clear</b> now");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].runs, [Run::plain("sing "), Run::bold("loud")]);
        assert_eq!(paragraphs[1].runs, [Run::bold("and clear"), Run::plain(" now")]);

        let rendered: String = paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(rendered, "sing loud\nand clear now");
    }

    #[test]
    fn test_span_crossing_two_breaks() {
        let paragraphs = reflow("<b>one\ntwo\nthree</b>");
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].runs, [Run::bold("one")]);
        assert_eq!(paragraphs[1].runs, [Run::bold("two")]);
        assert_eq!(paragraphs[2].runs, [Run::bold("three")]);
    }

    #[test]
    fn test_span_ending_at_last_char_emits_no_empty_run() {
        let paragraphs = reflow("hold the <b>note</b>");
        assert_eq!(paragraphs[0].runs, [Run::plain("hold the "), Run::bold("note")]);
    }

    #[test]
    fn test_rebalance_is_pure() {
        let lines = vec!["a <b>b".to_string(), "c</b> d".to_string()];
        let spans = find_bold_spans("a <b>b\nc</b> d").unwrap();
        let rebalanced = rebalance_lines(&lines, &spans, &[6]);

        assert_eq!(lines[0], "a <b>b");
        assert_eq!(rebalanced[0], "a <b>b</b>");
        assert_eq!(rebalanced[1], "<b>c</b> d");
    }

    #[test]
    fn test_capitalize_first_char_and_labels() {
        let options = RenderOptions::new().with_capitalize(true);
        let paragraphs = reflow_stanza("r: sing it\nV: once more", &options).unwrap();
        // the first-char rule turns "r:" into a label the second rule then matches
        assert_eq!(paragraphs[0].plain_text(), "R: Sing it");
        assert_eq!(paragraphs[1].plain_text(), "V: Once more");
    }

    #[test]
    fn test_capitalize_skips_multichar_uppercase() {
        let options = RenderOptions::new().with_capitalize(true);
        let paragraphs = reflow_stanza("ßo it sounds", &options).unwrap();
        assert_eq!(paragraphs[0].plain_text(), "ßo it sounds");
    }

    #[test]
    fn test_capitalize_on_synthetic_continuation() {
        let options = RenderOptions::new().with_capitalize(true);
        let paragraphs = reflow_stanza("sing <b>loud\nand clear</b>", &options).unwrap();
        // the continuation starts with the injected marker, so the
        // first-char rule hits '<' and changes nothing
        assert_eq!(paragraphs[1].runs, [Run::bold("and clear")]);
    }

    #[test]
    fn test_empty_line_yields_empty_paragraph() {
        let options = RenderOptions::new().with_capitalize(true);
        let paragraphs = reflow_stanza("", &options).unwrap();
        assert_eq!(paragraphs.len(), 1);
        assert!(paragraphs[0].is_empty());
    }
}
