//! Bold-span resolution.
//!
//! `<b>` and `</b>` markers are located independently and paired by
//! position: the i-th opening belongs to the i-th closing. Nesting is
//! not part of the markup language, so positional pairing plus the
//! ordering checks below fully validate a text.

use crate::error::{Error, Result};
use crate::model::Span;

const OPEN_MARKER: [char; 3] = ['<', 'b', '>'];
const CLOSE_MARKER: [char; 4] = ['<', '/', 'b', '>'];

/// Resolve all bold spans in a text.
///
/// Offsets are character positions from the start of `text`. Errors:
/// unbalanced marker counts, a closing marker at or before its opening,
/// or marker positions that are not strictly increasing overall
/// (overlapping spans).
pub fn find_bold_spans(text: &str) -> Result<Vec<Span>> {
    let chars: Vec<char> = text.chars().collect();
    find_bold_spans_in_chars(&chars)
}

/// Resolve bold spans over an already char-split text.
pub(crate) fn find_bold_spans_in_chars(chars: &[char]) -> Result<Vec<Span>> {
    let opens = find_all(chars, &OPEN_MARKER);
    let closes = find_all(chars, &CLOSE_MARKER);

    if opens.len() != closes.len() {
        return Err(Error::TagCountMismatch {
            open: opens.len(),
            close: closes.len(),
        });
    }

    let mut offsets = Vec::with_capacity(opens.len() * 2);
    for (&start, &end) in opens.iter().zip(&closes) {
        offsets.push(start);
        offsets.push(end);
    }

    // strict ascent of the flattened offsets rules out inverted pairs
    // and overlapping spans in one pass
    if offsets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::UnorderedMarkers { offsets });
    }

    Ok(opens
        .into_iter()
        .zip(closes)
        .map(|(start, end)| Span::new(start, end))
        .collect())
}

/// Find the start offsets of all non-overlapping occurrences of `pattern`.
fn find_all(chars: &[char], pattern: &[char]) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut i = 0;
    while i + pattern.len() <= chars.len() {
        if &chars[i..i + pattern.len()] == pattern {
            positions.push(i);
            i += pattern.len();
        } else {
            i += 1;
        }
    }
    positions
}
