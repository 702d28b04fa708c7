//! Stanza splitting.

use crate::model::Stanza;

/// Split body lines into stanzas at blank lines.
///
/// Lines are trimmed; consecutive non-blank lines form one stanza joined
/// by `\n`. The final buffer is flushed unconditionally, so a body ending
/// on a blank line yields a trailing empty stanza. That empty stanza is
/// the only one the splitter ever produces; callers drop it rather than
/// treat it as an error.
pub fn split_stanzas(lines: &[&str]) -> Vec<Stanza> {
    let mut stanzas = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            if !buffer.is_empty() {
                stanzas.push(Stanza::new(buffer.join("\n")));
                buffer.clear();
            }
        } else {
            buffer.push(line);
        }
    }
    stanzas.push(Stanza::new(buffer.join("\n")));

    stanzas
}
