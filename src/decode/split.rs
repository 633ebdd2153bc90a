//! Splitting one physical line into field pieces.
//!
//! A quoted field closes where the delimiter is followed by the separator, or
//! at the end of the line, but only when the contiguous run of delimiters
//! ending there has odd length: the pairs are escaped delimiters and the
//! remaining one closes the field.

use crate::grammar::Grammar;

/// Where an open quoted field ends on the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closing {
    /// Closing delimiter starts at this byte offset and a separator follows.
    Middle(usize),
    /// The line ends with the closing delimiter.
    LineEnd,
    /// The field continues on the next line.
    Open,
}

/// Split `line` into field pieces.
///
/// `ended` is false when a quoted field opened on an earlier line is still
/// open. Returns the pieces found and whether every field is closed at the
/// end of this line. Pieces that continue an open field start with `\n`.
pub fn split_line(line: &str, grammar: &Grammar, ended: bool) -> (Vec<String>, bool) {
    // Without a delimiter no field can stay open.
    let mut ended = ended || !grammar.is_quoted();

    if line.is_empty() {
        return if ended {
            (Vec::new(), true)
        } else {
            (vec!["\n".to_string()], false)
        };
    }

    let delimiter = grammar.text_delimiter.as_str();
    let separator = grammar.separator.as_str();
    let marker = grammar.field_end_marker();
    let mut fields = Vec::new();
    let mut pos = 0;

    if !ended {
        match find_closing(line, 0, delimiter, &marker) {
            Closing::Middle(end) => {
                fields.push(continued(&line[..end], delimiter));
                ended = true;
                pos = end + marker.len();
                if pos == line.len() {
                    fields.push(String::new());
                }
            }
            Closing::LineEnd => {
                fields.push(continued(&line[..line.len() - delimiter.len()], delimiter));
                return (fields, true);
            }
            Closing::Open => {
                fields.push(continued(line, delimiter));
                return (fields, false);
            }
        }
    }

    while pos < line.len() {
        let rest = &line[pos..];

        if grammar.is_quoted() && rest.starts_with(delimiter) {
            let start = pos + delimiter.len();
            match find_closing(line, start, delimiter, &marker) {
                Closing::Middle(end) => {
                    fields.push(unescape(&line[start..end], delimiter));
                    pos = end + marker.len();
                    if pos == line.len() {
                        fields.push(String::new());
                    }
                }
                Closing::LineEnd => {
                    fields.push(unescape(&line[start..line.len() - delimiter.len()], delimiter));
                    break;
                }
                Closing::Open => {
                    fields.push(unescape(&line[start..], delimiter));
                    ended = false;
                    break;
                }
            }
            continue;
        }

        match rest.find(separator) {
            Some(offset) => {
                let end = pos + offset;
                fields.push(normalize_unquoted(&line[pos..end], delimiter));
                pos = end + separator.len();

                // A separator at the very end leaves one empty field behind it
                if pos == line.len() {
                    fields.push(String::new());
                }
            }
            None => {
                fields.push(normalize_unquoted(rest, delimiter));
                break;
            }
        }
    }

    (fields, ended)
}

/// Find where a quoted field whose content starts at `start` closes.
fn find_closing(line: &str, start: usize, delimiter: &str, marker: &str) -> Closing {
    if let Some(end) = find_middle_end(line, start, delimiter, marker) {
        Closing::Middle(end)
    } else if closes_at_line_end(line, start, delimiter) {
        Closing::LineEnd
    } else {
        Closing::Open
    }
}

/// Offset of the first genuine `delimiter + separator` at or after `start`.
fn find_middle_end(line: &str, start: usize, delimiter: &str, marker: &str) -> Option<usize> {
    let mut from = start;
    while from < line.len() {
        let found = from + line[from..].find(marker)?;
        if delimiter_run(line, start, found, delimiter) % 2 == 1 {
            return Some(found);
        }
        // Even run: escaped delimiters followed by a literal separator
        from = found + marker.len();
    }
    None
}

/// Whether the line ends with an odd run of delimiters inside the field.
fn closes_at_line_end(line: &str, start: usize, delimiter: &str) -> bool {
    match line.len().checked_sub(delimiter.len()) {
        Some(last) if last >= start => delimiter_run(line, start, last, delimiter) % 2 == 1,
        _ => false,
    }
}

/// Count delimiter occurrences that stand together ending with the one at
/// `last`, walking backward without crossing `start`.
pub(crate) fn delimiter_run(line: &str, start: usize, last: usize, delimiter: &str) -> usize {
    if delimiter.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut at = Some(last);
    while let Some(i) = at {
        if i < start || line.get(i..i + delimiter.len()) != Some(delimiter) {
            break;
        }
        count += 1;
        at = i.checked_sub(delimiter.len());
    }
    count
}

/// Collapse doubled delimiters inside quoted content.
fn unescape(content: &str, delimiter: &str) -> String {
    if delimiter.is_empty() {
        return content.to_string();
    }
    let doubled = delimiter.repeat(2);
    content.replace(&doubled, delimiter)
}

fn continued(content: &str, delimiter: &str) -> String {
    let mut piece = String::with_capacity(content.len() + 1);
    piece.push('\n');
    piece.push_str(&unescape(content, delimiter));
    piece
}

/// Unquoted fields lose surrounding whitespace. A quoted value padded with
/// whitespace (` "a" `) is also unquoted.
fn normalize_unquoted(field: &str, delimiter: &str) -> String {
    let trimmed = field.trim();
    if !delimiter.is_empty()
        && trimmed.len() >= 2 * delimiter.len()
        && trimmed.starts_with(delimiter)
        && trimmed.ends_with(delimiter)
    {
        let inner = &trimmed[delimiter.len()..trimmed.len() - delimiter.len()];
        return unescape(inner, delimiter);
    }

    trimmed.to_string()
}
