//! Encoding rows into chunks of CSV text.

use std::iter::FusedIterator;

use crate::error::{CsvError, Result};
use crate::grammar::Grammar;
use crate::options::Quoting;
use crate::rows::RowSource;

/// Quote used when no text delimiter is configured but a field still needs
/// one to read back as a single field.
const FALLBACK_QUOTE: &str = "\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Nothing emitted yet; the header goes first.
    Start,
    /// Index of the next data row.
    Rows(usize),
    Done,
}

/// Lazy chunks of encoded text.
///
/// Produced by [`encode`]. Each chunk holds at most `chunk_size` rows, header
/// and footer included. Once exhausted it keeps returning `None` until
/// [`Chunks::rewind`] is called.
#[derive(Debug)]
pub struct Chunks<'a, S: RowSource + ?Sized> {
    source: &'a S,
    header: Vec<String>,
    footer: Vec<String>,
    grammar: Grammar,
    quoting: Quoting,
    chunk_size: usize,
    stage: Stage,
}

impl<'a, S: RowSource + ?Sized> Chunks<'a, S> {
    /// Set the quoting policy.
    pub fn quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    /// Start over from the header.
    pub fn rewind(&mut self) {
        self.stage = Stage::Start;
    }

    /// Returns true once every chunk has been produced.
    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    fn push_row(&self, chunk: &mut String, fields: &[String]) {
        compose_row_into(chunk, fields, &self.grammar, self.quoting);
    }
}

impl<S: RowSource + ?Sized> Iterator for Chunks<'_, S> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut chunk = String::new();
        let mut rows = 0;

        if self.stage == Stage::Start {
            if !self.header.is_empty() {
                self.push_row(&mut chunk, &self.header);
                rows += 1;
            }
            self.stage = Stage::Rows(0);
        }

        let Stage::Rows(mut next_row) = self.stage else {
            return None;
        };

        let total = self.source.row_count();
        while rows < self.chunk_size && next_row < total {
            let fields = self.source.fields_of(next_row);
            self.push_row(&mut chunk, &fields);
            next_row += 1;
            rows += 1;
        }
        self.stage = Stage::Rows(next_row);

        // Room left means the data rows are exhausted
        if rows < self.chunk_size {
            if !self.footer.is_empty() {
                self.push_row(&mut chunk, &self.footer);
            }
            self.stage = Stage::Done;
        }

        if chunk.is_empty() { None } else { Some(chunk) }
    }
}

impl<S: RowSource + ?Sized> FusedIterator for Chunks<'_, S> {}

/// Encode rows as CSV text, `chunk_size` rows per chunk.
///
/// Chunks come in order: header (if non-empty), data rows, footer (if
/// non-empty). Fails with [`CsvError::InvalidConfig`] on an empty separator
/// or a zero chunk size.
///
/// # Example
///
/// ```
/// use csv_stitch::{encode, Grammar};
///
/// let rows = vec![
///     vec!["one".to_string(), "two".to_string()],
///     vec!["a,b".to_string(), "c".to_string()],
/// ];
/// let none: [&str; 0] = [];
/// let text: String = encode(&rows, &none, &none, &Grammar::default(), 10)
///     .unwrap()
///     .collect();
/// assert_eq!(text, "one,two\n\"a,b\",c\n");
/// ```
pub fn encode<'a, S, H, F>(
    rows: &'a S,
    header: &[H],
    footer: &[F],
    grammar: &Grammar,
    chunk_size: usize,
) -> Result<Chunks<'a, S>>
where
    S: RowSource + ?Sized,
    H: AsRef<str>,
    F: AsRef<str>,
{
    grammar.validate()?;
    if chunk_size == 0 {
        tracing::warn!("rejecting zero chunk size");
        return Err(CsvError::InvalidConfig(
            "chunk size must be greater than zero".to_string(),
        ));
    }

    Ok(Chunks {
        source: rows,
        header: header.iter().map(|s| s.as_ref().to_string()).collect(),
        footer: footer.iter().map(|s| s.as_ref().to_string()).collect(),
        grammar: grammar.clone(),
        quoting: Quoting::default(),
        chunk_size,
        stage: Stage::Start,
    })
}

/// Compose one row, terminated by `\n`.
pub fn compose_row<T: AsRef<str>>(fields: &[T], grammar: &Grammar, quoting: Quoting) -> String {
    let mut out = String::new();
    compose_row_into(&mut out, fields, grammar, quoting);
    out
}

fn compose_row_into<T: AsRef<str>>(
    out: &mut String,
    fields: &[T],
    grammar: &Grammar,
    quoting: Quoting,
) {
    // A lone empty field would otherwise read back as a blank line
    let lone = fields.len() == 1;

    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(&grammar.separator);
        }
        push_field(out, field.as_ref(), grammar, quoting, lone);
    }
    out.push('\n');
}

fn push_field(out: &mut String, field: &str, grammar: &Grammar, quoting: Quoting, lone: bool) {
    let has_break = field.contains(['\r', '\n']);

    if !grammar.is_quoted() {
        if has_break || field.contains(grammar.separator.as_str()) {
            push_quoted(out, field, FALLBACK_QUOTE);
        } else {
            out.push_str(field);
        }
        return;
    }

    let delimiter = grammar.text_delimiter.as_str();
    let needs_quotes = quoting.is_always()
        || has_break
        || field.contains(grammar.separator.as_str())
        || field.contains(delimiter)
        || runs_into(field, &grammar.separator)
        || has_padding(field)
        || (lone && field.is_empty());

    if needs_quotes {
        push_quoted(out, field, delimiter);
    } else {
        out.push_str(field);
    }
}

/// Whether `field` ends with a proper prefix of `separator`, so the separator
/// written after it would be found too early.
fn runs_into(field: &str, separator: &str) -> bool {
    let (field, separator) = (field.as_bytes(), separator.as_bytes());
    (1..separator.len()).any(|len| field.ends_with(&separator[..len]))
}

/// Unquoted fields are trimmed on read.
fn has_padding(field: &str) -> bool {
    field.starts_with(char::is_whitespace) || field.ends_with(char::is_whitespace)
}

/// Wrap `field` in `quote`, doubling every occurrence inside it.
fn push_quoted(out: &mut String, field: &str, quote: &str) {
    out.push_str(quote);
    out.push_str(&field.replace(quote, &quote.repeat(2)));
    out.push_str(quote);
}
