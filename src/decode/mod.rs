//! Decoding physical lines into rows.
//!
//! [`decode`] drives a [`RowContinuation`] over any sequence of lines and
//! yields rows lazily: one row per completed logical row, pulling only as many
//! lines as that row needs.

pub mod continuation;
pub mod split;

use std::iter::FusedIterator;

use crate::error::Result;
use crate::grammar::Grammar;
use crate::rows::Row;
pub use continuation::RowContinuation;

/// Lazy rows decoded from an infallible line source.
#[derive(Debug, Clone)]
pub struct Rows<I> {
    lines: I,
    grammar: Grammar,
    /// `None` once the source is exhausted and the final row delivered.
    state: Option<RowContinuation>,
}

impl<I> Rows<I> {
    fn new(lines: I, grammar: Grammar) -> Self {
        Self {
            lines,
            grammar,
            state: Some(RowContinuation::new()),
        }
    }
}

impl<I, L> Iterator for Rows<I>
where
    I: Iterator<Item = L>,
    L: AsRef<str>,
{
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        loop {
            let state = self.state.take()?;
            let Some(line) = self.lines.next() else {
                return state.finish();
            };

            let (next, row) = state.advance(line.as_ref(), &self.grammar);
            self.state = Some(next);
            if row.is_some() {
                return row;
            }
        }
    }
}

impl<I, L> FusedIterator for Rows<I>
where
    I: Iterator<Item = L>,
    L: AsRef<str>,
{
}

/// Lazy rows decoded from a line source that can fail, such as a file.
///
/// The first error ends the sequence.
#[derive(Debug)]
pub struct TryRows<I> {
    lines: I,
    grammar: Grammar,
    state: Option<RowContinuation>,
}

impl<I> TryRows<I> {
    pub(crate) fn new(lines: I, grammar: Grammar) -> Self {
        Self {
            lines,
            grammar,
            state: Some(RowContinuation::new()),
        }
    }
}

impl<I> Iterator for TryRows<I>
where
    I: Iterator<Item = Result<String>>,
{
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Result<Row>> {
        loop {
            let state = self.state.take()?;
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Some(Err(e)),
                None => return state.finish().map(Ok),
            };

            let (next, row) = state.advance(&line, &self.grammar);
            self.state = Some(next);
            if let Some(row) = row {
                return Some(Ok(row));
            }
        }
    }
}

impl<I> FusedIterator for TryRows<I> where I: Iterator<Item = Result<String>> {}

/// Decode a sequence of physical lines (without line terminators).
///
/// Fails with [`CsvError::InvalidConfig`](crate::CsvError::InvalidConfig)
/// before pulling any line if the separator is empty.
///
/// # Example
///
/// ```
/// use csv_stitch::{decode, Grammar};
///
/// let lines = ["one,\"two", "lines\",three"];
/// let rows: Vec<_> = decode(lines, &Grammar::default()).unwrap().collect();
/// assert_eq!(rows, vec![vec!["one", "two\nlines", "three"]]);
/// ```
pub fn decode<I>(lines: I, grammar: &Grammar) -> Result<Rows<I::IntoIter>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    grammar.validate()?;
    Ok(Rows::new(lines.into_iter(), grammar.clone()))
}

/// Decode CSV text held in memory. Both `\n` and `\r\n` line breaks are
/// accepted.
pub fn decode_str(text: &str, grammar: &Grammar) -> Result<Vec<Row>> {
    Ok(decode(text.lines(), grammar)?.collect())
}
