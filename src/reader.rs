//! Reading CSV data from files and readers.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::decode::{RowContinuation, TryRows};
use crate::error::{CsvError, Result};
use crate::grammar::Grammar;
use crate::rows::{Row, RowSink};
use crate::source::LineSource;

/// Receives rows one at a time while a source is being read.
pub trait RowProcessor {
    /// Called with every raw physical line before it is split. May edit the
    /// line in place.
    fn pre_process_line(&mut self, _line: &mut String) {}

    /// Called with every completed row. Return false to stop reading.
    fn process_row(&mut self, row: Row) -> bool;
}

/// Collects every row.
#[derive(Debug, Default)]
struct Collect {
    rows: Vec<Row>,
}

impl RowProcessor for Collect {
    fn process_row(&mut self, row: Row) -> bool {
        self.rows.push(row);
        true
    }
}

/// CSV reader configured with a [`Grammar`].
///
/// # Example
///
/// ```no_run
/// use csv_stitch::CsvReader;
///
/// let mut reader = CsvReader::new();
/// reader.separator(";").text_delimiter("'");
///
/// let rows = reader.read_path("data.csv").unwrap();
/// println!("{} rows", rows.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    grammar: Grammar,
}

impl CsvReader {
    /// Create a new reader for `,`-separated, `"`-quoted data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with the given grammar.
    pub fn with_grammar(grammar: Grammar) -> Self {
        Self { grammar }
    }

    /// Set the field separator.
    pub fn separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.grammar.separator = separator.into();
        self
    }

    /// Set the text delimiter. An empty string disables quoting.
    pub fn text_delimiter(&mut self, text_delimiter: impl Into<String>) -> &mut Self {
        self.grammar.text_delimiter = text_delimiter.into();
        self
    }

    /// The grammar in use.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Read every row of the file at `path`.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Row>> {
        let file = self.open(path.as_ref())?;
        self.read_reader(file)
    }

    /// Read every row from `reader`.
    pub fn read_reader<R: Read>(&self, reader: R) -> Result<Vec<Row>> {
        let mut collect = Collect::default();
        self.read_with(reader, &mut collect)?;
        Ok(collect.rows)
    }

    /// Read every row of the file at `path` into `sink`.
    pub fn read_path_into<P, S>(&self, path: P, sink: &mut S) -> Result<usize>
    where
        P: AsRef<Path>,
        S: RowSink + ?Sized,
    {
        let file = self.open(path.as_ref())?;
        self.read_into(file, sink)
    }

    /// Read every row from `reader` into `sink`.
    ///
    /// Rows are handed to the sink only after the whole source was read, so
    /// a failed read leaves the sink untouched. Returns the number of rows.
    pub fn read_into<R, S>(&self, reader: R, sink: &mut S) -> Result<usize>
    where
        R: Read,
        S: RowSink + ?Sized,
    {
        let rows = self.read_reader(reader)?;
        let count = rows.len();
        for row in rows {
            sink.append(row);
        }
        Ok(count)
    }

    /// Read the file at `path` and feed it to `processor`.
    pub fn read_path_with<P, F>(&self, path: P, processor: &mut F) -> Result<usize>
    where
        P: AsRef<Path>,
        F: RowProcessor + ?Sized,
    {
        let file = self.open(path.as_ref())?;
        self.read_with(file, processor)
    }

    /// Feed every row from `reader` to `processor`.
    ///
    /// Returns the number of rows processed, or [`CsvError::Aborted`] if the
    /// processor asked to stop.
    pub fn read_with<R, F>(&self, reader: R, processor: &mut F) -> Result<usize>
    where
        R: Read,
        F: RowProcessor + ?Sized,
    {
        self.grammar.validate()?;

        let mut lines = LineSource::new(BufReader::new(reader));
        let mut state = RowContinuation::new();
        let mut count = 0;
        while let Some(line) = lines.next() {
            let mut line = line?;
            processor.pre_process_line(&mut line);

            let (next, row) = state.advance(&line, &self.grammar);
            state = next;
            if let Some(row) = row {
                deliver(processor, row, &mut count, lines.lines_read())?;
            }
        }

        if let Some(row) = state.finish() {
            deliver(processor, row, &mut count, lines.lines_read())?;
        }

        Ok(count)
    }

    /// Lazily decode rows from a buffered reader.
    pub fn rows<R: BufRead>(&self, reader: R) -> Result<TryRows<LineSource<R>>> {
        self.grammar.validate()?;
        Ok(TryRows::new(LineSource::new(reader), self.grammar.clone()))
    }

    fn open(&self, path: &Path) -> Result<File> {
        // Check arguments before touching the filesystem
        self.grammar.validate()?;
        tracing::debug!(path = %path.display(), grammar = %self.grammar, "opening csv file");
        Ok(File::open(path)?)
    }
}

fn deliver<F: RowProcessor + ?Sized>(
    processor: &mut F,
    row: Row,
    count: &mut usize,
    line: usize,
) -> Result<()> {
    if !processor.process_row(row) {
        tracing::debug!(row = *count, line, "processor stopped reading");
        return Err(CsvError::Aborted { row: *count });
    }
    *count += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_builder() {
        let mut reader = CsvReader::new();
        reader.separator(";").text_delimiter("'");

        assert_eq!(reader.grammar(), &Grammar::new(";", "'"));
    }

    #[test]
    fn test_read_reader() {
        let data = "one,two,\"three, four\",five\n\"this, is, one, element\"\nsix,seven,eight\n";
        let rows = CsvReader::new().read_reader(Cursor::new(data)).unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["one", "two", "three, four", "five"],
                vec!["this, is, one, element"],
                vec!["six", "seven", "eight"],
            ]
        );
    }

    #[test]
    fn test_read_rejects_empty_separator() {
        let mut reader = CsvReader::new();
        reader.separator("");
        assert!(matches!(
            reader.read_reader(Cursor::new("a,b")),
            Err(CsvError::InvalidConfig(_))
        ));
    }

    struct Upper {
        seen: Vec<Row>,
        limit: usize,
    }

    impl RowProcessor for Upper {
        fn pre_process_line(&mut self, line: &mut String) {
            *line = line.to_uppercase();
        }

        fn process_row(&mut self, row: Row) -> bool {
            self.seen.push(row);
            self.seen.len() < self.limit
        }
    }

    #[test]
    fn test_processor_pre_process() {
        let mut processor = Upper { seen: Vec::new(), limit: 10 };
        let count = CsvReader::new()
            .read_with(Cursor::new("a,b\nc\n"), &mut processor)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(processor.seen, vec![vec!["A", "B"], vec!["C"]]);
    }

    #[test]
    fn test_processor_abort() {
        let mut processor = Upper { seen: Vec::new(), limit: 1 };
        let result = CsvReader::new().read_with(Cursor::new("a\nb\nc\n"), &mut processor);
        assert!(matches!(result, Err(CsvError::Aborted { row: 0 })));
        assert_eq!(processor.seen.len(), 1);
    }

    #[test]
    fn test_read_into_sink() {
        let mut sink: Vec<Row> = Vec::new();
        let count = CsvReader::new()
            .read_into(Cursor::new("x,y\n\nz"), &mut sink)
            .unwrap();
        assert_eq!(count, 3);
        assert_eq!(sink, vec![vec!["x".to_string(), "y".to_string()], vec![], vec!["z".to_string()]]);
    }

    #[test]
    fn test_lazy_rows() {
        let reader = CsvReader::new();
        let mut rows = reader.rows(Cursor::new("\"multi\nline\",x\nlast")).unwrap();
        assert_eq!(rows.next().unwrap().unwrap(), vec!["multi\nline", "x"]);
        assert_eq!(rows.next().unwrap().unwrap(), vec!["last"]);
        assert!(rows.next().is_none());
    }
}
