//! Writing rows to files and streams.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::encoder::{Chunks, encode};
use crate::error::Result;
use crate::grammar::Grammar;
use crate::options::{DEFAULT_CHUNK_SIZE, Quoting, WriteMode};
use crate::rows::{Row, RowSource};

/// CSV writer.
///
/// # Example
///
/// ```no_run
/// use csv_stitch::{CsvWriter, WriteMode};
///
/// let rows = vec![vec!["1".to_string(), "2".to_string()]];
///
/// let mut writer = CsvWriter::new();
/// writer
///     .header(["a", "b"])
///     .mode(WriteMode::Append)
///     .chunk_size(500);
///
/// writer.write_path("out.csv", &rows).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CsvWriter {
    grammar: Grammar,
    mode: WriteMode,
    quoting: Quoting,
    chunk_size: usize,
    header: Row,
    footer: Row,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvWriter {
    /// Create a writer with default settings: `,` separator, `"` delimiter,
    /// rewrite mode, necessary quoting.
    pub fn new() -> Self {
        Self {
            grammar: Grammar::default(),
            mode: WriteMode::default(),
            quoting: Quoting::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            header: Vec::new(),
            footer: Vec::new(),
        }
    }

    /// Create a writer with the given grammar.
    pub fn with_grammar(grammar: Grammar) -> Self {
        Self {
            grammar,
            ..Self::new()
        }
    }

    /// Set the field separator.
    pub fn separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.grammar.separator = separator.into();
        self
    }

    /// Set the text delimiter. An empty string writes fields unquoted unless
    /// they contain the separator or a line break.
    pub fn text_delimiter(&mut self, text_delimiter: impl Into<String>) -> &mut Self {
        self.grammar.text_delimiter = text_delimiter.into();
        self
    }

    /// Set the write mode for [`CsvWriter::write_path`].
    pub fn mode(&mut self, mode: WriteMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Set the quoting policy.
    pub fn quoting(&mut self, quoting: Quoting) -> &mut Self {
        self.quoting = quoting;
        self
    }

    /// Set how many rows are encoded and written at a time.
    pub fn chunk_size(&mut self, chunk_size: usize) -> &mut Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Row written before the data. Empty means no header.
    pub fn header<I, S>(&mut self, header: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = header.into_iter().map(Into::into).collect();
        self
    }

    /// Row written after the data. Empty means no footer.
    pub fn footer<I, S>(&mut self, footer: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.footer = footer.into_iter().map(Into::into).collect();
        self
    }

    /// The grammar in use.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Encoded chunks for `rows` with this writer's settings.
    pub fn chunks<'a, S: RowSource + ?Sized>(&self, rows: &'a S) -> Result<Chunks<'a, S>> {
        Ok(encode(rows, &self.header, &self.footer, &self.grammar, self.chunk_size)?
            .quoting(self.quoting))
    }

    /// Encode `rows` into a single string.
    pub fn to_text<S: RowSource + ?Sized>(&self, rows: &S) -> Result<String> {
        Ok(self.chunks(rows)?.collect())
    }

    /// Write `rows` to `out`, flushing after every chunk. Returns the number
    /// of chunks written.
    pub fn write_to<W, S>(&self, out: &mut W, rows: &S) -> Result<usize>
    where
        W: Write + ?Sized,
        S: RowSource + ?Sized,
    {
        let chunks = self.chunks(rows)?;
        write_chunks(out, chunks)
    }

    /// Write `rows` to the file at `path` according to the write mode.
    pub fn write_path<P, S>(&self, path: P, rows: &S) -> Result<()>
    where
        P: AsRef<Path>,
        S: RowSource + ?Sized,
    {
        let path = path.as_ref();
        // Configuration errors surface before the destination is touched
        let chunks = self.chunks(rows)?;

        match self.mode {
            WriteMode::Append => {
                tracing::debug!(path = %path.display(), "appending csv rows");
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                write_chunks(&mut file, chunks)?;
            }
            WriteMode::Rewrite => {
                tracing::debug!(path = %path.display(), "rewriting csv file");
                rewrite_atomically(path, |file| write_chunks(file, chunks).map(|_| ()))?;
            }
        }

        Ok(())
    }
}

fn write_chunks<W, S>(out: &mut W, chunks: Chunks<'_, S>) -> Result<usize>
where
    W: Write + ?Sized,
    S: RowSource + ?Sized,
{
    let mut written = 0;
    for chunk in chunks {
        out.write_all(chunk.as_bytes())?;
        out.flush()?;
        written += 1;
    }
    Ok(written)
}

/// Replace the file at `path` with whatever `write` produces.
///
/// The content goes to a temporary file in the same directory first, which
/// is then renamed over `path`. If `write` fails, or the rename does, the
/// temporary file is removed and `path` is left as it was.
pub fn rewrite_atomically<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> Result<()>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    if let Err(e) = write(temp.as_file_mut()) {
        tracing::warn!(path = %path.display(), error = %e, "rewrite failed, destination untouched");
        return Err(e);
    }
    temp.as_file_mut().sync_all()?;
    temp.persist(path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsvError;

    fn sample() -> Vec<Row> {
        vec![
            vec!["one".to_string(), "two".to_string()],
            vec!["a,b".to_string(), "c".to_string()],
        ]
    }

    #[test]
    fn test_writer_builder() {
        let mut writer = CsvWriter::new();
        writer
            .separator(";")
            .text_delimiter("'")
            .mode(WriteMode::Append)
            .quoting(Quoting::Always)
            .chunk_size(7)
            .header(["h"])
            .footer(["f"]);

        assert_eq!(writer.grammar(), &Grammar::new(";", "'"));
        assert_eq!(writer.mode, WriteMode::Append);
        assert_eq!(writer.chunk_size, 7);
        assert_eq!(writer.header, vec!["h"]);
        assert_eq!(writer.footer, vec!["f"]);
    }

    #[test]
    fn test_to_text() {
        let text = CsvWriter::new().to_text(&sample()).unwrap();
        assert_eq!(text, "one,two\n\"a,b\",c\n");
    }

    #[test]
    fn test_to_text_always_quoted_with_header() {
        let mut writer = CsvWriter::new();
        writer.quoting(Quoting::Always).header(["x", "y"]);
        let text = writer.to_text(&sample()).unwrap();
        assert_eq!(text, "\"x\",\"y\"\n\"one\",\"two\"\n\"a,b\",\"c\"\n");
    }

    #[test]
    fn test_write_to_counts_chunks() {
        let mut writer = CsvWriter::new();
        writer.chunk_size(1).footer(["end"]);
        let mut out = Vec::new();
        let chunks = writer.write_to(&mut out, &sample()).unwrap();
        assert_eq!(chunks, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "one,two\n\"a,b\",c\nend\n");
    }

    #[test]
    fn test_write_to_rejects_bad_config() {
        let mut writer = CsvWriter::new();
        writer.chunk_size(0);
        let mut out = Vec::new();
        assert!(matches!(
            writer.write_to(&mut out, &sample()),
            Err(CsvError::InvalidConfig(_))
        ));
        assert!(out.is_empty());
    }
}
