//! csv-stitch: CSV codec with multi-character separators and quotes
//!
//! Reads and writes CSV text where both the field separator and the text
//! delimiter may be arbitrary strings. Quoted fields can hold separators,
//! doubled delimiters and line breaks, and a field may span several physical
//! lines; the decoder stitches those back into one value.
//!
//! # Quick Start
//!
//! ```no_run
//! use csv_stitch::{CsvReader, CsvWriter, StringTable};
//!
//! // Read a file into a table
//! let mut table = StringTable::new();
//! CsvReader::new().read_path_into("in.csv", &mut table).unwrap();
//!
//! // Write it back with a different separator
//! let mut writer = CsvWriter::new();
//! writer.separator(";").header(["id", "name"]);
//! writer.write_path("out.csv", &table).unwrap();
//! ```
//!
//! # Decoding and encoding without files
//!
//! ```
//! use csv_stitch::{decode_str, CsvWriter, Grammar};
//!
//! let rows = vec![
//!     vec!["one".to_string(), "two".to_string()],
//!     vec!["a,b".to_string(), "c".to_string()],
//! ];
//!
//! let text = CsvWriter::new().to_text(&rows).unwrap();
//! assert_eq!(text, "one,two\n\"a,b\",c\n");
//!
//! assert_eq!(decode_str(&text, &Grammar::default()).unwrap(), rows);
//! ```
//!
//! # Field boundaries
//!
//! A quoted field ends at a delimiter followed by the separator, or at a
//! delimiter at the end of the line, only when the run of delimiters there
//! has odd length. `"a""",b` is the two fields `a"` and `b`; `"a"",b` is one
//! field that is still open at the end of the line.

pub mod decode;
mod encoder;
mod error;
mod grammar;
mod options;
mod reader;
mod rows;
mod source;
mod table;
mod value;
mod writer;

pub use decode::{RowContinuation, Rows, TryRows, decode, decode_str};
pub use encoder::{Chunks, compose_row, encode};
pub use error::{CsvError, Result};
pub use grammar::Grammar;
pub use options::{DEFAULT_CHUNK_SIZE, Quoting, WriteMode};
pub use reader::{CsvReader, RowProcessor};
pub use rows::{Row, RowSink, RowSource};
pub use source::{LineSource, has_utf8_bom, skip_bom};
pub use table::StringTable;
pub use value::{Value, ValueTable};
pub use writer::{CsvWriter, rewrite_atomically};
