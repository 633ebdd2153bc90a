use crate::error::{CsvError, Result};
use std::fmt;

/// Separator and text delimiter shared by the decoder and the encoder.
///
/// Both strings may be longer than one character. An empty text delimiter
/// disables quoting on the read side: nothing is ever stripped or unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grammar {
    /// String dividing fields within a row. Never empty once validated.
    pub separator: String,
    /// String enclosing a field so it can hold separators and newlines.
    pub text_delimiter: String,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            text_delimiter: "\"".to_string(),
        }
    }
}

impl Grammar {
    /// Create a new Grammar.
    pub fn new(separator: impl Into<String>, text_delimiter: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            text_delimiter: text_delimiter.into(),
        }
    }

    /// Create a Grammar that never quotes.
    pub fn unquoted(separator: impl Into<String>) -> Self {
        Self::new(separator, "")
    }

    /// Returns true if a text delimiter is configured.
    #[inline]
    pub fn is_quoted(&self) -> bool {
        !self.text_delimiter.is_empty()
    }

    /// Reject a grammar the codec cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            tracing::warn!("rejecting grammar with an empty separator");
            return Err(CsvError::InvalidConfig(
                "separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The delimiter followed by the separator, the marker of a field that
    /// closes in the middle of a line.
    pub(crate) fn field_end_marker(&self) -> String {
        let mut marker = String::with_capacity(self.text_delimiter.len() + self.separator.len());
        marker.push_str(&self.text_delimiter);
        marker.push_str(&self.separator);
        marker
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_quoted() {
            write!(f, "sep={:?} quote={:?}", self.separator, self.text_delimiter)
        } else {
            write!(f, "sep={:?} quote=none", self.separator)
        }
    }
}
