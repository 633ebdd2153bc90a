/// How the writer treats an existing destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Replace the destination atomically through a temporary file.
    #[default]
    Rewrite,
    /// Append to the end of the destination, creating it if missing.
    Append,
}

impl WriteMode {
    /// Returns true if existing content is kept.
    pub fn is_append(&self) -> bool {
        matches!(self, WriteMode::Append)
    }
}

/// Which fields the encoder wraps in the text delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Wrap every field.
    Always,
    /// Wrap only fields that would not read back unchanged otherwise.
    #[default]
    Necessary,
}

impl Quoting {
    /// Returns true if every field is wrapped.
    pub fn is_always(&self) -> bool {
        matches!(self, Quoting::Always)
    }
}

/// Default number of rows per encoded chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
