//! Row storage capabilities used by the codec.

/// One logical row: an ordered sequence of field values.
pub type Row = Vec<String>;

/// Read access to rows for the encoder.
///
/// `fields_of` must return the same values every time it is called for the
/// same index while the source is being encoded.
pub trait RowSource {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Field values of row `row`, as strings.
    fn fields_of(&self, row: usize) -> Row;

    /// Returns true if there are no rows.
    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// Write access for collecting decoded rows.
pub trait RowSink {
    /// Add a row after the existing ones.
    fn append(&mut self, row: Row);
}

impl RowSource for [Row] {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn fields_of(&self, row: usize) -> Row {
        self.get(row).cloned().unwrap_or_default()
    }
}

impl RowSource for Vec<Row> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn fields_of(&self, row: usize) -> Row {
        self.as_slice().fields_of(row)
    }
}

impl RowSink for Vec<Row> {
    fn append(&mut self, row: Row) {
        self.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_source() {
        let rows: Vec<Row> = vec![vec!["a".into(), "b".into()], vec![]];
        assert_eq!(rows.row_count(), 2);
        assert_eq!(rows.fields_of(0), vec!["a", "b"]);
        assert!(rows.fields_of(1).is_empty());
        assert!(rows.fields_of(7).is_empty());
        assert!(!RowSource::is_empty(&rows));
    }

    #[test]
    fn test_vec_sink() {
        let mut rows: Vec<Row> = Vec::new();
        // Vec::append is an inherent method, so call the trait explicitly
        RowSink::append(&mut rows, vec!["x".into()]);
        assert_eq!(rows, vec![vec!["x"]]);
    }
}
