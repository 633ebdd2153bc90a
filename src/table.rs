//! Plain string matrix container.

use crate::rows::{Row, RowSink, RowSource};

/// Rows of string values.
///
/// Stores exactly what it is given; converting other types to strings is up
/// to the caller (see [`ValueTable`](crate::ValueTable) for that).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    rows: Vec<Row>,
}

impl StringTable {
    /// Create a new empty table.
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Returns true if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All rows, in order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Add a row with zero fields.
    pub fn add_empty_row(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Add a row holding a single value.
    pub fn add_value(&mut self, value: impl Into<String>) {
        self.rows.push(vec![value.into()]);
    }

    /// Add a row. An empty row is written as a blank line.
    pub fn add_row<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(values.into_iter().map(Into::into).collect());
    }

    /// Insert a row at `index`. An index past the end appends.
    pub fn insert_row(&mut self, index: usize, values: Row) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, values);
    }

    /// Replace the row at `index`. Returns false if there is no such row.
    pub fn replace_row(&mut self, index: usize, values: Row) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                *row = values;
                true
            }
            None => false,
        }
    }

    /// Remove and return the row at `index`, if it exists.
    pub fn remove_row(&mut self, index: usize) -> Option<Row> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Reserve space for at least `additional` more rows.
    pub fn reserve(&mut self, additional: usize) {
        self.rows.reserve(additional);
    }

    /// Values of row `index`; an out-of-range index gives an empty row.
    pub fn row_values(&self, index: usize) -> Row {
        self.rows.get(index).cloned().unwrap_or_default()
    }

    /// Remove all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl RowSource for StringTable {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn fields_of(&self, row: usize) -> Row {
        self.row_values(row)
    }
}

impl RowSink for StringTable {
    fn append(&mut self, row: Row) {
        self.rows.push(row);
    }
}

impl From<Vec<Row>> for StringTable {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl FromIterator<Row> for StringTable {
    fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for StringTable {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
