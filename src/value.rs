//! Loosely typed container that stringifies on read.

use std::fmt;

use crate::rows::{Row, RowSink, RowSource};

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing value, written as an empty field.
    #[default]
    Null,
    /// Boolean, written as `true` or `false`.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Text, written as-is.
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this value is numeric.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Rows of [`Value`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTable {
    rows: Vec<Vec<Value>>,
}

impl ValueTable {
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

    /// Add a row with zero fields.
    pub fn add_empty_row(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Add a row holding a single value.
    pub fn add_value(&mut self, value: impl Into<Value>) {
        self.rows.push(vec![value.into()]);
    }

    /// Add a row of typed values.
    pub fn add_values<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rows.push(values.into_iter().map(Into::into).collect());
    }

    /// Add a row of strings, stored as text values.
    pub fn add_row(&mut self, values: Row) {
        self.rows.push(values.into_iter().map(Value::Text).collect());
    }

    /// Insert a row at `index`. An index past the end appends.
    pub fn insert_row(&mut self, index: usize, values: Vec<Value>) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, values);
    }

    /// Replace the row at `index`. Returns false if there is no such row.
    pub fn replace_row(&mut self, index: usize, values: Vec<Value>) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                *row = values;
                true
            }
            None => false,
        }
    }

    /// Remove and return the row at `index`, if it exists.
    pub fn remove_row(&mut self, index: usize) -> Option<Vec<Value>> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Reserve space for at least `additional` more rows.
    pub fn reserve(&mut self, additional: usize) {
        self.rows.reserve(additional);
    }

    /// Typed values of row `index`.
    pub fn values(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Values of row `index` as strings; an out-of-range index gives an
    /// empty row.
    pub fn row_values(&self, index: usize) -> Row {
        self.rows
            .get(index)
            .map(|row| row.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Remove all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl RowSource for ValueTable {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn fields_of(&self, row: usize) -> Row {
        self.row_values(row)
    }
}

impl RowSink for ValueTable {
    fn append(&mut self, row: Row) {
        self.add_row(row);
    }
}
