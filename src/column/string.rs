//! Non-null string column storage.
//!
//! String cells in a default frame are never empty: every write path through
//! [`StringColumn`] coerces an empty input to the literal `"n/a"`. This
//! coercion is the only source of a string sentinel in the crate; nothing
//! else invents one.

use crate::{
    Error,
    Result,
};

/// The sentinel stored in place of an empty string in non-null columns.
pub const STRING_PLACEHOLDER: &str = "n/a";

fn coerce(value: String) -> String {
    if value.is_empty() {
        STRING_PLACEHOLDER.to_string()
    } else {
        value
    }
}

/// A resizable string vector backing one non-null column.
///
/// Mirrors the structural contract of
/// [`ValueColumn`](super::primitive::ValueColumn); see there for the
/// `capacity`/`next` discipline.
#[derive(Debug, Clone, PartialEq)]
pub struct StringColumn {
    data: Vec<String>,
}

impl StringColumn {
    /// Creates an empty column with capacity 0.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates a column of `len` placeholder elements.
    pub fn with_length(len: usize) -> Self {
        Self { data: vec![STRING_PLACEHOLDER.to_string(); len] }
    }

    /// Creates a column from existing values, coercing empty strings.
    pub fn from_values(values: Vec<String>) -> Self {
        Self { data: values.into_iter().map(coerce).collect() }
    }

    /// Returns the string at `index`.
    pub fn get(&self, index: usize) -> Result<&str> {
        self.data
            .get(index)
            .map(String::as_str)
            .ok_or(Error::Bounds { index, len: self.data.len() })
    }

    /// Overwrites the string at `index`, coercing an empty input.
    pub fn set(&mut self, index: usize, value: String) -> Result<()> {
        let len = self.data.len();
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = coerce(value);
                Ok(())
            }
            None => Err(Error::Bounds { index, len }),
        }
    }

    /// Shifts `[index, next)` right by one and places `value` at `index`.
    ///
    /// Precondition: `index <= next` and `capacity() >= next + 1`.
    pub fn insert(&mut self, index: usize, next: usize, value: String) {
        debug_assert!(index <= next && next < self.data.len());
        for k in (index..next).rev() {
            self.data.swap(k, k + 1);
        }
        self.data[index] = coerce(value);
    }

    /// Erases `[from, to)`, closes the gap, and resets the vacated tail to
    /// the placeholder.
    ///
    /// Precondition: `from <= to <= next <= capacity()`.
    pub fn remove(&mut self, from: usize, to: usize, next: usize) {
        debug_assert!(from <= to && to <= next && next <= self.data.len());
        self.data[from..next].rotate_left(to - from);
        for slot in &mut self.data[next - (to - from)..next] {
            *slot = STRING_PLACEHOLDER.to_string();
        }
    }

    /// The physical length of the backing vector.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Doubles the backing length; growth from 0 goes to 2.
    pub fn grow(&mut self) {
        let new_len = if self.data.is_empty() { 2 } else { self.data.len() * 2 };
        self.data.resize(new_len, STRING_PLACEHOLDER.to_string());
    }

    /// Truncates or placeholder-extends the backing vector to exactly `len`.
    pub fn match_length(&mut self, len: usize) {
        self.data.resize(len, STRING_PLACEHOLDER.to_string());
    }

    pub(crate) fn insert_gap(&mut self, index: usize, next: usize) {
        self.insert(index, next, STRING_PLACEHOLDER.to_string());
    }

    /// The backing slice.
    pub fn values(&self) -> &[String] {
        &self.data
    }
}

impl Default for StringColumn {
    fn default() -> Self {
        Self::new()
    }
}
