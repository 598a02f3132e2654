//! Nullable column storage.
//!
//! Nullable columns store an `Option` per slot instead of a bitmap over a
//! nested column: cells here are individually mutable through the frame API,
//! which makes per-slot options the simpler representation. The absence of a
//! value is part of the observable column state.
//!
//! In the nullable flavour an empty string is not a storable value; writing
//! one stores null instead.

use super::Element;
use crate::{
    Error,
    Result,
};

/// A resizable vector of optional values backing one nullable column.
///
/// Vacated and extended slots are null. See
/// [`ValueColumn`](super::primitive::ValueColumn) for the `capacity`/`next`
/// discipline shared by all column stores.
#[derive(Debug, Clone, PartialEq)]
pub struct NullableColumn<T> {
    data: Vec<Option<T>>,
}

impl<T: Element + Copy> NullableColumn<T> {
    /// Creates an empty column with capacity 0.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates a column of `len` null elements.
    pub fn with_length(len: usize) -> Self {
        Self { data: vec![None; len] }
    }

    /// Creates a column from existing optional values.
    pub fn from_values(values: Vec<Option<T>>) -> Self {
        Self { data: values }
    }

    /// Returns the element at `index` (`None` when the slot is null).
    pub fn get(&self, index: usize) -> Result<Option<T>> {
        self.data.get(index).copied().ok_or(Error::Bounds {
            index,
            len: self.data.len(),
        })
    }

    /// Overwrites the element at `index`.
    pub fn set(&mut self, index: usize, value: Option<T>) -> Result<()> {
        let len = self.data.len();
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::Bounds { index, len }),
        }
    }

    /// Shifts `[index, next)` right by one and places `value` at `index`.
    ///
    /// Precondition: `index <= next` and `capacity() >= next + 1`.
    pub fn insert(&mut self, index: usize, next: usize, value: Option<T>) {
        debug_assert!(index <= next && next < self.data.len());
        self.data.copy_within(index..next, index + 1);
        self.data[index] = value;
    }

    /// Erases `[from, to)`, closes the gap, and null-fills the vacated tail.
    ///
    /// Precondition: `from <= to <= next <= capacity()`.
    pub fn remove(&mut self, from: usize, to: usize, next: usize) {
        debug_assert!(from <= to && to <= next && next <= self.data.len());
        self.data[from..next].rotate_left(to - from);
        for slot in &mut self.data[next - (to - from)..next] {
            *slot = None;
        }
    }

    /// The physical length of the backing vector.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Doubles the backing length; growth from 0 goes to 2.
    pub fn grow(&mut self) {
        let new_len = if self.data.is_empty() { 2 } else { self.data.len() * 2 };
        self.data.resize(new_len, None);
    }

    /// Truncates or null-extends the backing vector to exactly `len`.
    pub fn match_length(&mut self, len: usize) {
        self.data.resize(len, None);
    }

    pub(crate) fn insert_gap(&mut self, index: usize, next: usize) {
        self.insert(index, next, None);
    }

    /// The backing slice.
    pub fn values(&self) -> &[Option<T>] {
        &self.data
    }
}

impl<T: Element + Copy> Default for NullableColumn<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A resizable vector of optional strings backing one nullable column.
///
/// Empty strings are not storable in the nullable flavour; every write path
/// maps them to null.
#[derive(Debug, Clone, PartialEq)]
pub struct NullableStringColumn {
    data: Vec<Option<String>>,
}

fn coerce(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl NullableStringColumn {
    /// Creates an empty column with capacity 0.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates a column of `len` null elements.
    pub fn with_length(len: usize) -> Self {
        Self { data: vec![None; len] }
    }

    /// Creates a column from existing values, mapping empty strings to null.
    pub fn from_values(values: Vec<Option<String>>) -> Self {
        Self { data: values.into_iter().map(coerce).collect() }
    }

    /// Returns the string at `index` (`None` when the slot is null).
    pub fn get(&self, index: usize) -> Result<Option<&str>> {
        self.data
            .get(index)
            .map(|slot| slot.as_deref())
            .ok_or(Error::Bounds { index, len: self.data.len() })
    }

    /// Overwrites the string at `index`, mapping an empty input to null.
    pub fn set(&mut self, index: usize, value: Option<String>) -> Result<()> {
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
    pub fn insert(&mut self, index: usize, next: usize, value: Option<String>) {
        debug_assert!(index <= next && next < self.data.len());
        for k in (index..next).rev() {
            self.data.swap(k, k + 1);
        }
        self.data[index] = coerce(value);
    }

    /// Erases `[from, to)`, closes the gap, and null-fills the vacated tail.
    ///
    /// Precondition: `from <= to <= next <= capacity()`.
    pub fn remove(&mut self, from: usize, to: usize, next: usize) {
        debug_assert!(from <= to && to <= next && next <= self.data.len());
        self.data[from..next].rotate_left(to - from);
        for slot in &mut self.data[next - (to - from)..next] {
            *slot = None;
        }
    }

    /// The physical length of the backing vector.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Doubles the backing length; growth from 0 goes to 2.
    pub fn grow(&mut self) {
        let new_len = if self.data.is_empty() { 2 } else { self.data.len() * 2 };
        self.data.resize(new_len, None);
    }

    /// Truncates or null-extends the backing vector to exactly `len`.
    pub fn match_length(&mut self, len: usize) {
        self.data.resize(len, None);
    }

    pub(crate) fn insert_gap(&mut self, index: usize, next: usize) {
        self.insert(index, next, None);
    }

    /// The backing slice.
    pub fn values(&self) -> &[Option<String>] {
        &self.data
    }
}

impl Default for NullableStringColumn {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_state_is_observable() {
        let mut col = NullableColumn::from_values(vec![Some(1i32), None]);
        assert_eq!(col.get(0).unwrap(), Some(1));
        assert_eq!(col.get(1).unwrap(), None);
        col.set(0, None).unwrap();
        assert_eq!(col.get(0).unwrap(), None);
    }

    #[test]
    fn test_insert_and_remove_null_fill() {
        let mut col =
            NullableColumn::from_values(vec![Some(1i64), Some(2), None, None]);
        col.insert(1, 2, None);
        assert_eq!(col.values(), &[Some(1), None, Some(2), None]);

        col.remove(0, 1, 3);
        assert_eq!(col.values(), &[None, Some(2), None, None]);
    }

    #[test]
    fn test_grow_null_fills() {
        let mut col = NullableColumn::<f64>::new();
        col.grow();
        assert_eq!(col.values(), &[None, None]);
    }

    #[test]
    fn test_empty_string_becomes_null() {
        let col = NullableStringColumn::from_values(vec![
            Some("a".to_string()),
            Some(String::new()),
            None,
        ]);
        assert_eq!(col.values(), &[Some("a".to_string()), None, None]);

        let mut col = NullableStringColumn::with_length(1);
        col.set(0, Some(String::new())).unwrap();
        assert_eq!(col.get(0).unwrap(), None);
    }

    #[test]
    fn test_string_insert_shifts() {
        let mut col = NullableStringColumn::from_values(vec![
            Some("a".to_string()),
            Some("b".to_string()),
            None,
        ]);
        col.insert(0, 2, Some("z".to_string()));
        assert_eq!(
            col.values(),
            &[
                Some("z".to_string()),
                Some("a".to_string()),
                Some("b".to_string())
            ]
        );
    }
}
