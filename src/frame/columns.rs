//! Column operations: add, insert, remove, replace.
//!
//! Every mutation keeps the frame's invariants intact: one flavour across
//! all columns, equal physical capacity everywhere, and a name index whose
//! positions follow the columns they name.

use super::Frame;
use crate::{
    Column,
    Error,
    Flavour,
    Result,
};

impl Frame {
    /// Appends a column.
    ///
    /// The first column added to an empty frame seeds the live row count
    /// from its capacity. A nullable frame absorbs a column longer than its
    /// live row count by exposing null-filled rows; on a default frame that
    /// combination fails with `InvalidRequest`.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        let at = self.column_count();
        self.attach_column(at, column, None)
    }

    /// Appends a column under a name.
    pub fn add_named_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<()> {
        let at = self.column_count();
        self.attach_column(at, column, Some(name.into()))
    }

    /// Inserts a column at `index`, shifting later columns (and their name
    /// index entries) right.
    pub fn insert_column_at(
        &mut self,
        index: usize,
        column: Column,
    ) -> Result<()> {
        self.attach_column(index, column, None)
    }

    /// Inserts a named column at `index`.
    pub fn insert_named_column_at(
        &mut self,
        index: usize,
        name: impl Into<String>,
        column: Column,
    ) -> Result<()> {
        self.attach_column(index, column, Some(name.into()))
    }

    /// Removes and returns the column at `index`. Name index entries for
    /// later columns shift left; removing the last column resets the frame
    /// to its empty state.
    pub fn remove_column(&mut self, index: usize) -> Result<Column> {
        if index >= self.column_count() {
            return Err(Error::Bounds { index, len: self.column_count() });
        }
        let column = self.columns_mut().remove(index);

        if let Some(map) = self.names_mut() {
            map.retain(|_, v| *v != index);
            for v in map.values_mut() {
                if *v > index {
                    *v -= 1;
                }
            }
        }
        if self.column_count() == 0 {
            self.set_rows(0);
            *self.names_mut() = None;
        }
        Ok(column)
    }

    /// Removes and returns the column with the given name.
    pub fn remove_column_by_name(&mut self, name: &str) -> Result<Column> {
        let index = self.column_index(name)?;
        self.remove_column(index)
    }

    /// Replaces the column at `index`.
    ///
    /// The replacement's capacity must equal the live row count; it is then
    /// aligned to the frame's physical capacity. The column's name, if any,
    /// is kept.
    pub fn set_column_at(
        &mut self,
        index: usize,
        mut column: Column,
    ) -> Result<()> {
        if index >= self.column_count() {
            return Err(Error::Bounds { index, len: self.column_count() });
        }
        self.check_flavour(&column)?;
        if column.capacity() != self.rows() {
            return Err(Error::InvalidRequest(format!(
                "replacement column has length {}, frame has {} rows",
                column.capacity(),
                self.rows()
            )));
        }
        column.match_length(self.capacity());
        self.columns_mut()[index] = column;
        Ok(())
    }

    fn attach_column(
        &mut self,
        index: usize,
        mut column: Column,
        name: Option<String>,
    ) -> Result<()> {
        if index > self.column_count() {
            return Err(Error::Bounds {
                index,
                len: self.column_count(),
            });
        }
        self.check_flavour(&column)?;
        if let Some(name) = &name {
            if name.is_empty() {
                return Err(Error::InvalidRequest(
                    "column name must not be empty".to_string(),
                ));
            }
            if self.column_index(name).is_ok() {
                return Err(Error::InvalidRequest(format!(
                    "column name '{name}' is already assigned"
                )));
            }
        }

        if self.column_count() == 0 {
            self.set_rows(column.capacity());
        } else {
            if column.capacity() > self.rows() {
                if self.flavour() == Flavour::Default {
                    return Err(Error::InvalidRequest(format!(
                        "column of length {} does not fit a default frame \
                         with {} rows",
                        column.capacity(),
                        self.rows()
                    )));
                }
                // a nullable frame absorbs the longer column by exposing
                // null-filled rows
                let needed = column.capacity();
                while self.capacity() < needed {
                    self.grow_all();
                }
                self.set_rows(needed);
            }
            column.match_length(self.capacity());
        }

        self.columns_mut().insert(index, column);
        if let Some(map) = self.names_mut() {
            for v in map.values_mut() {
                if *v >= index {
                    *v += 1;
                }
            }
        }
        if let Some(name) = name {
            self.set_column_name(index, name)?;
        }
        Ok(())
    }

    fn check_flavour(&self, column: &Column) -> Result<()> {
        if column.flavour() != self.flavour() {
            return Err(Error::InvalidRequest(format!(
                "cannot add a {} column to a {} frame",
                column.flavour(),
                self.flavour()
            )));
        }
        Ok(())
    }
}
