//! Row operations: get, overwrite, append, insert, remove.
//!
//! Appending past the shared capacity grows every column together, so the
//! uniform-capacity invariant holds at all times. Removal leaves capacity in
//! place until the live rows fall below a third of it, at which point every
//! column is shrunk to the live count plus a small head-room buffer.

use super::Frame;
use crate::{
    Cell,
    Error,
    Result,
};

impl Frame {
    /// Returns row `row` as a cell vector in column order.
    pub fn row(&self, row: usize) -> Result<Vec<Cell>> {
        self.ensure_has_columns()?;
        self.check_row(row)?;
        self.iter_columns().map(|col| col.cell(row)).collect()
    }

    /// Overwrites row `row` with the given cells.
    pub fn set_row(&mut self, row: usize, values: Vec<Cell>) -> Result<()> {
        self.ensure_has_columns()?;
        self.check_row(row)?;
        self.check_row_values(&values)?;
        for (index, cell) in values.into_iter().enumerate() {
            self.column_mut(index)?.set(row, cell)?;
        }
        Ok(())
    }

    /// Appends a row, growing all columns if the frame is at capacity.
    pub fn add_row(&mut self, values: Vec<Cell>) -> Result<()> {
        let next = self.rows();
        self.insert_row(next, values)
    }

    /// Inserts a row at `row`, shifting later rows down. `row` equal to the
    /// live row count appends.
    pub fn insert_row(&mut self, row: usize, values: Vec<Cell>) -> Result<()> {
        self.ensure_has_columns()?;
        let next = self.rows();
        if row > next {
            return Err(Error::Bounds { index: row, len: next });
        }
        self.check_row_values(&values)?;

        if next == self.capacity() {
            self.grow_all();
        }

        if row == next {
            for (index, cell) in values.into_iter().enumerate() {
                self.column_mut(index)?.set(row, cell)?;
            }
        } else {
            for (index, cell) in values.into_iter().enumerate() {
                self.column_mut(index)?.insert(row, next, cell)?;
            }
        }
        self.set_rows(next + 1);
        Ok(())
    }

    /// Removes row `row`.
    pub fn remove_row(&mut self, row: usize) -> Result<()> {
        self.check_row(row)?;
        self.remove_rows(row, row + 1)
    }

    /// Removes the rows in `[from, to)` and compacts the backing storage
    /// when most of it has become unused.
    pub fn remove_rows(&mut self, from: usize, to: usize) -> Result<()> {
        self.ensure_has_columns()?;
        let next = self.rows();
        if to > next {
            return Err(Error::Bounds { index: to, len: next });
        }
        if from > to {
            return Err(Error::InvalidRequest(format!(
                "invalid row range: {from} > {to}"
            )));
        }

        for col in self.columns_mut() {
            col.remove(from, to, next);
        }
        let remaining = next - (to - from);
        self.set_rows(remaining);

        // reclaim memory once the live rows occupy less than a third of the
        // backing storage, keeping a little head room
        if remaining * 3 < self.capacity() {
            let target = remaining + 4;
            for col in self.columns_mut() {
                col.match_length(target);
            }
        }
        Ok(())
    }

    /// Validates a row's width and per-column cell compatibility.
    pub(crate) fn check_row_values(&self, values: &[Cell]) -> Result<()> {
        if values.len() != self.column_count() {
            return Err(Error::InvalidRequest(format!(
                "row has {} values, frame has {} columns",
                values.len(),
                self.column_count()
            )));
        }
        for (col, cell) in self.iter_columns().zip(values) {
            col.validate_cell(cell)?;
        }
        Ok(())
    }
}
