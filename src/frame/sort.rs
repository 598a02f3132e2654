//! In-place row sorting by one column.
//!
//! Quicksort with a midpoint pivot; rows move across all columns in
//! lockstep, cell by cell. Equal keys may exchange positions (the sort is
//! not stable). In nullable frames a presort pass moves null keys to the
//! tail and the quicksort runs over the null-free prefix only.

use super::Frame;
use crate::{
    Cell,
    Flavour,
    Result,
};
use std::cmp::Ordering;

/// Orders two cells of the same kind. Floats use IEEE total order; nulls
/// sort after everything else.
pub(crate) fn cmp_cells(a: &Cell, b: &Cell) -> Ordering {
    match (a, b) {
        (Cell::Null, Cell::Null) => Ordering::Equal,
        (Cell::Null, _) => Ordering::Greater,
        (_, Cell::Null) => Ordering::Less,
        (Cell::Byte(x), Cell::Byte(y)) => x.cmp(y),
        (Cell::Short(x), Cell::Short(y)) => x.cmp(y),
        (Cell::Int(x), Cell::Int(y)) => x.cmp(y),
        (Cell::Long(x), Cell::Long(y)) => x.cmp(y),
        (Cell::Float(x), Cell::Float(y)) => x.total_cmp(y),
        (Cell::Double(x), Cell::Double(y)) => x.total_cmp(y),
        (Cell::Bool(x), Cell::Bool(y)) => x.cmp(y),
        (Cell::Char(x), Cell::Char(y)) => x.cmp(y),
        (Cell::Str(x), Cell::Str(y)) => x.cmp(y),
        // columns never mix kinds
        _ => Ordering::Equal,
    }
}

impl Frame {
    /// Sorts all rows by the values in `column`, ascending. In nullable
    /// frames null keys end up at the tail.
    pub fn sort_by(&mut self, column: usize) -> Result<()> {
        self.column(column)?;
        if self.rows() < 2 {
            return Ok(());
        }

        let mut live = self.rows();
        if self.flavour() == Flavour::Nullable {
            live = self.push_nulls_to_tail(column)?;
        }
        if live > 1 {
            self.quicksort(column, 0, live as isize - 1)?;
        }
        Ok(())
    }

    /// Sorts all rows by the values in the named column.
    pub fn sort_by_named(&mut self, name: &str) -> Result<()> {
        let column = self.column_index(name)?;
        self.sort_by(column)
    }

    /// Swaps rows `a` and `b` across every column.
    fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        if a == b {
            return Ok(());
        }
        for index in 0..self.column_count() {
            let col = self.column_mut(index)?;
            let cell_a = col.cell(a)?;
            let cell_b = col.cell(b)?;
            col.set(a, cell_b)?;
            col.set(b, cell_a)?;
        }
        Ok(())
    }

    /// Moves rows with a null key to the tail; returns the length of the
    /// null-free prefix.
    fn push_nulls_to_tail(&mut self, column: usize) -> Result<usize> {
        let mut tail = self.rows();
        let mut row = 0;
        while row < tail {
            if self.column(column)?.cell(row)?.is_null() {
                tail -= 1;
                self.swap_rows(row, tail)?;
            } else {
                row += 1;
            }
        }
        Ok(tail)
    }

    fn quicksort(
        &mut self,
        column: usize,
        left: isize,
        right: isize,
    ) -> Result<()> {
        if left >= right {
            return Ok(());
        }
        let mid = (left + right) / 2;
        let pivot = self.column(column)?.cell(mid as usize)?;

        let (mut i, mut j) = (left, right);
        while i <= j {
            while cmp_cells(
                &self.column(column)?.cell(i as usize)?,
                &pivot,
            ) == Ordering::Less
            {
                i += 1;
            }
            while cmp_cells(
                &self.column(column)?.cell(j as usize)?,
                &pivot,
            ) == Ordering::Greater
            {
                j -= 1;
            }
            if i <= j {
                self.swap_rows(i as usize, j as usize)?;
                i += 1;
                j -= 1;
            }
        }
        self.quicksort(column, left, j)?;
        self.quicksort(column, i, right)
    }
}
