//! Typed and untyped element access.
//!
//! Typed access is generic over [`Element`]: `get::<i32>` reads from an
//! `Int` column, `get::<String>` from a `Str` column, and so on. Every
//! accessor validates that the column resolves, that the column kind
//! matches the requested element type, and that the row index addresses a
//! live row.

use super::Frame;
use crate::{
    Cell,
    Column,
    Element,
    Error,
    Result,
};

impl Frame {
    /// Returns the value at (`column`, `row`) as `T`.
    ///
    /// `None` is only returned for null cells in nullable frames; a default
    /// frame always yields `Some`.
    pub fn get<T: Element>(
        &self,
        column: usize,
        row: usize,
    ) -> Result<Option<T>> {
        let col = self.column(column)?;
        Self::check_kind::<T>(column, col)?;
        self.check_row(row)?;
        match col.cell(row)? {
            Cell::Null => Ok(None),
            cell => Ok(Some(T::from_cell(cell).ok_or_else(|| {
                Error::InvalidRequest(format!(
                    "column {column} cell does not match requested type"
                ))
            })?)),
        }
    }

    /// Returns the value at (`name`, `row`) as `T`.
    pub fn get_named<T: Element>(
        &self,
        name: &str,
        row: usize,
    ) -> Result<Option<T>> {
        let column = self.column_index(name)?;
        self.get(column, row)
    }

    /// Overwrites the value at (`column`, `row`).
    pub fn set<T: Element>(
        &mut self,
        column: usize,
        row: usize,
        value: T,
    ) -> Result<()> {
        Self::check_kind::<T>(column, self.column(column)?)?;
        self.check_row(row)?;
        self.column_mut(column)?.set(row, value.into_cell())
    }

    /// Overwrites the value at (`name`, `row`).
    pub fn set_named<T: Element>(
        &mut self,
        name: &str,
        row: usize,
        value: T,
    ) -> Result<()> {
        let column = self.column_index(name)?;
        self.set(column, row, value)
    }

    /// Stores null at (`column`, `row`). Fails on default frames.
    pub fn set_null(&mut self, column: usize, row: usize) -> Result<()> {
        self.check_row(row)?;
        self.column_mut(column)?.set(row, Cell::Null)
    }

    /// Stores null at (`name`, `row`). Fails on default frames.
    pub fn set_null_named(&mut self, name: &str, row: usize) -> Result<()> {
        let column = self.column_index(name)?;
        self.set_null(column, row)
    }

    /// Returns the cell at (`column`, `row`) without a type request.
    pub fn cell(&self, column: usize, row: usize) -> Result<Cell> {
        let col = self.column(column)?;
        self.check_row(row)?;
        col.cell(row)
    }

    /// Returns the cell at (`name`, `row`).
    pub fn cell_named(&self, name: &str, row: usize) -> Result<Cell> {
        let column = self.column_index(name)?;
        self.cell(column, row)
    }

    /// Overwrites the cell at (`column`, `row`) after kind and nullability
    /// checks.
    pub fn set_cell(
        &mut self,
        column: usize,
        row: usize,
        cell: Cell,
    ) -> Result<()> {
        self.check_row(row)?;
        self.column_mut(column)?.set(row, cell)
    }

    /// Overwrites the cell at (`name`, `row`).
    pub fn set_cell_named(
        &mut self,
        name: &str,
        row: usize,
        cell: Cell,
    ) -> Result<()> {
        let column = self.column_index(name)?;
        self.set_cell(column, row, cell)
    }

    fn check_kind<T: Element>(index: usize, col: &Column) -> Result<()> {
        if col.member_kind() != T::KIND {
            return Err(Error::InvalidRequest(format!(
                "column {index} is a {}, not a {}",
                col.token(),
                T::KIND
            )));
        }
        Ok(())
    }
}
