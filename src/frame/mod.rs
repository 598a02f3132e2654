//! # Frame Module
//!
//! A [`Frame`] aggregates columns of uniform length into a table. All
//! columns share one flavour and one physical capacity; the frame tracks the
//! live row count separately, so removing rows does not immediately shrink
//! the backing storage.
//!
//! The operation families live in sibling files:
//!
//! - [`access`](self) — typed and untyped element access
//! - `rows` — row get/set/add/insert/remove with joint growth
//! - `columns` — column add/insert/remove/replace with length alignment
//! - `search` — regex search over text-rendered cells
//! - `sort` — in-place row sorting by one column
//! - `stats` — numeric aggregates

mod access;
mod columns;
mod rows;
mod search;
mod sort;
mod stats;

use crate::{
    Cell,
    Column,
    Error,
    Flavour,
    Result,
};
use std::collections::HashMap;
use std::fmt;

/// A table of typed columns with an optional name index.
///
/// A frame is either `Default` (no cell is ever null and string cells are
/// never empty) or `Nullable` (any cell may be null); the flavour is fixed
/// at construction and every column added later must match it.
///
/// # Examples
///
/// ```
/// use dframe::{Cell, Column, Frame};
///
/// let mut frame = Frame::with_names(
///     vec!["id".into(), "name".into()],
///     vec![
///         Column::from_values(vec![1i32, 2]),
///         Column::from_values(vec!["ada".to_string(), "grace".to_string()]),
///     ],
/// )?;
///
/// frame.add_row(vec![Cell::Int(3), Cell::from("edsger")])?;
/// assert_eq!(frame.rows(), 3);
/// assert_eq!(frame.get_named::<String>("name", 2)?.unwrap(), "edsger");
/// # Ok::<(), dframe::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Frame {
    flavour: Flavour,
    columns: Vec<Column>,
    names: Option<HashMap<String, usize>>,
    rows: usize,
}

impl Frame {
    /// Creates an empty frame of the given flavour.
    pub fn new(flavour: Flavour) -> Self {
        Self { flavour, columns: Vec::new(), names: None, rows: 0 }
    }

    /// Creates a frame from columns.
    ///
    /// The flavour is taken from the first column; all columns must share it
    /// and have equal capacity. The live row count is seeded from that
    /// capacity.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let first = columns.first().ok_or_else(|| {
            Error::InvalidRequest(
                "a frame requires at least one column".to_string(),
            )
        })?;
        let flavour = first.flavour();
        let capacity = first.capacity();

        for col in &columns {
            if col.flavour() != flavour {
                return Err(Error::InvalidRequest(format!(
                    "cannot mix flavours in one frame: expected {}, got {}",
                    flavour,
                    col.flavour()
                )));
            }
            if col.capacity() != capacity {
                return Err(Error::InvalidRequest(format!(
                    "columns differ in length: expected {}, got {}",
                    capacity,
                    col.capacity()
                )));
            }
        }

        Ok(Self { flavour, columns, names: None, rows: capacity })
    }

    /// Creates a frame from columns and assigns a name to each.
    pub fn with_names(
        names: Vec<String>,
        columns: Vec<Column>,
    ) -> Result<Self> {
        if names.len() != columns.len() {
            return Err(Error::InvalidRequest(format!(
                "{} names for {} columns",
                names.len(),
                columns.len()
            )));
        }
        let mut frame = Self::from_columns(columns)?;
        frame.set_column_names(names)?;
        Ok(frame)
    }

    /// The flavour of this frame.
    pub fn flavour(&self) -> Flavour {
        self.flavour
    }

    /// The number of live rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The shared physical capacity of the columns (0 for a frame without
    /// columns).
    pub fn capacity(&self) -> usize {
        self.columns.first().map_or(0, Column::capacity)
    }

    /// Whether the frame holds no live rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Removes all rows, shrinking every column to length 0. Columns and
    /// names are kept.
    pub fn clear(&mut self) {
        for col in &mut self.columns {
            col.match_length(0);
        }
        self.rows = 0;
    }

    /// Returns the column at `index`.
    pub fn column(&self, index: usize) -> Result<&Column> {
        self.columns.get(index).ok_or(Error::Bounds {
            index,
            len: self.columns.len(),
        })
    }

    /// Returns the column with the given name.
    pub fn column_by_name(&self, name: &str) -> Result<&Column> {
        let index = self.column_index(name)?;
        self.column(index)
    }

    /// Iterates over the columns in order.
    pub fn iter_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Iterates over the live rows, yielding each as a cell vector in
    /// column order.
    pub fn iter_rows(&self) -> impl Iterator<Item = Vec<Cell>> + '_ {
        (0..self.rows).map(move |r| {
            self.columns
                .iter()
                .map(|c| c.cell(r).unwrap_or(Cell::Null))
                .collect()
        })
    }

    // ------------------------------------------------------------------
    // Name index
    // ------------------------------------------------------------------

    /// Whether any column has an assigned name.
    pub fn has_column_names(&self) -> bool {
        self.names.as_ref().is_some_and(|map| !map.is_empty())
    }

    /// Returns the name assigned to the column at `index`.
    ///
    /// Fails with `InvalidRequest` when the column has no name.
    pub fn column_name(&self, index: usize) -> Result<&str> {
        if index >= self.columns.len() {
            return Err(Error::Bounds { index, len: self.columns.len() });
        }
        self.name_of(index).ok_or_else(|| {
            Error::InvalidRequest(format!("column {index} has no name"))
        })
    }

    /// Returns the index of the column with the given name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.names
            .as_ref()
            .and_then(|map| map.get(name).copied())
            .ok_or_else(|| {
                Error::InvalidRequest(format!("unknown column name '{name}'"))
            })
    }

    /// Returns one string per column: the assigned name, or the decimal
    /// column index for unnamed columns.
    pub fn column_names(&self) -> Vec<String> {
        (0..self.columns.len())
            .map(|i| match self.name_of(i) {
                Some(name) => name.to_string(),
                None => i.to_string(),
            })
            .collect()
    }

    /// Assigns a name to every column. Names must be unique and non-empty.
    pub fn set_column_names(&mut self, names: Vec<String>) -> Result<()> {
        if names.len() != self.columns.len() {
            return Err(Error::InvalidRequest(format!(
                "{} names for {} columns",
                names.len(),
                self.columns.len()
            )));
        }
        let mut map = HashMap::with_capacity(names.len());
        for (index, name) in names.into_iter().enumerate() {
            Self::validate_name(&name)?;
            if map.insert(name.clone(), index).is_some() {
                return Err(Error::InvalidRequest(format!(
                    "duplicate column name '{name}'"
                )));
            }
        }
        self.names = Some(map);
        Ok(())
    }

    /// Assigns a name to the column at `index`, returning whether a previous
    /// name of that column was replaced.
    pub fn set_column_name(
        &mut self,
        index: usize,
        name: String,
    ) -> Result<bool> {
        if index >= self.columns.len() {
            return Err(Error::Bounds { index, len: self.columns.len() });
        }
        Self::validate_name(&name)?;
        if let Some(existing) = self.names.as_ref().and_then(|m| m.get(&name))
        {
            if *existing != index {
                return Err(Error::InvalidRequest(format!(
                    "column name '{name}' is already assigned"
                )));
            }
        }

        let map = self.names.get_or_insert_with(HashMap::new);
        let had_name = map.values().any(|&v| v == index);
        map.retain(|_, v| *v != index);
        map.insert(name, index);
        Ok(had_name)
    }

    /// Drops the entire name index.
    pub fn remove_column_names(&mut self) {
        self.names = None;
    }

    pub(crate) fn name_of(&self, index: usize) -> Option<&str> {
        self.names.as_ref().and_then(|map| {
            map.iter()
                .find(|(_, &v)| v == index)
                .map(|(name, _)| name.as_str())
        })
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidRequest(
                "column name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Shared internal checks
    // ------------------------------------------------------------------

    pub(crate) fn ensure_has_columns(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::InvalidRequest(
                "frame has no columns".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(Error::Bounds { index: row, len: self.rows });
        }
        Ok(())
    }

    pub(crate) fn column_mut(&mut self, index: usize) -> Result<&mut Column> {
        let len = self.columns.len();
        self.columns
            .get_mut(index)
            .ok_or(Error::Bounds { index, len })
    }

    /// Doubles the capacity of every column in lockstep.
    pub(crate) fn grow_all(&mut self) {
        for col in &mut self.columns {
            col.grow();
        }
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }

    pub(crate) fn names_mut(
        &mut self,
    ) -> &mut Option<HashMap<String, usize>> {
        &mut self.names
    }

    pub(crate) fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }
}

/// Frames compare by flavour, column kinds in order, column names, and the
/// cell values of the live rows. Physical capacity beyond the live rows is
/// not part of the comparison.
impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        if self.flavour != other.flavour
            || self.rows != other.rows
            || self.columns.len() != other.columns.len()
        {
            return false;
        }
        for i in 0..self.columns.len() {
            if self.name_of(i) != other.name_of(i) {
                return false;
            }
            let (a, b) = (&self.columns[i], &other.columns[i]);
            if a.member_kind() != b.member_kind() {
                return false;
            }
            for r in 0..self.rows {
                if a.cell(r).ok() != b.cell(r).ok() {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = self.column_names();
        let mut widths: Vec<usize> =
            headers.iter().map(String::len).collect();
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(self.rows);

        for row in self.iter_rows() {
            let rendered: Vec<String> =
                row.iter().map(Cell::to_text).collect();
            for (w, text) in widths.iter_mut().zip(&rendered) {
                *w = (*w).max(text.len());
            }
            grid.push(rendered);
        }

        for (i, header) in headers.iter().enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            write!(f, "{header:<width$}", width = widths[i])?;
        }
        writeln!(f)?;
        for row in &grid {
            for (i, text) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{text:<width$}", width = widths[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
