//! Numeric column statistics.
//!
//! `average`, `minimum`, and `maximum` operate on the six numeric kinds
//! only and return `f64`. Null cells are skipped, not treated as zero; an
//! empty or all-null selection has no defined result and fails with
//! [`Unsupported`](crate::Error::Unsupported), as does a selection whose
//! aggregate computes to NaN.

use super::Frame;
use crate::{
    Cell,
    Column,
    Error,
    Result,
};

fn numeric_value(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Byte(v) => Some(f64::from(*v)),
        Cell::Short(v) => Some(f64::from(*v)),
        Cell::Int(v) => Some(f64::from(*v)),
        Cell::Long(v) => Some(*v as f64),
        Cell::Float(v) => Some(f64::from(*v)),
        Cell::Double(v) => Some(*v),
        _ => None,
    }
}

impl Frame {
    /// The arithmetic mean of the non-null values in `column`.
    pub fn average(&self, column: usize) -> Result<f64> {
        let (sum, count) = self.fold_numeric(
            column,
            "average",
            (0.0f64, 0usize),
            |(sum, count), v| (sum + v, count + 1),
        )?;
        Self::finite(sum / count as f64, "average")
    }

    /// The arithmetic mean of the non-null values in the named column.
    pub fn average_named(&self, name: &str) -> Result<f64> {
        let column = self.column_index(name)?;
        self.average(column)
    }

    /// The smallest non-null value in `column`.
    pub fn minimum(&self, column: usize) -> Result<f64> {
        // f64::min would discard NaN operands; propagate them instead so a
        // NaN selection is reported as undefined
        let min = self.fold_numeric(column, "minimum", f64::INFINITY, |a, v| {
            if a.is_nan() || v.is_nan() {
                f64::NAN
            } else {
                a.min(v)
            }
        })?;
        Self::finite(min, "minimum")
    }

    /// The smallest non-null value in the named column.
    pub fn minimum_named(&self, name: &str) -> Result<f64> {
        let column = self.column_index(name)?;
        self.minimum(column)
    }

    /// The largest non-null value in `column`.
    pub fn maximum(&self, column: usize) -> Result<f64> {
        let max =
            self.fold_numeric(column, "maximum", f64::NEG_INFINITY, |a, v| {
                if a.is_nan() || v.is_nan() {
                    f64::NAN
                } else {
                    a.max(v)
                }
            })?;
        Self::finite(max, "maximum")
    }

    /// The largest non-null value in the named column.
    pub fn maximum_named(&self, name: &str) -> Result<f64> {
        let column = self.column_index(name)?;
        self.maximum(column)
    }

    /// Folds the non-null numeric values of a column, failing when the
    /// column is non-numeric or contributes no values.
    fn fold_numeric<A>(
        &self,
        column: usize,
        op: &str,
        init: A,
        mut fold: impl FnMut(A, f64) -> A,
    ) -> Result<A> {
        let col = self.column(column)?;
        Self::check_numeric(col, op)?;

        let mut acc = init;
        let mut seen = false;
        for row in 0..self.rows() {
            if let Some(v) = numeric_value(&col.cell(row)?) {
                acc = fold(acc, v);
                seen = true;
            }
        }
        if !seen {
            return Err(Error::Unsupported(format!(
                "{op} of column {column} has no values"
            )));
        }
        Ok(acc)
    }

    fn check_numeric(col: &Column, op: &str) -> Result<()> {
        if !col.member_kind().is_numeric() {
            return Err(Error::Unsupported(format!(
                "{op} requires a numeric column, got {}",
                col.token()
            )));
        }
        Ok(())
    }

    fn finite(value: f64, op: &str) -> Result<f64> {
        if value.is_nan() {
            return Err(Error::Unsupported(format!(
                "{op} is undefined for this selection"
            )));
        }
        Ok(value)
    }
}
