//! Regex search over text-rendered cell values.
//!
//! A cell matches when its entire text rendering (the same rendering the
//! serializer writes, with null rendering as `null`) matches the pattern;
//! patterns are implicitly anchored. Only portable regex features (anchors,
//! character classes, alternation, repetition) are part of the contract.

use super::Frame;
use crate::{
    Column,
    Error,
    Result,
};
use regex::Regex;

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
        Error::InvalidRequest(format!("invalid regex '{pattern}': {e}"))
    })
}

impl Frame {
    /// Returns the first row whose value in `column` matches `pattern`.
    pub fn index_of(
        &self,
        column: usize,
        pattern: &str,
    ) -> Result<Option<usize>> {
        self.index_of_from(column, 0, pattern)
    }

    /// Returns the first row in `[start, rows)` whose value in `column`
    /// matches `pattern`.
    pub fn index_of_from(
        &self,
        column: usize,
        start: usize,
        pattern: &str,
    ) -> Result<Option<usize>> {
        let col = self.column(column)?;
        if start > self.rows() {
            return Err(Error::Bounds { index: start, len: self.rows() });
        }
        let regex = compile(pattern)?;
        let mut text = String::new();
        for row in start..self.rows() {
            text.clear();
            col.cell(row)?.render(&mut text);
            if regex.is_match(&text) {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    /// Returns the first matching row in the named column.
    pub fn index_of_named(
        &self,
        name: &str,
        pattern: &str,
    ) -> Result<Option<usize>> {
        let column = self.column_index(name)?;
        self.index_of(column, pattern)
    }

    /// Returns every row whose value in `column` matches `pattern`, in
    /// ascending order.
    pub fn index_of_all(
        &self,
        column: usize,
        pattern: &str,
    ) -> Result<Vec<usize>> {
        let col = self.column(column)?;
        let regex = compile(pattern)?;
        let mut matches = Vec::new();
        let mut text = String::new();
        for row in 0..self.rows() {
            text.clear();
            col.cell(row)?.render(&mut text);
            if regex.is_match(&text) {
                matches.push(row);
            }
        }
        Ok(matches)
    }

    /// Returns every matching row in the named column.
    pub fn index_of_all_named(
        &self,
        name: &str,
        pattern: &str,
    ) -> Result<Vec<usize>> {
        let column = self.column_index(name)?;
        self.index_of_all(column, pattern)
    }

    /// Returns a new frame of the same flavour, schema, and names holding
    /// the matching rows in order.
    pub fn find_all(&self, column: usize, pattern: &str) -> Result<Frame> {
        let matches = self.index_of_all(column, pattern)?;

        let mut columns = Vec::with_capacity(self.column_count());
        for col in self.iter_columns() {
            let mut out = Column::zeroed(
                self.flavour(),
                col.member_kind(),
                matches.len(),
            );
            for (slot, &row) in matches.iter().enumerate() {
                out.set(slot, col.cell(row)?)?;
            }
            columns.push(out);
        }

        Ok(Frame {
            flavour: self.flavour(),
            columns,
            names: self.names.clone(),
            rows: matches.len(),
        })
    }

    /// Returns the matching rows of the named column as a new frame.
    pub fn find_all_named(&self, name: &str, pattern: &str) -> Result<Frame> {
        let column = self.column_index(name)?;
        self.find_all(column, pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    fn frame() -> Frame {
        Frame::with_names(
            vec!["id".into(), "word".into()],
            vec![
                Column::from_values(vec![10i32, 22, 30, 42]),
                Column::from_values(
                    ["alpha", "beta", "gamma", "beta"]
                        .map(String::from)
                        .to_vec(),
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_index_of() {
        let f = frame();
        assert_eq!(f.index_of(1, "beta").unwrap(), Some(1));
        assert_eq!(f.index_of(1, "delta").unwrap(), None);
        assert_eq!(f.index_of_named("id", "4[0-9]").unwrap(), Some(3));
    }

    #[test]
    fn test_match_is_anchored() {
        let f = frame();
        // "a" alone must not match "alpha"
        assert_eq!(f.index_of(1, "a").unwrap(), None);
        assert_eq!(f.index_of(1, "a.*").unwrap(), Some(0));
    }

    #[test]
    fn test_index_of_from() {
        let f = frame();
        assert_eq!(f.index_of_from(1, 2, "beta").unwrap(), Some(3));
        assert_eq!(f.index_of_from(1, 4, "beta").unwrap(), None);
        assert!(f.index_of_from(1, 5, "beta").is_err());
    }

    #[test]
    fn test_index_of_all_is_increasing() {
        let f = frame();
        assert_eq!(f.index_of_all(1, "beta").unwrap(), vec![1, 3]);
        assert_eq!(f.index_of_all(1, "x+").unwrap(), Vec::<usize>::new());
        assert_eq!(f.index_of_all_named("id", ".2").unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_find_all_preserves_schema() {
        let f = frame();
        let hits = f.find_all(1, "beta").unwrap();
        assert_eq!(hits.rows(), 2);
        assert_eq!(hits.column_count(), 2);
        assert_eq!(hits.flavour(), f.flavour());
        assert_eq!(hits.column_index("word").unwrap(), 1);
        assert_eq!(hits.get::<i32>(0, 0).unwrap(), Some(22));
        assert_eq!(hits.get::<i32>(0, 1).unwrap(), Some(42));

        let none = f.find_all_named("word", "delta").unwrap();
        assert_eq!(none.rows(), 0);
        assert_eq!(none.column_count(), 2);
    }

    #[test]
    fn test_null_cells_match_null_literal() {
        let f = Frame::from_columns(vec![Column::from_options(vec![
            Some(1i32),
            None,
            Some(3),
        ])])
        .unwrap();
        assert_eq!(f.index_of(0, "null").unwrap(), Some(1));
        let hits = f.find_all(0, "null").unwrap();
        assert_eq!(hits.cell(0, 0).unwrap(), Cell::Null);
    }

    #[test]
    fn test_invalid_pattern() {
        let f = frame();
        assert!(matches!(
            f.index_of(1, "("),
            Err(Error::InvalidRequest(_))
        ));
    }
}
