//! Frame conversion utilities: copying, horizontal merging, and flavour
//! conversion.

use crate::{
    Cell,
    Column,
    Error,
    Flavour,
    Frame,
    Result,
};

/// Returns a structurally independent deep copy of `frame`.
pub fn copy_of(frame: &Frame) -> Frame {
    frame.clone()
}

/// Concatenates the given frames horizontally into one frame.
///
/// All frames must share one flavour and one live row count. Column names
/// are carried over; a name appearing in more than one frame fails with
/// `InvalidRequest`.
pub fn merge(frames: &[Frame]) -> Result<Frame> {
    let first = frames.first().ok_or_else(|| {
        Error::InvalidRequest("merge requires at least one frame".to_string())
    })?;
    let flavour = first.flavour();
    let rows = first.rows();

    for frame in frames {
        if frame.flavour() != flavour {
            return Err(Error::InvalidRequest(
                "cannot merge frames of different flavours".to_string(),
            ));
        }
        if frame.rows() != rows {
            return Err(Error::InvalidRequest(format!(
                "cannot merge frames with {} and {} rows",
                rows,
                frame.rows()
            )));
        }
    }

    let mut columns = Vec::new();
    let mut names: Vec<Option<String>> = Vec::new();
    for frame in frames {
        for (index, col) in frame.iter_columns().enumerate() {
            let mut col = col.clone();
            col.match_length(rows);
            columns.push(col);

            let name = frame.name_of(index).map(str::to_string);
            if let Some(name) = &name {
                if names.iter().flatten().any(|n| n == name) {
                    return Err(Error::InvalidRequest(format!(
                        "duplicate column name '{name}' in merge"
                    )));
                }
            }
            names.push(name);
        }
    }

    if columns.is_empty() {
        return Ok(Frame::new(flavour));
    }

    let mut merged = Frame::from_columns(columns)?;
    merged.set_rows(rows);
    for (index, name) in names.into_iter().enumerate() {
        if let Some(name) = name {
            merged.set_column_name(index, name)?;
        }
    }
    Ok(merged)
}

/// Converts `frame` to the requested flavour.
///
/// Converting to the frame's own flavour copies it. `Default` to `Nullable`
/// wraps every value; no cell becomes null. `Nullable` to `Default`
/// materialises null cells as the kind's default: `0` for numerics and
/// chars, `false` for booleans, `"n/a"` for strings.
pub fn convert(frame: &Frame, flavour: Flavour) -> Result<Frame> {
    if frame.flavour() == flavour {
        return Ok(copy_of(frame));
    }

    let mut columns = Vec::with_capacity(frame.column_count());
    for col in frame.iter_columns() {
        let mut out =
            Column::zeroed(flavour, col.member_kind(), col.capacity());
        for index in 0..col.capacity() {
            match col.cell(index)? {
                // the zeroed column already holds the kind's default
                Cell::Null => {}
                cell => out.set(index, cell)?,
            }
        }
        columns.push(out);
    }

    if columns.is_empty() {
        return Ok(Frame::new(flavour));
    }

    let mut converted = Frame::from_columns(columns)?;
    converted.set_rows(frame.rows());
    for index in 0..frame.column_count() {
        if let Some(name) = frame.name_of(index) {
            converted.set_column_name(index, name.to_string())?;
        }
    }
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_frame() -> Frame {
        Frame::with_names(
            vec!["id".into(), "label".into()],
            vec![
                Column::from_values(vec![1i32, 2]),
                Column::from_values(["a", "b"].map(String::from).to_vec()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_copy_is_independent() {
        let mut original = default_frame();
        let copy = copy_of(&original);
        original.set(0, 0, 99i32).unwrap();
        assert_eq!(copy.get::<i32>(0, 0).unwrap(), Some(1));
        assert_eq!(copy.column_index("label").unwrap(), 1);
    }

    #[test]
    fn test_merge_concatenates_columns() {
        let a = default_frame();
        let b = Frame::with_names(
            vec!["flag".into()],
            vec![Column::from_values(vec![true, false])],
        )
        .unwrap();

        let merged = merge(&[a.clone(), b]).unwrap();
        assert_eq!(merged.column_count(), 3);
        assert_eq!(merged.rows(), 2);
        assert_eq!(merged.column_index("id").unwrap(), 0);
        assert_eq!(merged.column_index("flag").unwrap(), 2);
        assert_eq!(merged.get::<bool>(2, 1).unwrap(), Some(false));
        // the left frame's columns come first, unchanged
        assert_eq!(merged.get::<i32>(0, 0).unwrap(), Some(1));
    }

    #[test]
    fn test_merge_rejects_duplicate_names() {
        let a = default_frame();
        let b = default_frame();
        assert!(matches!(
            merge(&[a, b]),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_merge_rejects_row_mismatch() {
        let a = default_frame();
        let b = Frame::from_columns(vec![Column::from_values(vec![1i64])])
            .unwrap();
        assert!(merge(&[a, b]).is_err());
    }

    #[test]
    fn test_merge_rejects_flavour_mismatch() {
        let a = default_frame();
        let b = Frame::from_columns(vec![Column::from_options(vec![
            Some(1i64),
            None,
        ])])
        .unwrap();
        assert!(merge(&[a, b]).is_err());
    }

    #[test]
    fn test_convert_default_to_nullable() {
        let f = default_frame();
        let nullable = convert(&f, Flavour::Nullable).unwrap();
        assert_eq!(nullable.flavour(), Flavour::Nullable);
        assert_eq!(nullable.rows(), 2);
        assert_eq!(nullable.get::<i32>(0, 1).unwrap(), Some(2));
        assert_eq!(nullable.get::<String>(1, 0).unwrap().unwrap(), "a");
        assert_eq!(nullable.column_index("id").unwrap(), 0);
    }

    #[test]
    fn test_convert_nullable_to_default_materialises_nulls() {
        let f = Frame::from_columns(vec![
            Column::from_options(vec![Some(7i32), None]),
            Column::from_options(vec![Some("x".to_string()), None]),
            Column::from_options(vec![Some(true), None]),
            Column::from_options(vec![Some('q'), None]),
        ])
        .unwrap();
        let converted = convert(&f, Flavour::Default).unwrap();
        assert_eq!(converted.flavour(), Flavour::Default);
        assert_eq!(converted.get::<i32>(0, 1).unwrap(), Some(0));
        assert_eq!(converted.get::<String>(1, 1).unwrap().unwrap(), "n/a");
        assert_eq!(converted.get::<bool>(2, 1).unwrap(), Some(false));
        assert_eq!(converted.get::<char>(3, 1).unwrap(), Some('\0'));
    }

    #[test]
    fn test_convert_round_trip_preserves_default_frame() {
        let f = default_frame();
        let round =
            convert(&convert(&f, Flavour::Nullable).unwrap(), Flavour::Default)
                .unwrap();
        assert_eq!(round, f);
    }

    #[test]
    fn test_convert_same_flavour_copies() {
        let f = default_frame();
        let copy = convert(&f, Flavour::Default).unwrap();
        assert_eq!(copy, f);
    }
}
