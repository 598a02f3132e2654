//! Token-stream encoder.
//!
//! The serializer emits ASCII tokens into a growable byte buffer:
//!
//! ```text
//! {v:1;i:FLAVOUR;r:ROWS;c:COLS;n:NAME,..,;t:KIND,..,;}CELL,CELL,..
//! ```
//!
//! Cells follow column-major, one per live row, each terminated by `,`.
//! String and character cells and column names are escaped: `,` becomes
//! `<,>` and `<` becomes `<<>`. A null cell is the literal `null`.

use crate::{
    ElementKind,
    Error,
    Frame,
    Result,
};
use bytes::BytesMut;

/// The encoder refuses to grow its buffer past this size; larger frames
/// fail cleanly instead of overflowing the doubling arithmetic.
pub(crate) const MAX_TOKEN_BUFFER: usize = 1 << 30;

/// A byte buffer that doubles on demand and saturates at
/// [`MAX_TOKEN_BUFFER`].
struct TokenWriter {
    buf: BytesMut,
}

impl TokenWriter {
    fn new() -> Self {
        Self { buf: BytesMut::with_capacity(64) }
    }

    /// Makes room for `additional` bytes, doubling the capacity until it
    /// fits. Fails with `Unsupported` once the cap is exceeded.
    fn ensure(&mut self, additional: usize) -> Result<()> {
        let required =
            self.buf.len().checked_add(additional).unwrap_or(usize::MAX);
        if required > MAX_TOKEN_BUFFER {
            return Err(Error::Unsupported(format!(
                "encoded frame exceeds the maximum buffer size of {} bytes",
                MAX_TOKEN_BUFFER
            )));
        }
        if required > self.buf.capacity() {
            let mut target = self.buf.capacity().max(64);
            while target < required {
                target *= 2;
            }
            let target = target.min(MAX_TOKEN_BUFFER);
            self.buf.reserve(target - self.buf.len());
        }
        Ok(())
    }

    fn push_str(&mut self, text: &str) -> Result<()> {
        self.ensure(text.len())?;
        self.buf.extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn push_escaped(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            match ch {
                ',' => self.push_str("<,>")?,
                '<' => self.push_str("<<>")?,
                _ => {
                    let mut utf8 = [0u8; 4];
                    self.push_str(ch.encode_utf8(&mut utf8))?;
                }
            }
        }
        Ok(())
    }

    /// The finished token stream, trimmed to the written length.
    fn finish(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

/// Encodes `frame` into its uncompressed token stream.
pub(crate) fn encode(frame: &Frame) -> Result<Vec<u8>> {
    let mut w = TokenWriter::new();

    w.push_str("{v:1;i:")?;
    w.push_str(frame.flavour().as_str())?;
    w.push_str(";r:")?;
    w.push_str(&frame.rows().to_string())?;
    w.push_str(";c:")?;
    w.push_str(&frame.column_count().to_string())?;

    w.push_str(";n:")?;
    if frame.has_column_names() {
        for name in frame.column_names() {
            w.push_escaped(&name)?;
            w.push_str(",")?;
        }
    }

    w.push_str(";t:")?;
    for col in frame.iter_columns() {
        w.push_str(col.token())?;
        w.push_str(",")?;
    }
    w.push_str(";}")?;

    let mut text = String::new();
    for col in frame.iter_columns() {
        let escaped = matches!(
            col.member_kind(),
            ElementKind::Str | ElementKind::Char
        );
        for row in 0..frame.rows() {
            let cell = col.cell(row)?;
            text.clear();
            cell.render(&mut text);
            if escaped && !cell.is_null() {
                w.push_escaped(&text)?;
            } else {
                w.push_str(&text)?;
            }
            w.push_str(",")?;
        }
    }

    Ok(w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Cell,
        Column,
        Flavour,
    };

    fn tokens(frame: &Frame) -> String {
        String::from_utf8(encode(frame).unwrap()).unwrap()
    }

    #[test]
    fn test_header_without_names() {
        let frame = Frame::from_columns(vec![Column::from_values(vec![
            1i32, 2,
        ])])
        .unwrap();
        assert_eq!(tokens(&frame), "{v:1;i:default;r:2;c:1;n:;t:IntColumn,;}1,2,");
    }

    #[test]
    fn test_header_with_names() {
        let frame = Frame::with_names(
            vec!["a".into(), "b".into()],
            vec![
                Column::from_values(vec![1i16]),
                Column::from_values(vec![true]),
            ],
        )
        .unwrap();
        assert_eq!(
            tokens(&frame),
            "{v:1;i:default;r:1;c:2;n:a,b,;t:ShortColumn,BooleanColumn,;}1,true,"
        );
    }

    #[test]
    fn test_body_is_column_major() {
        let frame = Frame::from_columns(vec![
            Column::from_values(vec![1i32, 2]),
            Column::from_values(vec![10i64, 20]),
        ])
        .unwrap();
        assert!(tokens(&frame).ends_with(";}1,2,10,20,"));
    }

    #[test]
    fn test_string_and_char_cells_are_escaped() {
        let frame = Frame::from_columns(vec![
            Column::from_values(
                ["a,b", "c<d", "e<,>f"].map(String::from).to_vec(),
            ),
            Column::from_values(vec![',', '<', 'x']),
        ])
        .unwrap();
        let text = tokens(&frame);
        assert!(text.ends_with(";}a<,>b,c<<>d,e<<><,>>f,<,>,<<>,x,"));
    }

    #[test]
    fn test_names_are_escaped() {
        let frame = Frame::with_names(
            vec!["a,b".into()],
            vec![Column::from_values(vec![0i8])],
        )
        .unwrap();
        assert!(tokens(&frame).contains(";n:a<,>b,;t:"));
    }

    #[test]
    fn test_null_cells_render_as_literal() {
        let frame = Frame::from_columns(vec![
            Column::from_options(vec![Some(1i32), None]),
            Column::from_options(vec![Some("x".to_string()), None]),
        ])
        .unwrap();
        assert_eq!(
            tokens(&frame),
            "{v:1;i:nullable;r:2;c:2;n:;t:NullableIntColumn,NullableStringColumn,;}1,null,x,null,"
        );
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::new(Flavour::Nullable);
        assert_eq!(tokens(&frame), "{v:1;i:nullable;r:0;c:0;n:;t:;}");
    }

    #[test]
    fn test_spare_capacity_is_not_serialized() {
        let mut frame = Frame::from_columns(vec![Column::from_values(vec![
            1i32, 2,
        ])])
        .unwrap();
        frame.add_row(vec![Cell::Int(3)]).unwrap();
        assert_eq!(frame.capacity(), 4);
        assert!(tokens(&frame).ends_with(";}1,2,3,"));
    }

    #[test]
    fn test_writer_cap_is_enforced() {
        let mut w = TokenWriter::new();
        assert!(w.ensure(MAX_TOKEN_BUFFER + 1).is_err());
        assert!(w.push_str("ok").is_ok());
    }
}
