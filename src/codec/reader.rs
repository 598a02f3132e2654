//! Token-stream decoder.
//!
//! A single left-to-right pass over the inflated payload: verify the
//! version byte, extract the flavour and the row/column counts, read the
//! optional name tokens, the kind tokens, and finally the column-major cell
//! stream. Any deviation from the grammar fails with `Format`; an
//! unrecognised version byte fails with `Encoding`.
//!
//! When scanning escaped tokens (string and character cells, column names)
//! a `,` terminates the token unless the preceding byte is `<` and the
//! following byte is `>`, in which case it is part of a `<,>` escape. That
//! two-byte look-around is the format's sole tie-breaker.

use crate::{
    Cell,
    Column,
    ElementKind,
    Error,
    Flavour,
    Frame,
    Result,
};

/// Decodes an uncompressed token stream into a frame.
pub(crate) fn decode(tokens: &[u8]) -> Result<Frame> {
    let mut cur = Cursor { data: tokens, pos: 0 };

    cur.expect(b"{v:")?;
    let version = cur.take_byte()?;
    if version != b'1' {
        return Err(Error::Encoding(format!(
            "unsupported format version '{}'",
            version as char
        )));
    }

    cur.expect(b";i:")?;
    let flavour_token = cur.read_until(b';')?;
    let flavour =
        Flavour::from_str_token(&flavour_token).ok_or_else(|| {
            Error::Format(format!("unknown frame flavour '{flavour_token}'"))
        })?;

    cur.expect(b";r:")?;
    let rows = cur.read_decimal()?;
    cur.expect(b";c:")?;
    let cols = cur.read_decimal()?;

    cur.expect(b";n:")?;
    let names = if cur.peek() == Some(b';') {
        None
    } else {
        let mut names = Vec::with_capacity(cols);
        for _ in 0..cols {
            names.push(cur.read_escaped_token()?);
        }
        Some(names)
    };

    cur.expect(b";t:")?;
    let mut kinds = Vec::with_capacity(cols);
    for _ in 0..cols {
        let token = cur.read_plain_token()?;
        let (col_flavour, kind) =
            ElementKind::from_token(&token).ok_or_else(|| {
                Error::Format(format!("unknown column type '{token}'"))
            })?;
        if col_flavour != flavour {
            return Err(Error::Format(format!(
                "column type '{token}' does not match frame flavour \
                 '{flavour}'"
            )));
        }
        kinds.push(kind);
    }
    cur.expect(b";}")?;

    let mut columns = Vec::with_capacity(cols);
    for kind in kinds {
        let escaped =
            matches!(kind, ElementKind::Str | ElementKind::Char);
        let mut column = Column::zeroed(flavour, kind, rows);
        for row in 0..rows {
            let token = if escaped {
                cur.read_escaped_token()?
            } else {
                cur.read_plain_token()?
            };
            let cell = parse_cell(flavour, kind, &token)?;
            column.set(row, cell).map_err(|e| {
                Error::Format(format!("cell '{token}' rejected: {e}"))
            })?;
        }
        columns.push(column);
    }

    if !cur.is_at_end() {
        return Err(Error::Format(
            "trailing data after cell stream".to_string(),
        ));
    }

    let mut frame = if columns.is_empty() {
        if rows != 0 {
            return Err(Error::Format(format!(
                "{rows} rows declared for a frame without columns"
            )));
        }
        Frame::new(flavour)
    } else {
        Frame::from_columns(columns)
            .map_err(|e| Error::Format(e.to_string()))?
    };

    if let Some(names) = names {
        frame
            .set_column_names(names)
            .map_err(|e| Error::Format(e.to_string()))?;
    }
    Ok(frame)
}

fn parse_cell(
    flavour: Flavour,
    kind: ElementKind,
    token: &str,
) -> Result<Cell> {
    if flavour == Flavour::Nullable && token == "null" {
        return Ok(Cell::Null);
    }
    let invalid = || {
        Error::Format(format!("invalid {kind} cell '{token}'"))
    };
    match kind {
        ElementKind::Byte => {
            token.parse().map(Cell::Byte).map_err(|_| invalid())
        }
        ElementKind::Short => {
            token.parse().map(Cell::Short).map_err(|_| invalid())
        }
        ElementKind::Int => {
            token.parse().map(Cell::Int).map_err(|_| invalid())
        }
        ElementKind::Long => {
            token.parse().map(Cell::Long).map_err(|_| invalid())
        }
        ElementKind::Float => {
            token.parse().map(Cell::Float).map_err(|_| invalid())
        }
        ElementKind::Double => {
            token.parse().map(Cell::Double).map_err(|_| invalid())
        }
        ElementKind::Bool => match token {
            "true" => Ok(Cell::Bool(true)),
            "false" => Ok(Cell::Bool(false)),
            _ => Err(invalid()),
        },
        ElementKind::Char => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Cell::Char(c)),
                _ => Err(invalid()),
            }
        }
        ElementKind::Str => Ok(Cell::Str(token.to_string())),
    }
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn take_byte(&mut self) -> Result<u8> {
        let byte = self.peek().ok_or_else(Self::truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, literal: &[u8]) -> Result<()> {
        let end = self.pos + literal.len();
        if self.data.len() < end || &self.data[self.pos..end] != literal {
            return Err(Error::Format(format!(
                "expected '{}' at offset {}",
                String::from_utf8_lossy(literal),
                self.pos
            )));
        }
        self.pos = end;
        Ok(())
    }

    /// Reads up to (not including) the next `stop` byte.
    fn read_until(&mut self, stop: u8) -> Result<String> {
        let start = self.pos;
        while self.peek().ok_or_else(Self::truncated)? != stop {
            self.pos += 1;
        }
        Self::utf8(&self.data[start..self.pos])
    }

    /// Reads an ASCII decimal number (at least one digit).
    fn read_decimal(&mut self) -> Result<usize> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits = Self::utf8(&self.data[start..self.pos])?;
        digits.parse().map_err(|_| {
            Error::Format(format!("invalid decimal at offset {start}"))
        })
    }

    /// Reads a token terminated by a plain `,` and consumes the terminator.
    fn read_plain_token(&mut self) -> Result<String> {
        let token = self.read_until(b',')?;
        self.pos += 1;
        Ok(token)
    }

    /// Reads a `<,>`/`<<>`-escaped token, consuming its `,` terminator, and
    /// returns the unescaped text.
    fn read_escaped_token(&mut self) -> Result<String> {
        let start = self.pos;
        loop {
            let byte = self.peek().ok_or_else(Self::truncated)?;
            if byte == b',' {
                let escaped = self.pos > start
                    && self.data[self.pos - 1] == b'<'
                    && self.data.get(self.pos + 1) == Some(&b'>');
                if !escaped {
                    break;
                }
            }
            self.pos += 1;
        }
        let raw = &self.data[start..self.pos];
        self.pos += 1;
        Self::unescape(raw)
    }

    fn unescape(raw: &[u8]) -> Result<String> {
        let mut out = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            match raw.get(i..i + 3) {
                Some(b"<,>") => {
                    out.push(b',');
                    i += 3;
                }
                Some(b"<<>") => {
                    out.push(b'<');
                    i += 3;
                }
                _ => {
                    out.push(raw[i]);
                    i += 1;
                }
            }
        }
        Self::utf8(&out)
    }

    fn utf8(bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|_| Error::Format("invalid UTF-8 in token".to_string()))
    }

    fn truncated() -> Error {
        Error::Format("unexpected end of token stream".to_string())
    }
}
