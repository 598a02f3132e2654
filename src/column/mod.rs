//! # Column Module
//!
//! Typed, resizable column storage for frames. Every column pairs one of the
//! nine [`ElementKind`]s with one of the two [`Flavour`]s, giving eighteen
//! concrete column types behind the [`Column`] sum.
//!
//! All column stores share one structural contract:
//!
//! | Operation | Behaviour |
//! |-----------|-----------|
//! | `get` / `set` | Element access; out-of-range fails with `Bounds` |
//! | `insert(i, next, v)` | Shift `[i, next)` right by one, place `v` at `i` |
//! | `remove(from, to, next)` | Erase `[from, to)`, close the gap, fill the vacated tail |
//! | `capacity` | Physical backing length |
//! | `grow` | Double the backing length (0 grows to 2) |
//! | `match_length(n)` | Truncate or fill-extend to exactly `n` |
//!
//! The fill value is the kind's zero (`0`, `false`, `'\0'`, `"n/a"`) for
//! non-null columns and null for nullable ones. Columns do not track the
//! owning frame's live row count; structural operations take it as the
//! `next` parameter.

/// Nullable column stores (`Option` per slot).
pub mod nullable;
/// Non-null primitive column store.
pub mod primitive;
/// Non-null string column store with the `"n/a"` coercion.
pub mod string;

pub use nullable::{
    NullableColumn,
    NullableStringColumn,
};
pub use primitive::ValueColumn;
pub use string::{
    StringColumn,
    STRING_PLACEHOLDER,
};

use crate::{
    Cell,
    ElementKind,
    Error,
    Flavour,
    Result,
};

/// Maps a Rust value type onto a column element kind.
///
/// Implemented for the nine cell types (`i8`, `i16`, `i32`, `i64`, `f32`,
/// `f64`, `bool`, `char`, `String`). The trait carries everything the
/// generic frame accessors and the column constructors need: the kind tag,
/// the fill value, and cell wrapping/unwrapping.
pub trait Element: Clone + PartialEq + Sized + 'static {
    /// The kind tag for this element type.
    const KIND: ElementKind;

    /// The zero value used for vacated and extended slots.
    fn fill() -> Self;

    /// Wraps this value in a type-tagged cell.
    fn into_cell(self) -> Cell;

    /// Extracts a value of this type from a cell of the matching kind.
    fn from_cell(cell: Cell) -> Option<Self>;

    /// Builds a non-null column from values.
    fn column_from(values: Vec<Self>) -> Column;

    /// Builds a nullable column from optional values.
    fn nullable_column_from(values: Vec<Option<Self>>) -> Column;
}

macro_rules! impl_element {
    ($type:ty, $kind:ident, $nullable:ident, $fill:expr) => {
        impl Element for $type {
            const KIND: ElementKind = ElementKind::$kind;

            fn fill() -> Self {
                $fill
            }

            fn into_cell(self) -> Cell {
                Cell::$kind(self)
            }

            fn from_cell(cell: Cell) -> Option<Self> {
                match cell {
                    Cell::$kind(v) => Some(v),
                    _ => None,
                }
            }

            fn column_from(values: Vec<Self>) -> Column {
                Column::$kind(ValueColumn::from_values(values))
            }

            fn nullable_column_from(values: Vec<Option<Self>>) -> Column {
                Column::$nullable(NullableColumn::from_values(values))
            }
        }
    };
}

impl_element!(i8, Byte, NullableByte, 0);
impl_element!(i16, Short, NullableShort, 0);
impl_element!(i32, Int, NullableInt, 0);
impl_element!(i64, Long, NullableLong, 0);
impl_element!(f32, Float, NullableFloat, 0.0);
impl_element!(f64, Double, NullableDouble, 0.0);
impl_element!(bool, Bool, NullableBool, false);
impl_element!(char, Char, NullableChar, '\0');

impl Element for String {
    const KIND: ElementKind = ElementKind::Str;

    fn fill() -> Self {
        STRING_PLACEHOLDER.to_string()
    }

    fn into_cell(self) -> Cell {
        Cell::Str(self)
    }

    fn from_cell(cell: Cell) -> Option<Self> {
        match cell {
            Cell::Str(v) => Some(v),
            _ => None,
        }
    }

    fn column_from(values: Vec<Self>) -> Column {
        Column::Str(StringColumn::from_values(values))
    }

    fn nullable_column_from(values: Vec<Option<Self>>) -> Column {
        Column::NullableStr(NullableStringColumn::from_values(values))
    }
}

/// One frame column: a flavour/kind pair with its typed backing store.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Non-null `i8` column.
    Byte(ValueColumn<i8>),
    /// Non-null `i16` column.
    Short(ValueColumn<i16>),
    /// Non-null `i32` column.
    Int(ValueColumn<i32>),
    /// Non-null `i64` column.
    Long(ValueColumn<i64>),
    /// Non-null `f32` column.
    Float(ValueColumn<f32>),
    /// Non-null `f64` column.
    Double(ValueColumn<f64>),
    /// Non-null boolean column.
    Bool(ValueColumn<bool>),
    /// Non-null character column.
    Char(ValueColumn<char>),
    /// Non-null string column.
    Str(StringColumn),
    /// Nullable `i8` column.
    NullableByte(NullableColumn<i8>),
    /// Nullable `i16` column.
    NullableShort(NullableColumn<i16>),
    /// Nullable `i32` column.
    NullableInt(NullableColumn<i32>),
    /// Nullable `i64` column.
    NullableLong(NullableColumn<i64>),
    /// Nullable `f32` column.
    NullableFloat(NullableColumn<f32>),
    /// Nullable `f64` column.
    NullableDouble(NullableColumn<f64>),
    /// Nullable boolean column.
    NullableBool(NullableColumn<bool>),
    /// Nullable character column.
    NullableChar(NullableColumn<char>),
    /// Nullable string column.
    NullableStr(NullableStringColumn),
}

macro_rules! dispatch {
    ($self:expr, $col:ident => $body:expr) => {
        match $self {
            Column::Byte($col) => $body,
            Column::Short($col) => $body,
            Column::Int($col) => $body,
            Column::Long($col) => $body,
            Column::Float($col) => $body,
            Column::Double($col) => $body,
            Column::Bool($col) => $body,
            Column::Char($col) => $body,
            Column::Str($col) => $body,
            Column::NullableByte($col) => $body,
            Column::NullableShort($col) => $body,
            Column::NullableInt($col) => $body,
            Column::NullableLong($col) => $body,
            Column::NullableFloat($col) => $body,
            Column::NullableDouble($col) => $body,
            Column::NullableBool($col) => $body,
            Column::NullableChar($col) => $body,
            Column::NullableStr($col) => $body,
        }
    };
}

impl Column {
    /// Builds a non-null column from a vector of values.
    ///
    /// # Examples
    ///
    /// ```
    /// use dframe::{Column, ElementKind, Flavour};
    ///
    /// let col = Column::from_values(vec![1i32, 2, 3]);
    /// assert_eq!(col.member_kind(), ElementKind::Int);
    /// assert_eq!(col.flavour(), Flavour::Default);
    /// assert_eq!(col.capacity(), 3);
    /// ```
    pub fn from_values<T: Element>(values: Vec<T>) -> Column {
        T::column_from(values)
    }

    /// Builds a nullable column from a vector of optional values.
    ///
    /// # Examples
    ///
    /// ```
    /// use dframe::{Column, Flavour};
    ///
    /// let col = Column::from_options(vec![Some(1i64), None, Some(3)]);
    /// assert_eq!(col.flavour(), Flavour::Nullable);
    /// ```
    pub fn from_options<T: Element>(values: Vec<Option<T>>) -> Column {
        T::nullable_column_from(values)
    }

    /// Creates a fill-initialized column of the given shape.
    pub fn zeroed(flavour: Flavour, kind: ElementKind, len: usize) -> Column {
        match (flavour, kind) {
            (Flavour::Default, ElementKind::Byte) => {
                Column::Byte(ValueColumn::with_length(len))
            }
            (Flavour::Default, ElementKind::Short) => {
                Column::Short(ValueColumn::with_length(len))
            }
            (Flavour::Default, ElementKind::Int) => {
                Column::Int(ValueColumn::with_length(len))
            }
            (Flavour::Default, ElementKind::Long) => {
                Column::Long(ValueColumn::with_length(len))
            }
            (Flavour::Default, ElementKind::Float) => {
                Column::Float(ValueColumn::with_length(len))
            }
            (Flavour::Default, ElementKind::Double) => {
                Column::Double(ValueColumn::with_length(len))
            }
            (Flavour::Default, ElementKind::Bool) => {
                Column::Bool(ValueColumn::with_length(len))
            }
            (Flavour::Default, ElementKind::Char) => {
                Column::Char(ValueColumn::with_length(len))
            }
            (Flavour::Default, ElementKind::Str) => {
                Column::Str(StringColumn::with_length(len))
            }
            (Flavour::Nullable, ElementKind::Byte) => {
                Column::NullableByte(NullableColumn::with_length(len))
            }
            (Flavour::Nullable, ElementKind::Short) => {
                Column::NullableShort(NullableColumn::with_length(len))
            }
            (Flavour::Nullable, ElementKind::Int) => {
                Column::NullableInt(NullableColumn::with_length(len))
            }
            (Flavour::Nullable, ElementKind::Long) => {
                Column::NullableLong(NullableColumn::with_length(len))
            }
            (Flavour::Nullable, ElementKind::Float) => {
                Column::NullableFloat(NullableColumn::with_length(len))
            }
            (Flavour::Nullable, ElementKind::Double) => {
                Column::NullableDouble(NullableColumn::with_length(len))
            }
            (Flavour::Nullable, ElementKind::Bool) => {
                Column::NullableBool(NullableColumn::with_length(len))
            }
            (Flavour::Nullable, ElementKind::Char) => {
                Column::NullableChar(NullableColumn::with_length(len))
            }
            (Flavour::Nullable, ElementKind::Str) => {
                Column::NullableStr(NullableStringColumn::with_length(len))
            }
        }
    }

    /// The flavour of this column.
    pub fn flavour(&self) -> Flavour {
        match self {
            Column::Byte(_)
            | Column::Short(_)
            | Column::Int(_)
            | Column::Long(_)
            | Column::Float(_)
            | Column::Double(_)
            | Column::Bool(_)
            | Column::Char(_)
            | Column::Str(_) => Flavour::Default,
            _ => Flavour::Nullable,
        }
    }

    /// The element kind stored by this column.
    pub fn member_kind(&self) -> ElementKind {
        match self {
            Column::Byte(_) | Column::NullableByte(_) => ElementKind::Byte,
            Column::Short(_) | Column::NullableShort(_) => ElementKind::Short,
            Column::Int(_) | Column::NullableInt(_) => ElementKind::Int,
            Column::Long(_) | Column::NullableLong(_) => ElementKind::Long,
            Column::Float(_) | Column::NullableFloat(_) => ElementKind::Float,
            Column::Double(_) | Column::NullableDouble(_) => {
                ElementKind::Double
            }
            Column::Bool(_) | Column::NullableBool(_) => ElementKind::Bool,
            Column::Char(_) | Column::NullableChar(_) => ElementKind::Char,
            Column::Str(_) | Column::NullableStr(_) => ElementKind::Str,
        }
    }

    /// The wire-format token for this column's shape.
    pub fn token(&self) -> &'static str {
        self.member_kind().token(self.flavour())
    }

    /// The physical backing length.
    pub fn capacity(&self) -> usize {
        dispatch!(self, c => c.capacity())
    }

    /// Doubles the backing length; growth from 0 goes to 2.
    pub fn grow(&mut self) {
        dispatch!(self, c => c.grow())
    }

    /// Truncates or fill-extends the backing to exactly `len`.
    pub fn match_length(&mut self, len: usize) {
        dispatch!(self, c => c.match_length(len))
    }

    /// Erases `[from, to)`, closes the gap over `[to, next)`, and fills the
    /// vacated tail.
    pub fn remove(&mut self, from: usize, to: usize, next: usize) {
        dispatch!(self, c => c.remove(from, to, next))
    }

    /// Checks that `cell` is storable in this column: matching kind, and
    /// null only in the nullable flavour.
    pub fn validate_cell(&self, cell: &Cell) -> Result<()> {
        match cell.kind() {
            None => match self.flavour() {
                Flavour::Nullable => Ok(()),
                Flavour::Default => Err(Error::InvalidRequest(format!(
                    "cannot store null in non-null column {}",
                    self.token()
                ))),
            },
            Some(kind) if kind == self.member_kind() => Ok(()),
            Some(kind) => Err(Error::InvalidRequest(format!(
                "cell of kind {} does not fit column {}",
                kind,
                self.token()
            ))),
        }
    }

    /// Returns the cell at `index`.
    pub fn cell(&self, index: usize) -> Result<Cell> {
        match self {
            Column::Byte(c) => c.get(index).map(Cell::Byte),
            Column::Short(c) => c.get(index).map(Cell::Short),
            Column::Int(c) => c.get(index).map(Cell::Int),
            Column::Long(c) => c.get(index).map(Cell::Long),
            Column::Float(c) => c.get(index).map(Cell::Float),
            Column::Double(c) => c.get(index).map(Cell::Double),
            Column::Bool(c) => c.get(index).map(Cell::Bool),
            Column::Char(c) => c.get(index).map(Cell::Char),
            Column::Str(c) => {
                c.get(index).map(|s| Cell::Str(s.to_string()))
            }
            Column::NullableByte(c) => {
                Ok(c.get(index)?.map(Cell::Byte).unwrap_or(Cell::Null))
            }
            Column::NullableShort(c) => {
                Ok(c.get(index)?.map(Cell::Short).unwrap_or(Cell::Null))
            }
            Column::NullableInt(c) => {
                Ok(c.get(index)?.map(Cell::Int).unwrap_or(Cell::Null))
            }
            Column::NullableLong(c) => {
                Ok(c.get(index)?.map(Cell::Long).unwrap_or(Cell::Null))
            }
            Column::NullableFloat(c) => {
                Ok(c.get(index)?.map(Cell::Float).unwrap_or(Cell::Null))
            }
            Column::NullableDouble(c) => {
                Ok(c.get(index)?.map(Cell::Double).unwrap_or(Cell::Null))
            }
            Column::NullableBool(c) => {
                Ok(c.get(index)?.map(Cell::Bool).unwrap_or(Cell::Null))
            }
            Column::NullableChar(c) => {
                Ok(c.get(index)?.map(Cell::Char).unwrap_or(Cell::Null))
            }
            Column::NullableStr(c) => Ok(c
                .get(index)?
                .map(|s| Cell::Str(s.to_string()))
                .unwrap_or(Cell::Null)),
        }
    }

    /// Overwrites the cell at `index` after kind and nullability checks.
    pub fn set(&mut self, index: usize, cell: Cell) -> Result<()> {
        self.validate_cell(&cell)?;
        match (self, cell) {
            (Column::Byte(c), Cell::Byte(v)) => c.set(index, v),
            (Column::Short(c), Cell::Short(v)) => c.set(index, v),
            (Column::Int(c), Cell::Int(v)) => c.set(index, v),
            (Column::Long(c), Cell::Long(v)) => c.set(index, v),
            (Column::Float(c), Cell::Float(v)) => c.set(index, v),
            (Column::Double(c), Cell::Double(v)) => c.set(index, v),
            (Column::Bool(c), Cell::Bool(v)) => c.set(index, v),
            (Column::Char(c), Cell::Char(v)) => c.set(index, v),
            (Column::Str(c), Cell::Str(v)) => c.set(index, v),
            (Column::NullableByte(c), Cell::Byte(v)) => c.set(index, Some(v)),
            (Column::NullableByte(c), Cell::Null) => c.set(index, None),
            (Column::NullableShort(c), Cell::Short(v)) => {
                c.set(index, Some(v))
            }
            (Column::NullableShort(c), Cell::Null) => c.set(index, None),
            (Column::NullableInt(c), Cell::Int(v)) => c.set(index, Some(v)),
            (Column::NullableInt(c), Cell::Null) => c.set(index, None),
            (Column::NullableLong(c), Cell::Long(v)) => c.set(index, Some(v)),
            (Column::NullableLong(c), Cell::Null) => c.set(index, None),
            (Column::NullableFloat(c), Cell::Float(v)) => {
                c.set(index, Some(v))
            }
            (Column::NullableFloat(c), Cell::Null) => c.set(index, None),
            (Column::NullableDouble(c), Cell::Double(v)) => {
                c.set(index, Some(v))
            }
            (Column::NullableDouble(c), Cell::Null) => c.set(index, None),
            (Column::NullableBool(c), Cell::Bool(v)) => c.set(index, Some(v)),
            (Column::NullableBool(c), Cell::Null) => c.set(index, None),
            (Column::NullableChar(c), Cell::Char(v)) => c.set(index, Some(v)),
            (Column::NullableChar(c), Cell::Null) => c.set(index, None),
            (Column::NullableStr(c), Cell::Str(v)) => c.set(index, Some(v)),
            (Column::NullableStr(c), Cell::Null) => c.set(index, None),
            // validate_cell rules out every remaining pairing
            (col, cell) => Err(Error::InvalidRequest(format!(
                "cell {:?} does not fit column {}",
                cell,
                col.token()
            ))),
        }
    }

    /// Shifts `[index, next)` right by one and places `cell` at `index`,
    /// after kind and nullability checks.
    ///
    /// Precondition: `index <= next` and `capacity() >= next + 1`.
    pub fn insert(
        &mut self,
        index: usize,
        next: usize,
        cell: Cell,
    ) -> Result<()> {
        self.validate_cell(&cell)?;
        dispatch!(&mut *self, c => c.insert_gap(index, next));
        self.set(index, cell)
    }

    /// Iterates over all backed cells, including slots beyond the owning
    /// frame's live row count.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.capacity()).filter_map(move |i| self.cell(i).ok())
    }
}
