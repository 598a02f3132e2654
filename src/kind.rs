//! The type system of a frame: element kinds and column flavours.
//!
//! Every column stores elements of exactly one [`ElementKind`], in one of two
//! [`Flavour`]s. The pairing of flavour and kind also fixes the column's
//! token name in the serialized header (see [`ElementKind::token`]), which is
//! part of the wire grammar and must not change.

use std::fmt;

/// The element type of a column.
///
/// There are nine kinds. The names mirror the wire-format tokens rather than
/// the Rust primitive names, so `Byte` is an `i8`, `Short` an `i16`, and so
/// on.
///
/// | Kind | Rust type | Wire token |
/// |------|-----------|------------|
/// | `Byte` | `i8` | `ByteColumn` |
/// | `Short` | `i16` | `ShortColumn` |
/// | `Int` | `i32` | `IntColumn` |
/// | `Long` | `i64` | `LongColumn` |
/// | `Float` | `f32` | `FloatColumn` |
/// | `Double` | `f64` | `DoubleColumn` |
/// | `Bool` | `bool` | `BooleanColumn` |
/// | `Char` | `char` | `CharColumn` |
/// | `Str` | `String` | `StringColumn` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit IEEE float.
    Float,
    /// 64-bit IEEE float.
    Double,
    /// Boolean value.
    Bool,
    /// Single character.
    Char,
    /// Non-empty text value.
    Str,
}

/// Whether a column or frame admits missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavour {
    /// Every cell holds a value; empty strings are coerced to `"n/a"`.
    Default,
    /// Any cell may be null.
    Nullable,
}

impl ElementKind {
    /// All nine kinds, in wire-format order.
    pub const ALL: [ElementKind; 9] = [
        ElementKind::Byte,
        ElementKind::Short,
        ElementKind::Int,
        ElementKind::Long,
        ElementKind::Float,
        ElementKind::Double,
        ElementKind::Bool,
        ElementKind::Char,
        ElementKind::Str,
    ];

    /// Returns the wire-format token for this kind in the given flavour.
    ///
    /// These strings appear verbatim in the `t:` section of a serialized
    /// header.
    pub fn token(self, flavour: Flavour) -> &'static str {
        match (flavour, self) {
            (Flavour::Default, ElementKind::Byte) => "ByteColumn",
            (Flavour::Default, ElementKind::Short) => "ShortColumn",
            (Flavour::Default, ElementKind::Int) => "IntColumn",
            (Flavour::Default, ElementKind::Long) => "LongColumn",
            (Flavour::Default, ElementKind::Float) => "FloatColumn",
            (Flavour::Default, ElementKind::Double) => "DoubleColumn",
            (Flavour::Default, ElementKind::Bool) => "BooleanColumn",
            (Flavour::Default, ElementKind::Char) => "CharColumn",
            (Flavour::Default, ElementKind::Str) => "StringColumn",
            (Flavour::Nullable, ElementKind::Byte) => "NullableByteColumn",
            (Flavour::Nullable, ElementKind::Short) => "NullableShortColumn",
            (Flavour::Nullable, ElementKind::Int) => "NullableIntColumn",
            (Flavour::Nullable, ElementKind::Long) => "NullableLongColumn",
            (Flavour::Nullable, ElementKind::Float) => "NullableFloatColumn",
            (Flavour::Nullable, ElementKind::Double) => "NullableDoubleColumn",
            (Flavour::Nullable, ElementKind::Bool) => "NullableBooleanColumn",
            (Flavour::Nullable, ElementKind::Char) => "NullableCharColumn",
            (Flavour::Nullable, ElementKind::Str) => "NullableStringColumn",
        }
    }

    /// Parses a wire-format token back into a flavour and kind.
    pub fn from_token(token: &str) -> Option<(Flavour, ElementKind)> {
        let (flavour, bare) = match token.strip_prefix("Nullable") {
            Some(rest) => (Flavour::Nullable, rest),
            None => (Flavour::Default, token),
        };

        let kind = match bare {
            "ByteColumn" => ElementKind::Byte,
            "ShortColumn" => ElementKind::Short,
            "IntColumn" => ElementKind::Int,
            "LongColumn" => ElementKind::Long,
            "FloatColumn" => ElementKind::Float,
            "DoubleColumn" => ElementKind::Double,
            "BooleanColumn" => ElementKind::Bool,
            "CharColumn" => ElementKind::Char,
            "StringColumn" => ElementKind::Str,
            _ => return None,
        };

        Some((flavour, kind))
    }

    /// Whether columns of this kind participate in numeric statistics.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ElementKind::Byte
                | ElementKind::Short
                | ElementKind::Int
                | ElementKind::Long
                | ElementKind::Float
                | ElementKind::Double
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token(Flavour::Default))
    }
}

impl Flavour {
    /// The header representation of the flavour (`default` or `nullable`).
    pub fn as_str(self) -> &'static str {
        match self {
            Flavour::Default => "default",
            Flavour::Nullable => "nullable",
        }
    }

    /// Parses a header flavour token.
    pub fn from_str_token(s: &str) -> Option<Flavour> {
        match s {
            "default" => Some(Flavour::Default),
            "nullable" => Some(Flavour::Nullable),
            _ => None,
        }
    }
}

impl fmt::Display for Flavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        for kind in ElementKind::ALL {
            for flavour in [Flavour::Default, Flavour::Nullable] {
                let token = kind.token(flavour);
                assert_eq!(
                    ElementKind::from_token(token),
                    Some((flavour, kind)),
                    "token {token} did not round-trip"
                );
            }
        }
    }

    #[test]
    fn test_token_names_are_stable() {
        assert_eq!(ElementKind::Int.token(Flavour::Default), "IntColumn");
        assert_eq!(ElementKind::Bool.token(Flavour::Default), "BooleanColumn");
        assert_eq!(
            ElementKind::Str.token(Flavour::Nullable),
            "NullableStringColumn"
        );
    }

    #[test]
    fn test_unknown_token_rejected() {
        assert_eq!(ElementKind::from_token("UuidColumn"), None);
        assert_eq!(ElementKind::from_token("NullableColumn"), None);
        assert_eq!(ElementKind::from_token(""), None);
    }

    #[test]
    fn test_numeric_classification() {
        assert!(ElementKind::Byte.is_numeric());
        assert!(ElementKind::Double.is_numeric());
        assert!(!ElementKind::Bool.is_numeric());
        assert!(!ElementKind::Char.is_numeric());
        assert!(!ElementKind::Str.is_numeric());
    }

    #[test]
    fn test_flavour_parsing() {
        assert_eq!(Flavour::from_str_token("default"), Some(Flavour::Default));
        assert_eq!(
            Flavour::from_str_token("nullable"),
            Some(Flavour::Nullable)
        );
        assert_eq!(Flavour::from_str_token("Default"), None);
    }
}
