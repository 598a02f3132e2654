//! Error types for the dframe crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, Error>`.

use thiserror::Error;

/// Errors that can occur when working with frames or the `.df` format.
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O error occurred while reading or writing a `.df` file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row or column index was outside the valid range.
    #[error("index out of bounds: {index} (length {len})")]
    Bounds {
        /// The offending index.
        index: usize,
        /// The length of the addressed sequence.
        len: usize,
    },

    /// An argument contract was violated: an empty or duplicate column name,
    /// a cell type mismatch, a row of the wrong width, a column of the wrong
    /// flavour, or an unknown column name.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An operation that is semantically undefined, such as computing the
    /// average of a non-numeric or all-null column, or encoding a frame that
    /// exceeds the encoder's buffer cap.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// A malformed binary stream: bad file magic, failed decompression, or a
    /// grammar violation in the token stream.
    #[error("format error: {0}")]
    Format(String),

    /// The serialized payload declares a format version this implementation
    /// does not understand.
    #[error("unsupported encoding: {0}")]
    Encoding(String),
}

/// A type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
