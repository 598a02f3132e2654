//! # dframe
//!
//! In-memory typed data frames with a compressed binary file format
//! (`.df`).
//!
//! A [`Frame`] is a table of strongly typed columns of uniform length.
//! Nine element kinds are supported (`i8` through `f64`, `bool`, `char`,
//! `String`), each in a non-null and a nullable flavour. Frames support row
//! and column structural edits, typed element access by index or name,
//! regex search, in-place sorting, and numeric statistics.
//!
//! The companion binary codec persists a frame as a self-describing token
//! stream, DEFLATE-compressed and stamped with the `df` file magic, with an
//! optional Base64 envelope.
//!
//! # Quick Start
//!
//! ```
//! use dframe::{Cell, Column, Frame};
//!
//! let mut frame = Frame::with_names(
//!     vec!["id".into(), "name".into(), "score".into()],
//!     vec![
//!         Column::from_values(vec![1i32, 2]),
//!         Column::from_values(vec!["ada".to_string(), "grace".to_string()]),
//!         Column::from_values(vec![9.5f64, 8.25]),
//!     ],
//! )?;
//!
//! frame.add_row(vec![
//!     Cell::Int(3),
//!     Cell::from("edsger"),
//!     Cell::Double(7.75),
//! ])?;
//! frame.sort_by_named("score")?;
//! assert_eq!(frame.get_named::<String>("name", 0)?.unwrap(), "edsger");
//! assert_eq!(frame.average_named("score")?, 8.5);
//!
//! let bytes = dframe::serialize(&frame)?;
//! assert_eq!(dframe::deserialize(&bytes)?, frame);
//! # Ok::<(), dframe::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`frame`] - The frame container and its operation families
//! - [`column`] - Typed column stores and the [`Column`] sum
//! - [`cell`] - Type-tagged cell values
//! - [`kind`] - Element kinds and flavours
//! - [`convert`] - Copy, merge, and flavour conversion
//! - [`codec`] - Binary serialisation with compression and Base64
//! - [`file`] - `.df` file reading and writing
//! - [`error`] - Error types and `Result` alias
//!
//! Frames are single-owner mutable values: nothing in this crate is
//! thread-safe or transactional, and the codec is pure CPU.

#![warn(missing_docs)]

/// Type-tagged cell values.
pub mod cell;
/// Binary serialisation: token codec, compression, Base64 envelope.
pub mod codec;
/// Typed column stores and the column sum type.
pub mod column;
/// DEFLATE compression and the `df` magic envelope.
mod compress;
/// Copy, merge, and flavour conversion utilities.
pub mod convert;
/// Error types and `Result` alias.
pub mod error;
/// `.df` file reading and writing.
pub mod file;
/// The frame container.
pub mod frame;
/// Element kinds and column flavours.
pub mod kind;

pub use cell::Cell;
pub use codec::{
    deserialize,
    from_base64,
    serialize,
    to_base64,
};
pub use column::{
    Column,
    Element,
};
pub use convert::{
    convert,
    copy_of,
    merge,
};
pub use error::{
    Error,
    Result,
};
pub use file::{
    read_file,
    write_file,
};
pub use frame::Frame;
pub use kind::{
    ElementKind,
    Flavour,
};
