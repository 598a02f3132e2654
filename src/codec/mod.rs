//! # Binary Codec
//!
//! Serialisation of frames to the `.df` byte format and back.
//!
//! A serialized frame is a self-describing ASCII token stream (see
//! [`writer`](self)) compressed with DEFLATE in a zlib wrapper, whose first
//! two bytes are overwritten with the file magic `0x64 0x66` (`"df"`). The
//! same bytes may travel wrapped in standard Base64.
//!
//! ```
//! use dframe::{Column, Frame};
//!
//! let frame = Frame::from_columns(vec![
//!     Column::from_values(vec![1i32, 2, 3]),
//! ])?;
//!
//! let bytes = dframe::serialize(&frame)?;
//! assert_eq!(&bytes[..2], b"df");
//! assert_eq!(dframe::deserialize(&bytes)?, frame);
//!
//! let text = dframe::to_base64(&frame)?;
//! assert_eq!(dframe::from_base64(&text)?, frame);
//! # Ok::<(), dframe::Error>(())
//! ```

mod reader;
mod writer;

use crate::{
    compress,
    Error,
    Frame,
    Result,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Serializes `frame` into compressed `.df` bytes, starting with the `df`
/// magic.
pub fn serialize(frame: &Frame) -> Result<Vec<u8>> {
    let tokens = writer::encode(frame)?;
    compress::deflate(&tokens)
}

/// Deserializes compressed `.df` bytes into a frame.
pub fn deserialize(bytes: &[u8]) -> Result<Frame> {
    let tokens = compress::inflate(bytes)?;
    reader::decode(&tokens)
}

/// Serializes `frame` and wraps the compressed bytes in standard Base64
/// (RFC 4648, no line breaks).
pub fn to_base64(frame: &Frame) -> Result<String> {
    Ok(STANDARD.encode(serialize(frame)?))
}

/// Decodes a Base64 envelope produced by [`to_base64`] back into a frame.
pub fn from_base64(text: &str) -> Result<Frame> {
    let bytes = STANDARD
        .decode(text)
        .map_err(|e| Error::Format(format!("invalid Base64 payload: {e}")))?;
    deserialize(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Column,
        Flavour,
    };

    fn sample() -> Frame {
        Frame::with_names(
            vec!["id".into(), "word".into()],
            vec![
                Column::from_options(vec![Some(1i32), None, Some(3)]),
                Column::from_options(vec![
                    Some("a,b".to_string()),
                    Some("c<d".to_string()),
                    None,
                ]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_serialize_starts_with_magic() {
        let bytes = serialize(&sample()).unwrap();
        assert_eq!(bytes[0], 0x64);
        assert_eq!(bytes[1], 0x66);
    }

    #[test]
    fn test_round_trip() {
        let frame = sample();
        let restored = deserialize(&serialize(&frame).unwrap()).unwrap();
        assert_eq!(restored, frame);
    }

    #[test]
    fn test_base64_round_trip() {
        let frame = sample();
        let text = to_base64(&frame).unwrap();
        assert!(!text.contains('\n'));
        // Base64 of the leading "df" magic always starts with "ZG"
        assert!(text.starts_with("ZG"));
        assert_eq!(from_base64(&text).unwrap(), frame);
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut bytes = serialize(&sample()).unwrap();
        bytes[0] = 0x00;
        bytes[1] = 0x00;
        assert!(matches!(
            deserialize(&bytes),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_corrupted_stream_rejected() {
        let mut bytes = serialize(&sample()).unwrap();
        let mid = bytes.len() / 2;
        bytes.truncate(mid.max(3));
        assert!(matches!(
            deserialize(&bytes),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(matches!(
            from_base64("not base64 at all!"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_empty_frame_round_trip() {
        for flavour in [Flavour::Default, Flavour::Nullable] {
            let frame = Frame::new(flavour);
            let restored =
                deserialize(&serialize(&frame).unwrap()).unwrap();
            assert_eq!(restored, frame);
        }
    }
}
