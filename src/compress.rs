//! DEFLATE compression and the `df` magic envelope.
//!
//! The token stream is compressed into a zlib-wrapped DEFLATE stream whose
//! first two bytes are then overwritten with the file magic `0x64 0x66`
//! (`"df"`). Destroying the zlib magic is intentional: it makes a `.df`
//! blob recognisable at a glance. Decompression restores the zlib header
//! bytes `0x78 0x9C` before inflating.

use crate::{
    Error,
    Result,
};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{
    Read,
    Write,
};
use tracing::trace;

/// The two leading bytes of every serialized frame.
pub(crate) const FILE_MAGIC: [u8; 2] = [0x64, 0x66];

/// The zlib header written back over the magic before inflation.
const ZLIB_MAGIC: [u8; 2] = [0x78, 0x9C];

/// Compresses a token stream and stamps the `df` magic over the zlib
/// header.
pub(crate) fn deflate(tokens: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(tokens)?;
    let mut compressed = encoder.finish()?;

    // a zlib stream is never shorter than its 2-byte header
    compressed[0] = FILE_MAGIC[0];
    compressed[1] = FILE_MAGIC[1];

    trace!(
        raw = tokens.len(),
        compressed = compressed.len(),
        "deflated token stream"
    );
    Ok(compressed)
}

/// Validates the `df` magic, restores the zlib header, and inflates the
/// payload back into the token stream.
pub(crate) fn inflate(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.len() < 2 || bytes[..2] != FILE_MAGIC {
        return Err(Error::Format(
            "missing df magic at start of data".to_string(),
        ));
    }

    let mut owned = bytes.to_vec();
    owned[0] = ZLIB_MAGIC[0];
    owned[1] = ZLIB_MAGIC[1];

    let mut tokens = Vec::new();
    ZlibDecoder::new(owned.as_slice())
        .read_to_end(&mut tokens)
        .map_err(|_| Error::Format("invalid data format".to_string()))?;

    trace!(
        compressed = bytes.len(),
        raw = tokens.len(),
        "inflated token stream"
    );
    Ok(tokens)
}
