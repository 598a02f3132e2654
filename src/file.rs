//! Reading and writing `.df` files.
//!
//! Thin, buffered glue over the codec: [`write_file`] serializes a frame
//! and writes the compressed bytes in one shot, [`read_file`] slurps the
//! whole file, validates the leading magic, and decodes. There is no
//! incremental or streaming mode.

use crate::{
    codec,
    compress,
    Error,
    Frame,
    Result,
};
use std::fs::File;
use std::io::{
    BufReader,
    BufWriter,
    Read,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use tracing::debug;

/// The file extension appended to paths that do not already carry it.
pub const FILE_EXTENSION: &str = ".df";

/// Serializes `frame` to the given path and returns the path actually
/// written, which ends with `.df` (appended when missing).
pub fn write_file<P: AsRef<Path>>(path: P, frame: &Frame) -> Result<PathBuf> {
    let path = ensure_extension(path.as_ref());
    let bytes = codec::serialize(frame)?;

    let mut writer = BufWriter::new(File::create(&path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        rows = frame.rows(),
        columns = frame.column_count(),
        "wrote frame"
    );
    Ok(path)
}

/// Reads a `.df` file back into a frame.
///
/// Fails with `Format` when the file does not start with the `df` magic.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Frame> {
    let path = path.as_ref();
    let mut bytes = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;

    if bytes.len() < 2 || bytes[..2] != compress::FILE_MAGIC {
        return Err(Error::Format(format!(
            "'{}' is not a df file",
            path.display()
        )));
    }

    debug!(path = %path.display(), bytes = bytes.len(), "read frame file");
    codec::deserialize(&bytes)
}

fn ensure_extension(path: &Path) -> PathBuf {
    if path.to_string_lossy().ends_with(FILE_EXTENSION) {
        path.to_path_buf()
    } else {
        let mut os = path.as_os_str().to_os_string();
        os.push(FILE_EXTENSION);
        PathBuf::from(os)
    }
}
