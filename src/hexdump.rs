//! Hexadecimal inspection of a window of a file, used to check generated images by hand.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use log::debug;

use crate::{CdError, CdResult};

/// Render `bytes` as two lowercase hex digits per byte, each followed by a space, and end the
/// line with `\n`.
pub fn format_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3 + 1);

    for b in bytes {
        // Writing to a String can't fail
        let _ = write!(out, "{:02x} ", b);
    }

    out.push('\n');

    out
}

/// Read `size` bytes starting at offset `skip`. Returns `CdError::RangeViolation` if the window
/// extends past the end of the stream.
pub fn read_window<R: Read + Seek>(reader: &mut R, size: u64, skip: u64) -> CdResult<Vec<u8>> {
    let len = reader.seek(SeekFrom::End(0))?;

    match size.checked_add(skip) {
        Some(end) if end <= len => (),
        _ => return Err(CdError::RangeViolation { size, skip, len }),
    }

    reader.seek(SeekFrom::Start(skip))?;

    let mut buf = vec![0; size as usize];

    reader.read_exact(&mut buf)?;

    Ok(buf)
}

/// Open `path` and return the hex dump of `size` bytes starting at `skip`
pub fn dump_file(path: &Path, size: u64, skip: u64) -> CdResult<String> {
    debug!("Dumping {} bytes at {} from {}", size, skip, path.display());

    let mut file = File::open(path)?;

    let bytes = read_window(&mut file, size, skip)?;

    Ok(format_hex(&bytes))
}
