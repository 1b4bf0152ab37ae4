//! Generation of raw Compact Disc (CD) pregaps for disc image assembly.
//!
//! Dumps often omit the pregap of their tracks, it must then be recreated byte for byte before
//! the tracks can be stitched back into a complete image. Audio pregaps are plain silence, data
//! pregaps contain a run of zeroes followed by Mode 1 sectors carrying a sync pattern and a BCD
//! timestamp.

#![warn(missing_docs)]

#[macro_use]
extern crate arrayref;

pub use bcd::Bcd;
pub use msf::Msf;
pub use pregap::{Pregap, PregapSectors};
pub use sector::Sector;

use std::io;
use thiserror::Error;

pub mod bcd;
pub mod hexdump;
pub mod msf;
pub mod pregap;
pub mod sector;

#[cfg(test)]
mod tests;

/// Error type for pregap generation and inspection.
#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum CdError {
    #[error("Generic I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("size + skip value bigger than file size ({size} + {skip} > {len})")]
    RangeViolation { size: u64, skip: u64, len: u64 },
    #[error("Value {0} can't be encoded as two BCD digits")]
    BcdOutOfRange(u32),
    #[error("Attempted to parse invalid BCD data")]
    BadBcd,
    #[error("Invalid MSF: expected mm:ss:ff with minutes <= 99, seconds <= 59, frames <= 74")]
    InvalidMsf,
    #[error(
        "The sync pattern at the start of a CD-ROM sector (0x00, 0xff * 10, 0x00) was invalid"
    )]
    BadSyncPattern,
    #[error("Unsupported CD-ROM sector mode")]
    BadFormat,
}

impl CdError {
    /// Process exit status matching this error: 2 when the requested read window doesn't fit in
    /// the file, 1 (`EXIT_FAILURE`) otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            CdError::RangeViolation { .. } => 2,
            _ => 1,
        }
    }
}

/// Convenience type alias for a `Result<R, CdError>`
pub type CdResult<R> = std::result::Result<R, CdError>;

#[test]
fn cderror_display() {
    // Make sure that CdError implements Display. This should be true if we set an
    // `#[error("...")]` for every variant
    println!("{}", CdError::BcdOutOfRange(100));

    let e = CdError::RangeViolation {
        size: 10,
        skip: 1,
        len: 10,
    };

    assert!(e.to_string().starts_with("size + skip value bigger than file size"));
    assert_eq!(e.exit_code(), 2);
    assert_eq!(CdError::InvalidMsf.exit_code(), 1);
}
