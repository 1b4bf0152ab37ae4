//! Pregap generation.
//!
//! A pregap is the region preceding the actual contents of a track. Image formats that don't
//! store it (such as most BIN/CUE dumps) must have it regenerated when a full track image is
//! assembled:
//!
//! - audio tracks get two seconds of silence (352800 zero bytes),
//! - data tracks get one second of zeroes (176400 bytes) followed by 150 Mode 1 sectors carrying
//!   a valid sync pattern and a BCD header, one frame apart.
//!
//! The sizes are fixed by convention and must be reproduced exactly.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, trace};

use crate::msf::{advance, Msf};
use crate::sector::{Sector, SECTOR_SIZE};
use crate::CdResult;

/// Number of zero bytes in an audio track pregap
pub const AUDIO_PREGAP_BYTES: u64 = 352_800;

/// Number of zero bytes preceding the sectors of a data track pregap
pub const DATA_PREGAP_NULL_BYTES: u64 = 176_400;

/// Number of sectors in a data track pregap
pub const DATA_PREGAP_SECTORS: u32 = 150;

/// Total size of a data track pregap
pub const DATA_PREGAP_BYTES: u64 =
    DATA_PREGAP_NULL_BYTES + DATA_PREGAP_SECTORS as u64 * SECTOR_SIZE as u64;

/// The two kinds of pregap, depending on the track type
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pregap {
    /// Audio track pregap: silence only
    Audio,
    /// Data track pregap. The MSF is the timestamp of the first generated sector.
    Data(Msf),
}

impl Pregap {
    /// Total number of bytes generated for this pregap
    pub fn size(self) -> u64 {
        match self {
            Pregap::Audio => AUDIO_PREGAP_BYTES,
            Pregap::Data(_) => DATA_PREGAP_BYTES,
        }
    }

    /// Write the whole pregap to `w`
    pub fn write_to<W: Write>(self, w: &mut W) -> CdResult<()> {
        match self {
            Pregap::Audio => write_audio_pregap(w),
            Pregap::Data(start) => write_data_pregap(w, start),
        }
    }
}

/// Bounded iterator over the sectors of a data track pregap. It can be cloned to restart the
/// sequence from the same position.
#[derive(Clone, Debug)]
pub struct PregapSectors {
    /// Decimal `(minute, second, frame)` of the next sector
    next: (u32, u32, u32),
    /// Number of sectors left to generate
    remaining: u32,
}

impl PregapSectors {
    /// Iterate over the `DATA_PREGAP_SECTORS` sectors starting at `start`
    pub fn new(start: Msf) -> PregapSectors {
        PregapSectors {
            next: start.into_binary(),
            remaining: DATA_PREGAP_SECTORS,
        }
    }
}

impl Iterator for PregapSectors {
    type Item = CdResult<Sector>;

    fn next(&mut self) -> Option<CdResult<Sector>> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;

        let (m, s, f) = self.next;

        let msf = match Msf::from_binary(m, s, f) {
            Ok(msf) => msf,
            Err(e) => {
                // Nothing sensible can follow a timestamp we can't encode
                self.remaining = 0;
                return Some(Err(e));
            }
        };

        self.next = advance(m, s, f);

        Some(Ok(Sector::mode1_pregap(msf)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let r = self.remaining as usize;

        (r, Some(r))
    }
}

/// Write `byte_count` zero bytes to `w`
pub fn write_zero_fill<W: Write>(w: &mut W, byte_count: u64) -> CdResult<()> {
    let written = io::copy(&mut io::repeat(0).take(byte_count), w)?;

    // `io::repeat` never runs dry so the copy can only stop early on error
    debug_assert_eq!(written, byte_count);

    trace!("Wrote {} zero bytes", written);

    Ok(())
}

/// Write an audio track pregap (`AUDIO_PREGAP_BYTES` of silence) to `w`
pub fn write_audio_pregap<W: Write>(w: &mut W) -> CdResult<()> {
    write_zero_fill(w, AUDIO_PREGAP_BYTES)
}

/// Write a data track pregap to `w`: `DATA_PREGAP_NULL_BYTES` zero bytes followed by
/// `DATA_PREGAP_SECTORS` Mode 1 sectors, the first one at `start`.
///
/// Fails with `CdError::BcdOutOfRange` if the sectors would go past 99:59:74, in which case the
/// sectors before that point have already been written to `w`.
pub fn write_data_pregap<W: Write>(w: &mut W, start: Msf) -> CdResult<()> {
    write_zero_fill(w, DATA_PREGAP_NULL_BYTES)?;

    for sector in PregapSectors::new(start) {
        sector?.write_to(w)?;
    }

    debug!(
        "Wrote {} pregap sectors starting at {}",
        DATA_PREGAP_SECTORS, start
    );

    Ok(())
}

/// Create (or truncate) the file at `path` and fill it with `byte_count` zero bytes
pub fn write_zero_fill_file(path: &Path, byte_count: u64) -> CdResult<()> {
    debug!("Writing {} zero bytes to {}", byte_count, path.display());

    with_output_file(path, |w| write_zero_fill(w, byte_count))
}

/// Create (or truncate) the file at `path` and write `pregap` into it
pub fn write_pregap_file(path: &Path, pregap: Pregap) -> CdResult<()> {
    debug!("Writing {:?} pregap to {}", pregap, path.display());

    with_output_file(path, |w| pregap.write_to(w))
}

/// Open `path` for writing and hand it to `writer`. The file is flushed once `writer` returns
/// successfully and closed in every case.
fn with_output_file<F>(path: &Path, writer: F) -> CdResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> CdResult<()>,
{
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    writer(&mut w)?;

    w.flush()?;

    Ok(())
}
