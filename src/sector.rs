//! Raw CD-ROM sector framing.
//!
//! Every sector written by this crate uses the 2352 byte "raw" layout:
//!
//! ```text
//! offset  length  content
//!      0      12  sync pattern: 0x00, 0xff * 10, 0x00
//!     12       1  minute (BCD)
//!     13       1  second (BCD)
//!     14       1  frame (BCD)
//!     15       1  mode (0x01)
//!     16    2336  payload (all zeroes)
//! ```

use std::io::Write;

use crate::msf::Msf;
use crate::{CdError, CdResult};

/// Size in bytes of a raw sector
pub const SECTOR_SIZE: usize = 2352;

/// Size in bytes of the CD-ROM header (sync pattern + MSF + mode)
pub const HEADER_SIZE: usize = 16;

/// Sync pattern found at the start of every CD-ROM sector
pub const SYNC_PATTERN: [u8; 12] = [
    0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00,
];

/// A single raw 2352 byte sector
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sector {
    /// Raw sector data, header included
    #[cfg_attr(feature = "serde", serde(with = "serde_big_array::BigArray"))]
    data: [u8; SECTOR_SIZE],
}

impl Sector {
    /// Build a Mode 1 pregap sector for the position `msf`: sync pattern, BCD header, mode byte
    /// and a payload containing only zeroes.
    pub fn mode1_pregap(msf: Msf) -> Sector {
        let mut data = [0; SECTOR_SIZE];

        let (m, s, f) = msf.into_bcd();

        {
            let header = array_mut_ref![data, 0, HEADER_SIZE];

            header[..12].copy_from_slice(&SYNC_PATTERN);
            header[12] = m.bcd();
            header[13] = s.bcd();
            header[14] = f.bcd();
            header[15] = CdRomMode::Mode1 as u8;
        }

        Sector { data }
    }

    /// Retreive the entire sector data
    pub fn data_2352(&self) -> &[u8; SECTOR_SIZE] {
        &self.data
    }

    /// Returns the raw 16 byte CD-ROM header for this sector
    pub fn cd_rom_header_raw(&self) -> &[u8; HEADER_SIZE] {
        array_ref![self.data, 0, HEADER_SIZE]
    }

    /// Returns the payload following the header
    pub fn payload(&self) -> &[u8; SECTOR_SIZE - HEADER_SIZE] {
        array_ref![self.data, HEADER_SIZE, SECTOR_SIZE - HEADER_SIZE]
    }

    /// Parse the CD-ROM header and return it. Fails if the sync pattern, the BCD timestamp or the
    /// mode byte is invalid.
    pub fn cdrom_header(&self) -> CdResult<CdRomHeader> {
        CdRomHeader::parse(self.cd_rom_header_raw())
    }

    /// Returns the MSF stored in the sector header
    pub fn msf(&self) -> CdResult<Msf> {
        self.cdrom_header().map(|h| h.msf)
    }

    /// Append the full 2352 bytes of the sector to `w`
    pub fn write_to<W: Write>(&self, w: &mut W) -> CdResult<()> {
        w.write_all(&self.data)?;

        Ok(())
    }
}

/// Decoded CD-ROM sector header
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CdRomHeader {
    /// Sector MSF
    pub msf: Msf,
    /// CD-ROM mode for this sector
    pub mode: CdRomMode,
}

impl CdRomHeader {
    /// Decode a raw 16 byte header
    pub fn parse(header: &[u8; HEADER_SIZE]) -> CdResult<CdRomHeader> {
        if header[..12] != SYNC_PATTERN {
            return Err(CdError::BadSyncPattern);
        }

        let msf = match Msf::from_bcd(header[12], header[13], header[14]) {
            Some(msf) => msf,
            None => return Err(CdError::BadBcd),
        };

        let mode = match header[15] {
            1 => CdRomMode::Mode1,
            2 => CdRomMode::Mode2,
            _ => return Err(CdError::BadFormat),
        };

        Ok(CdRomHeader { msf, mode })
    }
}

/// Mode for a CD-ROM sector
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CdRomMode {
    /// Mode1 ("Regular" CD-ROM)
    Mode1 = 1,
    /// Mode2 (Used for various other sub-formats, such as CD-ROM XA). Never generated, only
    /// recognized when decoding a header.
    Mode2 = 2,
}
