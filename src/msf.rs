//! Compact discs were originally meant for storing music so positions
//! on the disc are stored in "minute:second:frame" format, where
//! frame means sector.
//!
//! There are 75 frames/sectors in a second, 60 seconds in a
//! minute. All three components are stored as BCD in the sector headers.

use std::fmt;

use crate::bcd::Bcd;
use crate::{CdError, CdResult};

/// Number of frames (sectors) in one second
pub const FRAMES_PER_SECOND: u32 = 75;

/// Number of seconds in one minute
pub const SECONDS_PER_MINUTE: u32 = 60;

/// CD "minute:second:frame" timestamp, given as triplet of *BCD*
/// encoded bytes. In this context "frame" is synonymous with
/// "sector".
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Msf(Bcd, Bcd, Bcd);

impl Msf {
    /// MSF for 00:00:00
    pub const ZERO: Msf = Msf(Bcd::ZERO, Bcd::ZERO, Bcd::ZERO);

    /// Build an MSF from a BCD triplet. Returns `None` if `s` is
    /// greater than 0x59 or if `f` is greater than 0x74.
    pub const fn new(m: Bcd, s: Bcd, f: Bcd) -> Option<Msf> {
        // Make sure the frame and seconds makes sense (there are only
        // 75 frames per second and obviously 60 seconds per minute)
        if s.bcd() < 0x60 && f.bcd() < 0x75 {
            Some(Msf(m, s, f))
        } else {
            None
        }
    }

    /// Convenience function to build an MSF from BCD values stored in
    /// an `u8`. Returns none if one of the values is not valid BCD of
    /// if it's not a valid Msf
    pub const fn from_bcd(m: u8, s: u8, f: u8) -> Option<Msf> {
        let m = match Bcd::from_bcd(m) {
            Some(b) => b,
            None => return None,
        };

        let s = match Bcd::from_bcd(s) {
            Some(b) => b,
            None => return None,
        };

        let f = match Bcd::from_bcd(f) {
            Some(b) => b,
            None => return None,
        };

        Msf::new(m, s, f)
    }

    /// Build an MSF from decimal minute, second and frame values, the way they're given on the
    /// command line.
    ///
    /// Returns `CdError::InvalidMsf` if `s > 59` or `f > 74` and `CdError::BcdOutOfRange` if the
    /// minutes don't fit on two BCD digits.
    pub fn from_binary(m: u32, s: u32, f: u32) -> CdResult<Msf> {
        if s >= SECONDS_PER_MINUTE || f >= FRAMES_PER_SECOND {
            return Err(CdError::InvalidMsf);
        }

        Ok(Msf(Bcd::encode(m)?, Bcd::encode(s)?, Bcd::encode(f)?))
    }

    /// Return the internal BCD triplet
    pub const fn into_bcd(self) -> (Bcd, Bcd, Bcd) {
        (self.0, self.1, self.2)
    }

    /// Return the decimal `(minute, second, frame)` triple
    pub const fn into_binary(self) -> (u32, u32, u32) {
        let Msf(m, s, f) = self;

        (m.binary() as u32, s.binary() as u32, f.binary() as u32)
    }
}

/// Advance a decimal `(minute, second, frame)` triple by one frame, carrying into the seconds
/// and then into the minutes.
///
/// The minute has no ceiling: `advance(99, 59, 74)` returns `(100, 0, 0)`, which
/// `Msf::from_binary` then refuses to encode.
pub fn advance(minute: u32, second: u32, frame: u32) -> (u32, u32, u32) {
    let (mut m, mut s, mut f) = (minute, second, frame + 1);

    if f >= FRAMES_PER_SECOND {
        f = 0;
        s += 1;
    }

    if s >= SECONDS_PER_MINUTE {
        s = 0;
        m += 1;
    }

    (m, s, f)
}

impl fmt::Display for Msf {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let Msf(m, s, f) = *self;

        write!(fmt, "{}:{}:{}", m, s, f)
    }
}

impl fmt::Debug for Msf {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self)
    }
}

#[cfg(test)]
mod test {
    use super::{advance, Msf};
    use crate::bcd::Bcd;
    use crate::CdError;

    #[test]
    fn from_binary() {
        assert!(Msf::from_binary(0, 0, 0).unwrap() == Msf::ZERO);
        assert!(Msf::from_binary(12, 34, 56).unwrap() == msf(0x12, 0x34, 0x56));
        assert!(Msf::from_binary(99, 59, 74).unwrap() == msf(0x99, 0x59, 0x74));

        assert!(matches!(
            Msf::from_binary(100, 0, 0),
            Err(CdError::BcdOutOfRange(100))
        ));
        assert!(matches!(
            Msf::from_binary(0, 60, 0),
            Err(CdError::InvalidMsf)
        ));
        assert!(matches!(
            Msf::from_binary(0, 0, 75),
            Err(CdError::InvalidMsf)
        ));
    }

    #[test]
    fn binary_round_trip() {
        assert_eq!(msf(0x12, 0x34, 0x56).into_binary(), (12, 34, 56));
        assert_eq!(Msf::ZERO.into_binary(), (0, 0, 0));
    }

    #[test]
    fn from_bcd() {
        assert!(Msf::from_bcd(0x01, 0x02, 0x03).unwrap() == msf(0x01, 0x02, 0x03));
        assert!(Msf::from_bcd(0x1a, 0x00, 0x00).is_none());
        assert!(Msf::from_bcd(0x00, 0x60, 0x00).is_none());
        assert!(Msf::from_bcd(0x00, 0x00, 0x75).is_none());
    }

    #[test]
    fn advance_carry() {
        assert_eq!(advance(0, 0, 0), (0, 0, 1));
        assert_eq!(advance(0, 0, 74), (0, 1, 0));
        assert_eq!(advance(0, 59, 74), (1, 0, 0));
        assert_eq!(advance(12, 34, 56), (12, 34, 57));

        // A full second worth of frames brings us back to the same frame
        let mut t = (3, 20, 74);
        for _ in 0..75 {
            t = advance(t.0, t.1, t.2);
        }
        assert_eq!(t, (3, 21, 74));

        let mut t = (3, 59, 74);
        for _ in 0..75 {
            t = advance(t.0, t.1, t.2);
        }
        assert_eq!(t, (4, 0, 74));
    }

    #[test]
    fn advance_past_99_minutes() {
        let (m, s, f) = advance(99, 59, 74);

        assert_eq!((m, s, f), (100, 0, 0));
        assert!(matches!(
            Msf::from_binary(m, s, f),
            Err(CdError::BcdOutOfRange(100))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(msf(0x01, 0x02, 0x03).to_string(), "01:02:03");
    }

    fn msf(m: u8, s: u8, f: u8) -> Msf {
        Msf::new(
            Bcd::from_bcd(m).unwrap(),
            Bcd::from_bcd(s).unwrap(),
            Bcd::from_bcd(f).unwrap(),
        )
        .unwrap()
    }
}
