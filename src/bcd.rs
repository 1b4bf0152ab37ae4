//! The CD format uses binary-coded decimal (BCD) extensively in its
//! internal format (track numbers, sector headers etc...) probably in
//! order to make it easier to display those informations on the first
//! CD players.

use std::fmt;

use crate::{CdError, CdResult};

/// A single packed BCD value in the range 0-99 (2 digits, 4bits per
/// digit).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bcd(u8);

impl Bcd {
    /// BCD 00
    pub const ZERO: Bcd = Bcd(0);

    /// Every valid BCD value indexed by its binary value
    pub const TABLE: [Bcd; 100] = {
        let mut table = [Bcd::ZERO; 100];
        let mut i = 0;

        while i < 100 {
            table[i] = Bcd((((i / 10) << 4) | (i % 10)) as u8);
            i += 1;
        }

        table
    };

    /// Build a `Bcd` from an `u8` in BCD format. Returns `None` if
    /// the value provided is not valid BCD.
    pub const fn from_bcd(b: u8) -> Option<Bcd> {
        if b <= 0x99 && (b & 0xf) <= 0x9 {
            Some(Bcd(b))
        } else {
            None
        }
    }

    /// Build a `Bcd` from a binary `u8`. Returns `None` if the value
    /// is greater than 99.
    pub const fn from_binary(b: u8) -> Option<Bcd> {
        if b > 99 {
            None
        } else {
            Some(Bcd::TABLE[b as usize])
        }
    }

    /// Encode a decimal value, returning `CdError::BcdOutOfRange` if it doesn't fit on two
    /// digits.
    pub fn encode(value: u32) -> CdResult<Bcd> {
        u8::try_from(value)
            .ok()
            .and_then(Bcd::from_binary)
            .ok_or(CdError::BcdOutOfRange(value))
    }

    /// Returns the BCD as an u8
    pub const fn bcd(self) -> u8 {
        self.0
    }

    /// Convert the BCD as a binary byte
    pub const fn binary(self) -> u8 {
        let b = self.0;

        (b >> 4) * 10 + (b & 0xf)
    }
}

/// Encode `value` as a packed BCD byte: `(value / 10) * 16 + (value % 10)`.
///
/// Values above 99 cannot be represented on two nibbles and are rejected with
/// `CdError::BcdOutOfRange` instead of being silently truncated.
pub fn encode_byte(value: u32) -> CdResult<u8> {
    Bcd::encode(value).map(Bcd::bcd)
}

impl fmt::Display for Bcd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02x}", self.0)
    }
}

#[test]
fn conversions() {
    assert!(Bcd::from_bcd(0) == Some(Bcd(0)));
    assert!(Bcd::from_bcd(1) == Some(Bcd(1)));
    assert!(Bcd::from_bcd(0x42) == Some(Bcd(0x42)));
    assert!(Bcd::from_bcd(0x1a).is_none());
    assert!(Bcd::from_bcd(0xf2).is_none());

    assert!(Bcd::from_binary(0) == Some(Bcd(0)));
    assert!(Bcd::from_binary(1) == Some(Bcd(1)));
    assert!(Bcd::from_binary(42) == Some(Bcd(0x42)));
    assert!(Bcd::from_binary(100).is_none());
    assert!(Bcd::from_binary(0xff).is_none());

    for b in 0..=99 {
        assert_eq!(Bcd::from_binary(b).unwrap().binary(), b);
    }
}

#[test]
fn encode() {
    assert_eq!(encode_byte(0).unwrap(), 0x00);
    assert_eq!(encode_byte(9).unwrap(), 0x09);
    assert_eq!(encode_byte(10).unwrap(), 0x10);
    assert_eq!(encode_byte(45).unwrap(), 0x45);
    assert_eq!(encode_byte(59).unwrap(), 0x59);
    assert_eq!(encode_byte(74).unwrap(), 0x74);
    assert_eq!(encode_byte(99).unwrap(), 0x99);

    for v in 0..=99u32 {
        let b = encode_byte(v).unwrap();

        assert_eq!(u32::from(b >> 4), v / 10);
        assert_eq!(u32::from(b & 0xf), v % 10);
        assert_eq!(Bcd::encode(v).unwrap().bcd(), b);
    }
}

#[test]
fn encode_out_of_range() {
    // A plain u8 narrowing would have produced 0xa0 here
    assert!(matches!(encode_byte(100), Err(CdError::BcdOutOfRange(100))));
    assert!(matches!(encode_byte(255), Err(CdError::BcdOutOfRange(255))));
    // 256 narrows to 0 as an u8, it must not wrap around to a valid value
    assert!(matches!(encode_byte(256), Err(CdError::BcdOutOfRange(256))));
    assert!(encode_byte(u32::MAX).is_err());
}

#[test]
fn display() {
    assert_eq!(Bcd(0x07).to_string(), "07");
    assert_eq!(Bcd(0x42).to_string(), "42");
}
