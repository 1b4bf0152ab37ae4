use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use test_log::test;

use crate::bcd::Bcd;
use crate::hexdump::dump_file;
use crate::msf::{advance, Msf};
use crate::pregap::{
    write_pregap_file, write_zero_fill_file, Pregap, DATA_PREGAP_BYTES, DATA_PREGAP_NULL_BYTES,
};
use crate::sector::{Sector, SECTOR_SIZE};
use crate::CdError;

fn out_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn audio_pregap_file() {
    let dir = TempDir::new().unwrap();
    let path = out_path(&dir, "audio.bin");

    write_pregap_file(&path, Pregap::Audio).unwrap();

    let data = fs::read(&path).unwrap();

    assert_eq!(data.len(), 352_800);
    assert!(data.iter().all(|&b| b == 0));
}

#[test]
fn data_pregap_file() {
    let dir = TempDir::new().unwrap();
    let path = out_path(&dir, "data.bin");
    let start = Msf::from_binary(45, 9, 0).unwrap();

    write_pregap_file(&path, Pregap::Data(start)).unwrap();

    let data = fs::read(&path).unwrap();

    assert_eq!(data.len() as u64, DATA_PREGAP_BYTES);

    let null = DATA_PREGAP_NULL_BYTES as usize;

    assert!(data[..null].iter().all(|&b| b == 0));

    let mut t = (45, 9, 0);

    for sector in data[null..].chunks(SECTOR_SIZE) {
        let expected = Msf::from_binary(t.0, t.1, t.2).unwrap();

        assert_eq!(sector, &Sector::mode1_pregap(expected).data_2352()[..]);

        t = advance(t.0, t.1, t.2);
    }

    assert_eq!(t, (45, 11, 0));
}

#[test]
fn pregap_file_is_truncated() {
    let dir = TempDir::new().unwrap();
    let path = out_path(&dir, "reused.bin");

    fs::write(&path, vec![0xaa; 1_000_000]).unwrap();

    write_pregap_file(&path, Pregap::Data(Msf::ZERO)).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), DATA_PREGAP_BYTES);
}

#[test]
fn zero_fill_file() {
    let dir = TempDir::new().unwrap();

    for &n in &[0u64, 1, 2352, 176_400] {
        let path = out_path(&dir, &format!("null_{}.bin", n));

        write_zero_fill_file(&path, n).unwrap();

        let data = fs::read(&path).unwrap();

        assert_eq!(data.len() as u64, n);
        assert!(data.iter().all(|&b| b == 0));
    }
}

#[test]
fn unwritable_output() {
    let dir = TempDir::new().unwrap();
    let path = out_path(&dir, "missing/dir/out.bin");

    let r = write_pregap_file(&path, Pregap::Audio);

    match r {
        Err(e @ CdError::IoError(_)) => assert_eq!(e.exit_code(), 1),
        r => panic!("Unexpected result {:?}", r),
    }
}

#[test]
fn read_back_start_msf() {
    let dir = TempDir::new().unwrap();
    let path = out_path(&dir, "data.bin");
    let start = Msf::from_binary(12, 34, 56).unwrap();

    write_pregap_file(&path, Pregap::Data(start)).unwrap();

    let dump = dump_file(&path, 3, DATA_PREGAP_NULL_BYTES + 12).unwrap();

    assert_eq!(dump, "12 34 56 \n");

    let bytes: Vec<u8> = dump
        .split_whitespace()
        .map(|h| u8::from_str_radix(h, 16).unwrap())
        .collect();

    let m = Bcd::from_bcd(bytes[0]).unwrap().binary();
    let s = Bcd::from_bcd(bytes[1]).unwrap().binary();
    let f = Bcd::from_bcd(bytes[2]).unwrap().binary();

    assert_eq!((m, s, f), (12, 34, 56));
}

#[test]
fn dump_boundary() {
    let dir = TempDir::new().unwrap();
    let path = out_path(&dir, "small.bin");

    fs::write(&path, [0x00u8, 0x0a, 0xff, 0x10]).unwrap();

    assert_eq!(dump_file(&path, 4, 0).unwrap(), "00 0a ff 10 \n");
    assert_eq!(dump_file(&path, 2, 2).unwrap(), "ff 10 \n");

    let e = dump_file(&path, 3, 2).unwrap_err();

    assert!(matches!(e, CdError::RangeViolation { .. }));
    assert_eq!(e.exit_code(), 2);
}

#[test]
fn dump_missing_file() {
    let dir = TempDir::new().unwrap();

    let e = dump_file(&out_path(&dir, "nope.bin"), 1, 0).unwrap_err();

    assert!(matches!(e, CdError::IoError(_)));
}
