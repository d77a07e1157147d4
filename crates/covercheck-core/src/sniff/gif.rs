//! GIF: `GIF` magic, logical screen width and height as little-endian u16 at 6 and 8.
//!
//! Covers reject GIF by content-type before sniffing; this stays for callers
//! that accept animated images.

use super::{non_zero, ImageDimensions};

const HEADER_LEN: usize = 10;

pub(super) fn matches(buf: &[u8]) -> bool {
    buf.len() >= HEADER_LEN && buf.starts_with(b"GIF")
}

pub(super) fn dimensions(buf: &[u8]) -> Option<ImageDimensions> {
    let width = u16::from_le_bytes([buf[6], buf[7]]);
    let height = u16::from_le_bytes([buf[8], buf[9]]);
    non_zero(width.into(), height.into())
}
