//! PNG: 8-byte signature, then the IHDR chunk with width and height at 16 and 20.

use super::{non_zero, read_u32_be, ImageDimensions};

const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const HEADER_LEN: usize = 24;

pub(super) fn matches(buf: &[u8]) -> bool {
    buf.len() >= HEADER_LEN && buf[..8] == SIGNATURE
}

pub(super) fn dimensions(buf: &[u8]) -> Option<ImageDimensions> {
    non_zero(read_u32_be(buf, 16), read_u32_be(buf, 20))
}
