//! JPEG: walk marker segments from after SOI until a Start-Of-Frame segment.

use super::{non_zero, read_u16_be, ImageDimensions};

pub(super) fn matches(buf: &[u8]) -> bool {
    buf.starts_with(&[0xFF, 0xD8])
}

/// SOF0-3, 5-7, 9-11, 13-15. C4 (DHT), C8 (JPG) and CC (DAC) are not frames.
fn is_start_of_frame(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF)
}

pub(super) fn dimensions(buf: &[u8]) -> Option<ImageDimensions> {
    let mut offset = 2usize;
    while offset + 3 < buf.len() {
        if buf[offset] != 0xFF {
            // Stray fill byte.
            offset += 1;
            continue;
        }
        let marker = buf[offset + 1];
        // Length counts its own two bytes, not the marker.
        let length = read_u16_be(buf, offset + 2) as usize;
        if length == 0 || offset + 2 + length > buf.len() {
            return None;
        }
        if is_start_of_frame(marker) {
            let height = read_u16_be(buf, offset + 5);
            let width = read_u16_be(buf, offset + 7);
            return non_zero(width.into(), height.into());
        }
        offset += 2 + length;
    }
    None
}
