//! Image header sniffing: format and pixel dimensions from a byte prefix.
//!
//! Only magic bytes and fixed offsets (PNG, GIF) or a marker walk (JPEG) are
//! used; nothing is decoded. Input is usually the first `probe_bytes` of a
//! resource, so a header past the end of the buffer is simply not found.

mod gif;
mod jpeg;
mod png;

use serde::Serialize;
use std::fmt;

/// Shortest buffer worth inspecting; every supported header needs at least this much.
const MIN_SNIFF_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Gif,
    Jpeg,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Jpeg => "jpeg",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// Both sides at least `min` pixels.
    pub fn meets(&self, min: u32) -> bool {
        self.width >= min && self.height >= min
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel dimensions of a PNG, GIF, or JPEG prefix; `None` if no header is recognized.
pub fn sniff(buf: &[u8]) -> Option<ImageDimensions> {
    detect(buf).map(|(_, dims)| dims)
}

/// Format and dimensions. The first signature that matches decides; a matching
/// signature with a malformed header is `None`, not a fall-through to the next format.
pub fn detect(buf: &[u8]) -> Option<(ImageFormat, ImageDimensions)> {
    if buf.len() < MIN_SNIFF_LEN {
        return None;
    }
    if png::matches(buf) {
        return png::dimensions(buf).map(|d| (ImageFormat::Png, d));
    }
    if gif::matches(buf) {
        return gif::dimensions(buf).map(|d| (ImageFormat::Gif, d));
    }
    if jpeg::matches(buf) {
        return jpeg::dimensions(buf).map(|d| (ImageFormat::Jpeg, d));
    }
    None
}

/// Big-endian u16 at `offset`, or 0 if it would read past the end.
fn read_u16_be(buf: &[u8], offset: usize) -> u16 {
    match buf.get(offset..offset + 2) {
        Some(b) => u16::from_be_bytes([b[0], b[1]]),
        None => 0,
    }
}

fn read_u32_be(buf: &[u8], offset: usize) -> u32 {
    match buf.get(offset..offset + 4) {
        Some(b) => u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
        None => 0,
    }
}

fn non_zero(width: u32, height: u32) -> Option<ImageDimensions> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(ImageDimensions { width, height })
}
