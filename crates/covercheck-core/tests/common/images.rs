//! Synthetic image bodies. Headers are real; the rest is zero padding.

pub fn png(width: u32, height: u32, total_len: usize) -> Vec<u8> {
    let mut v = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    v.extend_from_slice(&13u32.to_be_bytes());
    v.extend_from_slice(b"IHDR");
    v.extend_from_slice(&width.to_be_bytes());
    v.extend_from_slice(&height.to_be_bytes());
    v.extend_from_slice(&[8, 2, 0, 0, 0]);
    pad(v, total_len)
}

pub fn gif(width: u16, height: u16, total_len: usize) -> Vec<u8> {
    let mut v = b"GIF89a".to_vec();
    v.extend_from_slice(&width.to_le_bytes());
    v.extend_from_slice(&height.to_le_bytes());
    pad(v, total_len)
}

/// Baseline JPEG prefix: SOI, APP0 with `app0_payload` filler bytes, then SOF0.
pub fn jpeg(width: u16, height: u16, app0_payload: usize, total_len: usize) -> Vec<u8> {
    let mut v = vec![0xFF, 0xD8, 0xFF, 0xE0];
    v.extend_from_slice(&((app0_payload + 2) as u16).to_be_bytes());
    v.extend(std::iter::repeat(0x20).take(app0_payload));
    v.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
    v.extend_from_slice(&height.to_be_bytes());
    v.extend_from_slice(&width.to_be_bytes());
    v.extend_from_slice(&[0x03, 0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01]);
    pad(v, total_len)
}

fn pad(mut v: Vec<u8>, total_len: usize) -> Vec<u8> {
    if v.len() < total_len {
        v.resize(total_len, 0);
    }
    v
}
