//! Content-type gate for cover responses.

/// Classification of a declared `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass {
    /// `image/*` other than GIF.
    Acceptable,
    /// Not an image, or GIF.
    Rejected,
    /// No header (or an empty one). Never a rejection by itself.
    Undeclared,
}

/// True for `image/*` values except GIF. Case-insensitive; parameters are allowed.
pub fn is_acceptable_image_type(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    if !normalized.starts_with("image/") {
        return false;
    }
    !normalized.contains("image/gif")
}

pub fn classify(header: Option<&str>) -> ContentClass {
    match header.map(str::trim).filter(|v| !v.is_empty()) {
        None => ContentClass::Undeclared,
        Some(v) if is_acceptable_image_type(v) => ContentClass::Acceptable,
        Some(_) => ContentClass::Rejected,
    }
}
