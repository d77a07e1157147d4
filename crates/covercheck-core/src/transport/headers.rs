//! Parse HTTP response header lines into ResponseHeaders.

/// Headers the probe looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// `Content-Type` value as sent, if present.
    pub content_type: Option<String>,
    /// `Content-Length`, if present and numeric.
    pub content_length: Option<u64>,
    /// `Content-Range` value, if present (ranged GET).
    pub content_range: Option<String>,
    /// True if server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
}

impl ResponseHeaders {
    /// Complete size from `Content-Range: bytes a-b/total`, if the origin sent one.
    pub fn range_total(&self) -> Option<u64> {
        let value = self.content_range.as_deref()?;
        let (_, total) = value.rsplit_once('/')?;
        total.trim().parse().ok()
    }

    /// Neither a content-type nor a usable content-length.
    pub fn is_uninformative(&self) -> bool {
        self.content_type.is_none() && self.content_length.is_none()
    }
}

/// Parse collected header lines into ResponseHeaders.
///
/// A status line (`HTTP/...`) starts a new response, so after redirects only the
/// final response's headers remain.
pub fn parse_header_lines<S: AsRef<str>>(lines: &[S]) -> ResponseHeaders {
    let mut out = ResponseHeaders::default();

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        if line.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("HTTP/")) {
            out = ResponseHeaders::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                out.content_type = Some(value.to_string()).filter(|v| !v.is_empty());
            } else if name.eq_ignore_ascii_case("content-length") {
                out.content_length = value.parse::<u64>().ok();
            } else if name.eq_ignore_ascii_case("content-range") {
                out.content_range = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("accept-ranges") {
                out.accept_ranges = value.eq_ignore_ascii_case("bytes");
            }
        }
    }

    out
}
