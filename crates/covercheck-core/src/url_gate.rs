//! Cover URL validation: absolute http/https URLs only. No network access.

use crate::verdict::RejectReason;
use std::fmt;

/// A cover URL that passed the gate. Always http or https.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl(url::Url);

impl ParsedUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    pub fn host_str(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `raw` as an absolute URL and checks the scheme.
///
/// - `"https://example.com/a.jpg"` → `Ok`
/// - `"not a url"` → `Err(InvalidUrl)`
/// - `"ftp://x/y.png"` → `Err(UnsupportedScheme)`
pub fn validate(raw: &str) -> Result<ParsedUrl, RejectReason> {
    let parsed = url::Url::parse(raw.trim()).map_err(|_| RejectReason::InvalidUrl)?;
    // The url crate lower-cases schemes, so "HTTPS://" lands here as "https".
    match parsed.scheme() {
        "http" | "https" => Ok(ParsedUrl(parsed)),
        _ => Err(RejectReason::UnsupportedScheme),
    }
}
