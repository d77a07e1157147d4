//! Probe verdicts and the fixed set of rejection reasons.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a cover URL was rejected. Exactly one reason per rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// Not an absolute URL.
    InvalidUrl,
    /// Parsed, but the scheme is not http/https.
    UnsupportedScheme,
    /// Declared content-type is not an acceptable image type (or is GIF).
    ContentType,
    /// Declared or measured size below `min_bytes`.
    TooSmall,
    /// No recognizable image header in the probed bytes.
    NoDimensions,
    /// Recognized dimensions below `min_dimension_px`.
    TooSmallDimensions,
    /// Transport failure or timeout on the ranged GET.
    FetchError,
}

impl RejectReason {
    pub const ALL: [RejectReason; 7] = [
        RejectReason::InvalidUrl,
        RejectReason::UnsupportedScheme,
        RejectReason::ContentType,
        RejectReason::TooSmall,
        RejectReason::NoDimensions,
        RejectReason::TooSmallDimensions,
        RejectReason::FetchError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::InvalidUrl => "invalid-url",
            RejectReason::UnsupportedScheme => "unsupported-scheme",
            RejectReason::ContentType => "content-type",
            RejectReason::TooSmall => "too-small",
            RejectReason::NoDimensions => "no-dimensions",
            RejectReason::TooSmallDimensions => "too-small-dimensions",
            RejectReason::FetchError => "fetch-error",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of probing one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "lowercase")]
pub enum ProbeVerdict {
    Valid,
    Invalid(RejectReason),
}

impl ProbeVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ProbeVerdict::Valid)
    }

    /// The rejection reason, or `None` for `Valid`.
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            ProbeVerdict::Valid => None,
            ProbeVerdict::Invalid(r) => Some(*r),
        }
    }
}

impl From<RejectReason> for ProbeVerdict {
    fn from(reason: RejectReason) -> Self {
        ProbeVerdict::Invalid(reason)
    }
}

impl fmt::Display for ProbeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeVerdict::Valid => write!(f, "VALID"),
            ProbeVerdict::Invalid(r) => write!(f, "INVALID {}", r),
        }
    }
}
