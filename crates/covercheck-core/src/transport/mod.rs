//! Network capability used by the cover probe.
//!
//! The probe never touches a global client: it is handed a [`Transport`] with
//! a HEAD and a ranged GET. [`CurlTransport`] is the libcurl-backed
//! implementation; tests substitute an in-memory one.

mod cancel;
mod curl_transport;
mod headers;

use std::future::Future;
use std::time::Duration;

use crate::url_gate::ParsedUrl;

pub use curl_transport::CurlTransport;
pub use headers::{parse_header_lines, ResponseHeaders};

/// Failure to obtain a response at all. HTTP error statuses are not errors here.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The per-request deadline passed before the response settled.
    #[error("request timed out")]
    Timeout,
    /// The caller stopped waiting and the transfer was aborted.
    #[error("request cancelled")]
    Cancelled,
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    #[error("curl multi: {0}")]
    Multi(#[from] curl::MultiError),
    /// The blocking worker running the transfer panicked or was shut down.
    #[error("transfer task: {0}")]
    Join(String),
}

/// Status, parsed headers, and (for GET) the collected body prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u32,
    pub headers: ResponseHeaders,
    pub body: Vec<u8>,
}

impl ProbeResponse {
    /// Origin does not implement the method (405 Method Not Allowed, 501 Not Implemented).
    pub fn method_unsupported(&self) -> bool {
        matches!(self.status, 405 | 501)
    }
}

/// HEAD and ranged GET. Each call must honor its own `timeout`, and dropping the
/// returned future must abort the request rather than let it run on.
pub trait Transport: Send + Sync + 'static {
    fn head(
        &self,
        url: &ParsedUrl,
        timeout: Duration,
    ) -> impl Future<Output = Result<ProbeResponse, TransportError>> + Send;

    /// GET with `Range: bytes=0-(window-1)`. At most `window` body bytes are
    /// returned even if the origin ignores the range.
    fn get_range(
        &self,
        url: &ParsedUrl,
        window: u64,
        timeout: Duration,
    ) -> impl Future<Output = Result<ProbeResponse, TransportError>> + Send;
}

/// Byte range covering the first `window` bytes, as libcurl's range option takes it
/// (sent as `Range: bytes=<range>`).
pub fn byte_range(window: u64) -> String {
    format!("0-{}", window.max(1) - 1)
}
