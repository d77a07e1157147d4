//! libcurl transport: HEAD and ranged GET on tokio's blocking pool.
//!
//! Each transfer runs as a single `Easy2` handle in a curl `Multi` perform/wait
//! loop. The loop checks the cancel flag at least every [`CANCEL_POLL`], so a
//! request whose future was dropped releases its connection within that
//! interval. libcurl's own timeout still bounds every transfer.

use std::str;
use std::time::Duration;

use curl::easy::{Easy2, Handler, WriteError};
use curl::multi::Multi;

use super::cancel::CancelFlag;
use super::headers::parse_header_lines;
use super::{byte_range, ProbeResponse, Transport, TransportError};
use crate::url_gate::ParsedUrl;

const MAX_REDIRECTS: u32 = 5;
const USER_AGENT: &str = concat!("covercheck/", env!("CARGO_PKG_VERSION"));

/// Longest the transfer loop blocks in `Multi::wait` before checking for cancellation.
const CANCEL_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy)]
enum Method {
    Head,
    /// GET of the first `window` bytes.
    GetRange { window: u64 },
}

#[derive(Debug, Clone)]
struct CurlRequest {
    url: String,
    method: Method,
    timeout: Duration,
}

/// Production transport backed by the curl crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        CurlTransport
    }

    async fn execute(&self, request: CurlRequest) -> Result<ProbeResponse, TransportError> {
        let flag = CancelFlag::default();
        // Dropped with this future: a timed-out or abandoned request stops the transfer.
        let _cancel_on_drop = flag.guard();
        tokio::task::spawn_blocking(move || perform(&request, &flag))
            .await
            .map_err(|e| TransportError::Join(e.to_string()))?
    }
}

impl Transport for CurlTransport {
    async fn head(&self, url: &ParsedUrl, timeout: Duration) -> Result<ProbeResponse, TransportError> {
        self.execute(CurlRequest {
            url: url.as_str().to_string(),
            method: Method::Head,
            timeout,
        })
        .await
    }

    async fn get_range(
        &self,
        url: &ParsedUrl,
        window: u64,
        timeout: Duration,
    ) -> Result<ProbeResponse, TransportError> {
        self.execute(CurlRequest {
            url: url.as_str().to_string(),
            method: Method::GetRange { window: window.max(1) },
            timeout,
        })
        .await
    }
}

/// Collects header lines and at most `limit` body bytes for one transfer.
struct ProbeHandler {
    headers: Vec<String>,
    body: Vec<u8>,
    limit: usize,
    /// Set when the origin sent more than `limit` bytes and the transfer was cut.
    truncated: bool,
}

impl ProbeHandler {
    fn new(limit: usize) -> Self {
        Self {
            headers: Vec::new(),
            body: Vec::new(),
            limit,
            truncated: false,
        }
    }
}

impl Handler for ProbeHandler {
    fn header(&mut self, data: &[u8]) -> bool {
        if let Ok(s) = str::from_utf8(data) {
            self.headers.push(s.trim_end().to_string());
        }
        true
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        let room = self.limit.saturating_sub(self.body.len());
        if data.len() <= room {
            self.body.extend_from_slice(data);
            return Ok(data.len());
        }
        // Origin ignored the range: keep the window, abort the rest.
        self.body.extend_from_slice(&data[..room]);
        self.truncated = true;
        Ok(0)
    }
}

/// Runs one transfer on the current thread.
fn perform(req: &CurlRequest, cancel: &CancelFlag) -> Result<ProbeResponse, TransportError> {
    let limit = match req.method {
        Method::Head => 0,
        Method::GetRange { window } => usize::try_from(window).unwrap_or(usize::MAX),
    };

    let mut easy = Easy2::new(ProbeHandler::new(limit));
    easy.url(&req.url)?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTS)?;
    easy.useragent(USER_AGENT)?;
    easy.connect_timeout(req.timeout)?;
    easy.timeout(req.timeout)?;
    match req.method {
        Method::Head => easy.nobody(true)?,
        Method::GetRange { window } => easy.range(&byte_range(window))?,
    }

    let multi = Multi::new();
    let handle = multi.add2(easy)?;
    let mut finished: Option<Result<(), curl::Error>> = None;
    loop {
        if cancel.is_cancelled() {
            // Removing the handle closes its connection.
            multi.remove2(handle)?;
            tracing::debug!(url = %req.url, "transfer cancelled");
            return Err(TransportError::Cancelled);
        }
        let running = multi.perform()?;
        multi.messages(|msg| {
            if let Some(res) = msg.result_for2(&handle) {
                finished = Some(res);
            }
        });
        if finished.is_some() || running == 0 {
            break;
        }
        multi.wait(&mut [], CANCEL_POLL)?;
    }

    let mut easy = multi.remove2(handle)?;
    let truncated = easy.get_ref().truncated;
    if let Some(Err(e)) = finished {
        if truncated && e.is_write_error() {
            tracing::debug!(url = %req.url, kept = easy.get_ref().body.len(), "origin ignored range, body truncated");
        } else if e.is_operation_timedout() {
            return Err(TransportError::Timeout);
        } else {
            return Err(TransportError::Curl(e));
        }
    }

    let status = easy.response_code()?;
    let handler = easy.get_mut();
    Ok(ProbeResponse {
        status,
        headers: parse_header_lines(&handler.headers),
        body: std::mem::take(&mut handler.body),
    })
}
