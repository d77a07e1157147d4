//! Scripted in-memory transport that counts calls and concurrent requests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use covercheck_core::transport::{parse_header_lines, ProbeResponse, Transport, TransportError};
use covercheck_core::url_gate::ParsedUrl;

/// What the fake origin does for one method on one URL.
#[derive(Debug, Clone)]
pub enum Script {
    Respond {
        status: u32,
        headers: Vec<String>,
        body: Vec<u8>,
        delay: Duration,
    },
    /// Connection-level failure.
    Fail,
    /// Never answers; only a timeout ends the request.
    Hang,
}

impl Script {
    pub fn ok(headers: &[&str], body: Vec<u8>) -> Self {
        Self::status(200, headers, body)
    }

    pub fn status(status: u32, headers: &[&str], body: Vec<u8>) -> Self {
        Script::Respond {
            status,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(self, d: Duration) -> Self {
        match self {
            Script::Respond { status, headers, body, .. } => Script::Respond {
                status,
                headers,
                body,
                delay: d,
            },
            other => other,
        }
    }
}

#[derive(Default)]
pub struct FakeTransport {
    head: HashMap<String, Script>,
    get: HashMap<String, Script>,
    head_calls: AtomicUsize,
    get_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    windows: Mutex<Vec<u64>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_head(mut self, url: &str, script: Script) -> Self {
        self.head.insert(url.to_string(), script);
        self
    }

    pub fn on_get(mut self, url: &str, script: Script) -> Self {
        self.get.insert(url.to_string(), script);
        self
    }

    pub fn head_calls(&self) -> usize {
        self.head_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Range windows requested by GETs, in call order.
    pub fn windows(&self) -> Vec<u64> {
        self.windows.lock().unwrap().clone()
    }

    async fn serve(&self, script: Option<Script>, window: Option<u64>) -> Result<ProbeResponse, TransportError> {
        let _slot = InFlight::enter(self);
        match script.unwrap_or(Script::Fail) {
            Script::Respond { status, headers, body, delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let body = match window {
                    Some(w) => body.into_iter().take(w as usize).collect(),
                    None => Vec::new(),
                };
                Ok(ProbeResponse {
                    status,
                    headers: parse_header_lines(&headers),
                    body,
                })
            }
            // CURLE_COULDNT_CONNECT
            Script::Fail => Err(TransportError::Curl(curl::Error::new(7))),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(TransportError::Timeout)
            }
        }
    }
}

/// Counts a request as in flight until dropped, including when the caller gives up.
struct InFlight<'a>(&'a FakeTransport);

impl<'a> InFlight<'a> {
    fn enter(t: &'a FakeTransport) -> Self {
        let now = t.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        t.max_in_flight.fetch_max(now, Ordering::SeqCst);
        InFlight(t)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Transport for FakeTransport {
    async fn head(&self, url: &ParsedUrl, _timeout: Duration) -> Result<ProbeResponse, TransportError> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.head.get(url.as_str()).cloned();
        self.serve(script, None).await
    }

    async fn get_range(
        &self,
        url: &ParsedUrl,
        window: u64,
        _timeout: Duration,
    ) -> Result<ProbeResponse, TransportError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.windows.lock().unwrap().push(window);
        let script = self.get.get(url.as_str()).cloned();
        self.serve(script, Some(window)).await
    }
}
