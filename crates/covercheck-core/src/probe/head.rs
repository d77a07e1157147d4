//! HEAD stage: may reject on content-type or declared size, never accepts.

use crate::config::ProbeConfig;
use crate::content_gate::{self, ContentClass};
use crate::transport::{ProbeResponse, Transport, TransportError};
use crate::url_gate::ParsedUrl;
use crate::verdict::RejectReason;

/// Why a HEAD response did not settle the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity {
    /// Transport error. Not the same as "resource absent".
    Unreachable,
    TimedOut,
    /// 405 or 501 from an origin that does not implement HEAD.
    MethodUnsupported,
    /// Declared size is large enough; dimensions still unknown.
    SizePassed,
    /// Acceptable or absent type, but no usable `Content-Length`.
    NoSize,
    /// Neither a content type nor a usable length.
    NoHeaders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadOutcome {
    Rejected(RejectReason),
    Ambiguous(Ambiguity),
}

/// Applies the HEAD rules to a settled response.
pub fn evaluate_head(resp: &ProbeResponse, config: &ProbeConfig) -> HeadOutcome {
    if resp.method_unsupported() {
        return HeadOutcome::Ambiguous(Ambiguity::MethodUnsupported);
    }
    if resp.headers.is_uninformative() {
        return HeadOutcome::Ambiguous(Ambiguity::NoHeaders);
    }
    if content_gate::classify(resp.headers.content_type.as_deref()) == ContentClass::Rejected {
        return HeadOutcome::Rejected(RejectReason::ContentType);
    }
    match resp.headers.content_length {
        Some(len) if len < config.min_bytes => HeadOutcome::Rejected(RejectReason::TooSmall),
        Some(_) => HeadOutcome::Ambiguous(Ambiguity::SizePassed),
        None => HeadOutcome::Ambiguous(Ambiguity::NoSize),
    }
}

/// Sends the HEAD under its own timeout and evaluates the result.
pub(super) async fn issue<T: Transport>(
    transport: &T,
    url: &ParsedUrl,
    config: &ProbeConfig,
) -> HeadOutcome {
    let settled = tokio::time::timeout(config.timeout, transport.head(url, config.timeout)).await;
    match settled {
        Ok(Ok(resp)) => {
            tracing::debug!(
                url = %url,
                status = resp.status,
                accept_ranges = resp.headers.accept_ranges,
                "HEAD settled"
            );
            evaluate_head(&resp, config)
        }
        Ok(Err(TransportError::Timeout)) | Err(_) => HeadOutcome::Ambiguous(Ambiguity::TimedOut),
        Ok(Err(e)) => {
            tracing::debug!(url = %url, "HEAD failed: {}", e);
            HeadOutcome::Ambiguous(Ambiguity::Unreachable)
        }
    }
}
