//! Ranged GET stage: the only place a cover can be accepted.

use crate::config::ProbeConfig;
use crate::content_gate::{self, ContentClass};
use crate::sniff::{self, ImageFormat};
use crate::transport::{ProbeResponse, Transport};
use crate::url_gate::ParsedUrl;
use crate::verdict::{ProbeVerdict, RejectReason};

/// Applies the GET rules to a settled response: type, size, header, dimensions.
///
/// A GIF body is rejected as `ContentType` whatever the origin declared.
pub fn evaluate_get(resp: &ProbeResponse, config: &ProbeConfig) -> ProbeVerdict {
    if content_gate::classify(resp.headers.content_type.as_deref()) == ContentClass::Rejected {
        return RejectReason::ContentType.into();
    }

    let size = resp
        .headers
        .content_length
        .unwrap_or(resp.body.len() as u64);
    if size < config.min_bytes {
        return RejectReason::TooSmall.into();
    }

    let Some((format, dims)) = sniff::detect(&resp.body) else {
        return RejectReason::NoDimensions.into();
    };
    if format == ImageFormat::Gif {
        return RejectReason::ContentType.into();
    }
    if !dims.meets(config.min_dimension_px) {
        return RejectReason::TooSmallDimensions.into();
    }

    ProbeVerdict::Valid
}

/// Sends the single ranged GET under a fresh timeout and evaluates it.
pub(super) async fn issue<T: Transport>(
    transport: &T,
    url: &ParsedUrl,
    config: &ProbeConfig,
) -> ProbeVerdict {
    let window = config.range_window();
    let settled =
        tokio::time::timeout(config.timeout, transport.get_range(url, window, config.timeout)).await;
    let resp = match settled {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            tracing::debug!(url = %url, "ranged GET failed: {}", e);
            return RejectReason::FetchError.into();
        }
        Err(_) => {
            tracing::debug!(url = %url, timeout_ms = config.timeout.as_millis() as u64, "ranged GET timed out");
            return RejectReason::FetchError.into();
        }
    };

    tracing::debug!(
        url = %url,
        status = resp.status,
        received = resp.body.len(),
        total = ?resp.headers.range_total(),
        "ranged GET settled"
    );
    evaluate_get(&resp, config)
}
