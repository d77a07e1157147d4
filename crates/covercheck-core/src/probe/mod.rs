//! Per-URL cover probe: cheap HEAD first, then one ranged GET.
//!
//! ```text
//! Init ──url gate──▶ HeadIssued ──▶ HeadRejected            (terminal Invalid)
//!                              └──▶ HeadAmbiguous ──▶ GetIssued ──▶ Valid | Invalid
//! ```
//!
//! HEAD can only disqualify. Even a HEAD with an acceptable type and a large
//! enough `Content-Length` continues to the GET, because dimensions are only
//! known from the body. Nothing is retried: one HEAD, at most one GET.

mod get;
mod head;

use std::sync::Arc;

use crate::config::ProbeConfig;
use crate::transport::Transport;
use crate::url_gate;
use crate::verdict::ProbeVerdict;

pub use get::evaluate_get;
pub use head::{evaluate_head, Ambiguity, HeadOutcome};

/// Probes cover URLs through an injected transport.
pub struct CoverProbe<T> {
    transport: Arc<T>,
    config: Arc<ProbeConfig>,
}

impl<T> Clone for CoverProbe<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
        }
    }
}

impl<T: Transport> CoverProbe<T> {
    pub fn new(transport: Arc<T>, config: Arc<ProbeConfig>) -> Self {
        Self { transport, config }
    }

    /// Runs the probe to a terminal verdict. Rejections are logged with the URL and reason.
    pub async fn check(&self, raw_url: &str) -> ProbeVerdict {
        let verdict = self.run(raw_url).await;
        if let ProbeVerdict::Invalid(reason) = verdict {
            tracing::info!(url = raw_url, %reason, "cover rejected");
        }
        verdict
    }

    async fn run(&self, raw_url: &str) -> ProbeVerdict {
        let url = match url_gate::validate(raw_url) {
            Ok(url) => url,
            Err(reason) => return reason.into(),
        };

        match head::issue(self.transport.as_ref(), &url, &self.config).await {
            HeadOutcome::Rejected(reason) => return reason.into(),
            HeadOutcome::Ambiguous(why) => {
                tracing::debug!(url = %url, ?why, "HEAD inconclusive, falling back to ranged GET");
            }
        }

        get::issue(self.transport.as_ref(), &url, &self.config).await
    }
}
