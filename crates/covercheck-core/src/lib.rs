//! covercheck core: decide whether URLs claimed to be book covers serve real,
//! minimally-sized, non-animated raster images, without downloading them.

pub mod config;
pub mod logging;

pub mod batch;
pub mod content_gate;
pub mod probe;
pub mod sniff;
pub mod transport;
pub mod url_gate;
pub mod verdict;

pub use batch::{validate_covers, BatchResult, BoundedBatchRunner, CandidateItem};
pub use config::{BatchStrategy, CoverConfig, ProbeConfig};
pub use probe::CoverProbe;
pub use verdict::{ProbeVerdict, RejectReason};
