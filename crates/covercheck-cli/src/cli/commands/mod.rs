//! CLI command handlers, one file per command.

mod audit;
mod check;
mod config;
mod sniff;

pub use audit::{run_audit, AuditOptions};
pub use check::run_check;
pub use config::run_config;
pub use sniff::run_sniff;

#[cfg(test)]
pub(crate) use audit::{display_id, report_lines};
#[cfg(test)]
pub(crate) use sniff::{describe, sniff_file};
