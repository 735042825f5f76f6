//! issue-bridge-core
//!
//! Adapter layer that turns static-analysis results attached to host executions
//! into canonical, priority-normalized issues for a code-health dashboard.
//!
//! The crate covers the mapping side only: locating a tool's result on a legacy
//! build or a current run, mapping each annotation to an `Issue`, and answering
//! fixed-issue queries. Running tools, persisting executions and rendering the
//! dashboard belong to the host.

pub mod analysis;
pub mod config;
pub mod host;
pub mod model;
pub mod services;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
