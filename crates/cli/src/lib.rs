use std::path::Path;

use anyhow::Result;
use issue_bridge_core::config::{load_bridge_config, BridgeConfig, DEFAULT_CONFIG_FILE};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod commands;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over `warn`.
/// Calling this more than once is harmless.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve the configuration to use.
///
/// An explicit path must exist. Without one, `issue-bridge.json` in the current
/// directory is used when present, and the built-in defaults otherwise.
pub fn resolve_config(path: Option<&str>) -> Result<BridgeConfig> {
    match path {
        Some(p) => {
            debug!(path = p, "loading config");
            load_bridge_config(Path::new(p))
        }
        None => {
            let candidate = Path::new(DEFAULT_CONFIG_FILE);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "loading config from current directory");
                load_bridge_config(candidate)
            } else {
                debug!("no config file; using defaults");
                Ok(BridgeConfig::default())
            }
        }
    }
}
