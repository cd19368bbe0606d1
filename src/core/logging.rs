//! Diagnostic logging
//!
//! The release transcript is printed directly to stdout. Diagnostics (every
//! spawned command, swallowed best-effort failures, stage transitions) go
//! through `tracing` to stderr so they never interleave with the transcript.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over `warn`.
pub fn init(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  // A second init (tests) is harmless; keep the first subscriber.
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .compact()
    .try_init();
}
