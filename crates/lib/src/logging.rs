use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber for hosts that have none.
///
/// `RUST_LOG` takes precedence; otherwise the level is `info`, or `debug`
/// when `verbose` is set. Returns false if a global subscriber was already
/// installed.
pub fn init_logging(verbose: bool) -> bool {
  let fallback = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .without_time()
    .with_writer(std::io::stderr)
    .try_init()
    .is_ok()
}
