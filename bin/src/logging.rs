//! Log setup for the Fundwire CLI.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only warnings and errors are shown,
/// or every request with `--verbose`.
pub(crate) fn init_logging(verbose: bool) {
    let default = if verbose {
        "info,fundwire=debug,fundwire_dwolla=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
