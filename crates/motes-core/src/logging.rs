//! Logging bootstrap based on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Default filter directive: verbose for motes, quiet for font plumbing.
pub const DEFAULT_FILTER: &str = "debug,cosmic_text=info,fontdb=warn,swash=info";

/// Install a formatting subscriber.
///
/// `RUST_LOG` takes precedence over [`DEFAULT_FILTER`] when it is set.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Install a formatting subscriber with an explicit filter directive.
pub fn init_with_filter(directive: &str) {
    install(EnvFilter::new(directive));
}

fn install(filter: EnvFilter) {
    // A second init (e.g. from several tests) is not an error worth surfacing.
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::trace!("global subscriber already installed");
    }
}
