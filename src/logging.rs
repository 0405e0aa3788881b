//! Process-wide logging setup

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG` (default
/// `sheetmap=info`). Safe to call more than once; only the first call has an
/// effect, and an already-installed global subscriber is left in place.
pub fn init() {
    INIT.call_once(|| {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| "sheetmap=info".into()),
            )
            .try_init();
        if let Err(e) = installed {
            tracing::debug!(error = %e, "keeping existing global subscriber");
        }
    });
}
