//! Common test utilities shared across integration tests.
//!
//! Helpers here wrap the crate's own fixture module with process-wide
//! concerns (logging setup, service construction) so individual suites
//! stay focused on behavior.

use std::path::Path;
use std::sync::Once;

use inkdex::SearchService;

static LOGGING: Once = Once::new();

/// Install a fmt subscriber honoring `RUST_LOG`, once per test process.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

/// Open a service whose index tree lives under the given scratch root.
pub fn service_at(root: &Path) -> SearchService {
    init_logging();
    SearchService::open(inkdex::test_utils::config_at(root)).expect("service opens")
}
