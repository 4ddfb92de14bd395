//! Helpers shared by Sable's tests.
//!
//! - [`extract_cursor`] / [`strip_markers`]: `$0`-style cursor markers in fixture text.
//! - [`World`]: a type store, scope graph and search index assembled for one test.

mod markers;
mod world;

pub use markers::{extract_cursor, strip_markers};
pub use world::World;

/// Route `tracing` output of the current test through the test writer.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
