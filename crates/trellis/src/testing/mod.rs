/// Event recording for listener assertions.
pub mod log;
/// A surface that records draw calls.
pub mod surface;

use tracing_subscriber::{EnvFilter, fmt};

pub use log::EventLog;
pub use surface::{DrawOp, RecordingSurface};

/// Route `tracing` output to the test harness. Filtering follows `RUST_LOG`
/// and defaults to warnings. Safe to call from every test.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second call finds the subscriber already installed.
    fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .compact()
        .try_init()
        .ok();
}
