//! Integration tests for nebula-requirements.

mod concurrency;
mod configuration;
mod families;
mod terminal;

/// Installs a test subscriber so `tracing` output shows up with
/// `--nocapture`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
