//! Tracing setup for the bootstrap.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global tracing subscriber.
///
/// Verbose mode raises the level to DEBUG so every layer load and merge step
/// becomes visible. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() && verbose {
        tracing::debug!("Verbose mode enabled");
    }
}
