//! Ctrl-c handling for `generate-data`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Wait for ctrl-c and raise `stop`. The generation loop sees the flag on
/// its next step and returns, so buffered output still gets flushed.
pub fn spawn_interrupt_listener(stop: Arc<AtomicBool>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("caught interrupt, stopping generation");
        stop.store(true, Ordering::Relaxed);
    })
}
