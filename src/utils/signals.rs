//! Signal handling for the demo binary

use std::io;
use futures::stream::{Stream, StreamExt};
use signal_hook::consts::{SIGINT, SIGTERM, SIGUSR1, SIGUSR2};
use signal_hook_tokio::Signals;
use tracing::info;

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() -> io::Result<()> {
    let mut signals = Signals::new([SIGTERM, SIGINT])?;

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    Ok(())
}

/// Visibility changes requested from outside: SIGUSR1 hides, SIGUSR2 shows
pub fn visibility_signals() -> io::Result<impl Stream<Item = bool>> {
    let signals = Signals::new([SIGUSR1, SIGUSR2])?;

    Ok(signals.map(|signal| {
        let visible = signal == SIGUSR2;
        info!("Received signal {}: visible={}", signal, visible);
        visible
    }))
}
