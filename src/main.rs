//! Countdown View - a visibility-aware countdown in the terminal
//! 
//! This is the main entry point for the countdown-view demo binary.

use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::info;

use countdown_view::{
    config::Config,
    display::RenderSink,
    state::CountdownView,
    tasks::CountdownHandle,
    utils::{shutdown_signal, visibility_signals},
};

/// Writes each rendered text to stdout
struct StdoutSink {
    json: bool,
}

impl RenderSink for StdoutSink {
    fn set_display_text(&mut self, text: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "type": "display", "text": text }));
        } else {
            println!("{}", text);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only the countdown
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_view={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-view v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: time_in_future={}ms, interval={}ms, time_format={}, hidden={}",
          config.time_in_future, config.interval, config.time_format, config.hidden);

    let mut view = CountdownView::new(StdoutSink { json: config.json });
    view.set_time_in_future(config.time_in_future());
    view.set_countdown_interval(config.interval());
    view.set_time_format(config.time_format);
    view.set_format(config.format.clone());
    view.set_auto_display_text(!config.no_auto_display);
    view.set_visible(!config.hidden);

    let (observer_tx, mut observer_rx) = mpsc::unbounded_channel();
    view.add_countdown_callback(observer_tx);

    let (handle, task) = CountdownHandle::spawn(view);
    handle.start().await?;

    let mut visibility = Box::pin(visibility_signals()?);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(notification) = observer_rx.recv() => {
                if config.json {
                    println!("{}", serde_json::to_string(&notification)?);
                }
                if notification.event.is_finish() {
                    info!("Countdown {} finished", notification.view);
                    break;
                }
            }
            Some(visible) = visibility.next() => {
                handle.set_visible(visible).await?;
            }
            result = &mut shutdown => {
                result?;
                info!("Shutdown signal received, cancelling countdown");
                handle.cancel().await?;
                break;
            }
            else => break,
        }
    }

    drop(handle);
    task.await?;

    info!("Countdown shutdown complete");
    Ok(())
}
