//! Countdown driver background task

use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    time::{sleep_until, Instant},
};
use tracing::{debug, info};

use crate::{
    display::{CountdownObserver, RenderSink, TimeFormatMode},
    state::{CountdownSnapshot, CountdownView, LifecycleEvent},
};

/// Client operation applied to a driven countdown view
#[derive(Debug)]
pub enum Command {
    SetTimeInFuture(Duration),
    SetCountdownInterval(Duration),
    SetTimeFormat(TimeFormatMode),
    SetFormat(Option<String>),
    SetAutoDisplayText(bool),
    AddCountdownCallback(CountdownObserver),
    Start,
    Cancel,
    SetVisible(bool),
    Lifecycle(LifecycleEvent),
    /// Only reply with the current snapshot
    Snapshot,
}

/// A command and where to acknowledge it once applied
#[derive(Debug)]
pub struct Request {
    pub command: Command,
    pub reply: oneshot::Sender<CountdownSnapshot>,
}

/// Apply a single command to the view
pub fn apply_command<S: RenderSink>(view: &mut CountdownView<S>, command: Command) {
    match command {
        Command::SetTimeInFuture(duration) => view.set_time_in_future(duration),
        Command::SetCountdownInterval(interval) => view.set_countdown_interval(interval),
        Command::SetTimeFormat(mode) => view.set_time_format(mode),
        Command::SetFormat(template) => view.set_format(template),
        Command::SetAutoDisplayText(enabled) => view.set_auto_display_text(enabled),
        Command::AddCountdownCallback(observer) => view.add_countdown_callback(observer),
        Command::Start => view.start(),
        Command::Cancel => view.cancel(),
        Command::SetVisible(visible) => view.set_visible(visible),
        Command::Lifecycle(event) => view.on_lifecycle(event),
        Command::Snapshot => {}
    }
}

/// Background task that owns a countdown view.
///
/// Requests and scheduled fires are handled on this one task, requests
/// first, so a cancel that arrives before a due fire voids it. The task
/// ends when every request sender is dropped.
pub async fn countdown_task<S: RenderSink>(
    mut view: CountdownView<S>,
    mut requests: mpsc::Receiver<Request>,
) {
    info!("Starting countdown task for {}", view.id());

    loop {
        let next_fire = view.next_fire_at();

        tokio::select! {
            biased;

            request = requests.recv() => {
                let Some(Request { command, reply }) = request else {
                    debug!("All handles for {} dropped", view.id());
                    view.cancel();
                    break;
                };

                apply_command(&mut view, command);
                if reply.send(view.snapshot()).is_err() {
                    debug!("Requester for {} went away before the reply", view.id());
                }
            }

            _ = sleep_until(next_fire.unwrap_or_else(Instant::now)), if next_fire.is_some() => {
                view.fire_due(Instant::now());
            }
        }
    }

    info!("Countdown task for {} stopped", view.id());
}
