//! Async client handle to a driven countdown view

use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use super::{countdown_task, Command, Request};
use crate::{
    display::{CountdownObserver, RenderSink, TimeFormatMode},
    error::CountdownError,
    state::{CountdownSnapshot, CountdownView, LifecycleEvent},
    timing::ViewId,
};

const REQUEST_BUFFER: usize = 32;

/// Cloneable handle to a countdown view running on its own task.
///
/// Every method resolves once the task has applied the command.
#[derive(Debug, Clone)]
pub struct CountdownHandle {
    view: ViewId,
    requests: mpsc::Sender<Request>,
}

impl CountdownHandle {
    /// Spawn the driver task for `view`
    pub fn spawn<S>(view: CountdownView<S>) -> (Self, JoinHandle<()>)
    where
        S: RenderSink + Send + 'static,
    {
        let (requests, rx) = mpsc::channel(REQUEST_BUFFER);
        let handle = Self { view: view.id(), requests };
        let task = tokio::spawn(countdown_task(view, rx));
        (handle, task)
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    async fn send(&self, command: Command) -> Result<CountdownSnapshot, CountdownError> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(Request { command, reply })
            .await
            .map_err(|_| CountdownError::TaskStopped)?;
        rx.await.map_err(|_| CountdownError::TaskStopped)
    }

    pub async fn set_time_in_future(&self, duration: Duration) -> Result<(), CountdownError> {
        self.send(Command::SetTimeInFuture(duration)).await.map(drop)
    }

    pub async fn set_countdown_interval(&self, interval: Duration) -> Result<(), CountdownError> {
        self.send(Command::SetCountdownInterval(interval)).await.map(drop)
    }

    pub async fn set_time_format(&self, mode: TimeFormatMode) -> Result<(), CountdownError> {
        self.send(Command::SetTimeFormat(mode)).await.map(drop)
    }

    pub async fn set_format(&self, template: Option<String>) -> Result<(), CountdownError> {
        self.send(Command::SetFormat(template)).await.map(drop)
    }

    pub async fn set_auto_display_text(&self, enabled: bool) -> Result<(), CountdownError> {
        self.send(Command::SetAutoDisplayText(enabled)).await.map(drop)
    }

    pub async fn add_countdown_callback(&self, observer: CountdownObserver) -> Result<(), CountdownError> {
        self.send(Command::AddCountdownCallback(observer)).await.map(drop)
    }

    pub async fn start(&self) -> Result<(), CountdownError> {
        self.send(Command::Start).await.map(drop)
    }

    /// Once this returns, no further tick or finish is emitted for the
    /// current session
    pub async fn cancel(&self) -> Result<(), CountdownError> {
        self.send(Command::Cancel).await.map(drop)
    }

    pub async fn set_visible(&self, visible: bool) -> Result<(), CountdownError> {
        self.send(Command::SetVisible(visible)).await.map(drop)
    }

    pub async fn on_lifecycle(&self, event: LifecycleEvent) -> Result<(), CountdownError> {
        self.send(Command::Lifecycle(event)).await.map(drop)
    }

    pub async fn snapshot(&self) -> Result<CountdownSnapshot, CountdownError> {
        self.send(Command::Snapshot).await
    }
}
