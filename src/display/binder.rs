//! Binds countdown events to the render sink and the observer

use std::time::Duration;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use super::{format_remaining, DisplayTemplate, TimeFormatMode};
use crate::timing::{CountdownEvent, ViewId};

/// Surface the formatted countdown text is written to
pub trait RenderSink {
    fn set_display_text(&mut self, text: &str);
}

/// Hosts subscribe to the receiving side of the watch channel
impl RenderSink for watch::Sender<String> {
    fn set_display_text(&mut self, text: &str) {
        self.send_replace(text.to_string());
    }
}

/// Records every rendered text, in order
impl RenderSink for Vec<String> {
    fn set_display_text(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Event forwarded to the registered observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownNotification {
    pub view: ViewId,
    #[serde(flatten)]
    pub event: CountdownEvent,
}

pub type CountdownObserver = mpsc::UnboundedSender<CountdownNotification>;

/// Formats ticks for display and forwards events to the observer
#[derive(Debug)]
pub struct DisplayBinder<S> {
    view: ViewId,
    sink: S,
    mode: TimeFormatMode,
    template: Option<DisplayTemplate>,
    auto_display: bool,
    template_error_logged: bool,
    observer: Option<CountdownObserver>,
    last_text: Option<String>,
}

impl<S: RenderSink> DisplayBinder<S> {
    pub fn new(view: ViewId, sink: S) -> Self {
        Self {
            view,
            sink,
            mode: TimeFormatMode::default(),
            template: None,
            auto_display: false,
            template_error_logged: false,
            observer: None,
            last_text: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn time_format(&self) -> TimeFormatMode {
        self.mode
    }

    pub fn set_time_format(&mut self, mode: TimeFormatMode) {
        self.mode = mode;
    }

    pub fn template(&self) -> Option<&DisplayTemplate> {
        self.template.as_ref()
    }

    pub fn set_template(&mut self, template: Option<DisplayTemplate>) {
        self.template = template;
    }

    pub fn auto_display(&self) -> bool {
        self.auto_display
    }

    pub fn set_auto_display(&mut self, enabled: bool) {
        self.auto_display = enabled;
    }

    /// Replace the observer; only one can be registered
    pub fn set_observer(&mut self, observer: CountdownObserver) {
        if self.observer.is_some() {
            debug!("Replacing countdown observer for {}", self.view);
        }
        self.observer = Some(observer);
    }

    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    /// Whether a template failure has already been reported
    pub fn template_error_logged(&self) -> bool {
        self.template_error_logged
    }

    /// Text for `remaining` under the current mode and template.
    ///
    /// A malformed template falls back to the bare time string and is
    /// reported once per binder.
    pub fn display_text(&mut self, remaining: Duration) -> String {
        let time = format_remaining(remaining, self.mode);
        let Some(template) = &self.template else {
            return time;
        };

        match template.apply(&time) {
            Ok(text) => text,
            Err(e) => {
                if !self.template_error_logged {
                    warn!("Illegal format string {:?}: {}", template.source(), e);
                    self.template_error_logged = true;
                }
                time
            }
        }
    }

    /// Render (on ticks, when auto-display is on) and notify the observer
    pub fn dispatch(&mut self, event: CountdownEvent) {
        if let CountdownEvent::Tick { remaining } = event {
            if self.auto_display {
                let text = self.display_text(remaining);
                self.sink.set_display_text(&text);
                self.last_text = Some(text);
            }
        }

        self.notify(event);
    }

    fn notify(&mut self, event: CountdownEvent) {
        let Some(observer) = &self.observer else {
            return;
        };

        let notification = CountdownNotification { view: self.view, event };
        if let Err(e) = observer.send(notification) {
            warn!("Countdown observer for {} is closed, dropping it: {}", self.view, e);
            self.observer = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binder() -> DisplayBinder<Vec<String>> {
        DisplayBinder::new(ViewId::next(), Vec::new())
    }

    fn tick(ms: u64) -> CountdownEvent {
        CountdownEvent::Tick { remaining: Duration::from_millis(ms) }
    }

    #[test]
    fn renders_ticks_only_when_auto_display_is_enabled() {
        let mut binder = binder();
        binder.set_time_format(TimeFormatMode::MinSec);

        binder.dispatch(tick(5000));
        assert!(binder.sink().is_empty());

        binder.set_auto_display(true);
        binder.dispatch(tick(5000));
        binder.dispatch(CountdownEvent::Finish);
        assert_eq!(binder.sink(), &vec!["00:05".to_string()]);
        assert_eq!(binder.last_text(), Some("00:05"));
    }

    #[test]
    fn applies_template() {
        let mut binder = binder();
        binder.set_time_format(TimeFormatMode::MinSec);
        binder.set_auto_display(true);
        binder.set_template(Some(DisplayTemplate::new("Time left: %s")));

        binder.dispatch(tick(5400));
        assert_eq!(binder.sink(), &vec!["Time left: 00:05".to_string()]);
        assert!(!binder.template_error_logged());
    }

    #[test]
    fn malformed_template_falls_back_and_reports_once() {
        let mut binder = binder();
        binder.set_time_format(TimeFormatMode::MinSec);
        binder.set_auto_display(true);
        binder.set_template(Some(DisplayTemplate::new("Time left: %d")));

        binder.dispatch(tick(5000));
        assert!(binder.template_error_logged());
        binder.dispatch(tick(4000));

        assert_eq!(binder.sink(), &vec!["00:05".to_string(), "00:04".to_string()]);
        assert!(binder.template_error_logged());
    }

    #[test]
    fn forwards_events_to_the_latest_observer() {
        let mut binder = binder();
        let (first_tx, mut first_rx) = mpsc::unbounded_channel();
        let (second_tx, mut second_rx) = mpsc::unbounded_channel();

        binder.set_observer(first_tx);
        binder.dispatch(tick(2000));
        binder.set_observer(second_tx);
        binder.dispatch(CountdownEvent::Finish);

        assert_eq!(first_rx.try_recv().unwrap().event, tick(2000));
        assert!(first_rx.try_recv().is_err());
        let finish = second_rx.try_recv().unwrap();
        assert_eq!(finish.event, CountdownEvent::Finish);
        assert_eq!(finish.view, binder.view);
    }

    #[test]
    fn closed_observer_is_dropped() {
        let mut binder = binder();
        let (tx, rx) = mpsc::unbounded_channel();
        binder.set_observer(tx);
        drop(rx);

        binder.dispatch(tick(1000));
        assert!(binder.observer.is_none());
    }

    #[test]
    fn watch_sender_is_a_sink() {
        let (mut tx, rx) = watch::channel(String::new());
        tx.set_display_text("00:00:09");
        assert_eq!(*rx.borrow(), "00:00:09");
    }
}
