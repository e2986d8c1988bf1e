//! The countdown component

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::{CountdownSnapshot, RunRequestReconciler, RunTransition};
use crate::{
    display::{CountdownObserver, DisplayBinder, DisplayTemplate, RenderSink, TimeFormatMode},
    timing::{CountdownEngine, CountdownEvent, EnginePhase, ViewId, DEFAULT_INTERVAL, MIN_INTERVAL},
};

/// Host lifecycle signals the component reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The component was attached to its host; inputs are re-reconciled
    Attached,
    /// The component was detached; implies not visible
    Detached,
    VisibilityChanged(bool),
}

/// Countdown component: one reconciler, at most one live engine, one binder
#[derive(Debug)]
pub struct CountdownView<S> {
    id: ViewId,
    time_in_future: Duration,
    interval: Duration,
    reconciler: RunRequestReconciler,
    engine: Option<CountdownEngine>,
    binder: DisplayBinder<S>,
}

impl<S: RenderSink> CountdownView<S> {
    /// Create a stopped, invisible component rendering into `sink`
    pub fn new(sink: S) -> Self {
        let id = ViewId::next();
        Self {
            id,
            time_in_future: Duration::ZERO,
            interval: DEFAULT_INTERVAL,
            reconciler: RunRequestReconciler::new(),
            engine: None,
            binder: DisplayBinder::new(id, sink),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn sink(&self) -> &S {
        self.binder.sink()
    }

    pub fn time_in_future(&self) -> Duration {
        self.time_in_future
    }

    /// Set the countdown length; takes effect on the next engine start
    pub fn set_time_in_future(&mut self, duration: Duration) {
        debug!("{}: time in future set to {:?}", self.id, duration);
        self.time_in_future = duration;
    }

    pub fn countdown_interval(&self) -> Duration {
        self.interval
    }

    /// Set the tick spacing. A zero interval is clamped to [`MIN_INTERVAL`].
    pub fn set_countdown_interval(&mut self, interval: Duration) {
        if interval < MIN_INTERVAL {
            warn!("{}: countdown interval {:?} is too small, using {:?}", self.id, interval, MIN_INTERVAL);
            self.interval = MIN_INTERVAL;
        } else {
            self.interval = interval;
        }
    }

    pub fn time_format(&self) -> TimeFormatMode {
        self.binder.time_format()
    }

    pub fn set_time_format(&mut self, mode: TimeFormatMode) {
        self.binder.set_time_format(mode);
    }

    /// Set or clear the display template
    pub fn set_format(&mut self, template: Option<String>) {
        let template = template.map(DisplayTemplate::new);
        if let Some(t) = &template {
            if !t.is_valid() {
                debug!("{}: display template {:?} is malformed", self.id, t.source());
            }
        }
        self.binder.set_template(template);
    }

    pub fn set_auto_display_text(&mut self, enabled: bool) {
        self.binder.set_auto_display(enabled);
    }

    /// Register the tick/finish observer, replacing any previous one
    pub fn add_countdown_callback(&mut self, observer: CountdownObserver) {
        self.binder.set_observer(observer);
    }

    /// Whether a template failure has been reported for this component
    pub fn template_error_logged(&self) -> bool {
        self.binder.template_error_logged()
    }

    pub fn is_started(&self) -> bool {
        self.reconciler.is_started()
    }

    pub fn is_visible(&self) -> bool {
        self.reconciler.is_visible()
    }

    pub fn is_running(&self) -> bool {
        self.reconciler.is_running()
    }

    pub fn engine_phase(&self) -> Option<EnginePhase> {
        self.engine.as_ref().map(CountdownEngine::phase)
    }

    /// Request the countdown to run
    pub fn start(&mut self) {
        info!("{}: start requested", self.id);
        let transition = self.reconciler.set_started(true);
        self.apply(transition);
    }

    /// Withdraw the run request
    pub fn cancel(&mut self) {
        info!("{}: cancel requested", self.id);
        let transition = self.reconciler.set_started(false);
        self.apply(transition);
    }

    pub fn set_visible(&mut self, visible: bool) {
        debug!("{}: visible={}", self.id, visible);
        let transition = self.reconciler.set_visible(visible);
        self.apply(transition);
    }

    pub fn on_lifecycle(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Attached => {
                let transition = self.reconciler.reconcile();
                self.apply(transition);
            }
            LifecycleEvent::Detached => self.set_visible(false),
            LifecycleEvent::VisibilityChanged(visible) => self.set_visible(visible),
        }
    }

    /// Instant at which [`fire_due`](Self::fire_due) should next be called
    pub fn next_fire_at(&self) -> Option<Instant> {
        self.engine.as_ref().and_then(CountdownEngine::next_fire_at)
    }

    /// Fire the engine if a tick or the finish is due at `now`, then render
    /// and notify
    pub fn fire_due(&mut self, now: Instant) -> Option<CountdownEvent> {
        let event = self.engine.as_mut()?.fire(now)?;
        self.binder.dispatch(event);
        Some(event)
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        let remaining = self
            .engine
            .as_ref()
            .and_then(|engine| engine.remaining_at(Instant::now()));

        CountdownSnapshot {
            view: self.id,
            started: self.reconciler.is_started(),
            visible: self.reconciler.is_visible(),
            running: self.reconciler.is_running(),
            phase: self.engine_phase(),
            remaining_ms: remaining.map(|r| r.as_millis() as u64),
            display_text: self.binder.last_text().map(str::to_string),
        }
    }

    fn apply(&mut self, transition: Option<RunTransition>) {
        match transition {
            Some(RunTransition::Start) => {
                if let Some(mut previous) = self.engine.take() {
                    previous.cancel();
                }

                let mut engine = CountdownEngine::new(self.time_in_future, self.interval);
                engine.start(Instant::now());
                self.engine = Some(engine);
            }
            Some(RunTransition::Stop) => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.cancel();
                }
            }
            None => {}
        }
    }
}
