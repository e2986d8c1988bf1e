//! Drift-corrected countdown engine
//!
//! Tick boundaries sit at `start + k * interval`. When a fire arrives late,
//! the missed boundaries are skipped and the next fire is scheduled on the
//! next future boundary. The final tick is followed by a fire exactly at
//! the deadline, which emits the finish event.

use std::time::Duration;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::CountdownEvent;

/// Default spacing between ticks
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Smallest interval an engine will schedule with
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Lifecycle phase of a countdown engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnginePhase {
    Idle,
    Running,
    Finished,
    Cancelled,
}

impl EnginePhase {
    /// Finished and cancelled engines never fire again
    pub fn is_terminal(self) -> bool {
        matches!(self, EnginePhase::Finished | EnginePhase::Cancelled)
    }
}

#[derive(Debug, Clone, Copy)]
struct Schedule {
    anchor: Instant,
    deadline: Instant,
    next_fire: Instant,
}

/// One countdown session toward a fixed target duration
#[derive(Debug)]
pub struct CountdownEngine {
    target: Duration,
    interval: Duration,
    phase: EnginePhase,
    schedule: Option<Schedule>,
}

impl CountdownEngine {
    /// Create an idle engine. A zero interval is clamped to [`MIN_INTERVAL`].
    pub fn new(target: Duration, interval: Duration) -> Self {
        let interval = if interval < MIN_INTERVAL {
            warn!("Countdown interval {:?} is below the minimum, using {:?}", interval, MIN_INTERVAL);
            MIN_INTERVAL
        } else {
            interval
        };

        Self {
            target,
            interval,
            phase: EnginePhase::Idle,
            schedule: None,
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Instant of the next pending fire, if one is scheduled
    pub fn next_fire_at(&self) -> Option<Instant> {
        self.schedule.map(|s| s.next_fire)
    }

    /// Time left until the deadline as seen from `now`
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.schedule.map(|s| s.deadline.saturating_duration_since(now))
    }

    /// Anchor the schedule at `now` and plan the first fire
    pub fn start(&mut self, now: Instant) {
        if self.phase != EnginePhase::Idle {
            debug!("Ignoring start on a {:?} countdown engine", self.phase);
            return;
        }

        let deadline = now + self.target;
        let next_fire = self.next_fire_after(now, now, deadline);
        self.schedule = Some(Schedule {
            anchor: now,
            deadline,
            next_fire,
        });
        self.phase = EnginePhase::Running;

        info!("Countdown started: target={:?}, interval={:?}", self.target, self.interval);
    }

    /// Process a fire at `now`.
    ///
    /// Returns `None` when nothing is due: the engine is not running or `now`
    /// is still before the scheduled fire.
    pub fn fire(&mut self, now: Instant) -> Option<CountdownEvent> {
        let Schedule { anchor, deadline, next_fire } = self.schedule?;
        if now < next_fire {
            return None;
        }

        let remaining = deadline.saturating_duration_since(now);
        if remaining.is_zero() {
            self.schedule = None;
            self.phase = EnginePhase::Finished;
            info!("Countdown finished");
            return Some(CountdownEvent::Finish);
        }

        let next_fire = self.next_fire_after(anchor, now, deadline);
        self.schedule = Some(Schedule { anchor, deadline, next_fire });
        debug!("Countdown tick: remaining={:?}, next fire in {:?}", remaining, next_fire - now);

        Some(CountdownEvent::Tick { remaining })
    }

    /// Stop all future fires. Cancelling an idle or spent engine is a no-op.
    pub fn cancel(&mut self) {
        match self.phase {
            EnginePhase::Running | EnginePhase::Idle => {
                if self.phase == EnginePhase::Running {
                    info!("Countdown cancelled");
                }
                self.schedule = None;
                self.phase = EnginePhase::Cancelled;
            }
            EnginePhase::Finished | EnginePhase::Cancelled => {}
        }
    }

    fn next_fire_after(&self, anchor: Instant, now: Instant, deadline: Instant) -> Instant {
        let remaining = deadline.saturating_duration_since(now);
        if remaining <= self.interval {
            return deadline;
        }

        // Resynchronize to the next boundary after `now`, skipping any missed ones
        let elapsed = now.saturating_duration_since(anchor);
        let overrun = elapsed.as_nanos() % self.interval.as_nanos();
        let delay = self.interval - Duration::from_nanos(overrun as u64);

        (now + delay).min(deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Fire the engine on every scheduled instant and collect the events
    fn drain(engine: &mut CountdownEngine) -> Vec<CountdownEvent> {
        let mut events = Vec::new();
        while let Some(at) = engine.next_fire_at() {
            if let Some(event) = engine.fire(at) {
                events.push(event);
            }
        }
        events
    }

    #[test]
    fn ticks_on_interval_boundaries_then_finishes() {
        let mut engine = CountdownEngine::new(ms(3500), ms(1000));
        engine.start(Instant::now());

        let events = drain(&mut engine);
        assert_eq!(
            events,
            vec![
                CountdownEvent::Tick { remaining: ms(2500) },
                CountdownEvent::Tick { remaining: ms(1500) },
                CountdownEvent::Tick { remaining: ms(500) },
                CountdownEvent::Finish,
            ]
        );
        assert_eq!(engine.phase(), EnginePhase::Finished);
        assert_eq!(engine.next_fire_at(), None);
    }

    #[test]
    fn zero_target_finishes_without_ticks() {
        let start = Instant::now();
        let mut engine = CountdownEngine::new(Duration::ZERO, ms(1000));
        engine.start(start);

        assert_eq!(engine.next_fire_at(), Some(start));
        assert_eq!(drain(&mut engine), vec![CountdownEvent::Finish]);
    }

    #[test]
    fn target_equal_to_interval_finishes_without_ticks() {
        let start = Instant::now();
        let mut engine = CountdownEngine::new(ms(1000), ms(1000));
        engine.start(start);

        assert_eq!(engine.next_fire_at(), Some(start + ms(1000)));
        assert_eq!(drain(&mut engine), vec![CountdownEvent::Finish]);
    }

    #[test]
    fn late_fire_skips_missed_boundaries() {
        let start = Instant::now();
        let mut engine = CountdownEngine::new(ms(10_000), ms(1000));
        engine.start(start);

        // Delayed well past the first two boundaries
        let late = start + ms(2300);
        assert_eq!(engine.fire(late), Some(CountdownEvent::Tick { remaining: ms(7700) }));
        assert_eq!(engine.next_fire_at(), Some(start + ms(3000)));

        assert_eq!(
            engine.fire(start + ms(3000)),
            Some(CountdownEvent::Tick { remaining: ms(7000) })
        );
    }

    #[test]
    fn late_fire_past_deadline_finishes() {
        let start = Instant::now();
        let mut engine = CountdownEngine::new(ms(3000), ms(1000));
        engine.start(start);

        assert_eq!(engine.fire(start + ms(5000)), Some(CountdownEvent::Finish));
        assert_eq!(engine.fire(start + ms(6000)), None);
    }

    #[test]
    fn early_fire_is_ignored() {
        let start = Instant::now();
        let mut engine = CountdownEngine::new(ms(5000), ms(1000));
        engine.start(start);

        assert_eq!(engine.fire(start + ms(999)), None);
        assert_eq!(engine.next_fire_at(), Some(start + ms(1000)));
    }

    #[test]
    fn last_tick_is_within_one_interval() {
        for target in [1u64, 999, 1000, 1001, 2750, 4000, 12_345] {
            let mut engine = CountdownEngine::new(ms(target), ms(1000));
            engine.start(Instant::now());
            let events = drain(&mut engine);

            assert_eq!(events.last(), Some(&CountdownEvent::Finish));
            assert_eq!(events.iter().filter(|e| e.is_finish()).count(), 1);

            let ticks: Vec<Duration> = events.iter().filter_map(|e| e.remaining()).collect();
            assert!(ticks.windows(2).all(|w| w[0] > w[1]), "target {}: {:?}", target, ticks);
            if let Some(last) = ticks.last() {
                assert!(*last > Duration::ZERO && *last <= ms(1000));
            }
        }
    }

    #[test]
    fn cancel_stops_future_fires_and_is_idempotent() {
        let start = Instant::now();
        let mut engine = CountdownEngine::new(ms(5000), ms(1000));
        engine.start(start);
        assert!(engine.fire(start + ms(1000)).is_some());

        engine.cancel();
        engine.cancel();
        assert_eq!(engine.phase(), EnginePhase::Cancelled);
        assert_eq!(engine.next_fire_at(), None);
        assert_eq!(engine.fire(start + ms(2000)), None);
    }

    #[test]
    fn spent_engine_does_not_restart() {
        let start = Instant::now();
        let mut engine = CountdownEngine::new(Duration::ZERO, ms(1000));
        engine.start(start);
        assert_eq!(engine.fire(start), Some(CountdownEvent::Finish));

        engine.start(start + ms(10));
        assert_eq!(engine.phase(), EnginePhase::Finished);
        assert_eq!(engine.next_fire_at(), None);

        engine.cancel();
        assert_eq!(engine.phase(), EnginePhase::Finished);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let engine = CountdownEngine::new(ms(100), Duration::ZERO);
        assert_eq!(engine.interval(), MIN_INTERVAL);
    }
}
