//! Run request reconciliation
//!
//! Two independent inputs, `started` and `visible`, reduce to a single
//! `running` flag. A transition is reported only when `running` flips.

use tracing::debug;

/// Edge of the derived `running` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTransition {
    /// `running` became true: construct and start a fresh engine
    Start,
    /// `running` became false: cancel the live engine
    Stop,
}

/// Reduces the started and visible signals to `running == started && visible`
#[derive(Debug, Clone, Default)]
pub struct RunRequestReconciler {
    started: bool,
    visible: bool,
    running: bool,
}

impl RunRequestReconciler {
    /// Create a reconciler with both inputs false
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_started(&mut self, started: bool) -> Option<RunTransition> {
        self.started = started;
        self.reconcile()
    }

    pub fn set_visible(&mut self, visible: bool) -> Option<RunTransition> {
        self.visible = visible;
        self.reconcile()
    }

    /// Re-derive `running` without changing either input
    pub fn reconcile(&mut self) -> Option<RunTransition> {
        let running = self.started && self.visible;
        if running == self.running {
            return None;
        }

        self.running = running;
        debug!(
            "Run state changed: started={}, visible={}, running={}",
            self.started, self.visible, running
        );

        Some(if running { RunTransition::Start } else { RunTransition::Stop })
    }
}
