//! Point-in-time view of a countdown component

use serde::{Deserialize, Serialize};

use crate::timing::{EnginePhase, ViewId};

/// Countdown state as observed between events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub view: ViewId,
    pub started: bool,
    pub visible: bool,
    pub running: bool,
    /// Phase of the current engine, `None` before the first session
    pub phase: Option<EnginePhase>,
    /// Time left until the deadline while an engine is running
    pub remaining_ms: Option<u64>,
    /// Last text handed to the render sink
    pub display_text: Option<String>,
}

impl CountdownSnapshot {
    /// Check if an engine is actively scheduling ticks
    pub fn is_active(&self) -> bool {
        self.phase == Some(EnginePhase::Running)
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Some(EnginePhase::Finished)
    }
}
