//! Countdown timing module
//! 
//! This module contains the tick scheduling engine and the events it emits.

pub mod engine;
pub mod event;

// Re-export main types
pub use engine::{CountdownEngine, EnginePhase, DEFAULT_INTERVAL, MIN_INTERVAL};
pub use event::{CountdownEvent, ViewId};
