//! Countdown View - a visibility-aware countdown component
//! 
//! This library drives a drift-corrected tick schedule toward a target
//! duration, renders the remaining time as text, and pauses or resumes the
//! countdown depending on whether it has been started and is visible.

pub mod config;
pub mod display;
pub mod error;
pub mod state;
pub mod tasks;
pub mod timing;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use display::{CountdownNotification, RenderSink, TimeFormatMode};
pub use error::{CountdownError, TemplateError};
pub use state::{CountdownSnapshot, CountdownView, LifecycleEvent};
pub use tasks::CountdownHandle;
pub use timing::{CountdownEngine, CountdownEvent, ViewId};
