//! Display module
//! 
//! This module turns countdown events into display text and observer notifications.

pub mod binder;
pub mod format;
pub mod template;

// Re-export main types
pub use binder::{CountdownNotification, CountdownObserver, DisplayBinder, RenderSink};
pub use format::{format_remaining, TimeComponents, TimeFormatMode};
pub use template::DisplayTemplate;
