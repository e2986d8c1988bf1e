//! Background tasks module
//! 
//! This module contains the task that drives a countdown view and the handle used to control it.

pub mod countdown_task;
pub mod handle;

// Re-export main types
pub use countdown_task::{apply_command, countdown_task, Command, Request};
pub use handle::CountdownHandle;
