//! State management module
//! 
//! This module contains the countdown component and the state it reconciles.

pub mod run_state;
pub mod snapshot;
pub mod view;

// Re-export main types
pub use run_state::{RunRequestReconciler, RunTransition};
pub use snapshot::CountdownSnapshot;
pub use view::{CountdownView, LifecycleEvent};
