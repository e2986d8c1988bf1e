//! Error types for the countdown component

use thiserror::Error;

/// Errors surfaced by the async countdown handle
#[derive(Debug, Error)]
pub enum CountdownError {
    #[error("countdown task is no longer running")]
    TaskStopped,
}

/// Malformed display template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("dangling '%' at end of template")]
    DanglingPercent,

    #[error("unknown conversion '%{conversion}' at byte {position}")]
    UnknownConversion { conversion: char, position: usize },

    #[error("argument index {index} out of range at byte {position}, only 1 argument is available")]
    ArgumentIndex { index: String, position: usize },

    #[error("missing argument for placeholder at byte {position}")]
    MissingArgument { position: usize },
}
