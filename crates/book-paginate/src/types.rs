use thiserror::Error;

use crate::paginator::RunState;

#[derive(Error, Debug)]
pub enum PaginationError {
    #[error("Invalid page setup: {0}")]
    InvalidPageSetup(String),
    #[error("Rule \"{rule}\" failed: {reason}")]
    RuleValidationFailure { rule: String, reason: String },
    #[error("Content unavailable: {0}")]
    ContentUnavailable(String),
    #[error("Cannot {command} while {state}")]
    InvalidTransition {
        state: RunState,
        command: &'static str,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl PaginationError {
    /// Whether this error ended a run, as opposed to a rejected command
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PaginationError::InvalidTransition { .. })
    }
}

pub type Result<T> = std::result::Result<T, PaginationError>;
