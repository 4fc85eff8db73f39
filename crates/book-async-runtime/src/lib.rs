mod session;
mod throttle;
mod worker;

// Re-export types from library crates
pub use book_paginate::{Book, RunContext, RunState};

pub use session::{PaginationHandle, PaginationSession, spawn_pagination};
pub use throttle::ProgressThrottle;
pub use worker::drive_pagination;

use thiserror::Error;

/// Commands sent from the host to a pagination worker
///
/// Commands are only honored between pages, never in the middle of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationCommand {
    Pause,
    Resume,
    /// Build one page while paused
    Step,
    /// Leave stepping mode and run to the end
    Finish,
    /// Stop and discard all pages
    Cancel,
}

/// Updates sent from a pagination worker to the host
#[derive(Debug, Clone)]
pub enum PaginationUpdate {
    Started {
        paused: bool,
    },
    /// A page was added; `book` holds every page so far
    Progress {
        book: Book,
        page_count: usize,
    },
    Paused {
        page_count: usize,
    },
    Resumed,
    Completed {
        book: Book,
    },
    Failed {
        reason: String,
    },
    Cancelled,
}

impl PaginationUpdate {
    /// Last update a worker sends
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaginationUpdate::Completed { .. }
                | PaginationUpdate::Failed { .. }
                | PaginationUpdate::Cancelled
        )
    }
}

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Pagination worker has stopped")]
    Closed,
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
