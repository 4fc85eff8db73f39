use crate::worker::drive_pagination;
use crate::{PaginationCommand, PaginationUpdate, RuntimeError};
use book_paginate::{ContentFlow, Paginator, RunState};
use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Host side of a running pagination worker
pub struct PaginationHandle {
    commands: mpsc::UnboundedSender<PaginationCommand>,
    updates: mpsc::UnboundedReceiver<PaginationUpdate>,
    task: JoinHandle<RunState>,
}

/// Spawn a worker task for `paginator` on the current runtime
pub fn spawn_pagination<F>(paginator: Paginator<F>) -> PaginationHandle
where
    F: ContentFlow + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(drive_pagination(paginator, command_rx, update_tx));

    PaginationHandle {
        commands: command_tx,
        updates: update_rx,
        task,
    }
}

impl PaginationHandle {
    pub fn send(&self, cmd: PaginationCommand) -> Result<(), RuntimeError> {
        self.commands.send(cmd).map_err(|_| RuntimeError::Closed)
    }

    pub fn pause(&self) -> Result<(), RuntimeError> {
        self.send(PaginationCommand::Pause)
    }

    pub fn resume(&self) -> Result<(), RuntimeError> {
        self.send(PaginationCommand::Resume)
    }

    pub fn step(&self) -> Result<(), RuntimeError> {
        self.send(PaginationCommand::Step)
    }

    pub fn finish(&self) -> Result<(), RuntimeError> {
        self.send(PaginationCommand::Finish)
    }

    pub fn cancel(&self) -> Result<(), RuntimeError> {
        self.send(PaginationCommand::Cancel)
    }

    /// Next update, or `None` once the worker is gone and the queue is empty
    pub async fn next_update(&mut self) -> Option<PaginationUpdate> {
        self.updates.recv().await
    }

    /// Skip ahead to the terminal update
    pub async fn wait(&mut self) -> Option<PaginationUpdate> {
        while let Some(update) = self.updates.recv().await {
            if update.is_terminal() {
                return Some(update);
            }
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the worker to exit and return its final state
    pub async fn join(self) -> Result<RunState, RuntimeError> {
        // Keep the command sender alive so joining does not cancel the run
        let PaginationHandle { commands, task, .. } = self;
        let state = task.await?;
        drop(commands);
        Ok(state)
    }
}

/// Keeps at most one pagination run alive
///
/// Starting a new run cancels the previous one and waits for it to exit
/// before the new worker is spawned.
#[derive(Default)]
pub struct PaginationSession {
    current: Option<PaginationHandle>,
}

impl PaginationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn start<F>(&mut self, paginator: Paginator<F>) -> Result<&mut PaginationHandle, RuntimeError>
    where
        F: ContentFlow + Send + 'static,
    {
        self.cancel().await?;
        debug!("Starting pagination '{}'", paginator.context().label);
        Ok(self.current.insert(spawn_pagination(paginator)))
    }

    pub fn current(&mut self) -> Option<&mut PaginationHandle> {
        self.current.as_mut()
    }

    /// Cancel the live run, if any, and wait for it to stop
    pub async fn cancel(&mut self) -> Result<Option<RunState>, RuntimeError> {
        let Some(previous) = self.current.take() else {
            return Ok(None);
        };
        if !previous.is_finished() {
            // A worker that already finished has dropped its receiver
            let _ = previous.cancel();
        }
        let state = previous.join().await?;
        debug!("Previous pagination ended {}", state);
        Ok(Some(state))
    }
}
