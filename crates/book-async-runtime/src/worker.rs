use crate::{PaginationCommand, PaginationUpdate};
use book_paginate::{ContentFlow, PaginationError, Paginator, RunState, StepOutcome};
use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Async worker that drives a paginator one page at a time.
///
/// Yields to the scheduler after every page so the host stays responsive.
/// While paused it waits for the next command. Dropping every command
/// sender cancels the run. Returns the final state.
pub async fn drive_pagination<F: ContentFlow>(
    mut paginator: Paginator<F>,
    mut command_rx: mpsc::UnboundedReceiver<PaginationCommand>,
    update_tx: mpsc::UnboundedSender<PaginationUpdate>,
) -> RunState {
    let mut failure = None;

    if paginator.state() == RunState::Idle {
        match paginator.start() {
            Ok(()) => {
                let _ = update_tx.send(PaginationUpdate::Started {
                    paused: paginator.state() == RunState::Paused,
                });
            }
            Err(e) => failure = Some(e),
        }
    }

    loop {
        match paginator.state() {
            RunState::Running => {
                // Drain queued commands at the page boundary
                loop {
                    match command_rx.try_recv() {
                        Ok(cmd) => {
                            process_command(cmd, &mut paginator, &update_tx, &mut failure)
                        }
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            debug!("Command channel closed, cancelling");
                            let _ = paginator.cancel();
                            break;
                        }
                    }
                }
                if paginator.state() != RunState::Running {
                    continue;
                }

                match paginator.advance() {
                    Ok(outcome) => send_progress(&paginator, outcome, &update_tx),
                    Err(e) => failure = Some(e),
                }
                tokio::task::yield_now().await;
            }
            RunState::Paused => match command_rx.recv().await {
                Some(cmd) => process_command(cmd, &mut paginator, &update_tx, &mut failure),
                None => {
                    debug!("Command channel closed, cancelling");
                    let _ = paginator.cancel();
                }
            },
            RunState::Idle | RunState::Done | RunState::Error | RunState::Cancelled => break,
        }
    }

    let state = paginator.state();
    let update = match state {
        RunState::Done => match paginator.into_book() {
            Some(book) => PaginationUpdate::Completed { book },
            None => PaginationUpdate::Failed {
                reason: "Finished without a book".to_string(),
            },
        },
        RunState::Cancelled => PaginationUpdate::Cancelled,
        _ => PaginationUpdate::Failed {
            reason: failure
                .map(|e| e.to_string())
                .unwrap_or_else(|| format!("Pagination stopped while {}", state)),
        },
    };
    let _ = update_tx.send(update);
    state
}

fn process_command<F: ContentFlow>(
    cmd: PaginationCommand,
    paginator: &mut Paginator<F>,
    update_tx: &mpsc::UnboundedSender<PaginationUpdate>,
    failure: &mut Option<PaginationError>,
) {
    let result = match cmd {
        PaginationCommand::Pause => paginator.pause().map(|()| {
            let _ = update_tx.send(PaginationUpdate::Paused {
                page_count: paginator.page_count(),
            });
        }),
        PaginationCommand::Resume => paginator.resume().map(|()| {
            let _ = update_tx.send(PaginationUpdate::Resumed);
        }),
        PaginationCommand::Step => match paginator.step() {
            Ok(outcome) => {
                send_progress(paginator, outcome, update_tx);
                Ok(())
            }
            Err(e) => Err(e),
        },
        PaginationCommand::Finish => {
            if paginator.state() == RunState::Paused {
                paginator.resume().map(|()| {
                    let _ = update_tx.send(PaginationUpdate::Resumed);
                })
            } else {
                Ok(())
            }
        }
        PaginationCommand::Cancel => paginator.cancel(),
    };

    match result {
        Ok(()) => {}
        Err(e) if e.is_fatal() => *failure = Some(e),
        Err(e) => warn!("Ignoring {:?}: {}", cmd, e),
    }
}

fn send_progress<F: ContentFlow>(
    paginator: &Paginator<F>,
    outcome: StepOutcome,
    update_tx: &mpsc::UnboundedSender<PaginationUpdate>,
) {
    let _ = update_tx.send(PaginationUpdate::Progress {
        book: paginator.book().clone(),
        page_count: outcome.page_count(),
    });
}
