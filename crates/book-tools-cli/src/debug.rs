//! Interactive stepping over stdin

use anyhow::Result;
use book_async_runtime::{PaginationCommand, PaginationUpdate, spawn_pagination};
use book_paginate::{Book, Paginator, TextFlow};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "commands: step | pause | resume | finish | cancel";

fn parse_command(line: &str) -> Option<PaginationCommand> {
    match line.trim() {
        "s" | "step" => Some(PaginationCommand::Step),
        "p" | "pause" => Some(PaginationCommand::Pause),
        "r" | "resume" => Some(PaginationCommand::Resume),
        "f" | "finish" => Some(PaginationCommand::Finish),
        "c" | "cancel" | "q" | "quit" => Some(PaginationCommand::Cancel),
        _ => None,
    }
}

/// Drive a paused run from stdin. `None` when the run was cancelled.
pub async fn run_interactive(paginator: Paginator<TextFlow>) -> Result<Option<Book>> {
    let mut handle = spawn_pagination(paginator);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    eprintln!("{}", HELP);

    loop {
        tokio::select! {
            update = handle.next_update() => match update {
                Some(PaginationUpdate::Started { paused }) => {
                    eprintln!("started{}", if paused { " (paused)" } else { "" });
                }
                Some(PaginationUpdate::Progress { book, page_count }) => {
                    if let Some(page) = book.last() {
                        let range = page.content_range();
                        eprintln!(
                            "page {} (#{}): lines {}..{}",
                            page_count, page.number, range.start, range.end
                        );
                    }
                }
                Some(PaginationUpdate::Paused { page_count }) => {
                    eprintln!("paused after {} pages", page_count);
                }
                Some(PaginationUpdate::Resumed) => eprintln!("resumed"),
                Some(PaginationUpdate::Completed { book }) => return Ok(Some(book)),
                Some(PaginationUpdate::Failed { reason }) => anyhow::bail!("Pagination failed: {}", reason),
                Some(PaginationUpdate::Cancelled) | None => return Ok(None),
            },
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => match parse_command(&line) {
                    Some(cmd) => {
                        if handle.send(cmd).is_err() {
                            log::debug!("Worker already stopped, dropping {:?}", cmd);
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => eprintln!("{}", HELP),
                },
                None => {
                    // End of input: run whatever is left
                    stdin_open = false;
                    let _ = handle.finish();
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("step\n"), Some(PaginationCommand::Step));
        assert_eq!(parse_command(" f "), Some(PaginationCommand::Finish));
        assert_eq!(parse_command("q"), Some(PaginationCommand::Cancel));
        assert_eq!(parse_command("jump"), None);
    }
}
