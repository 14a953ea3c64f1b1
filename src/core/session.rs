use crate::core::advisor::Advisor;
use crate::core::render;
use crate::core::{Catalog, ChatModel, Storage};
use crate::utils::error::Result;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Consecutive I/O errors on the input stream tolerated before the session gives up.
const MAX_READ_FAILURES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Packages,
    Summary,
    Services,
    Unavailable,
    Help,
}

impl Command {
    /// Expects trimmed input; matching is case-insensitive.
    pub fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "exit" => Some(Command::Exit),
            "packages" => Some(Command::Packages),
            "summary" => Some(Command::Summary),
            "services" => Some(Command::Services),
            "unavailable" => Some(Command::Unavailable),
            "help" => Some(Command::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Terminated,
}

/// Result of one turn, interpreted by the console loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing to print.
    Idle,
    Render(String),
    /// Something went wrong this turn; the session carries on.
    Notice(String),
    Terminate(String),
}

impl TurnOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            TurnOutcome::Idle => None,
            TurnOutcome::Render(text) | TurnOutcome::Notice(text) | TurnOutcome::Terminate(text) => {
                Some(text)
            }
        }
    }
}

pub struct Session<S: Storage, M: ChatModel> {
    catalog: Catalog,
    advisor: Advisor<S, M>,
    state: SessionState,
    read_failures: usize,
}

impl<S: Storage, M: ChatModel> Session<S, M> {
    pub fn new(catalog: Catalog, advisor: Advisor<S, M>) -> Self {
        Self {
            catalog,
            advisor,
            state: SessionState::AwaitingInput,
            read_failures: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Processes one line of input. Once terminated, further input is ignored.
    pub async fn handle(&mut self, input: &str) -> TurnOutcome {
        if self.state == SessionState::Terminated {
            return TurnOutcome::Idle;
        }

        let input = input.trim();
        if input.is_empty() {
            return TurnOutcome::Idle;
        }

        let outcome = match Command::parse(input) {
            Some(command) => self.run_command(command),
            None => {
                let rec = self.advisor.recommend(&self.catalog, input).await;
                TurnOutcome::Render(render::recommendation(&rec))
            }
        };

        if matches!(outcome, TurnOutcome::Terminate(_)) {
            tracing::info!("Session ended by user");
            self.state = SessionState::Terminated;
        }
        outcome
    }

    fn run_command(&self, command: Command) -> TurnOutcome {
        tracing::debug!(?command, "Running command");
        match command {
            Command::Exit => TurnOutcome::Terminate(render::farewell().to_string()),
            Command::Packages => TurnOutcome::Render(render::packages(&self.catalog.packages)),
            Command::Summary => TurnOutcome::Render(render::summary(&self.catalog.packages)),
            Command::Services => render::other_services(&self.catalog)
                .map(TurnOutcome::Render)
                .unwrap_or(TurnOutcome::Idle),
            Command::Unavailable => render::unavailable_services(&self.catalog)
                .map(TurnOutcome::Render)
                .unwrap_or(TurnOutcome::Idle),
            Command::Help => TurnOutcome::Render(render::help()),
        }
    }

    /// Console loop. Runs until `exit`, end of input, or `interrupt` resolves;
    /// an interrupt also cancels a turn that is still waiting on the model.
    pub async fn run<R, W, F>(&mut self, mut reader: R, writer: &mut W, interrupt: F) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        F: Future<Output = ()>,
    {
        tokio::pin!(interrupt);

        let intro = format!("{}{}", render::welcome(&self.catalog), render::help());
        writer.write_all(intro.as_bytes()).await?;

        while self.state == SessionState::AwaitingInput {
            writer.write_all(render::prompt_line().as_bytes()).await?;
            writer.flush().await?;

            let turn = tokio::select! {
                biased;
                _ = &mut interrupt => None,
                outcome = self.next_turn(&mut reader) => Some(outcome),
            };

            let outcome = match turn {
                Some(outcome) => outcome,
                None => {
                    tracing::info!("Session interrupted");
                    self.state = SessionState::Terminated;
                    TurnOutcome::Terminate(render::interrupted().to_string())
                }
            };

            if let Some(text) = outcome.text() {
                writer.write_all(text.as_bytes()).await?;
            }
        }

        writer.flush().await?;
        Ok(())
    }

    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so any
    /// line the user types is still a turn.
    async fn next_turn<R>(&mut self, reader: &mut R) -> TurnOutcome
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buf = Vec::new();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                tracing::info!("Input closed");
                self.state = SessionState::Terminated;
                TurnOutcome::Terminate(render::farewell().to_string())
            }
            Ok(_) => {
                self.read_failures = 0;
                let line = String::from_utf8_lossy(&buf);
                self.handle(&line).await
            }
            Err(e) => {
                self.read_failures += 1;
                tracing::warn!("Failed to read input: {}", e);
                if self.read_failures >= MAX_READ_FAILURES {
                    self.state = SessionState::Terminated;
                    return TurnOutcome::Terminate(render::turn_failure(&e.to_string()));
                }
                TurnOutcome::Notice(render::turn_failure(&e.to_string()))
            }
        }
    }
}
