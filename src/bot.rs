use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::practicum::response::validate;
use crate::practicum::status::parse_status;
use crate::practicum::StatusSource;
use crate::telegram::Notifier;

/// Cross-cycle state of the poll loop. Memory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopState {
    /// Last status message sent; empty until the first one.
    pub last_message: String,
    /// Last error text sent; empty until the first one.
    pub last_error: String,
    /// Lower bound (`from_date`) for the next fetch.
    pub cursor: i64,
}

/// What a single poll cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API returned no homework records.
    NoRecords,
    /// A new status message was sent.
    Notified(String),
    /// The status message matched the last one sent.
    Unchanged,
    /// A new error was sent to the chat.
    ErrorReported(String),
    /// The error matched the last one reported.
    ErrorSuppressed(String),
}

/// Poll loop: fetches statuses, reports changes and errors to the chat.
pub struct HomeworkBot<S> {
    source: S,
    notifier: Notifier,
    interval: Duration,
    state: LoopState,
}

impl<S: StatusSource> HomeworkBot<S> {
    pub fn new(source: S, notifier: Notifier, interval: Duration, start_cursor: i64) -> Self {
        Self {
            source,
            notifier,
            interval,
            state: LoopState {
                cursor: start_cursor,
                ..LoopState::default()
            },
        }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Run cycles until `shutdown` resolves.
    ///
    /// Shutdown is only observed while sleeping, so a started cycle always
    /// finishes provided the signal handlers behind `shutdown` were installed
    /// before the call (see [`listen_for_shutdown`](crate::shutdown::listen_for_shutdown)).
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            cursor = self.state.cursor,
            "Homework bot started"
        );

        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!(outcome = ?outcome, cursor = self.state.cursor, "Cycle finished");

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = &mut shutdown => {
                    tracing::info!("Homework bot stopped");
                    return;
                }
            }
        }
    }

    /// Run one fetch/report cycle without sleeping.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(outcome) => outcome,
            Err(e) => self.report_error(e).await,
        }
    }

    async fn poll(&mut self) -> Result<CycleOutcome> {
        let response = self.source.fetch(self.state.cursor).await?;
        let records = validate(&response.payload)?;

        let outcome = match records.first() {
            None => {
                tracing::debug!("No new homework records");
                CycleOutcome::NoRecords
            }
            Some(record) => {
                let message = parse_status(record)?;
                if message == self.state.last_message {
                    tracing::debug!("Homework status unchanged");
                    CycleOutcome::Unchanged
                } else {
                    self.notifier.notify(&message).await;
                    self.state.last_message = message.clone();
                    CycleOutcome::Notified(message)
                }
            }
        };

        match response.current_date {
            Some(next) => self.state.cursor = next,
            None => tracing::warn!(
                cursor = self.state.cursor,
                "API response has no current_date, keeping cursor"
            ),
        }

        Ok(outcome)
    }

    async fn report_error(&mut self, error: AppError) -> CycleOutcome {
        let text = error.to_string();
        tracing::error!(error = %text, "Poll cycle failed");

        if text == self.state.last_error {
            return CycleOutcome::ErrorSuppressed(text);
        }

        self.notifier.notify(&text).await;
        self.state.last_error = text.clone();
        CycleOutcome::ErrorReported(text)
    }
}
