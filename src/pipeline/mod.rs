//! The concurrent execution pipeline
//!
//! One generation task enumerates the cartesian product of the wordlists
//! into a capacity-one task channel; a fixed pool of workers executes the
//! rendered commands and fans results into a capacity-one result channel;
//! the single aggregation loop classifies and reports each result in
//! arrival order. A shared [`CancellationToken`] is the only coordination
//! primitive beyond the two channels, and it trips automatically when the
//! run's scope exits.
//!
//! Submodules:
//! - [`generator`] - recursive cartesian task generation
//! - [`worker`] - worker loop and subprocess execution

mod generator;
mod worker;


use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::matcher::{Outcome, OutcomeMatcher};
use crate::report::Reporter;
use crate::template::CommandTemplate;
use crate::types::{RunStats, Task, TaskResult};

use generator::ErrorSlot;
use worker::SharedTasks;

/// A configured bruteforce run: wordlists, command template, matcher and
/// worker count, plus the run's cancellation token.
pub struct Pipeline {
    template: Arc<CommandTemplate>,
    matcher: OutcomeMatcher,
    wordlists: Vec<PathBuf>,
    workers: usize,
    cancel: CancellationToken,
}

impl Pipeline {
    /// Build a pipeline from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration is invalid (no
    /// wordlists, empty command, zero workers, empty fuzz term).
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            template: Arc::new(CommandTemplate::new(&config.shell, config.command.as_str())),
            matcher: OutcomeMatcher::new(&config.matching),
            wordlists: config.wordlists.clone(),
            workers: config.workers,
            cancel: CancellationToken::new(),
        })
    }

    /// The run's cancellation token.
    ///
    /// Cancelling it stops task generation and worker consumption
    /// cooperatively; it is one-shot and never re-armed. The token also
    /// trips automatically when [`run`](Self::run) returns.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The command template for this run
    pub fn template(&self) -> &CommandTemplate {
        &self.template
    }

    /// Execute the full pipeline, reporting every result through `reporter`.
    ///
    /// Drains the result stream to completion, then surfaces the first
    /// recorded generation error (unreadable wordlist, cancellation) as the
    /// terminal error. Per-task spawn failures are logged and excluded from
    /// classification; they never abort the run.
    pub async fn run<W: std::io::Write>(&self, reporter: &mut Reporter<W>) -> Result<RunStats> {
        // Trips the token when this invocation's scope exits, normal or
        // error, so neither the generator nor any worker can block forever
        // once the aggregator stops reading.
        let _cancel_guard = self.cancel.clone().drop_guard();

        let (task_tx, task_rx) = mpsc::channel::<Task>(1);
        let (result_tx, mut result_rx) = mpsc::channel::<TaskResult>(1);
        let errors: ErrorSlot = Arc::new(OnceLock::new());

        let generation = tokio::spawn(generator::generate_tasks(
            self.wordlists.clone(),
            task_tx,
            self.cancel.clone(),
            errors.clone(),
        ));

        let shared_tasks: SharedTasks = Arc::new(Mutex::new(task_rx));
        let mut workers = Vec::with_capacity(self.workers);
        for _ in 0..self.workers {
            workers.push(tokio::spawn(worker::run_worker(
                Arc::clone(&self.template),
                Arc::clone(&shared_tasks),
                result_tx.clone(),
                self.cancel.clone(),
            )));
        }
        // The workers now hold the only result senders; the channel closes
        // when the last worker exits.
        drop(result_tx);

        while let Some(result) = result_rx.recv().await {
            // A command that never ran has no output to classify; positive
            // mode must not mistake its empty output for an absent failure.
            let outcome = match &result.error {
                Some(error) => {
                    tracing::warn!(
                        values = %result.display_values(),
                        %error,
                        "command could not be executed"
                    );
                    Outcome::Neutral
                }
                None => self.matcher.classify(&result.output),
            };
            reporter.record(&result, outcome)?;
        }
        let stats = reporter.finish()?;

        for joined in futures::future::join_all(workers).await {
            joined.map_err(|join_error| Error::Join(join_error.to_string()))?;
        }
        generation
            .await
            .map_err(|join_error| Error::Join(join_error.to_string()))?;

        // Non-blocking check of the single-slot generation error; the
        // generator has finished, so its Arc clone is gone.
        match Arc::try_unwrap(errors).ok().and_then(OnceLock::into_inner) {
            Some(error) => Err(error),
            None => Ok(stats),
        }
    }
}
