//! Worker loop and subprocess execution
//!
//! Workers pull tasks from the shared channel until it closes, run the
//! rendered command as a shell subprocess, and hand the captured output to
//! the aggregator. Workers share nothing mutable beyond the channels; the
//! template is read-only.

use std::process::Stdio;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::template::CommandTemplate;
use crate::types::{Task, TaskResult};

/// Task receiver shared across the worker pool
pub(crate) type SharedTasks = Arc<Mutex<mpsc::Receiver<Task>>>;

/// One worker: receive, execute, report, until the task channel closes or
/// cancellation fires.
pub(crate) async fn run_worker(
    template: Arc<CommandTemplate>,
    tasks: SharedTasks,
    results: mpsc::Sender<TaskResult>,
    cancel: CancellationToken,
) {
    loop {
        let task = {
            let mut receiver = tasks.lock().await;
            tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                task = receiver.recv() => task,
            }
        };
        let Some(task) = task else { break };

        let result = execute(&template, task).await;

        // A send that loses the race against cancellation drops the result
        // rather than retrying.
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            sent = results.send(result) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }
    tracing::trace!("worker exiting");
}

/// Execute one task's command, capturing combined output.
///
/// A non-zero exit status is ordinary output data; only a failure to start
/// the process or capture its output populates the result's error field.
pub(crate) async fn execute(template: &CommandTemplate, task: Task) -> TaskResult {
    let values = task.into_values();
    match run_command(template, &values).await {
        Ok(output) => TaskResult {
            output,
            values,
            error: None,
        },
        Err(error) => TaskResult {
            output: String::new(),
            values,
            error: Some(error),
        },
    }
}

async fn run_command(template: &CommandTemplate, values: &[String]) -> Result<String> {
    let mut command = template.command(values);

    // stdout and stderr share one pipe write end so the capture interleaves
    // exactly as the child wrote it.
    let (reader, writer) = std::io::pipe()?;
    let writer_for_stderr = writer.try_clone()?;
    command
        .stdout(writer)
        .stderr(writer_for_stderr)
        .stdin(Stdio::null());

    let mut child = command.spawn().map_err(|source| Error::Spawn {
        command: template.render(values),
        source,
    })?;
    // The command still owns the parent's copies of the write end; they must
    // close or the capture below never sees EOF.
    drop(command);

    let capture = tokio::task::spawn_blocking(move || {
        use std::io::Read;
        let mut reader = reader;
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).map(|_| buffer)
    });

    // Exit status is left to output classification; it is not an error here.
    let _status = child.wait().await?;
    let buffer = capture
        .await
        .map_err(|join_error| Error::Join(join_error.to_string()))??;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
