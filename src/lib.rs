//! # forca
//!
//! Concurrent wordlist-driven command bruteforcer.
//!
//! forca enumerates the cartesian product of one or more wordlists,
//! substitutes each combination into a templated shell command, executes
//! the commands through a bounded worker pool, and classifies each
//! execution's combined output by substring matching. Any CLI tool that
//! takes credential-like parameters (SSH, SMB, database clients, ...) can
//! be driven this way.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - the pipeline is an embeddable crate; the bundled
//!   binary is a thin clap wrapper
//! - **Cooperative cancellation** - one broadcast token, checked at every
//!   blocking channel operation, tripped automatically at scope exit
//! - **Backpressure by hand-off** - capacity-one channels keep generation
//!   from racing ahead of execution
//!
//! ## Quick Start
//!
//! ```no_run
//! use forca::{Config, Pipeline, Reporter};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::new(
//!         vec![PathBuf::from("users.txt"), PathBuf::from("passwords.txt")],
//!         "login -u FUZZ -p FUZ2Z",
//!     );
//!     config.matching.failure.push("Access denied".to_string());
//!     config.matching.positive = true;
//!
//!     let pipeline = Pipeline::new(&config)?;
//!     let mut reporter = Reporter::stdout(&config);
//!     let stats = pipeline.run(&mut reporter).await?;
//!     println!("{} of {} combinations matched", stats.matched, stats.attempted);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Output classification by substring matching
pub mod matcher;
/// The concurrent generation/execution/aggregation pipeline
pub mod pipeline;
/// Console reporting
pub mod report;
/// Command template rendering
pub mod template;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::{Config, MatchConfig, OutputConfig, ShellConfig};
pub use error::{Error, Result};
pub use matcher::{Outcome, OutcomeMatcher};
pub use pipeline::Pipeline;
pub use report::Reporter;
pub use template::CommandTemplate;
pub use types::{RunStats, Task, TaskResult};

/// Run the pipeline with graceful signal handling.
///
/// A termination signal trips the pipeline's cancellation token, stopping
/// task generation and worker consumption cooperatively; the run then ends
/// with its recorded cancellation error.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with a `ctrl_c` fallback if
///   signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
pub async fn run_with_shutdown<W: std::io::Write>(
    pipeline: Pipeline,
    reporter: &mut Reporter<W>,
) -> Result<RunStats> {
    let cancel = pipeline.cancellation_token();
    let signal_task = tokio::spawn(async move {
        wait_for_signal().await;
        cancel.cancel();
    });
    let outcome = pipeline.run(reporter).await;
    signal_task.abort();
    outcome
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers, tests)
    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        _ => {
            tracing::warn!("Could not register unix signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
