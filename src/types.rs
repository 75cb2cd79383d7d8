//! Core types for forca

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One concrete combination of wordlist values, in wordlist order.
///
/// Created by the task generator, consumed exactly once by exactly one
/// worker, never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    values: Vec<String>,
}

impl Task {
    /// Create a task from an ordered value tuple
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// The values, positionally matched to wordlist order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Consume the task, yielding its values
    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    /// The values joined for human-readable display
    pub fn display(&self) -> String {
        self.values.join("   ")
    }
}

/// Outcome of executing one task's command.
///
/// The exit status of the process is intentionally absent: classification
/// relies purely on output content, and a non-zero exit is ordinary data.
/// Only a failure to start the process at all populates `error`.
#[derive(Debug)]
pub struct TaskResult {
    /// Combined stdout+stderr, interleaved as the child produced it
    pub output: String,
    /// The originating task's value tuple
    pub values: Vec<String>,
    /// Set only when the process could not be spawned or its output
    /// could not be captured
    pub error: Option<Error>,
}

impl TaskResult {
    /// The values joined for human-readable display
    pub fn display_values(&self) -> String {
        self.values.join("   ")
    }
}

/// Counters accumulated over one pipeline run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Number of combinations executed
    pub attempted: u64,
    /// Number of combinations classified as successful
    pub matched: u64,
}
