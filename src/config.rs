//! Configuration types for forca

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Shell invocation configuration (executable, base arguments, fuzz term)
///
/// Groups settings for how each generated command is wrapped into a process.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Shell executable used to run each command (default: `/bin/sh` on
    /// unix, `cmd` on windows)
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Base arguments passed before the rendered command string
    /// (default: `-c` on unix, `/C` on windows)
    #[serde(default = "default_shell_args")]
    pub shell_args: Vec<String>,

    /// Fuzz term whose `{}` span is rendered per wordlist position
    /// (default: `FUZ{}Z`, rendered as `FUZZ`, `FUZ2Z`, `FUZ3Z`, ...)
    #[serde(default = "default_fuzz_term")]
    pub fuzz_term: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            shell_args: default_shell_args(),
            fuzz_term: default_fuzz_term(),
        }
    }
}

/// Output classification configuration
///
/// Substrings searched for in each command's combined output. Failure
/// substrings always take precedence over success substrings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Substrings whose presence indicates success
    #[serde(default)]
    pub success: Vec<String>,

    /// Substrings whose presence indicates failure; these override success
    #[serde(default)]
    pub failure: Vec<String>,

    /// Treat the absence of any failure substring as a success
    #[serde(default)]
    pub positive: bool,
}

/// Console output behavior
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the raw captured output of every command
    #[serde(default)]
    pub verbose: bool,

    /// Print every attempted combination
    #[serde(default)]
    pub tries: bool,

    /// Render a live single-line progress indicator; silently disables
    /// `tries`
    #[serde(default)]
    pub progress: bool,
}

/// Top-level configuration for a pipeline run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Shell invocation settings
    #[serde(default)]
    pub shell: ShellConfig,

    /// Success/failure classification settings
    #[serde(default)]
    pub matching: MatchConfig,

    /// Console output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Number of concurrent workers (default: 10)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Wordlist files, one per fuzz position, in fuzz-term order
    pub wordlists: Vec<PathBuf>,

    /// Command string containing zero or more fuzz terms
    pub command: String,
}

impl Config {
    /// Create a configuration with defaults for everything except the
    /// required wordlists and command
    pub fn new(wordlists: Vec<PathBuf>, command: impl Into<String>) -> Self {
        Self {
            shell: ShellConfig::default(),
            matching: MatchConfig::default(),
            output: OutputConfig::default(),
            workers: default_workers(),
            wordlists,
            command: command.into(),
        }
    }

    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.wordlists.is_empty() {
            return Err(Error::config(
                "at least one wordlist is required",
                "wordlists",
            ));
        }
        if self.command.trim().is_empty() {
            return Err(Error::config("command must not be empty", "command"));
        }
        if self.workers == 0 {
            return Err(Error::config("workers must be at least 1", "workers"));
        }
        if self.shell.shell.is_empty() {
            return Err(Error::config("shell must not be empty", "shell.shell"));
        }
        if self.shell.fuzz_term.is_empty() {
            return Err(Error::config(
                "fuzz term must not be empty",
                "shell.fuzz_term",
            ));
        }
        Ok(())
    }

    /// Whether neither success nor failure substrings are configured.
    ///
    /// In that case raw output is printed for every command, mirroring a
    /// verbose run.
    pub fn unfiltered(&self) -> bool {
        self.matching.success.is_empty() && self.matching.failure.is_empty()
    }
}

#[cfg(unix)]
fn default_shell() -> String {
    "/bin/sh".to_string()
}

#[cfg(not(unix))]
fn default_shell() -> String {
    "cmd".to_string()
}

#[cfg(unix)]
fn default_shell_args() -> Vec<String> {
    vec!["-c".to_string()]
}

#[cfg(not(unix))]
fn default_shell_args() -> Vec<String> {
    vec!["/C".to_string()]
}

fn default_fuzz_term() -> String {
    "FUZ{}Z".to_string()
}

fn default_workers() -> usize {
    10
}
