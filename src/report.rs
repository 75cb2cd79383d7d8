//! Console reporting for pipeline results
//!
//! The reporter is the presentation layer on top of the result stream: the
//! startup banner, the optional per-attempt trace or live progress line,
//! per-success announcements, and conditional raw output. It is generic
//! over the output sink so the printing policy is testable.

use std::io::Write;

use crate::config::Config;
use crate::matcher::Outcome;
use crate::template::CommandTemplate;
use crate::types::{RunStats, TaskResult};

/// Streams human-readable run output to a writer.
///
/// Progress mode and the per-attempt trace are mutually exclusive; progress
/// silently wins.
pub struct Reporter<W: Write> {
    writer: W,
    verbose: bool,
    tries: bool,
    progress: bool,
    /// Print raw output for every result (no substrings configured)
    unfiltered: bool,
    progress_line: String,
    stats: RunStats,
}

impl Reporter<std::io::Stdout> {
    /// A reporter writing to standard output
    pub fn stdout(config: &Config) -> Self {
        Reporter::new(config, std::io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    /// Create a reporter for the given configuration and sink
    pub fn new(config: &Config, writer: W) -> Self {
        Self {
            writer,
            verbose: config.output.verbose,
            tries: config.output.tries && !config.output.progress,
            progress: config.output.progress,
            unfiltered: config.unfiltered(),
            progress_line: String::new(),
            stats: RunStats::default(),
        }
    }

    /// Print the configuration summary shown before the run starts
    pub fn banner(&mut self, config: &Config, template: &CommandTemplate) -> std::io::Result<()> {
        let rule = "=".repeat(63);
        writeln!(self.writer, "{}\nforca\n{}", rule, rule)?;
        writeln!(
            self.writer,
            "[+] Command:        {} {} {}",
            template.shell(),
            template.shell_args().join(" "),
            template.command_string()
        )?;
        if self.verbose {
            writeln!(self.writer, "[+] Verbose:        true")?;
        }
        if self.tries {
            writeln!(self.writer, "[+] Print tried combinations:    true")?;
        }
        writeln!(self.writer, "[+] Threads:        {}", config.workers)?;
        writeln!(self.writer, "[+] Wordlists:")?;
        for (index, path) in config.wordlists.iter().enumerate() {
            // The first term is one character shorter; pad to keep paths aligned
            let pad = if index == 0 { " " } else { "" };
            writeln!(
                self.writer,
                "                    {}: {}{}",
                template.term(index),
                pad,
                path.display()
            )?;
        }
        if !config.matching.success.is_empty() {
            writeln!(
                self.writer,
                "[+] Success:        {}",
                config.matching.success.join(" ")
            )?;
        }
        if !config.matching.failure.is_empty() {
            writeln!(
                self.writer,
                "[+] Failure:        {}",
                config.matching.failure.join(" ")
            )?;
        }
        writeln!(self.writer, "{}\nStarting forca\n{}", rule, rule)?;
        self.writer.flush()
    }

    /// Report one result with its classification
    pub fn record(&mut self, result: &TaskResult, outcome: Outcome) -> std::io::Result<()> {
        self.stats.attempted += 1;
        let values = result.display_values();

        if self.progress {
            // Erase the previous progress line before rewriting it
            let blank = " ".repeat(self.progress_line.chars().count());
            write!(self.writer, "\r{}\r", blank)?;
            self.progress_line = format!("[?] Trying: {}", values);
            write!(self.writer, "{}", self.progress_line)?;
        } else if self.tries {
            writeln!(self.writer, "[?] Trying: {}", values)?;
        }

        if outcome.is_success() {
            self.stats.matched += 1;
            if self.progress {
                writeln!(self.writer)?;
            }
            writeln!(self.writer, "[+] Success: {}", values)?;
        }

        if self.unfiltered || self.verbose {
            if self.progress {
                writeln!(self.writer)?;
            }
            write!(self.writer, "{}", result.output)?;
        }

        self.writer.flush()
    }

    /// Close out the run, returning the accumulated counters
    pub fn finish(&mut self) -> std::io::Result<RunStats> {
        if self.progress {
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        tracing::debug!(
            attempted = self.stats.attempted,
            matched = self.stats.matched,
            "reporting complete"
        );
        Ok(self.stats)
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Consume the reporter, yielding its sink
    pub fn into_writer(self) -> W {
        self.writer
    }
}
