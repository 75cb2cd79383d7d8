//! forca binary entrypoint.
//!
//! Parses CLI arguments into a [`Config`], prints the configuration
//! banner, and hands off to the library pipeline with signal-driven
//! cancellation. The binary is intentionally a thin wrapper: all execution
//! semantics live in the `forca` crate.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use forca::{Config, Pipeline, Reporter, run_with_shutdown};

const EXAMPLES: &str = "\
Examples:
  SMB   user/pass bruteforce:  forca -f users.txt -f passwords.txt --success IP smbmap -u FUZZ -p FUZ2Z -H 10.10.10.179
  MySQL user/pass bruteforce:  forca -f users.txt -f passwords.txt --failure 'Access denied' mysql -u'FUZZ' -p'FUZ2Z' --host=127.0.0.1
  SSH   user/pass bruteforce:  forca -f users.txt -f passwords.txt --success Success ssh-probe 10.10.10.179 22 FUZZ 'FUZ2Z'";

/// Bruteforce a templated shell command over the cartesian product of
/// wordlists.
#[derive(Debug, Parser)]
#[command(name = "forca", version, about, after_help = EXAMPLES)]
struct Cli {
    /// Wordlist file; repeat once per fuzz position
    #[arg(short = 'f', long = "file", required = true)]
    file: Vec<PathBuf>,

    /// Execution shell (default: /bin/sh on unix, cmd on windows)
    #[arg(long)]
    shell: Option<String>,

    /// Execution shell argument; repeatable (default: -c on unix, /C on windows)
    #[arg(long = "shellarg")]
    shellarg: Vec<String>,

    /// Substring that indicates success; repeatable
    #[arg(long)]
    success: Vec<String>,

    /// Substring that indicates failure; repeatable. Failure takes
    /// precedence over success
    #[arg(long)]
    failure: Vec<String>,

    /// The identifier replaced by wordlist values. The curly braces are
    /// rendered as '', '2', '3', ... per wordlist position
    #[arg(long, default_value = "FUZ{}Z")]
    fuzz: String,

    /// Number of concurrent workers
    #[arg(short = 't', long, default_value_t = 10)]
    threads: usize,

    /// Print the tried combinations
    #[arg(long)]
    tries: bool,

    /// Treat an absence of failure as a success
    #[arg(long)]
    positive: bool,

    /// Print a live single-line progress indicator (disables --tries)
    #[arg(long)]
    progress: bool,

    /// Print the raw output of every command
    #[arg(short, long)]
    verbose: bool,

    /// The command to execute, with fuzz terms where wordlist values go
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new(self.file, self.command.join(" "));
        if let Some(shell) = self.shell {
            config.shell.shell = shell;
        }
        if !self.shellarg.is_empty() {
            config.shell.shell_args = self.shellarg;
        }
        config.shell.fuzz_term = self.fuzz;
        config.workers = self.threads;
        config.matching.success = self.success;
        config.matching.failure = self.failure;
        config.matching.positive = self.positive;
        config.output.verbose = self.verbose;
        config.output.tries = self.tries;
        config.output.progress = self.progress;
        config
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so they never mix with result lines
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("forca=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.into_config();
    let pipeline = match Pipeline::new(&config) {
        Ok(pipeline) => pipeline,
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    };

    let mut reporter = Reporter::stdout(&config);
    if let Err(error) = reporter.banner(&config, pipeline.template()) {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }

    if let Err(error) = run_with_shutdown(pipeline, &mut reporter).await {
        eprintln!("Error: {}", error);
    }
}
