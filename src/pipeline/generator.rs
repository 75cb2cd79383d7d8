//! Recursive cartesian-product task generation over wordlist files
//!
//! Wordlists are streamed line by line, depth-first: for each line of the
//! current wordlist, recursion continues into the remaining wordlists with
//! that line appended to the prefix. Each leaf of the walk is one task.
//! Generation is cooperative: every channel send races the cancellation
//! token, and an unreadable wordlist aborts the whole walk.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::types::Task;

/// Write-once slot holding the first generation error; later errors are
/// dropped.
pub(crate) type ErrorSlot = Arc<OnceLock<Error>>;

/// Enumerate the full cartesian product of `wordlists` into the task
/// channel, then close it by dropping the sender.
pub(crate) async fn generate_tasks(
    wordlists: Vec<PathBuf>,
    tasks: mpsc::Sender<Task>,
    cancel: CancellationToken,
    errors: ErrorSlot,
) {
    match walk(Vec::new(), &wordlists, &tasks, &cancel).await {
        Ok(()) => tracing::debug!("task generation complete"),
        Err(error) => {
            tracing::debug!(%error, "task generation aborted");
            errors.set(error).ok();
        }
    }
    // `tasks` is dropped here, closing the channel exactly once and
    // unblocking all workers waiting to receive.
}

/// One level of the depth-first walk.
///
/// Base case: no wordlists remain and the accumulated prefix is a complete
/// task. Recursive async functions must box the recursion point, so this
/// returns the boxed future directly.
fn walk<'a>(
    prefix: Vec<String>,
    wordlists: &'a [PathBuf],
    tasks: &'a mpsc::Sender<Task>,
    cancel: &'a CancellationToken,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(async move {
        let Some((current, rest)) = wordlists.split_first() else {
            return send_task(prefix, tasks, cancel).await;
        };

        let file = tokio::fs::File::open(current)
            .await
            .map_err(|source| Error::Wordlist {
                path: current.clone(),
                source,
            })?;
        let mut lines = BufReader::new(file).lines();

        while let Some(line) = lines.next_line().await.map_err(|source| Error::Wordlist {
            path: current.clone(),
            source,
        })? {
            let mut values = prefix.clone();
            values.push(line);
            walk(values, rest, tasks, cancel).await?;
        }
        Ok(())
    })
}

/// Hand one complete task to the workers, unless cancellation fires first.
///
/// The channel has capacity one, so the send blocks while all workers are
/// busy; cancellation is checked before the blocking send can win.
async fn send_task(
    values: Vec<String>,
    tasks: &mpsc::Sender<Task>,
    cancel: &CancellationToken,
) -> Result<()> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        sent = tasks.send(Task::new(values)) => sent.map_err(|_| Error::Cancelled),
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_wordlist(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    async fn collect(wordlists: Vec<PathBuf>) -> (Vec<Task>, Option<Error>) {
        collect_with_token(wordlists, CancellationToken::new()).await
    }

    async fn collect_with_token(
        wordlists: Vec<PathBuf>,
        cancel: CancellationToken,
    ) -> (Vec<Task>, Option<Error>) {
        let (tx, mut rx) = mpsc::channel(1);
        let errors: ErrorSlot = Arc::new(OnceLock::new());
        let handle = tokio::spawn(generate_tasks(wordlists, tx, cancel, errors.clone()));
        let mut collected = Vec::new();
        while let Some(task) = rx.recv().await {
            collected.push(task);
        }
        handle.await.unwrap();
        let error = Arc::try_unwrap(errors).ok().and_then(OnceLock::into_inner);
        (collected, error)
    }

    #[tokio::test]
    async fn test_two_wordlists_yield_full_cartesian_product_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let users = write_wordlist(dir.path(), "users.txt", &["alice", "bob"]);
        let passwords = write_wordlist(dir.path(), "passwords.txt", &["pw1", "pw2"]);

        let (tasks, error) = collect(vec![users, passwords]).await;
        assert!(error.is_none(), "unexpected error: {:?}", error);
        let tuples: Vec<String> = tasks.iter().map(Task::display).collect();
        assert_eq!(
            tuples,
            [
                "alice   pw1",
                "alice   pw2",
                "bob   pw1",
                "bob   pw2",
            ]
        );
    }

    #[tokio::test]
    async fn test_three_wordlists_yield_product_of_sizes_without_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_wordlist(dir.path(), "a.txt", &["1", "2"]);
        let b = write_wordlist(dir.path(), "b.txt", &["x", "y", "z"]);
        let c = write_wordlist(dir.path(), "c.txt", &["p", "q"]);

        let (tasks, error) = collect(vec![a, b, c]).await;
        assert!(error.is_none());
        assert_eq!(tasks.len(), 2 * 3 * 2);
        let mut distinct: Vec<_> = tasks.iter().map(Task::display).collect();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), 12, "tuples must be distinct");
    }

    #[tokio::test]
    async fn test_empty_wordlist_short_circuits_whole_branch() {
        let dir = tempfile::tempdir().unwrap();
        let users = write_wordlist(dir.path(), "users.txt", &["alice", "bob"]);
        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, "").unwrap();

        let (tasks, error) = collect(vec![users, empty]).await;
        assert!(tasks.is_empty(), "empty wordlist must produce zero tasks");
        assert!(error.is_none(), "an empty wordlist is not an error");
    }

    #[tokio::test]
    async fn test_unopenable_first_wordlist_records_single_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let (tasks, error) = collect(vec![missing.clone()]).await;
        assert!(tasks.is_empty());
        match error {
            Some(Error::Wordlist { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Wordlist error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unopenable_inner_wordlist_aborts_before_any_task() {
        let dir = tempfile::tempdir().unwrap();
        let users = write_wordlist(dir.path(), "users.txt", &["alice", "bob"]);
        let missing = dir.path().join("missing.txt");

        let (tasks, error) = collect(vec![users, missing]).await;
        assert!(
            tasks.is_empty(),
            "no complete tuple exists when the inner wordlist cannot be read"
        );
        assert!(matches!(error, Some(Error::Wordlist { .. })));
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_generation_with_cancelled_error() {
        let dir = tempfile::tempdir().unwrap();
        let users = write_wordlist(dir.path(), "users.txt", &["alice", "bob"]);

        let cancel = CancellationToken::new();
        cancel.cancel();
        let (tasks, error) = collect_with_token(vec![users], cancel).await;
        assert!(tasks.is_empty(), "no task may be emitted after cancellation");
        assert!(matches!(error, Some(Error::Cancelled)));
    }
}
