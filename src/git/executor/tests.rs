// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{CommandExecutor, CommandRequest, CommandSlot, Completion, PendingCommand};
use crate::git::runner::GitRunner;

fn git_request(dir: &Path, args: &[&str]) -> CommandRequest {
    CommandRequest::new(dir, args.iter().copied())
}

async fn poll_until_done(pending: &mut PendingCommand) -> Completion {
    for _ in 0..1000 {
        if let Some(completion) = pending.try_take() {
            return completion;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("command #{} never completed", pending.id());
}

#[test]
fn test_command_line_quotes_spaced_and_empty_args() {
    let request = CommandRequest::new(".", ["commit", "-m", "two words", ""]);
    insta::assert_snapshot!(request.command_line(), @r#"git commit -m "two words" """#);
}

#[test]
fn test_current_outside_runtime_fails() {
    let err = CommandExecutor::current(GitRunner::default()).unwrap_err();
    assert!(err.to_string().contains("no async runtime"));
}

#[tokio::test]
async fn test_submit_delivers_completion() {
    let dir = tempfile::tempdir().unwrap();
    let executor = CommandExecutor::current(GitRunner::default()).unwrap();

    let pending = executor.submit(git_request(dir.path(), &["--version"]));
    let id = pending.id();
    let completion = pending.wait().await;

    assert_eq!(completion.id, id);
    assert_eq!(completion.command_line, "git --version");
    assert!(completion.result.success());
    assert!(completion.result.stdout().starts_with("git version"));
}

#[tokio::test]
async fn test_ids_are_unique_per_submission() {
    let dir = tempfile::tempdir().unwrap();
    let executor = CommandExecutor::current(GitRunner::default()).unwrap();

    let first = executor.submit(git_request(dir.path(), &["--version"]));
    let second = executor.submit(git_request(dir.path(), &["--version"]));
    assert_ne!(first.id(), second.id());

    let (a, b) = tokio::join!(first.wait(), second.wait());
    assert!(a.result.success() && b.result.success());
}

#[tokio::test]
async fn test_missing_binary_completes_with_launch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let executor =
        CommandExecutor::current(GitRunner::new("subhub-test-no-such-git-binary")).unwrap();

    let completion = executor
        .submit(git_request(dir.path(), &["status"]))
        .wait()
        .await;

    assert!(completion.result.is_launch_failure());
    assert_eq!(completion.result.stdout(), "");
    assert!(!completion.result.stderr().is_empty());
}

#[tokio::test]
async fn test_callback_runs_before_completion_is_delivered() {
    let dir = tempfile::tempdir().unwrap();
    let executor = CommandExecutor::current(GitRunner::default()).unwrap();
    let called = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&called);
    let pending = executor.submit_with(git_request(dir.path(), &["--version"]), move |c| {
        assert!(c.result.success());
        flag.store(true, Ordering::SeqCst);
    });
    let completion = pending.wait().await;

    assert!(completion.result.success());
    assert!(called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_try_take_yields_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let executor = CommandExecutor::current(GitRunner::default()).unwrap();

    let mut pending = executor.submit(git_request(dir.path(), &["--version"]));
    let completion = poll_until_done(&mut pending).await;

    assert!(completion.result.success());
    assert!(pending.try_take().is_none());
    assert!(pending.try_take().is_none());
}

#[test]
fn test_wait_blocking_from_plain_thread() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let executor = CommandExecutor::new(GitRunner::default(), runtime.handle().clone());

    let completion = executor
        .submit(git_request(dir.path(), &["--version"]))
        .wait_blocking();
    assert!(completion.result.success());
}

#[tokio::test]
async fn test_slot_runs_sequence_past_failures() {
    let dir = tempfile::tempdir().unwrap();
    let executor = CommandExecutor::current(GitRunner::default()).unwrap();
    let mut slot = CommandSlot::new(executor);

    let mut seen = Vec::new();
    let completions = slot
        .run_sequence_with(
            [
                git_request(dir.path(), &["--version"]),
                git_request(dir.path(), &["subhub-no-such-subcommand"]),
                git_request(dir.path(), &["--version"]),
            ],
            |c| seen.push(c.id),
        )
        .await
        .unwrap();

    let codes: Vec<_> = completions.iter().map(|c| c.result.success()).collect();
    assert_eq!(codes, [true, false, true]);
    assert!(!completions[1].result.is_launch_failure());
    assert_eq!(seen, completions.iter().map(|c| c.id).collect::<Vec<_>>());
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
    assert!(!slot.is_busy());
}

#[cfg(unix)]
mod unix {
    use super::*;

    fn sh(dir: &Path, script: &str) -> CommandRequest {
        CommandRequest::new(dir, ["-c", script])
    }

    fn sh_executor() -> CommandExecutor {
        CommandExecutor::current(GitRunner::new("sh")).unwrap()
    }

    #[tokio::test]
    async fn test_cancel_kills_subprocess() {
        let dir = tempfile::tempdir().unwrap();
        let executor = sh_executor();

        let pending = executor.submit(sh(dir.path(), "sleep 5"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        pending.cancel();
        assert!(pending.is_cancelled());

        let completion = tokio::time::timeout(Duration::from_secs(3), pending.wait())
            .await
            .unwrap();
        assert_eq!(completion.result.exit_code(), -1);
        assert!(completion.result.stderr().contains("cancelled"));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_and_later_commands() {
        let dir = tempfile::tempdir().unwrap();
        let executor = sh_executor();

        let running = executor.submit(sh(dir.path(), "sleep 5"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        executor.shutdown();
        assert!(executor.is_shut_down());

        let completion = tokio::time::timeout(Duration::from_secs(3), running.wait())
            .await
            .unwrap();
        assert!(completion.result.is_launch_failure());

        let later = executor.submit(sh(dir.path(), "echo never")).wait().await;
        assert!(later.result.is_launch_failure());
        assert_eq!(later.result.stdout(), "");
    }

    #[tokio::test]
    async fn test_streaming_forwards_lines() {
        let dir = tempfile::tempdir().unwrap();
        let executor = sh_executor();

        let (pending, lines) = executor.submit_streaming(sh(dir.path(), "echo a; echo b"));
        let completion = pending.wait().await;

        assert_eq!(completion.result.stdout(), "a\nb\n");
        let texts: Vec<_> = lines.drain().map(|line| line.text).collect();
        assert_eq!(texts, ["a", "b"]);
    }

    #[tokio::test]
    async fn test_slot_rejects_second_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = CommandSlot::new(sh_executor());

        let id = slot.dispatch(sh(dir.path(), "sleep 0.3")).unwrap();
        assert!(slot.is_busy());

        let err = slot.dispatch(sh(dir.path(), "echo second")).unwrap_err();
        assert_eq!(err.to_string(), format!("executor error: command #{id} is still running"));
        assert!(slot.run(sh(dir.path(), "echo third")).await.is_err());

        let mut completion = None;
        for _ in 0..1000 {
            completion = slot.poll();
            if completion.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let completion = completion.unwrap();
        assert_eq!(completion.id, id);
        assert!(completion.result.success());
        assert!(!slot.is_busy());

        let next = slot.run(sh(dir.path(), "echo next")).await.unwrap();
        assert_eq!(next.result.stdout(), "next\n");
    }
}
