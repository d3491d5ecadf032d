// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (own their buffers)
//!     each line --> trace log / line sink / kept string
//!   select: wait | timeout | cancel
//!     wait    --> join readers --> ProcessOutput
//!     timeout --> kill, abort readers --> ProcessError::Timeout
//!     cancel  --> kill, abort readers --> ProcessError::Interrupted
//! ```

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::builder::{OutputLine, ProcessBuilder, ProcessOutput, StreamFlags, StreamKind};
use crate::error::ProcessError;

/// How the wait on a child ended.
enum Exit {
    Finished(std::process::ExitStatus),
    TimedOut(Duration),
    Cancelled,
}

/// Spawns a reader task for one pipe if its flags ask for the output.
fn spawn_reader<R>(
    reader: Option<R>,
    kind: StreamKind,
    flags: StreamFlags,
    process_name: &str,
    sink: Option<flume::Sender<OutputLine>>,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    reader.map(|reader| {
        let name = process_name.to_string();
        tokio::spawn(async move { read_stream(reader, kind, flags, &name, sink).await })
    })
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

fn abort_reader(handle: Option<&JoinHandle<String>>) {
    if let Some(handle) = handle {
        handle.abort();
    }
}

impl ProcessBuilder {
    /// Runs the child process, handling I/O streaming and waiting for completion.
    pub(super) async fn run_child(
        &self,
        name: &str,
        cmd_line: &str,
        child: &mut Child,
        token: Option<CancellationToken>,
    ) -> Result<ProcessOutput, ProcessError> {
        let stdout_handle = spawn_reader(
            child.stdout.take(),
            StreamKind::Stdout,
            self.stdout_config(),
            name,
            self.sink().cloned(),
        );
        let stderr_handle = spawn_reader(
            child.stderr.take(),
            StreamKind::Stderr,
            self.stderr_config(),
            name,
            self.sink().cloned(),
        );

        let timeout = self.timeout_duration();
        let deadline = async {
            match timeout {
                Some(duration) => tokio::time::sleep(duration).await,
                None => std::future::pending::<()>().await,
            }
        };
        let cancelled = async {
            match &token {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };

        let exit = tokio::select! {
            status = child.wait() => Exit::Finished(status.map_err(|e| ProcessError::OutputError {
                command: cmd_line.to_string(),
                message: e.to_string(),
            })?),
            () = deadline => Exit::TimedOut(timeout.unwrap_or_default()),
            () = cancelled => Exit::Cancelled,
        };

        match exit {
            Exit::Finished(status) => {
                let stdout = join_reader(stdout_handle).await;
                let stderr = join_reader(stderr_handle).await;
                Ok(ProcessOutput::new(exit_code(status), stdout, stderr))
            }
            Exit::TimedOut(duration) => {
                warn!(process = %name, timeout = ?duration, "process timed out");
                terminate_process(child).await;
                abort_reader(stdout_handle.as_ref());
                abort_reader(stderr_handle.as_ref());
                Err(ProcessError::Timeout {
                    command: cmd_line.to_string(),
                    timeout_secs: duration.as_secs(),
                })
            }
            Exit::Cancelled => {
                warn!(process = %name, "cancellation requested, terminating process");
                terminate_process(child).await;
                abort_reader(stdout_handle.as_ref());
                abort_reader(stderr_handle.as_ref());
                Err(ProcessError::Interrupted {
                    command: cmd_line.to_string(),
                })
            }
        }
    }
}

/// Maps an exit status to a shell-style code: a signal N becomes 128 + N.
fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

async fn terminate_process(child: &mut Child) {
    if let Err(e) = child.kill().await {
        warn!(error = %e, "failed to kill process");
    }
}

/// Reads a pipe line by line until EOF.
///
/// Bytes are decoded lossily so a stray non-UTF-8 path never truncates
/// the output. Kept text is exactly what the process wrote; the log and the
/// line sink see each line without its terminator.
async fn read_stream<R>(
    reader: R,
    kind: StreamKind,
    flags: StreamFlags,
    process_name: &str,
    sink: Option<flume::Sender<OutputLine>>,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut kept = String::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let decoded = String::from_utf8_lossy(&buf);
                let line = decoded.trim_end_matches(['\n', '\r']);
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    trace!(process = %process_name, stream = kind.as_str(), line = %line, "output");
                }
                if let Some(sink) = &sink {
                    let _ = sink.send(OutputLine {
                        stream: kind,
                        text: line.to_string(),
                    });
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    kept.push_str(&decoded);
                }
            }
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = kind.as_str(),
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }

    kept
}
