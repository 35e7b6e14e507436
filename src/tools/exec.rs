use crate::error::{MnqnError, Result};
use crate::ui;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Deadline for image builds and release upgrades.
pub const LONG_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Deadline for version and status probes.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const DIAGNOSTIC_LINES: usize = 20;
const DIAGNOSTIC_BYTES: usize = 2000;

#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Trimmed tail of stderr, or of stdout when stderr is empty.
    pub fn diagnostics(&self) -> String {
        if self.stderr.trim().is_empty() {
            tail(&self.stdout)
        } else {
            tail(&self.stderr)
        }
    }
}

/// `program arg1 arg2`, for messages and debug lines.
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command to completion, capturing its output.
///
/// A spawn failure because the program does not exist is reported as
/// `DependencyUnavailable`. Exceeding `timeout` kills the child.
pub fn run(program: &str, args: &[String], cwd: Option<&Path>, timeout: Duration) -> Result<Captured> {
    execute(program, args, cwd, timeout, None)
}

/// Like [`run`], but stdout is copied to `out` as it arrives.
pub fn run_streaming(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    timeout: Duration,
    out: &mut dyn Write,
) -> Result<Captured> {
    execute(program, args, cwd, timeout, Some(out))
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Forward chunks from `reader` until EOF. The sender drops with the thread.
fn forward(reader: impl Read + Send + 'static, stream: Stream, tx: Sender<(Stream, Vec<u8>)>) {
    thread::spawn(move || {
        let mut reader = BufReader::new(reader);
        loop {
            let mut chunk = Vec::new();
            match reader.read_until(b'\n', &mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if tx.send((stream, chunk)).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

fn execute(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    timeout: Duration,
    mut sink: Option<&mut dyn Write>,
) -> Result<Captured> {
    let line = command_line(program, args);
    ui::debug(&format!("$ {}", line));

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MnqnError::DependencyUnavailable {
                tool: program.to_string(),
                reason: "executable not found".to_string(),
            }
        } else {
            MnqnError::Other(format!("couldn't start '{}': {}", line, e))
        }
    })?;

    let (tx, rx) = mpsc::channel();
    match (child.stdout.take(), child.stderr.take()) {
        (Some(stdout), Some(stderr)) => {
            forward(stdout, Stream::Stdout, tx.clone());
            forward(stderr, Stream::Stderr, tx);
        }
        _ => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(MnqnError::Other(format!(
                "couldn't capture output of '{}'",
                line
            )));
        }
    }

    let start = Instant::now();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut status = None;
    let mut streams_open = true;

    // Readers are never joined: a descendant holding the pipes must not
    // stretch the deadline.
    loop {
        if status.is_none() {
            match child.try_wait() {
                Ok(exited) => status = exited,
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(MnqnError::Other(format!("couldn't wait for '{}': {}", line, e)));
                }
            }
        }

        if status.is_some() && !streams_open {
            break;
        }

        if start.elapsed() > timeout {
            if status.is_some() {
                ui::debug(&format!("{} exited, output still open; not waiting", program));
                break;
            }
            let _ = child.kill();
            let _ = child.wait();
            return Err(MnqnError::TimedOut {
                command: line,
                timeout,
            });
        }

        if !streams_open {
            thread::sleep(POLL_INTERVAL);
            continue;
        }

        match rx.recv_timeout(POLL_INTERVAL) {
            Ok((Stream::Stdout, chunk)) => {
                if let Some(out) = sink.as_mut() {
                    if let Err(e) = out.write_all(&chunk).and_then(|_| out.flush()) {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(e.into());
                    }
                }
                stdout.extend_from_slice(&chunk);
            }
            Ok((Stream::Stderr, chunk)) => stderr.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => streams_open = false,
        }
    }

    let status = match status {
        Some(status) => status,
        None => child.wait()?,
    };
    ui::debug(&format!("{} finished in {:.1?}", program, start.elapsed()));

    Ok(Captured {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

/// Like [`run`], but a non-zero exit becomes `ExternalFailure`.
pub fn run_checked(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    timeout: Duration,
) -> Result<Captured> {
    let captured = run(program, args, cwd, timeout)?;
    ensure_success(program, args, captured)
}

/// Like [`run_streaming`], but a non-zero exit becomes `ExternalFailure`.
pub fn run_streaming_checked(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    timeout: Duration,
    out: &mut dyn Write,
) -> Result<Captured> {
    let captured = run_streaming(program, args, cwd, timeout, out)?;
    ensure_success(program, args, captured)
}

fn ensure_success(program: &str, args: &[String], captured: Captured) -> Result<Captured> {
    if !captured.success() {
        return Err(MnqnError::ExternalFailure {
            command: command_line(program, args),
            code: captured.status.code(),
            diagnostics: captured.diagnostics(),
        });
    }
    Ok(captured)
}

/// Last lines of `text`, capped in bytes at a char boundary.
pub fn tail(text: &str) -> String {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    let start = lines.len().saturating_sub(DIAGNOSTIC_LINES);
    let joined = lines[start..].join("\n");

    if joined.len() <= DIAGNOSTIC_BYTES {
        return joined;
    }

    let mut cut = joined.len() - DIAGNOSTIC_BYTES;
    while !joined.is_char_boundary(cut) {
        cut += 1;
    }
    joined[cut..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_last_lines() {
        let text = (1..=30).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let tailed = tail(&text);
        assert!(tailed.starts_with("line 11"));
        assert!(tailed.ends_with("line 30"));
        assert_eq!(tailed.lines().count(), DIAGNOSTIC_LINES);
    }

    #[test]
    fn tail_caps_bytes_on_char_boundary() {
        let text = "é".repeat(3000);
        let tailed = tail(&text);
        assert!(tailed.len() <= DIAGNOSTIC_BYTES);
        assert!(tailed.chars().all(|c| c == 'é'));
    }

    #[test]
    fn command_line_joins_arguments() {
        let args = vec!["build".to_string(), "-t".to_string(), "x:1".to_string()];
        assert_eq!(command_line("docker", &args), "docker build -t x:1");
    }

    #[test]
    fn missing_program_is_unavailable() {
        let err = run("mnqn-no-such-binary", &[], None, PROBE_TIMEOUT).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::DependencyUnavailable);
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_carries_code_and_stderr() {
        let args = vec!["-c".to_string(), "echo out; echo boom >&2; exit 3".to_string()];
        let err = run_checked("sh", &args, None, PROBE_TIMEOUT).unwrap_err();
        match err {
            MnqnError::ExternalFailure {
                code, diagnostics, ..
            } => {
                assert_eq!(code, Some(3));
                assert_eq!(diagnostics, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn falls_back_to_stdout_when_stderr_is_empty() {
        let args = vec!["-c".to_string(), "echo only-out; exit 1".to_string()];
        let err = run_checked("sh", &args, None, PROBE_TIMEOUT).unwrap_err();
        assert!(err.to_string().contains("only-out"));
        assert!(err.to_string().contains("exit code 1"));
    }

    #[cfg(unix)]
    #[test]
    fn deadline_kills_the_child() {
        let args = vec!["-c".to_string(), "sleep 5".to_string()];
        let err = run("sh", &args, None, Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, MnqnError::TimedOut { .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::ExternalFailure);
        assert_eq!(err.to_string(), "'sh -c sleep 5' timed out after 200ms");
    }

    #[cfg(unix)]
    #[test]
    fn deadline_holds_when_a_descendant_keeps_the_pipes_open() {
        let args = vec!["-c".to_string(), "sleep 4 & wait".to_string()];
        let start = Instant::now();
        let err = run("sh", &args, None, Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, MnqnError::TimedOut { .. }));
        assert!(start.elapsed() < Duration::from_secs(2), "took {:?}", start.elapsed());
    }

    #[cfg(unix)]
    #[test]
    fn streaming_copies_stdout_and_keeps_it() {
        let args = vec![
            "-c".to_string(),
            "echo step 1; echo warn >&2; echo step 2".to_string(),
        ];
        let mut out = Vec::new();
        let captured = run_streaming_checked("sh", &args, None, PROBE_TIMEOUT, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "step 1\nstep 2\n");
        assert_eq!(captured.stdout, "step 1\nstep 2\n");
        assert_eq!(captured.stderr, "warn\n");
    }

    #[cfg(unix)]
    #[test]
    fn streaming_failure_still_reports_the_tail() {
        let args = vec!["-c".to_string(), "echo building; echo broken >&2; exit 2".to_string()];
        let mut out = Vec::new();
        let err = run_streaming_checked("sh", &args, None, PROBE_TIMEOUT, &mut out).unwrap_err();
        assert_eq!(String::from_utf8(out).unwrap(), "building\n");
        assert!(err.to_string().contains("exit code 2: broken"));
    }
}
