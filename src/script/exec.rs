//! Executable script handles with redirectable streams.

use std::fmt;
use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, ScopedJoinHandle};
use std::time::Duration;

use tracing::debug;

use super::error::ScriptError;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Bytes of standard error kept for [`ScriptError::Execution`].
pub const STDERR_TAIL_LIMIT: usize = 4096;

/// Shared flag that asks running scripts to stop.
///
/// Clones observe the same flag. A cancelled token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every script holding a clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// An out-of-process invocation ready to run.
///
/// Streams left unset are inherited from the current process. Redirected
/// streams are only borrowed: they are released, not closed, once
/// [`Script::execute`] returns. `execute` consumes the script, so streams
/// cannot be changed after it has run.
pub struct Script<'a> {
    program: String,
    args: Vec<String>,
    stdin: Option<Box<dyn Read + Send + 'a>>,
    stdout: Option<Box<dyn Write + Send + 'a>>,
    stderr: Option<Box<dyn Write + Send + 'a>>,
    cancel: Option<CancelToken>,
}

enum Outcome {
    Exited(ExitStatus),
    Cancelled,
}

impl<'a> Script<'a> {
    /// A script that runs `program` with `args` and inherits all streams.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            stdin: None,
            stdout: None,
            stderr: None,
            cancel: None,
        }
    }

    /// Program that will be started.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Feeds the process standard input from `reader`.
    pub fn set_stdin(&mut self, reader: impl Read + Send + 'a) -> &mut Self {
        self.stdin = Some(Box::new(reader));
        self
    }

    /// Sends the process standard output to `writer`.
    pub fn set_stdout(&mut self, writer: impl Write + Send + 'a) -> &mut Self {
        self.stdout = Some(Box::new(writer));
        self
    }

    /// Sends the process standard error to `writer`.
    pub fn set_stderr(&mut self, writer: impl Write + Send + 'a) -> &mut Self {
        self.stderr = Some(Box::new(writer));
        self
    }

    /// Sends standard output and standard error to the same `writer`,
    /// interleaved in the order the pipes are read.
    pub fn set_combined_output(&mut self, writer: impl Write + Send + 'a) -> &mut Self {
        let shared = SharedWriter(Arc::new(Mutex::new(writer)));
        self.stdout = Some(Box::new(shared.clone()));
        self.stderr = Some(Box::new(shared));
        self
    }

    /// Kills the process when `token` is cancelled.
    pub fn set_cancel(&mut self, token: CancelToken) -> &mut Self {
        self.cancel = Some(token);
        self
    }

    /// Runs the process to completion, blocking the calling thread.
    ///
    /// # Errors
    ///
    /// - [`ScriptError::Spawn`] if the program cannot be started.
    /// - [`ScriptError::Cancelled`] if the cancel token fired first.
    /// - [`ScriptError::Io`] if a redirected stream could not be copied.
    /// - [`ScriptError::Execution`] if the process exited unsuccessfully.
    pub fn execute(self) -> Result<(), ScriptError> {
        let Self { program, args, stdin, stdout, stderr, cancel } = self;
        if cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(ScriptError::Cancelled { program });
        }
        debug!(%program, ?args, "running script");

        let mut command = Command::new(&program);
        command
            .args(&args)
            .stdin(piped_if(stdin.is_some()))
            .stdout(piped_if(stdout.is_some()))
            .stderr(piped_if(stderr.is_some()));
        // A cancellable script gets its own process group so that commands it
        // forks die with it and release the pipes.
        let grouped = cancel.is_some();
        if grouped {
            own_process_group(&mut command);
        }
        let mut child = command
            .spawn()
            .map_err(|source| ScriptError::Spawn { program: program.clone(), source })?;

        let child_stdin = child.stdin.take();
        let child_stdout = child.stdout.take();
        let child_stderr = child.stderr.take();

        let (waited, pumped) = thread::scope(|scope| {
            let feed = stdin
                .zip(child_stdin)
                .map(|(input, pipe)| scope.spawn(move || feed_stdin(input, pipe)));
            let out = stdout
                .zip(child_stdout)
                .map(|(sink, pipe)| scope.spawn(move || copy_all(pipe, sink)));
            let err = stderr
                .zip(child_stderr)
                .map(|(sink, pipe)| scope.spawn(move || copy_with_tail(pipe, sink)));

            let waited = wait(&mut child, cancel.as_ref());
            if waited.is_err() {
                // Unblock the pumps before joining them.
                terminate(&mut child, grouped);
                let _ = child.wait();
            }
            (waited, join_pumps(feed, out, err))
        });

        let status =
            match waited.map_err(|source| ScriptError::Io { program: program.clone(), source })? {
                Outcome::Exited(status) => status,
                Outcome::Cancelled => {
                    debug!(%program, "script cancelled");
                    return Err(ScriptError::Cancelled { program });
                }
            };
        let stderr_tail =
            pumped.map_err(|source| ScriptError::Io { program: program.clone(), source })?;
        if status.success() {
            return Ok(());
        }
        debug!(%program, code = ?status.code(), "script failed");
        Err(ScriptError::Execution {
            program,
            code: status.code(),
            stderr: String::from_utf8_lossy(&stderr_tail).into_owned(),
        })
    }
}

impl fmt::Debug for Script<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Script")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("stdin", &self.stdin.is_some())
            .field("stdout", &self.stdout.is_some())
            .field("stderr", &self.stderr.is_some())
            .field("cancel", &self.cancel)
            .finish()
    }
}

/// One writer fed by both output pumps.
struct SharedWriter<W>(Arc<Mutex<W>>);

impl<W> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<W: Write> SharedWriter<W> {
    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, W>> {
        self.0.lock().map_err(|_| io::Error::other("combined output writer poisoned"))
    }
}

impl<W: Write> Write for SharedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // One lock per chunk keeps each pump's chunk contiguous.
        self.lock()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

fn piped_if(redirected: bool) -> Stdio {
    if redirected {
        Stdio::piped()
    } else {
        Stdio::inherit()
    }
}

fn wait(child: &mut Child, cancel: Option<&CancelToken>) -> io::Result<Outcome> {
    let Some(token) = cancel else {
        return child.wait().map(Outcome::Exited);
    };
    loop {
        if token.is_cancelled() {
            // The child may have exited between polls; reaping it is all that matters.
            terminate(child, true);
            child.wait()?;
            return Ok(Outcome::Cancelled);
        }
        if let Some(status) = child.try_wait()? {
            return Ok(Outcome::Exited(status));
        }
        thread::sleep(CANCEL_POLL_INTERVAL);
    }
}

#[cfg(unix)]
fn own_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_command: &mut Command) {}

/// Kills the child and, when it leads its own process group, everything it
/// started.
fn terminate(child: &mut Child, grouped: bool) {
    if grouped {
        kill_process_group(child);
    }
    let _ = child.kill();
}

#[cfg(unix)]
fn kill_process_group(child: &Child) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    if let Ok(pgid) = i32::try_from(child.id()) {
        // ESRCH just means the group is already gone.
        let _ = killpg(Pid::from_raw(pgid), Signal::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

fn feed_stdin(mut input: impl Read, mut pipe: impl Write) -> io::Result<()> {
    match io::copy(&mut input, &mut pipe) {
        // The process is free to exit without reading all of its input.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result.map(drop),
    }
}

fn copy_all(mut pipe: impl Read, mut sink: impl Write) -> io::Result<()> {
    io::copy(&mut pipe, &mut sink)?;
    sink.flush()
}

fn copy_with_tail(mut pipe: impl Read, mut sink: impl Write) -> io::Result<Vec<u8>> {
    let mut tail = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = match pipe.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        sink.write_all(&buf[..n])?;
        tail.extend_from_slice(&buf[..n]);
        if tail.len() > STDERR_TAIL_LIMIT {
            tail.drain(..tail.len() - STDERR_TAIL_LIMIT);
        }
    }
    sink.flush()?;
    Ok(tail)
}

fn join<T>(handle: Option<ScopedJoinHandle<'_, io::Result<T>>>) -> io::Result<Option<T>> {
    match handle {
        None => Ok(None),
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("stream copy thread panicked")))
            .map(Some),
    }
}

fn join_pumps(
    feed: Option<ScopedJoinHandle<'_, io::Result<()>>>,
    out: Option<ScopedJoinHandle<'_, io::Result<()>>>,
    err: Option<ScopedJoinHandle<'_, io::Result<Vec<u8>>>>,
) -> io::Result<Vec<u8>> {
    let fed = join(feed);
    let copied = join(out);
    let tail = join(err);
    fed?;
    copied?;
    Ok(tail?.unwrap_or_default())
}
