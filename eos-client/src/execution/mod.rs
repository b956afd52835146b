//! Command execution for the EOS admin tool
//!
//! Handles every subprocess spawned by the client:
//! - Environment replaced by a single `EOS_MGM_URL` variable
//! - Optional `-r <uid> <gid>` identity prefix resolved from a Unix user name
//! - Separate stdout/stderr capture, returned even on failure
//! - Deadline enforcement, killing the whole process group on expiry
//! - No leftovers: the process group is killed once the tool exits and when a
//!   pending call is dropped
//! - Exit status classification (exit code 2 means "not found")

use crate::config::ClientOptions;
use crate::error::{EosError, Result};
use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::{Pid, User};
use parking_lot::Mutex;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command as AsyncCommand};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Environment variable naming the MGM endpoint
pub const MGM_URL_VAR: &str = "EOS_MGM_URL";

/// Exit code the admin tool uses when the target does not exist
pub const NOT_FOUND_EXIT_CODE: i32 = 2;

/// Time left to the output readers once the child is gone
const PIPE_GRACE: Duration = Duration::from_secs(2);

/// Numeric Unix identity handed to `eos -r`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub uid: u32,
    pub gid: u32,
}

impl Identity {
    /// Look up a Unix user by name
    pub fn resolve(username: &str) -> Result<Self> {
        match User::from_name(username) {
            Ok(Some(user)) => Ok(Self {
                uid: user.uid.as_raw(),
                gid: user.gid.as_raw(),
            }),
            Ok(None) => Err(EosError::UnknownUser(username.to_string())),
            Err(source) => Err(EosError::UserLookup {
                user: username.to_string(),
                source,
            }),
        }
    }

    /// [`Identity::resolve`] off the async workers (NSS lookups may block)
    pub async fn lookup(username: &str) -> Result<Self> {
        let username = username.to_string();
        tokio::task::spawn_blocking(move || Self::resolve(&username)).await?
    }

    /// Leading arguments understood by the admin tool
    pub fn to_args(&self) -> [String; 3] {
        ["-r".to_string(), self.uid.to_string(), self.gid.to_string()]
    }
}

/// Command execution result
#[derive(Debug)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub execution_time_ms: u128,
    pub error: Option<EosError>,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// Stdout of a successful run, or the classified error
    pub fn into_stdout(self) -> Result<String> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.stdout),
        }
    }
}

/// Runs commands with the environment and deadline taken from [`ClientOptions`]
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    options: ClientOptions,
}

impl CommandExecutor {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Deadline for a call starting now
    pub fn deadline(&self) -> tokio::time::Instant {
        tokio::time::Instant::now() + self.options.timeout()
    }

    /// Execute the configured `eos` binary with the default timeout
    pub async fn execute_eos(&self, args: &[&str], identity: Option<&str>) -> Result<ExecutionResult> {
        self.execute(&self.options.binary, args, identity, self.deadline())
            .await
    }

    /// Execute `program` with `args` until `deadline`
    ///
    /// The outer `Err` is reserved for failures before the process runs
    /// (unknown user, spawn error); exit status and timeouts are reported in
    /// [`ExecutionResult::error`] alongside whatever output was captured.
    pub async fn execute(
        &self,
        program: &Path,
        args: &[&str],
        identity: Option<&str>,
        deadline: tokio::time::Instant,
    ) -> Result<ExecutionResult> {
        let budget = deadline.saturating_duration_since(tokio::time::Instant::now());

        let mut argv: Vec<String> = Vec::with_capacity(args.len() + 3);
        if let Some(username) = identity {
            argv.extend(Identity::lookup(username).await?.to_args());
        }
        argv.extend(args.iter().map(|arg| arg.to_string()));

        let rendered = render_command(program, &argv);
        if self.options.enable_logging {
            info!(cmd = %rendered, "eosclient");
        } else {
            debug!("Executing command: {} (timeout: {:?})", rendered, budget);
        }

        let start_time = Instant::now();

        let mut command = AsyncCommand::new(program);
        command
            .args(&argv)
            .env_clear()
            .env(MGM_URL_VAR, &self.options.mgm_url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|source| EosError::Spawn {
            command: rendered.clone(),
            source,
        })?;
        let mut group = ProcessGroup::new(child.id());

        let stdout_buf = PipeBuffer::default();
        let stderr_buf = PipeBuffer::default();
        let stdout_reader = tokio::spawn(read_pipe(child.stdout.take(), stdout_buf.clone()));
        let stderr_reader = tokio::spawn(read_pipe(child.stderr.take(), stderr_buf.clone()));

        let waited = tokio::time::timeout_at(deadline, child.wait()).await;
        let status = match waited {
            Ok(status) => Some(status?),
            Err(_) => {
                warn!("Command timed out after {:?}, killing it: {}", budget, rendered);
                terminate(&mut child, &group).await;
                None
            }
        };
        // descendants left behind still hold the pipes
        group.release();

        let (stdout, stdout_complete) = collect_pipe(stdout_reader, &stdout_buf, PIPE_GRACE).await;
        let (stderr, stderr_complete) = collect_pipe(stderr_reader, &stderr_buf, PIPE_GRACE).await;

        let execution_time = start_time.elapsed().as_millis();
        let error = match status {
            Some(status) => classify_exit(status, &stderr).or_else(|| {
                (!(stdout_complete && stderr_complete))
                    .then_some(EosError::OutputIncomplete(PIPE_GRACE))
            }),
            None => Some(EosError::Timeout(budget)),
        };

        if let Some(err) = &error {
            debug!("Command failed after {}ms: {}", execution_time, err);
        }

        Ok(ExecutionResult {
            stdout,
            stderr,
            exit_code: status.and_then(|s| s.code()),
            execution_time_ms: execution_time,
            error,
        })
    }
}

/// Map a finished process status to an error kind
fn classify_exit(status: ExitStatus, stderr: &str) -> Option<EosError> {
    if status.success() {
        return None;
    }
    match status.code() {
        Some(NOT_FOUND_EXIT_CODE) => Some(EosError::NotFound {
            stderr: stderr.to_string(),
        }),
        code => Some(EosError::CommandFailed {
            code,
            stderr: stderr.to_string(),
        }),
    }
}

/// Process group of a spawned child, killed on drop until released
struct ProcessGroup {
    pgid: Option<Pid>,
}

impl ProcessGroup {
    fn new(pid: Option<u32>) -> Self {
        Self {
            pgid: pid.map(|pid| Pid::from_raw(pid as i32)),
        }
    }

    fn kill(&self) -> nix::Result<()> {
        match self.pgid {
            Some(pgid) => match killpg(pgid, Signal::SIGKILL) {
                Err(Errno::ESRCH) => Ok(()),
                other => other,
            },
            None => Ok(()),
        }
    }

    /// Kill whatever is left of the group and disarm
    fn release(&mut self) {
        if let Err(err) = self.kill() {
            warn!("Failed to kill process group {:?}: {}", self.pgid, err);
        }
        self.pgid = None;
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        if self.pgid.is_some() {
            debug!("Call dropped, killing process group {:?}", self.pgid);
            self.release();
        }
    }
}

/// Kill the child's process group and reap the child
async fn terminate(child: &mut Child, group: &ProcessGroup) {
    if let Err(err) = group.kill() {
        debug!("killpg failed: {}, falling back to kill", err);
        if let Err(err) = child.start_kill() {
            warn!("Failed to kill process {:?}: {}", child.id(), err);
        }
    }
    match child.wait().await {
        Ok(status) => debug!("Killed process reaped: {}", status),
        Err(err) => warn!("Failed to reap killed process: {}", err),
    }
}

/// Bytes read so far from one output pipe
type PipeBuffer = Arc<Mutex<Vec<u8>>>;

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>, buf: PipeBuffer) {
    let Some(mut pipe) = pipe else { return };
    let mut chunk = [0u8; 8192];
    loop {
        match pipe.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => buf.lock().extend_from_slice(&chunk[..n]),
            Err(err) => {
                debug!("Error reading command output: {}", err);
                break;
            }
        }
    }
}

/// Output read so far, and whether the pipe reached end of file within `grace`
async fn collect_pipe(
    mut reader: JoinHandle<()>,
    buf: &PipeBuffer,
    grace: Duration,
) -> (String, bool) {
    let complete = match tokio::time::timeout(grace, &mut reader).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            warn!("Output reader failed: {}", err);
            false
        }
        Err(_) => {
            warn!("Output pipe still open {:?} after exit, keeping partial output", grace);
            reader.abort();
            false
        }
    };
    let bytes = std::mem::take(&mut *buf.lock());
    (String::from_utf8_lossy(&bytes).into_owned(), complete)
}

/// Printable command line (program and arguments only, never the environment)
pub fn render_command(program: &Path, args: &[String]) -> String {
    let mut rendered = program.display().to_string();
    for arg in args {
        rendered.push(' ');
        if arg.is_empty() || arg.chars().any(char::is_whitespace) {
            rendered.push('\'');
            rendered.push_str(arg);
            rendered.push('\'');
        } else {
            rendered.push_str(arg);
        }
    }
    rendered
}
