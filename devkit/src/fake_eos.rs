/*!
Fake `eos` executable

Generates a `/bin/sh` script in a temporary directory. Each route matches
the end of the argument list (so a leading `-r <uid> <gid>` is accepted)
and replays its stdout, stderr, delay and exit code. Every call is appended
to `invocations.log` with the environment the script received.
*/

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const INVOCATIONS_LOG: &str = "invocations.log";
const UNSET: &str = "<unset>";

/// Canned answer for one command
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    /// Seconds to sleep after writing the output
    pub delay_secs: u32,
}

impl Response {
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stderr: stderr.into(),
            exit_code,
            ..Self::default()
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn with_delay_secs(mut self, delay_secs: u32) -> Self {
        self.delay_secs = delay_secs;
        self
    }
}

/// One recorded call of the fake binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Arguments joined with single spaces
    pub args: String,
    /// `EOS_MGM_URL` as seen by the process, `None` when unset
    pub mgm_url: Option<String>,
    /// `HOME` as seen by the process, `None` when unset
    pub home: Option<String>,
}

#[derive(Debug, Default)]
pub struct FakeEosBuilder {
    routes: Vec<(String, Response)>,
}

impl FakeEosBuilder {
    /// Answer `response` to any call whose arguments end with `args`
    pub fn route(mut self, args: &str, response: Response) -> Self {
        self.routes.push((args.to_string(), response));
        self
    }

    pub fn build(self) -> Result<FakeEos> {
        let dir = tempfile::Builder::new()
            .prefix("fake-eos-")
            .tempdir()
            .context("Failed to create fake eos directory")?;

        for (i, (_, response)) in self.routes.iter().enumerate() {
            fs::write(dir.path().join(format!("route-{}.out", i)), &response.stdout)?;
            fs::write(dir.path().join(format!("route-{}.err", i)), &response.stderr)?;
        }

        let script = render_script(dir.path(), &self.routes);
        let staging = dir.path().join("eos.tmp");
        let binary = dir.path().join("eos");
        fs::write(&staging, script).context("Failed to write fake eos script")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&staging)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&staging, perms)?;
        }
        fs::rename(&staging, &binary)?;

        log::debug!("Fake eos with {} routes at {}", self.routes.len(), binary.display());
        Ok(FakeEos { dir, binary })
    }
}

/// Fake admin tool living as long as this value
#[derive(Debug)]
pub struct FakeEos {
    dir: TempDir,
    binary: PathBuf,
}

impl FakeEos {
    pub fn builder() -> FakeEosBuilder {
        FakeEosBuilder::default()
    }

    /// Path to hand to the client as its `eos` binary
    pub fn path(&self) -> &Path {
        &self.binary
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Calls made so far, oldest first
    pub fn invocations(&self) -> Result<Vec<Invocation>> {
        let log_path = self.dir.path().join(INVOCATIONS_LOG);
        if !log_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&log_path)?;
        Ok(content.lines().filter_map(parse_invocation).collect())
    }
}

fn parse_invocation(line: &str) -> Option<Invocation> {
    let mut parts = line.rsplitn(3, '|');
    let home = parts.next()?;
    let mgm_url = parts.next()?;
    let args = parts.next()?;
    let optional = |value: &str| (value != UNSET).then(|| value.to_string());
    Some(Invocation {
        args: args.to_string(),
        mgm_url: optional(mgm_url),
        home: optional(home),
    })
}

fn render_script(dir: &Path, routes: &[(String, Response)]) -> String {
    let dir = sh_quote(&dir.display().to_string());
    let mut script = String::new();
    let _ = writeln!(script, "#!/bin/sh");
    let _ = writeln!(script, "PATH=/usr/bin:/bin");
    let _ = writeln!(script, "DIR={}", dir);
    let _ = writeln!(
        script,
        "printf '%s|%s|%s\\n' \"$*\" \"${{EOS_MGM_URL-{u}}}\" \"${{HOME-{u}}}\" >> \"$DIR/{log}\"",
        u = UNSET,
        log = INVOCATIONS_LOG
    );
    let _ = writeln!(script, "case \"$*\" in");
    for (i, (args, response)) in routes.iter().enumerate() {
        let _ = writeln!(script, "  *{})", sh_quote(args));
        let _ = writeln!(script, "    cat \"$DIR/route-{}.out\"", i);
        let _ = writeln!(script, "    cat \"$DIR/route-{}.err\" >&2", i);
        if response.delay_secs > 0 {
            let _ = writeln!(script, "    sleep {}", response.delay_secs);
        }
        let _ = writeln!(script, "    exit {}", response.exit_code);
        let _ = writeln!(script, "    ;;");
    }
    let _ = writeln!(script, "  *)");
    let _ = writeln!(script, "    echo \"unexpected command: $*\" >&2");
    let _ = writeln!(script, "    exit 1");
    let _ = writeln!(script, "    ;;");
    let _ = writeln!(script, "esac");
    script
}

/// Single-quote for sh, literal inside `case` patterns too
fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn test_routes_and_invocation_log() {
        let eos = FakeEos::builder()
            .route("node ls -m", Response::stdout("hostport=a:1095\n"))
            .route("version", Response::failure(2, "gone"))
            .build()
            .unwrap();

        let out = Command::new(eos.path())
            .args(["-r", "0", "0", "node", "ls", "-m"])
            .env_clear()
            .env("EOS_MGM_URL", "root://fake")
            .output()
            .unwrap();
        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout), "hostport=a:1095\n");

        let out = Command::new(eos.path()).arg("version").env_clear().output().unwrap();
        assert_eq!(out.status.code(), Some(2));
        assert_eq!(String::from_utf8_lossy(&out.stderr), "gone");

        let calls = eos.invocations().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args, "-r 0 0 node ls -m");
        assert_eq!(calls[0].mgm_url.as_deref(), Some("root://fake"));
        assert_eq!(calls[0].home, None);
        assert_eq!(calls[1].mgm_url, None);
    }

    #[test]
    fn test_unknown_command_fails() {
        let eos = FakeEos::builder().build().unwrap();
        let out = Command::new(eos.path()).args(["fs", "ls"]).output().unwrap();
        assert_eq!(out.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&out.stderr).contains("unexpected command: fs ls"));
    }

    #[test]
    fn test_sh_quote() {
        assert_eq!(sh_quote("a b"), "'a b'");
        assert_eq!(sh_quote("it's"), "'it'\\''s'");
    }
}
