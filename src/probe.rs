//! Startup probe - spawn the server, close stdin, classify what it does.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::server::ServerSpec;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct ProbeOptions {
    /// How long to wait before classifying the server as idle-on-input.
    pub timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(2),
        }
    }
}

/// What the server did when started with an empty input stream.
#[derive(Debug)]
pub enum StartupOutcome {
    /// Exited on its own within the bound.
    Exited { code: Option<i32>, stderr: String },
    /// Still running at the bound - the steady state of a stdio server
    /// waiting for messages. The child has been killed and reaped.
    Idle { waited: Duration },
}

impl StartupOutcome {
    /// Whether the outcome counts as a passing startup check.
    ///
    /// Lenient mode treats any exit within the bound as a pass. Strict mode
    /// gates on the exit code.
    pub fn passes(&self, strict: bool) -> bool {
        match self {
            StartupOutcome::Idle { .. } => true,
            StartupOutcome::Exited { code, .. } => !strict || *code == Some(0),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            StartupOutcome::Idle { waited } => format!(
                "server starts and waits for input ({:.1}s, as expected)",
                waited.as_secs_f64()
            ),
            StartupOutcome::Exited {
                code: Some(0),
                ..
            } => "server starts and exits cleanly".to_string(),
            StartupOutcome::Exited { code, stderr } => {
                let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                match stderr.lines().next() {
                    Some(line) => format!("server exited with status {code}: {line}"),
                    None => format!("server exited with status {code}"),
                }
            }
        }
    }
}

/// Spawn the server with piped stdio, close stdin, and wait up to the bound.
pub fn probe_startup(spec: &ServerSpec, options: &ProbeOptions) -> Result<StartupOutcome> {
    let mut child = Command::new(&spec.command)
        .args(&spec.args)
        .envs(&spec.env)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to spawn '{}'", spec.command))?;

    // Dropping the write end sends EOF - the empty input stream.
    drop(child.stdin.take());

    let start = Instant::now();
    loop {
        let status = child
            .try_wait()
            .context("Failed to poll server process")?;
        if status.is_some() {
            // Process has exited, so draining the pipes cannot block.
            let output = child.wait_with_output()?;
            return Ok(StartupOutcome::Exited {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }
        if start.elapsed() >= options.timeout {
            child.kill().context("Failed to terminate idle server")?;
            child.wait()?;
            return Ok(StartupOutcome::Idle {
                waited: start.elapsed(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}
