use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;

use tracing::{debug, error, warn};

use crate::error::RunnerError;

use super::exit;
use super::types::{Command, CommandResult, RunOutcome};

const SEPARATOR: &str = "\n\n";

/// Shared settings applied to every command a runner executes.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    pub workdir: PathBuf,
    pub envs: HashMap<String, String>,
}

/// Executes commands one at a time, capturing stdout and stderr.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    config: RunnerConfig,
}

impl CommandRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Runs `commands` in order and stops at the first one that fails.
    ///
    /// # Panics
    ///
    /// If any command asks for its own stdout or stderr target. The check
    /// covers the whole batch before the first process is spawned.
    pub async fn run_all(&self, commands: &[Command]) -> RunOutcome {
        for cmd in commands {
            assert_capture_not_overridden(cmd);
        }

        let mut output = String::new();
        for (step, cmd) in commands.iter().enumerate() {
            match self.run_command(cmd).await {
                Ok(result) if result.success() => output.push_str(&result.output),
                Ok(result) => {
                    warn!(
                        step,
                        command = %cmd,
                        exit_code = result.exit_code,
                        "command failed, aborting remaining steps"
                    );
                    return RunOutcome::Failed {
                        step,
                        command: cmd.to_string(),
                        exit_code: result.exit_code,
                        output: result.output,
                    };
                }
                Err(e) => {
                    error!(step, command = %cmd, error = %e, "command could not be executed");
                    return RunOutcome::Errored {
                        step,
                        command: cmd.to_string(),
                        error: e,
                    };
                }
            }
        }

        RunOutcome::Succeeded { output }
    }

    /// Runs a single command to completion.
    ///
    /// On exit code 0 the text is stdout, with stderr appended between blank
    /// lines when it has any non-whitespace content. On any other exit code
    /// the text is `stdout + "\n\n" + stderr`.
    ///
    /// # Panics
    ///
    /// If the command asks for its own stdout or stderr target.
    pub async fn run_command(&self, cmd: &Command) -> Result<CommandResult, RunnerError> {
        assert_capture_not_overridden(cmd);

        let cwd = cmd.cwd().unwrap_or(&self.config.workdir);
        debug!(command = %cmd, cwd = %cwd.display(), "starting command");
        let started = Instant::now();

        let child = tokio::process::Command::new(cmd.program())
            .args(cmd.get_args())
            .current_dir(cwd)
            .envs(&self.config.envs)
            .envs(cmd.envs())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                program: cmd.program().to_string(),
                source,
            })?;

        let out = child
            .wait_with_output()
            .await
            .map_err(|source| RunnerError::Wait {
                program: cmd.program().to_string(),
                source,
            })?;

        let exit_code = exit::exit_code(out.status);
        debug!(
            command = %cmd,
            exit_code,
            duration_ms = %started.elapsed().as_millis(),
            "command exited"
        );

        let stdout = String::from_utf8_lossy(&out.stdout);
        let stderr = String::from_utf8_lossy(&out.stderr);

        Ok(CommandResult {
            output: compose_output(&stdout, &stderr, exit_code == 0),
            exit_code,
        })
    }
}

fn assert_capture_not_overridden(cmd: &Command) {
    assert!(
        !cmd.overrides_capture(),
        "stdout and stderr are captured by the runner and cannot be overridden: {cmd}"
    );
}

fn compose_output(stdout: &str, stderr: &str, success: bool) -> String {
    if !success {
        return format!("{stdout}{SEPARATOR}{stderr}");
    }

    let mut text = stdout.to_string();
    if !stderr.trim().is_empty() {
        text.push_str(SEPARATOR);
        text.push_str(stderr);
        text.push_str(SEPARATOR);
    }
    text
}
