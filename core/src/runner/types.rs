use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::RunnerError;

/// Destination a caller may ask for instead of runner-captured output.
///
/// The runner always captures both streams itself; a command carrying one of
/// these is rejected before anything is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    Inherit,
    Null,
}

/// One external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    envs: HashMap<String, String>,
    stdout: Option<OutputTarget>,
    stderr: Option<OutputTarget>,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            envs: HashMap::new(),
            stdout: None,
            stderr: None,
        }
    }

    /// Builds a command from a full argv; `None` when `argv` is empty.
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = argv.into_iter();
        let program = iter.next()?;
        Some(Self::new(program).args(iter))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Overrides the runner's working directory for this command only.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.insert(key.into(), value.into());
        self
    }

    pub fn stdout(mut self, target: OutputTarget) -> Self {
        self.stdout = Some(target);
        self
    }

    pub fn stderr(mut self, target: OutputTarget) -> Self {
        self.stderr = Some(target);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn envs(&self) -> &HashMap<String, String> {
        &self.envs
    }

    pub(crate) fn overrides_capture(&self) -> bool {
        self.stdout.is_some() || self.stderr.is_some()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Output and exit code of one executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub output: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Aggregated result of running a command sequence.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every command exited 0. `output` holds each command's text in order.
    Succeeded { output: String },

    /// `step` is the first command that exited non-zero; `output` is only
    /// that command's stdout and stderr.
    Failed {
        step: usize,
        command: String,
        exit_code: i32,
        output: String,
    },

    /// `step` could not be spawned or awaited.
    Errored {
        step: usize,
        command: String,
        error: RunnerError,
    },
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded { .. })
    }

    /// `None` when no process exit status exists (spawn or wait error).
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunOutcome::Succeeded { .. } => Some(0),
            RunOutcome::Failed { exit_code, .. } => Some(*exit_code),
            RunOutcome::Errored { .. } => None,
        }
    }

    pub fn failed_step(&self) -> Option<usize> {
        match self {
            RunOutcome::Succeeded { .. } => None,
            RunOutcome::Failed { step, .. } | RunOutcome::Errored { step, .. } => Some(*step),
        }
    }

    /// Diagnostic text for the operator.
    pub fn output(&self) -> Cow<'_, str> {
        match self {
            RunOutcome::Succeeded { output } | RunOutcome::Failed { output, .. } => {
                Cow::Borrowed(output)
            }
            RunOutcome::Errored { error, .. } => Cow::Owned(error.diagnostic()),
        }
    }

    pub fn into_output(self) -> String {
        match self {
            RunOutcome::Succeeded { output } | RunOutcome::Failed { output, .. } => output,
            RunOutcome::Errored { error, .. } => error.diagnostic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_argv() {
        let cmd = Command::new("git").args(["fetch", "--tags", "origin"]);
        assert_eq!(cmd.to_string(), "git fetch --tags origin");
    }

    #[test]
    fn from_argv_splits_program_and_args() {
        let cmd = Command::from_argv(["service", "neo4j", "restart"]).unwrap();
        assert_eq!(cmd.program(), "service");
        assert_eq!(cmd.get_args(), ["neo4j", "restart"]);
        assert!(Command::from_argv(Vec::<String>::new()).is_none());
    }

    #[test]
    fn capture_override_is_detected() {
        assert!(!Command::new("true").overrides_capture());
        assert!(Command::new("true").stdout(OutputTarget::Null).overrides_capture());
        assert!(Command::new("true").stderr(OutputTarget::Inherit).overrides_capture());
    }

    #[test]
    fn outcome_accessors() {
        let ok = RunOutcome::Succeeded {
            output: "hello\n".into(),
        };
        assert!(ok.success());
        assert_eq!(ok.exit_code(), Some(0));
        assert_eq!(ok.failed_step(), None);
        assert_eq!(ok.output(), "hello\n");

        let failed = RunOutcome::Failed {
            step: 2,
            command: "git checkout nope".into(),
            exit_code: 1,
            output: "\n\nerror: pathspec 'nope' did not match".into(),
        };
        assert!(!failed.success());
        assert_eq!(failed.exit_code(), Some(1));
        assert_eq!(failed.failed_step(), Some(2));

        let errored = RunOutcome::Errored {
            step: 0,
            command: "missing".into(),
            error: RunnerError::Spawn {
                program: "missing".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            },
        };
        assert_eq!(errored.exit_code(), None);
        assert!(errored.output().contains("failed to spawn process: missing"));
    }
}
