// core/src/error/runner_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn process: {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for process: {program}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl RunnerError {
    pub fn program(&self) -> &str {
        match self {
            RunnerError::Spawn { program, .. } | RunnerError::Wait { program, .. } => program,
        }
    }

    /// Renders the error together with its source chain, one cause per line.
    pub fn diagnostic(&self) -> String {
        let mut text = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            text.push_str("\ncaused by: ");
            text.push_str(&err.to_string());
            cause = std::error::Error::source(err);
        }
        text
    }
}
