use std::time::Duration;

/// Failure of a single external command.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("'{program}' not found — is it installed and on PATH?")]
    NotFound {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to start '{program}'")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program} {}` failed ({}){}", args.join(" "), describe_status(status), format_stderr(stderr))]
    CommandFailed {
        program: String,
        args: Vec<String>,
        status: Option<i32>,
        stderr: String,
    },

    #[error("'{program}' output was not valid UTF-8")]
    InvalidUtf8 {
        program: String,
        source: std::string::FromUtf8Error,
    },

    #[error("'{program}' did not finish within {}s", after.as_secs())]
    TimedOut { program: String, after: Duration },
}

impl ToolError {
    pub fn program(&self) -> &str {
        match self {
            Self::NotFound { program, .. }
            | Self::Spawn { program, .. }
            | Self::CommandFailed { program, .. }
            | Self::InvalidUtf8 { program, .. }
            | Self::TimedOut { program, .. } => program,
        }
    }

    /// Captured standard error, when the command ran and failed.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    /// See [`tolerate::is_not_found`](crate::tolerate::is_not_found).
    pub fn is_not_found(&self) -> bool {
        crate::tolerate::is_not_found(self)
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { status, .. } => *status,
            _ => None,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_owned(),
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}
