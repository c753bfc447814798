//! Scripted [`ProcessRunner`] that records every invocation.
//!
//! Rules are matched in the order they were added: the first rule whose
//! program matches (and whose needle, if any, appears among the arguments)
//! answers the call. Unmatched calls succeed with empty output.

use crate::error::ToolError;
use crate::runner::{Invocation, ProcessRunner};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Scripted answer to a matched invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Exit 0 with this stdout.
    Output(String),
    /// Exit non-zero with this stderr.
    Fail { status: i32, stderr: String },
    /// The program is not installed.
    Missing,
}

impl Reply {
    pub fn fail(stderr: &str) -> Self {
        Self::Fail {
            status: 1,
            stderr: stderr.to_owned(),
        }
    }

    fn into_result(self, invocation: &Invocation) -> Result<String, ToolError> {
        match self {
            Self::Output(out) => Ok(out),
            Self::Fail { status, stderr } => Err(ToolError::CommandFailed {
                program: invocation.program.clone(),
                args: invocation.args.clone(),
                status: Some(status),
                stderr,
            }),
            Self::Missing => Err(ToolError::NotFound {
                program: invocation.program.clone(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }
}

#[derive(Debug)]
struct Rule {
    program: String,
    needle: Option<String>,
    reply: Reply,
    remaining: Option<usize>,
}

impl Rule {
    fn matches(&self, invocation: &Invocation) -> bool {
        self.remaining != Some(0)
            && self.program == invocation.program
            && self
                .needle
                .as_deref()
                .is_none_or(|needle| invocation.has_arg(needle))
    }
}

#[derive(Debug, Default)]
pub struct RecordingRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every matching call with `reply`.
    pub fn on(self, program: &str, needle: Option<&str>, reply: Reply) -> Self {
        self.push_rule(program, needle, reply, None)
    }

    /// Answer only the next matching call with `reply`.
    pub fn once(self, program: &str, needle: Option<&str>, reply: Reply) -> Self {
        self.push_rule(program, needle, reply, Some(1))
    }

    fn push_rule(
        self,
        program: &str,
        needle: Option<&str>,
        reply: Reply,
        remaining: Option<usize>,
    ) -> Self {
        lock(&self.rules).push(Rule {
            program: program.to_owned(),
            needle: needle.map(str::to_owned),
            reply,
            remaining,
        });
        self
    }

    /// Every invocation seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        lock(&self.calls).clone()
    }

    /// Command lines of every invocation seen so far, in order.
    pub fn command_lines(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .map(Invocation::command_line)
            .collect()
    }

    /// Number of calls to `program` carrying `arg`.
    pub fn count(&self, program: &str, arg: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.program == program && c.has_arg(arg))
            .count()
    }

    fn answer(&self, invocation: &Invocation) -> Result<String, ToolError> {
        lock(&self.calls).push(invocation.clone());

        let reply = {
            let mut rules = lock(&self.rules);
            rules.iter_mut().find(|r| r.matches(invocation)).map(|rule| {
                if let Some(n) = rule.remaining.as_mut() {
                    *n -= 1;
                }
                rule.reply.clone()
            })
        };

        reply
            .unwrap_or_else(|| Reply::Output(String::new()))
            .into_result(invocation)
    }
}

impl ProcessRunner for RecordingRunner {
    async fn exec(&self, invocation: &Invocation) -> Result<String, ToolError> {
        self.answer(invocation)
    }

    async fn exec_streaming(&self, invocation: &Invocation) -> Result<(), ToolError> {
        self.answer(invocation).map(|_output| ())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
