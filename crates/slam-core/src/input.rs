//! Interactive answers, injectable so prompts can be driven from tests.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Source of answers to interactive prompts.
pub trait InputSource {
    /// Show `prompt` and return the trimmed answer.
    ///
    /// An empty answer (including end of input) is
    /// [`Error::InvalidInteractiveInput`](crate::Error::InvalidInteractiveInput).
    fn ask(&mut self, prompt: &str) -> crate::Result<String>;
}

/// Reads answers from the terminal.
pub struct StdinInput;

impl InputSource for StdinInput {
    fn ask(&mut self, prompt: &str) -> crate::Result<String> {
        let read_err = |e| crate::Error::PromptRead {
            prompt: prompt.to_owned(),
            source: e,
        };

        print!("{prompt}: ");
        std::io::stdout().flush().map_err(read_err)?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line).map_err(read_err)?;

        non_empty(prompt, &line)
    }
}

/// Replays canned answers in order; once exhausted, behaves like end of input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn ask(&mut self, prompt: &str) -> crate::Result<String> {
        let answer = self.answers.pop_front().unwrap_or_default();
        non_empty(prompt, &answer)
    }
}

fn non_empty(prompt: &str, answer: &str) -> crate::Result<String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(crate::Error::InvalidInteractiveInput {
            prompt: prompt.to_owned(),
        });
    }
    Ok(answer.to_owned())
}
