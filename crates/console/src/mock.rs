//! `ScriptedConsole` — a test double for [`Console`].
//!
//! Answers come from a fixed script; everything written is captured so
//! tests can assert on the transcript.

use std::collections::VecDeque;

use crate::{Console, ConsoleError};

/// A console that replays scripted answers and records all output.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    output: String,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> Result<String, ConsoleError> {
        self.answers.pop_front().ok_or(ConsoleError::Closed)
    }

    fn write(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.output.push_str(text);
        Ok(())
    }
}
