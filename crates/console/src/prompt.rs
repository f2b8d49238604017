//! Input validation helpers layered on top of any [`Console`].
//!
//! Each helper prints its label, blocks for one line, and either returns
//! the parsed answer or a [`ConsoleError`] describing what was wrong with
//! it.  None of them re-prompt; callers decide whether to retry.

use tracing::trace;

use crate::{Console, ConsoleError};

/// Prompting helpers for every [`Console`].
pub trait Prompt: Console {
    /// Print `line` followed by a newline.
    fn say(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.write(line)?;
        self.write("\n")
    }

    /// Print `label` and return the answer as typed.
    fn ask(&mut self, label: &str) -> Result<String, ConsoleError> {
        self.write(label)?;
        let answer = self.read_line()?;
        trace!(prompt = label, "answer received");
        Ok(answer)
    }

    /// Print `label` and parse the answer as an `i32`.
    fn ask_i32(&mut self, label: &str) -> Result<i32, ConsoleError> {
        let answer = self.ask(label)?;
        parse_i32(&answer)
    }

    /// Like [`Prompt::ask_i32`] but rejects negative numbers.
    fn ask_non_negative(&mut self, label: &str) -> Result<i32, ConsoleError> {
        let answer = self.ask(label)?;
        let value = parse_i32(&answer)?;
        if value < 0 {
            return Err(ConsoleError::Negative { input: answer.trim().to_owned() });
        }
        Ok(value)
    }

    /// Print `label` and return `true` for `y` or `yes` in any case.
    fn confirm(&mut self, label: &str) -> Result<bool, ConsoleError> {
        let answer = self.ask(label)?;
        Ok(is_yes(&answer))
    }
}

impl<C: Console + ?Sized> Prompt for C {}

/// Parse a whole number, ignoring surrounding whitespace.
pub fn parse_i32(input: &str) -> Result<i32, ConsoleError> {
    input
        .trim()
        .parse()
        .map_err(|_| ConsoleError::NotANumber { input: input.trim().to_owned() })
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptedConsole;

    #[test]
    fn ask_prints_label_and_returns_raw_answer() {
        let mut console = ScriptedConsole::new([" O'Brien "]);
        assert_eq!(console.ask("Last name: ").unwrap(), " O'Brien ");
        assert_eq!(console.output(), "Last name: ");
    }

    #[test]
    fn integers_tolerate_whitespace() {
        let mut console = ScriptedConsole::new([" 42 ", "-7"]);
        assert_eq!(console.ask_i32("n: ").unwrap(), 42);
        assert_eq!(console.ask_i32("n: ").unwrap(), -7);
    }

    #[test]
    fn non_numeric_answer_is_reported_with_the_input() {
        let mut console = ScriptedConsole::new(["twelve"]);
        match console.ask_i32("years: ") {
            Err(ConsoleError::NotANumber { input }) => assert_eq!(input, "twelve"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn negative_answer_is_rejected_where_not_allowed() {
        let mut console = ScriptedConsole::new(["-1", "0"]);
        assert!(matches!(
            console.ask_non_negative("bill: "),
            Err(ConsoleError::Negative { .. })
        ));
        assert_eq!(console.ask_non_negative("bill: ").unwrap(), 0);
    }

    #[test]
    fn confirmation_accepts_y_and_yes_only() {
        for yes in ["y", "Y", "yes", "YES", " Yes "] {
            assert!(is_yes(yes), "{yes}");
        }
        for no in ["n", "", "yep", "no"] {
            assert!(!is_yes(no), "{no}");
        }
    }

    #[test]
    fn running_out_of_input_is_closed() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        assert!(matches!(console.ask("x"), Err(ConsoleError::Closed)));
    }
}
