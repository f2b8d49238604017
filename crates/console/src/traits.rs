//! The `Console` trait and its line-buffered implementation.

use std::io::{self, BufRead, Write};

use crate::ConsoleError;

/// A blocking, line-oriented terminal.
pub trait Console {
    /// Read the next line without its terminator.
    ///
    /// Returns [`ConsoleError::Closed`] at end of input.
    fn read_line(&mut self) -> Result<String, ConsoleError>;

    /// Write `text` verbatim and flush it.
    fn write(&mut self, text: &str) -> Result<(), ConsoleError>;
}

/// [`Console`] over any buffered reader and writer.
pub struct LineConsole<R, W> {
    reader: R,
    writer: W,
}

/// The process terminal.
pub type StdConsole = LineConsole<io::StdinLock<'static>, io::Stdout>;

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl StdConsole {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        let trimmed_len = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    fn write(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
