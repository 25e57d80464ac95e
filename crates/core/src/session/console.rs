//! Line-oriented operator I/O.

use std::io::{self, BufRead, Write};

/// Everything the prompting session needs from a terminal.
pub trait Console {
    /// Show `prompt` and read one line without its line terminator.
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Show an informational message.
    fn notice(&mut self, message: &str) -> io::Result<()>;
}

/// [`Console`] over any buffered reader and writer.
///
/// Prompts are written without a trailing newline and flushed before
/// reading, so the answer appears on the same line.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // Keep following output off the prompt line.
            writeln!(self.output)?;
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}
