//! Terminal prompts backed by `dialoguer`.

use dialoguer::{Input, theme::ColorfulTheme};
use std::io::{self, IsTerminal, Write};
use tmplfill_core::session::{Console, LineConsole};

/// [`Console`] for an interactive terminal.
pub struct TerminalConsole {
    theme: ColorfulTheme,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self { theme: ColorfulTheme::default() }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        // The theme draws its own separator.
        let label = prompt.trim_end().trim_end_matches(':');

        match Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => Ok(Some(line)),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Ok(None)
            }
            Err(dialoguer::Error::IO(e)) => Err(e),
        }
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(io::stderr(), "{message}")
    }
}

/// Pick the console for this run: styled prompts on a terminal, plain
/// line reading from stdin otherwise. Prompts always go to stderr.
pub fn console(batch: bool) -> Box<dyn Console> {
    if io::stdin().is_terminal() && !batch {
        Box::new(TerminalConsole::new())
    } else {
        Box::new(LineConsole::new(io::stdin().lock(), io::stderr()))
    }
}
