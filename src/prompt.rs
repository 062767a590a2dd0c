//! Yes/no confirmation.

use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::sync::LazyLock;

use regex::Regex;

static ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:y(?:es?)?|no?)$").expect("valid answer pattern"));

/// Asks the user whether to go ahead. Blocks until an answer is available.
pub trait Prompt {
    fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        (**self).confirm(message)
    }
}

/// Line-based prompt. The default answer is "no".
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        let mut line = String::new();
        loop {
            write!(self.output, "{} [no]: ", message)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }
            let answer = line.trim();
            if answer.is_empty() {
                return Ok(false);
            }
            if ANSWER.is_match(answer) {
                return Ok(answer.to_ascii_lowercase().starts_with('y'));
            }
            writeln!(self.output, "Must respond yes or no")?;
        }
    }
}
