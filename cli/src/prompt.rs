//! Line-oriented console prompts
//!
//! Generic over the reader and writer so sessions can be scripted in tests.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("failed to write output")
    }

    /// Print `question` and read one trimmed line
    ///
    /// Fails once input is exhausted.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question).context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(line.trim().to_string())
    }

    /// Ask until a non-empty answer is given
    pub fn ask_non_empty(&mut self, question: &str) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("No input provided. Please enter a value.")?;
        }
    }

    /// Ask until a whole number (optionally signed) is given
    pub fn ask_integer(&mut self, question: &str) -> Result<i64> {
        loop {
            let answer = self.ask(question)?;
            if answer.is_empty() {
                self.say("No input provided. Please enter a valid number.")?;
                continue;
            }
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Invalid input. Please enter a valid integer.")?,
            }
        }
    }

    /// Ask until a number greater than zero is given
    pub fn ask_positive(&mut self, question: &str) -> Result<u32> {
        loop {
            let value = self.ask_integer(question)?;
            match u32::try_from(value) {
                Ok(value) if value > 0 => return Ok(value),
                _ => self.say("Invalid input. Please enter a positive number.")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
