//! Yes/no confirmation before anything destructive happens

use crate::core::error::{ReleaseResult, ResultExt};
use std::io::{self, BufRead, Write};

/// Asks the operator a yes/no question
pub trait Confirm {
  /// Returns true only for an explicit affirmative answer
  fn confirm(&mut self, question: &str) -> ReleaseResult<bool>;
}

/// `y` or `yes`, any case, surrounding whitespace ignored
pub fn is_affirmative(answer: &str) -> bool {
  matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prompts on stdout and reads one line from a reader (stdin in production)
pub struct StdinPrompt<B: BufRead> {
  input: B,
}

impl StdinPrompt<io::StdinLock<'static>> {
  pub fn stdin() -> Self {
    Self::from_reader(io::stdin().lock())
  }
}

impl<B: BufRead> StdinPrompt<B> {
  pub fn from_reader(input: B) -> Self {
    Self { input }
  }
}

impl<B: BufRead> Confirm for StdinPrompt<B> {
  fn confirm(&mut self, question: &str) -> ReleaseResult<bool> {
    print!("\n{} [y/N] ", question);
    io::stdout().flush().context("Failed to flush prompt")?;

    // EOF reads as an empty answer, which declines.
    let mut answer = String::new();
    self.input.read_line(&mut answer).context("Failed to read answer")?;

    Ok(is_affirmative(&answer))
  }
}

/// Answers yes without asking (`--yes`)
pub struct AssumeYes;

impl Confirm for AssumeYes {
  fn confirm(&mut self, question: &str) -> ReleaseResult<bool> {
    println!("\n{} [y/N] y (--yes)", question);
    Ok(true)
  }
}
