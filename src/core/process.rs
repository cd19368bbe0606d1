//! External command execution
//!
//! Every side effect of a release (git, gh) goes through [`CommandRunner`].
//! Commands run one at a time, to completion, with no timeout.

use crate::core::error::{CommandError, ReleaseResult};
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// A program plus its argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
}

impl Invocation {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Captured result of a finished child process
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
  pub success: bool,
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl From<std::process::Output> for CommandOutput {
  fn from(output: std::process::Output) -> Self {
    Self {
      success: output.status.success(),
      code: output.status.code(),
      stdout: String::from_utf8_lossy(&output.stdout).to_string(),
      stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
  }
}

/// Synchronous command execution with strict and lenient policies
///
/// Implementors only provide [`execute`](CommandRunner::execute); the two
/// policies are layered on top so fakes behave exactly like the real runner.
pub trait CommandRunner {
  /// Spawn the command, wait for it, and capture its output.
  ///
  /// Errors only when the program cannot be started.
  fn execute(&self, invocation: &Invocation) -> ReleaseResult<CommandOutput>;

  /// Run a command whose non-zero exit aborts the release.
  ///
  /// Returns trimmed stdout.
  fn run_strict(&self, invocation: &Invocation) -> ReleaseResult<String> {
    let output = self.execute(invocation)?;

    if !output.success {
      return Err(
        CommandError::Failed {
          command: invocation.to_string(),
          code: output.code,
          stderr: output.stderr,
        }
        .into(),
      );
    }

    Ok(output.stdout.trim().to_string())
  }

  /// Run a command whose non-zero exit is expected and ignored.
  ///
  /// Returns trimmed stdout either way.
  fn run_lenient(&self, invocation: &Invocation) -> ReleaseResult<String> {
    let output = self.execute(invocation)?;

    if !output.success {
      tracing::debug!(
        command = %invocation,
        code = ?output.code,
        stderr = output.stderr.trim(),
        "ignoring failure of best-effort command"
      );
    }

    Ok(output.stdout.trim().to_string())
  }
}

/// Runs commands as real child processes inside the repository root
pub struct SystemRunner {
  work_dir: PathBuf,
}

impl SystemRunner {
  pub fn new(work_dir: impl Into<PathBuf>) -> Self {
    Self {
      work_dir: work_dir.into(),
    }
  }
}

impl CommandRunner for SystemRunner {
  fn execute(&self, invocation: &Invocation) -> ReleaseResult<CommandOutput> {
    tracing::debug!(command = %invocation, "running");

    let output = Command::new(&invocation.program)
      .current_dir(&self.work_dir)
      .args(&invocation.args)
      .output()
      .map_err(|source| CommandError::Spawn {
        command: invocation.to_string(),
        source,
      })?;

    Ok(output.into())
  }
}
