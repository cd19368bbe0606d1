//! System git backend
//!
//! Thin wrappers over the `git` binary for the handful of plumbing calls a
//! release needs. Each call is one child process through the shared
//! [`CommandRunner`], so tests can swap in a fake.

use crate::core::error::ReleaseResult;
use crate::core::process::{CommandRunner, Invocation};

/// Git backend using system git
pub struct SystemGit<'a, R: CommandRunner> {
  runner: &'a R,

  /// Remote that tags are pushed to and deleted from
  remote: String,
}

impl<'a, R: CommandRunner> SystemGit<'a, R> {
  pub fn new(runner: &'a R, remote: impl Into<String>) -> Self {
    Self {
      runner,
      remote: remote.into(),
    }
  }

  pub fn remote(&self) -> &str {
    &self.remote
  }

  /// Get HEAD commit SHA
  pub fn head_commit(&self) -> ReleaseResult<String> {
    self.runner.run_strict(&Self::head_commit_cmd())
  }

  /// Delete a local tag, ignoring "tag not found"
  pub fn delete_local_tag(&self, tag: &str) -> ReleaseResult<()> {
    self.runner.run_lenient(&self.delete_local_tag_cmd(tag))?;
    Ok(())
  }

  /// Delete a tag on the remote by pushing an empty ref, ignoring failures
  pub fn delete_remote_tag(&self, tag: &str) -> ReleaseResult<()> {
    self.runner.run_lenient(&self.delete_remote_tag_cmd(tag))?;
    Ok(())
  }

  /// Create a lightweight tag at `commit`; fails if the tag already exists
  pub fn create_tag(&self, tag: &str, commit: &str) -> ReleaseResult<()> {
    self.runner.run_strict(&self.create_tag_cmd(tag, commit))?;
    Ok(())
  }

  /// Push all given tags to the remote in one `git push`
  pub fn push_tags(&self, tags: &[String]) -> ReleaseResult<()> {
    self.runner.run_strict(&self.push_tags_cmd(tags))?;
    Ok(())
  }

  // Command builders are public so dry runs print exactly what would execute.

  pub fn head_commit_cmd() -> Invocation {
    Invocation::new("git").args(["rev-parse", "HEAD"])
  }

  pub fn delete_local_tag_cmd(&self, tag: &str) -> Invocation {
    Invocation::new("git").args(["tag", "-d", tag])
  }

  pub fn delete_remote_tag_cmd(&self, tag: &str) -> Invocation {
    Invocation::new("git")
      .arg("push")
      .arg(&self.remote)
      .arg(format!(":refs/tags/{}", tag))
  }

  pub fn create_tag_cmd(&self, tag: &str, commit: &str) -> Invocation {
    Invocation::new("git").args(["tag", tag, commit])
  }

  pub fn push_tags_cmd(&self, tags: &[String]) -> Invocation {
    Invocation::new("git")
      .arg("push")
      .arg(&self.remote)
      .args(tags.iter().cloned())
  }
}
