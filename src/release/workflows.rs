//! CI workflow triggering via the GitHub CLI

use crate::core::error::ReleaseResult;
use crate::core::process::{CommandRunner, Invocation};
use crate::release::plan::{ReleasePlan, ToolRelease};

/// Starts one `ci-<tool>.yml` workflow per tool at its release tag
pub struct WorkflowTrigger<'a, R: CommandRunner> {
  runner: &'a R,
  program: String,
}

impl<'a, R: CommandRunner> WorkflowTrigger<'a, R> {
  pub fn new(runner: &'a R, program: impl Into<String>) -> Self {
    Self {
      runner,
      program: program.into(),
    }
  }

  pub fn trigger_cmd(&self, release: &ToolRelease) -> Invocation {
    Invocation::new(&self.program)
      .args(["workflow", "run"])
      .arg(release.workflow())
      .arg("--ref")
      .arg(release.tag_name())
  }

  /// Start the workflow for a single tool; returns the client's output
  pub fn trigger(&self, release: &ToolRelease) -> ReleaseResult<String> {
    self.runner.run_strict(&self.trigger_cmd(release))
  }

  /// Start every workflow in release order.
  ///
  /// The first failure stops the loop. Workflows already started keep running.
  pub fn trigger_all(&self, plan: &ReleasePlan) -> ReleaseResult<()> {
    println!();
    println!("🚀 Triggering release workflows...");

    for release in &plan.releases {
      println!("   Triggering {} at {}...", release.workflow(), release.tag_name());
      let output = self.trigger(release)?;
      if !output.is_empty() {
        for line in output.lines() {
          println!("     {}", line);
        }
      }
    }

    Ok(())
  }
}
