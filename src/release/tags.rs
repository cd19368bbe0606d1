//! Release tag management
//!
//! Tags are rebuilt from scratch on every run: whatever `<tool>_v<version>`
//! tags exist locally or on the remote are deleted (best effort), then
//! recreated at a single commit and pushed together.

use crate::core::error::ReleaseResult;
use crate::core::process::CommandRunner;
use crate::core::vcs::SystemGit;
use crate::release::plan::ReleasePlan;

pub struct TagManager<'g, 'r, R: CommandRunner> {
  git: &'g SystemGit<'r, R>,
}

impl<'g, 'r, R: CommandRunner> TagManager<'g, 'r, R> {
  pub fn new(git: &'g SystemGit<'r, R>) -> Self {
    Self { git }
  }

  /// Delete each planned tag locally, then on the remote.
  ///
  /// Failures (usually "tag not found") are ignored, so this is safe to run
  /// when none of the tags exist.
  pub fn delete_existing(&self, plan: &ReleasePlan) -> ReleaseResult<()> {
    println!();
    println!("🗑️  Deleting existing tags (if any)...");

    for release in &plan.releases {
      let tag = release.tag_name();
      self.git.delete_local_tag(&tag)?;
      self.git.delete_remote_tag(&tag)?;
    }

    Ok(())
  }

  /// Create every planned tag at `commit`, then push them in one batch.
  ///
  /// Stops at the first tag that cannot be created. Tags created before the
  /// failure stay in place and nothing is pushed.
  pub fn create_and_push(&self, plan: &ReleasePlan, commit: &str) -> ReleaseResult<Vec<String>> {
    println!();
    println!("🏷️  Creating tags on commit: {}", commit);

    let mut tags = Vec::with_capacity(plan.releases.len());
    for release in &plan.releases {
      let tag = release.tag_name();
      self.git.create_tag(&tag, commit)?;
      println!("   Created tag: {}", tag);
      tags.push(tag);
    }

    println!();
    println!("📤 Pushing tags to {}...", self.git.remote());
    self.git.push_tags(&tags)?;
    println!("   ✅ Tags pushed successfully");

    Ok(tags)
  }
}
