//! Publish command: the full release run
//!
//! Stages run strictly in order and never loop back:
//!
//! ```text
//! ReadVersions -> Confirm -> ResolveCommit -> DeleteTags
//!   -> CreateAndPushTags -> TriggerWorkflows -> Done
//! ```
//!
//! Any error ends the run where it happened. Nothing already done is undone:
//! tags created or pushed and workflows started by earlier steps stay in place.
//! Re-running is safe for tags (they are deleted and recreated) but will start
//! workflows again.

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::core::process::{CommandRunner, SystemRunner};
use crate::core::vcs::SystemGit;
use crate::release::{ReleasePlan, TagManager, WorkflowTrigger, read_versions};
use crate::ui::{AssumeYes, Confirm, StdinPrompt};
use std::fmt;
use std::path::Path;

const RULE_WIDTH: usize = 60;

/// Orchestrator stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  ReadVersions,
  Confirm,
  ResolveCommit,
  DeleteTags,
  CreateAndPushTags,
  TriggerWorkflows,
  Done,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Stage::ReadVersions => "read-versions",
      Stage::Confirm => "confirm",
      Stage::ResolveCommit => "resolve-commit",
      Stage::DeleteTags => "delete-tags",
      Stage::CreateAndPushTags => "create-and-push-tags",
      Stage::TriggerWorkflows => "trigger-workflows",
      Stage::Done => "done",
    };
    f.write_str(name)
  }
}

fn enter(stage: Stage) {
  tracing::debug!(%stage, "entering stage");
}

/// How a run that did not fail ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
  /// Tags pushed and every workflow triggered
  Released { commit: String, tags: Vec<String> },
  /// Operator declined the prompt; nothing was touched
  Aborted,
  /// Commands printed, nothing executed
  DryRun,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PublishOptions {
  /// Skip the confirmation prompt
  pub assume_yes: bool,
  /// Print the commands instead of running them
  pub dry_run: bool,
}

/// Run the publish command against the real git and CI clients
pub fn run_publish(repo_root: &Path, config: &ReleaseConfig, options: PublishOptions) -> ReleaseResult<()> {
  let runner = SystemRunner::new(repo_root);

  let outcome = if options.assume_yes {
    publish(config, repo_root, &runner, &mut AssumeYes, options.dry_run)?
  } else {
    publish(config, repo_root, &runner, &mut StdinPrompt::stdin(), options.dry_run)?
  };

  if let PublishOutcome::Released { commit, tags } = outcome {
    tracing::debug!(%commit, ?tags, "release complete");
  }

  Ok(())
}

/// Drive one release run
pub fn publish<R: CommandRunner, C: Confirm>(
  config: &ReleaseConfig,
  repo_root: &Path,
  runner: &R,
  confirm: &mut C,
  dry_run: bool,
) -> ReleaseResult<PublishOutcome> {
  print_banner("CSV-Tools Release");

  enter(Stage::ReadVersions);
  let plan = ReleasePlan::new(&config.remote, read_versions(config, repo_root)?);
  print_versions(&plan);

  let git = SystemGit::new(runner, &config.remote);
  let trigger = WorkflowTrigger::new(runner, &config.ci_program);

  if dry_run {
    let commit = git.head_commit()?;
    print_dry_run(&plan, &git, &trigger, &commit);
    return Ok(PublishOutcome::DryRun);
  }

  println!();
  println!("This will:");
  println!("  1. Delete existing tags (if any)");
  println!("  2. Create new tags on the current commit");
  println!("  3. Push tags to {}", config.remote);
  println!("  4. Trigger GitHub Actions workflows to build and release");

  enter(Stage::Confirm);
  if !confirm.confirm("Proceed with release?")? {
    println!("Aborted.");
    return Ok(PublishOutcome::Aborted);
  }

  enter(Stage::ResolveCommit);
  let commit = git.head_commit()?;

  let tags = TagManager::new(&git);

  enter(Stage::DeleteTags);
  tags.delete_existing(&plan)?;

  enter(Stage::CreateAndPushTags);
  let pushed = tags.create_and_push(&plan, &commit)?;

  enter(Stage::TriggerWorkflows);
  trigger.trigger_all(&plan)?;

  enter(Stage::Done);
  print_summary(config);

  Ok(PublishOutcome::Released { commit, tags: pushed })
}

fn print_banner(title: &str) {
  println!("{}", "=".repeat(RULE_WIDTH));
  println!("{}", title);
  println!("{}", "=".repeat(RULE_WIDTH));
}

fn print_versions(plan: &ReleasePlan) {
  println!();
  println!("📦 Current versions from Cargo.toml files:");
  for release in &plan.releases {
    println!("  {:12} v{}", release.tool, release.version);
  }
}

fn print_dry_run<R: CommandRunner>(plan: &ReleasePlan, git: &SystemGit<'_, R>, trigger: &WorkflowTrigger<'_, R>, commit: &str) {
  println!();
  println!("🔍 Dry-run mode (no changes applied). HEAD is {}", commit);
  println!();
  println!("Would run:");
  for release in &plan.releases {
    let tag = release.tag_name();
    println!("  {}   # may fail, ignored", git.delete_local_tag_cmd(&tag));
    println!("  {}   # may fail, ignored", git.delete_remote_tag_cmd(&tag));
  }
  for release in &plan.releases {
    println!("  {}", git.create_tag_cmd(&release.tag_name(), commit));
  }
  println!("  {}", git.push_tags_cmd(&plan.tag_names()));
  for release in &plan.releases {
    println!("  {}", trigger.trigger_cmd(release));
  }
}

fn print_summary(config: &ReleaseConfig) {
  println!();
  println!("{}", "=".repeat(RULE_WIDTH));
  println!("✅ Done! Release workflows triggered.");
  println!("{}", "=".repeat(RULE_WIDTH));
  println!();
  println!("Check progress at:");
  println!("  {}", config.dashboard_url);
  println!();
  println!("Each workflow will:");
  println!("  1. Build binaries for all platforms");
  println!("  2. Create a GitHub release");
  println!("  3. Upload the binaries to the release");
}
