//! Versions command: show what a release would tag, without touching git

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::release::{ReleasePlan, read_versions};
use std::path::Path;

/// Run the versions command
pub fn run_versions(repo_root: &Path, config: &ReleaseConfig, json: bool) -> ReleaseResult<()> {
  let plan = ReleasePlan::new(&config.remote, read_versions(config, repo_root)?);

  if json {
    println!("{}", plan.to_json()?);
  } else {
    print_plan(&plan);
  }

  Ok(())
}

fn print_plan(plan: &ReleasePlan) {
  println!("📦 Release versions");
  println!();

  let width = plan.releases.iter().map(|r| r.tool.len()).max().unwrap_or(0).max(12);
  for release in &plan.releases {
    println!(
      "  {:width$} v{:<12} tag {:<24} workflow {}",
      release.tool,
      release.version,
      release.tag_name(),
      release.workflow(),
      width = width
    );
  }

  println!();
  println!("To release:");
  println!("  csv-release publish");
}
