//! Integration tests for `csv-release publish`

use crate::helpers::{TestRepo, git, run_csv_release, run_csv_release_with_input};
use anyhow::Result;

fn tags_at(tags: &[(String, String)], commit: &str) -> Vec<String> {
  tags
    .iter()
    .filter(|(_, sha)| sha == commit)
    .map(|(tag, _)| tag.clone())
    .collect()
}

#[test]
fn test_publish_tags_pushes_and_triggers() -> Result<()> {
  let repo = TestRepo::new(&[("a", "1.0.0"), ("b", "2.3.1")])?;
  let head = repo.head()?;

  let output = run_csv_release(&repo.path, &["publish", "--yes"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(tags_at(&repo.remote_tags()?, &head), vec!["a_v1.0.0", "b_v2.3.1"]);
  assert_eq!(tags_at(&repo.local_tags()?, &head), vec!["a_v1.0.0", "b_v2.3.1"]);
  assert_eq!(
    repo.workflow_calls()?,
    vec![
      "workflow run ci-a.yml --ref a_v1.0.0",
      "workflow run ci-b.yml --ref b_v2.3.1",
    ]
  );
  assert!(stdout.contains("Created workflow_dispatch event for ci-a.yml at a_v1.0.0"));
  assert!(stdout.contains("https://github.com/faradayio/csv-tools/actions"));

  Ok(())
}

#[test]
fn test_publish_twice_is_idempotent_for_tags() -> Result<()> {
  let repo = TestRepo::new(&[("a", "1.0.0"), ("b", "2.3.1")])?;
  let head = repo.head()?;

  run_csv_release(&repo.path, &["publish", "--yes"])?;
  let first = repo.remote_tags()?;

  run_csv_release(&repo.path, &["publish", "--yes"])?;
  let second = repo.remote_tags()?;

  assert_eq!(first, second);
  assert_eq!(tags_at(&second, &head).len(), 2);
  // Workflow triggers are not deduplicated across runs
  assert_eq!(repo.workflow_calls()?.len(), 4);

  Ok(())
}

#[test]
fn test_publish_moves_existing_tag_to_head() -> Result<()> {
  let repo = TestRepo::new(&[("a", "1.0.0")])?;
  let old = repo.head()?;
  git(&repo.path, &["tag", "a_v1.0.0", &old])?;
  git(&repo.path, &["push", "origin", "a_v1.0.0"])?;

  std::fs::write(repo.path.join("README.md"), "fix docs\n")?;
  let new = repo.commit("Fix docs")?;
  assert_ne!(old, new);

  run_csv_release(&repo.path, &["publish", "--yes"])?;

  assert_eq!(repo.remote_tags()?, vec![("a_v1.0.0".to_string(), new.clone())]);
  assert_eq!(repo.local_tags()?, vec![("a_v1.0.0".to_string(), new)]);
  Ok(())
}

#[test]
fn test_publish_declined_changes_nothing() -> Result<()> {
  let repo = TestRepo::new(&[("a", "1.0.0"), ("b", "2.3.1")])?;

  let output = run_csv_release_with_input(&repo.path, &["publish"], "n\n")?;

  assert_eq!(output.status.code(), Some(0));
  assert!(String::from_utf8_lossy(&output.stdout).contains("Aborted."));
  assert!(repo.local_tags()?.is_empty());
  assert!(repo.remote_tags()?.is_empty());
  assert!(repo.workflow_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_publish_empty_answer_declines() -> Result<()> {
  let repo = TestRepo::new(&[("a", "1.0.0")])?;

  let output = run_csv_release_with_input(&repo.path, &["publish"], "")?;

  assert_eq!(output.status.code(), Some(0));
  assert!(repo.remote_tags()?.is_empty());
  Ok(())
}

#[test]
fn test_publish_accepts_uppercase_yes() -> Result<()> {
  let repo = TestRepo::new(&[("a", "1.0.0")])?;

  let output = run_csv_release_with_input(&repo.path, &["publish"], "YES\n")?;

  assert_eq!(output.status.code(), Some(0));
  assert_eq!(repo.remote_tags()?.len(), 1);
  Ok(())
}

#[test]
fn test_missing_version_aborts_before_any_tag_change() -> Result<()> {
  let repo = TestRepo::new(&[("a", "1.0.0"), ("b", "2.3.1")])?;
  let head = repo.head()?;
  git(&repo.path, &["tag", "a_v1.0.0", &head])?;
  repo.write_manifest("b", "[package]\nname = \"b\"\n")?;

  let output = run_csv_release_with_input(&repo.path, &["publish", "--yes"], "")?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Could not find version"), "stderr: {stderr}");
  // Pre-existing tag untouched, nothing pushed or triggered
  assert_eq!(repo.local_tags()?, vec![("a_v1.0.0".to_string(), head)]);
  assert!(repo.remote_tags()?.is_empty());
  assert!(repo.workflow_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_workflow_failure_keeps_pushed_tags() -> Result<()> {
  let repo = TestRepo::with_failing_workflow(&[("a", "1.0.0"), ("b", "2.3.1"), ("c", "0.1.0")], Some("ci-b.yml"))?;

  let output = run_csv_release_with_input(&repo.path, &["publish", "--yes"], "")?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("workflow run ci-b.yml --ref b_v2.3.1"), "stderr: {stderr}");
  assert!(stderr.contains("HTTP 404"), "stderr: {stderr}");

  assert_eq!(repo.remote_tags()?.len(), 3);
  assert_eq!(
    repo.workflow_calls()?,
    vec![
      "workflow run ci-a.yml --ref a_v1.0.0",
      "workflow run ci-b.yml --ref b_v2.3.1",
    ]
  );
  Ok(())
}

#[test]
fn test_dry_run_prints_commands_only() -> Result<()> {
  let repo = TestRepo::new(&[("a", "1.0.0"), ("b", "2.3.1")])?;
  let head = repo.head()?;

  let output = run_csv_release(&repo.path, &["publish", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains(&format!("git tag a_v1.0.0 {}", head)), "stdout: {stdout}");
  assert!(stdout.contains("git push origin a_v1.0.0 b_v2.3.1"), "stdout: {stdout}");
  assert!(stdout.contains("workflow run ci-b.yml --ref b_v2.3.1"), "stdout: {stdout}");
  assert!(repo.local_tags()?.is_empty());
  assert!(repo.remote_tags()?.is_empty());
  assert!(repo.workflow_calls()?.is_empty());
  Ok(())
}
