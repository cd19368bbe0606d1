//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A tools monorepo with a local bare `origin` and a recording stand-in for `gh`
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
  pub origin: PathBuf,
  pub gh_log: PathBuf,
}

impl TestRepo {
  /// Create a repo with one `<tool>/Cargo.toml` per entry, committed on main
  pub fn new(tools: &[(&str, &str)]) -> Result<Self> {
    Self::with_failing_workflow(tools, None)
  }

  /// Same as `new`, but the fake `gh` exits 1 for the named workflow file
  pub fn with_failing_workflow(tools: &[(&str, &str)], failing_workflow: Option<&str>) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("work");
    let origin = root.path().join("origin.git");
    let gh_log = root.path().join("gh.log");
    std::fs::create_dir_all(&path)?;

    git(root.path(), &["init", "--bare", "--initial-branch=main", "origin.git"])?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "tag.gpgSign", "false"])?;
    git(&path, &["remote", "add", "origin", &origin.to_string_lossy()])?;

    let gh = write_fake_gh(root.path(), &gh_log, failing_workflow)?;

    let repo = Self {
      _root: root,
      path,
      origin,
      gh_log,
    };

    let mut release_toml = format!("remote = \"origin\"\nci_program = '{}'\n", gh.display());
    for (tool, version) in tools {
      repo.write_manifest(tool, &format!("[package]\nname = \"{}\"\nversion = \"{}\"\n", tool, version))?;
      release_toml.push_str(&format!(
        "\n[[tools]]\nname = \"{}\"\nmanifest = \"{}/Cargo.toml\"\n",
        tool, tool
      ));
    }
    std::fs::write(repo.path.join("release.toml"), release_toml)?;

    repo.commit("Initial tools")?;
    git(&repo.path, &["push", "origin", "main"])?;

    Ok(repo)
  }

  /// Overwrite `<tool>/Cargo.toml`
  pub fn write_manifest(&self, tool: &str, content: &str) -> Result<()> {
    let dir = self.path.join(tool);
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("Cargo.toml"), content)?;
    Ok(())
  }

  /// Commit current changes, returning the new HEAD
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    self.head()
  }

  pub fn head(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// `(tag, commit)` pairs in the working repo
  pub fn local_tags(&self) -> Result<Vec<(String, String)>> {
    list_tags(&self.path)
  }

  /// `(tag, commit)` pairs on the bare origin
  pub fn remote_tags(&self) -> Result<Vec<(String, String)>> {
    list_tags(&self.origin)
  }

  /// Argument lines the fake `gh` was called with, in order
  pub fn workflow_calls(&self) -> Result<Vec<String>> {
    if !self.gh_log.exists() {
      return Ok(Vec::new());
    }
    Ok(
      std::fs::read_to_string(&self.gh_log)?
        .lines()
        .map(String::from)
        .collect(),
    )
  }
}

fn list_tags(repo: &Path) -> Result<Vec<(String, String)>> {
  let output = git(
    repo,
    &["for-each-ref", "--format=%(refname:short) %(objectname)", "refs/tags"],
  )?;
  Ok(
    String::from_utf8_lossy(&output.stdout)
      .lines()
      .filter_map(|line| line.split_once(' '))
      .map(|(tag, sha)| (tag.to_string(), sha.to_string()))
      .collect(),
  )
}

/// Shell script standing in for `gh`: logs its arguments, optionally fails one workflow
#[cfg(unix)]
fn write_fake_gh(dir: &Path, log: &Path, failing_workflow: Option<&str>) -> Result<PathBuf> {
  use std::os::unix::fs::PermissionsExt;

  let script = dir.join("fake-gh");
  let fail = failing_workflow.unwrap_or("");
  std::fs::write(
    &script,
    format!(
      r#"#!/bin/sh
echo "$*" >> '{log}'
if [ "$3" = '{fail}' ]; then
  echo "HTTP 404: workflow $3 not found" >&2
  exit 1
fi
echo "Created workflow_dispatch event for $3 at $5"
"#,
      log = log.display(),
      fail = fail,
    ),
  )?;
  std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;

  Ok(script)
}

#[cfg(not(unix))]
fn write_fake_gh(_dir: &Path, _log: &Path, _failing_workflow: Option<&str>) -> Result<PathBuf> {
  Ok(PathBuf::from("gh"))
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run csv-release, feeding `stdin`, and return its output whatever the exit status
pub fn run_csv_release_with_input(cwd: &Path, args: &[&str], stdin: &str) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_csv-release");

  let mut child = Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .context("Failed to run csv-release")?;

  // The binary may exit before reading (pre-flight errors, --yes), so a
  // broken pipe here is not a test failure.
  if let Some(mut input) = child.stdin.take() {
    let _ = input.write_all(stdin.as_bytes());
  }

  Ok(child.wait_with_output()?)
}

/// Run csv-release and fail the test if it exits non-zero
pub fn run_csv_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_csv_release_with_input(cwd, args, "")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "csv-release command failed: csv-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
