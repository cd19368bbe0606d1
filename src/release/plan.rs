//! Release plan: what one run will tag and trigger
//!
//! Built once from the manifests, then walked in registration order by every
//! later stage so the transcript and the tag batch are deterministic.

use serde::Serialize;
use std::path::PathBuf;

/// A tool and the version read from its manifest for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRelease {
  pub tool: String,
  pub manifest: PathBuf,
  pub version: String,
}

impl ToolRelease {
  /// Tag name for this release (`<tool>_v<version>`)
  pub fn tag_name(&self) -> String {
    tag_name(&self.tool, &self.version)
  }

  /// CI workflow file started for this tool (`ci-<tool>.yml`)
  pub fn workflow(&self) -> String {
    workflow_name(&self.tool)
  }
}

pub fn tag_name(tool: &str, version: &str) -> String {
  format!("{}_v{}", tool, version)
}

pub fn workflow_name(tool: &str) -> String {
  format!("ci-{}.yml", tool)
}

/// Everything a release run needs to know before it touches git
#[derive(Debug, Clone)]
pub struct ReleasePlan {
  pub remote: String,
  pub releases: Vec<ToolRelease>,
}

/// JSON view of one plan entry
#[derive(Debug, Serialize)]
struct PlanEntry<'a> {
  tool: &'a str,
  manifest: &'a PathBuf,
  version: &'a str,
  tag: String,
  workflow: String,
}

/// JSON view of the plan
#[derive(Debug, Serialize)]
struct PlanView<'a> {
  remote: &'a str,
  tools: Vec<PlanEntry<'a>>,
}

impl ReleasePlan {
  pub fn new(remote: impl Into<String>, releases: Vec<ToolRelease>) -> Self {
    Self {
      remote: remote.into(),
      releases,
    }
  }

  /// Tag names in release order
  pub fn tag_names(&self) -> Vec<String> {
    self.releases.iter().map(ToolRelease::tag_name).collect()
  }

  /// Render the plan as pretty JSON, including derived tag and workflow names
  pub fn to_json(&self) -> serde_json::Result<String> {
    let view = PlanView {
      remote: &self.remote,
      tools: self
        .releases
        .iter()
        .map(|r| PlanEntry {
          tool: &r.tool,
          manifest: &r.manifest,
          version: &r.version,
          tag: r.tag_name(),
          workflow: r.workflow(),
        })
        .collect(),
    };
    serde_json::to_string_pretty(&view)
  }
}
