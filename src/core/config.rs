use crate::core::error::{ConfigError, ReleaseResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Tools released from the csv-tools monorepo, in release order
pub const DEFAULT_TOOLS: [(&str, &str); 5] = [
  ("catcsv", "catcsv/Cargo.toml"),
  ("fixed2csv", "fixed2csv/Cargo.toml"),
  ("geochunk", "geochunk/Cargo.toml"),
  ("hashcsv", "hashcsv/Cargo.toml"),
  ("scrubcsv", "scrubcsv/Cargo.toml"),
];

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_CI_PROGRAM: &str = "gh";
pub const DEFAULT_DASHBOARD_URL: &str = "https://github.com/faradayio/csv-tools/actions";

/// Release configuration
/// Searched in order: release.toml, .release.toml, .config/release.toml.
/// Every key is optional; a missing file means the compiled-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseConfig {
  /// Remote that receives the tags
  #[serde(default = "default_remote")]
  pub remote: String,

  /// CI-control executable used to start workflows
  #[serde(default = "default_ci_program")]
  pub ci_program: String,

  /// Where operators watch the triggered workflows
  #[serde(default = "default_dashboard_url")]
  pub dashboard_url: String,

  /// Registered tools; order is the release order
  #[serde(default = "default_tools")]
  pub tools: Vec<ToolConfig>,
}

/// One releasable tool: its name and the manifest holding its version
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolConfig {
  pub name: String,
  /// Path to Cargo.toml, relative to the repository root
  pub manifest: PathBuf,
}

fn default_remote() -> String {
  DEFAULT_REMOTE.to_string()
}

fn default_ci_program() -> String {
  DEFAULT_CI_PROGRAM.to_string()
}

fn default_dashboard_url() -> String {
  DEFAULT_DASHBOARD_URL.to_string()
}

fn default_tools() -> Vec<ToolConfig> {
  DEFAULT_TOOLS
    .iter()
    .map(|(name, manifest)| ToolConfig {
      name: name.to_string(),
      manifest: PathBuf::from(manifest),
    })
    .collect()
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      remote: default_remote(),
      ci_program: default_ci_program(),
      dashboard_url: default_dashboard_url(),
      tools: default_tools(),
    }
  }
}

impl ReleaseConfig {
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load release.toml from the repository root, falling back to defaults
  pub fn load(repo_root: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(repo_root) else {
      tracing::debug!(root = %repo_root.display(), "no release.toml found, using built-in tool registry");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Parse {
      path: config_path.clone(),
      reason: e.to_string(),
    })?;

    let config = Self::parse(&content).map_err(|reason| ConfigError::Parse {
      path: config_path.clone(),
      reason,
    })?;

    config.validate()?;
    tracing::debug!(path = %config_path.display(), tools = config.tools.len(), "loaded release config");

    Ok(config)
  }

  fn parse(content: &str) -> Result<Self, String> {
    toml_edit::de::from_str(content).map_err(|e| e.to_string().trim_end().to_string())
  }

  /// Check the tool registry is usable
  pub fn validate(&self) -> ReleaseResult<()> {
    if self.tools.is_empty() {
      return Err(ConfigError::EmptyRegistry.into());
    }

    let mut seen = HashSet::new();
    for tool in &self.tools {
      if tool.name.is_empty() || tool.name.chars().any(char::is_whitespace) {
        return Err(
          ConfigError::InvalidTool {
            name: tool.name.clone(),
            reason: "name must be non-empty and contain no whitespace".to_string(),
          }
          .into(),
        );
      }

      if tool.manifest.as_os_str().is_empty() {
        return Err(
          ConfigError::InvalidTool {
            name: tool.name.clone(),
            reason: "manifest path is empty".to_string(),
          }
          .into(),
        );
      }

      if !seen.insert(tool.name.as_str()) {
        return Err(ConfigError::DuplicateTool { name: tool.name.clone() }.into());
      }
    }

    Ok(())
  }
}
