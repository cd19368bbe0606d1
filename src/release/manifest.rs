//! Version lookup in tool manifests
//!
//! Reads `package.version` out of each registered Cargo.toml. The value is
//! taken verbatim; it is never parsed as semver.

use crate::core::config::ReleaseConfig;
use crate::core::error::{ManifestError, ReleaseResult};
use crate::release::plan::ToolRelease;
use std::fs;
use std::path::Path;

/// Read the `[package] version` string from a manifest
pub fn read_version(manifest_path: &Path) -> ReleaseResult<String> {
  let content = fs::read_to_string(manifest_path).map_err(|e| ManifestError::Parse {
    path: manifest_path.to_path_buf(),
    reason: e.to_string(),
  })?;

  let doc: toml_edit::DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| ManifestError::Parse {
    path: manifest_path.to_path_buf(),
    reason: e.to_string().trim_end().to_string(),
  })?;

  let version = doc
    .get("package")
    .and_then(|package| package.get("version"))
    .and_then(|version| version.as_str())
    .ok_or_else(|| ManifestError::MissingVersionField {
      path: manifest_path.to_path_buf(),
    })?;

  Ok(version.to_string())
}

/// Read the version of every registered tool, in registration order.
///
/// Stops at the first manifest that fails; nothing partial is returned.
pub fn read_versions(config: &ReleaseConfig, repo_root: &Path) -> ReleaseResult<Vec<ToolRelease>> {
  config
    .tools
    .iter()
    .map(|tool| -> ReleaseResult<ToolRelease> {
      let version = read_version(&repo_root.join(&tool.manifest))?;
      tracing::debug!(tool = %tool.name, %version, "read manifest version");
      Ok(ToolRelease {
        tool: tool.name.clone(),
        manifest: tool.manifest.clone(),
        version,
      })
    })
    .collect()
}
