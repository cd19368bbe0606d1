//! CLI commands for csv-release
//!
//! - **versions**: Show each tool's version, tag and workflow (read-only)
//! - **publish**: Recreate and push release tags, then trigger CI workflows
//!
//! Commands receive the repository root and the loaded `ReleaseConfig` from
//! `main` so the registry is read once per process.

pub mod publish;
pub mod versions;

pub use publish::{PublishOptions, run_publish};
pub use versions::run_versions;
