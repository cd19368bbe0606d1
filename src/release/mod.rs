//! Release building blocks
//!
//! # Core Invariants
//!
//! 1. **Versions come from manifests, verbatim**
//!    - Every registered tool must yield a `package.version` string
//!    - Any manifest error aborts the run before a single tag is touched
//!
//! 2. **One commit, one batch**
//!    - Every tool is tagged `<tool>_v<version>` at the same HEAD commit
//!    - All new tags reach the remote in a single `git push`
//!
//! 3. **Registration order everywhere**
//!    - Deletion, creation, push and workflow triggers walk the tools in the
//!      order they are registered, so the transcript is reproducible
//!
//! # Example
//!
//! tools `a = 1.0.0`, `b = 2.3.1`, HEAD `abc123`:
//!
//! ```text
//! git tag a_v1.0.0 abc123
//! git tag b_v2.3.1 abc123
//! git push origin a_v1.0.0 b_v2.3.1
//! gh workflow run ci-a.yml --ref a_v1.0.0
//! gh workflow run ci-b.yml --ref b_v2.3.1
//! ```

pub mod manifest;
pub mod plan;
pub mod tags;
pub mod workflows;

pub use manifest::read_versions;
pub use plan::{ReleasePlan, ToolRelease};
pub use tags::TagManager;
pub use workflows::WorkflowTrigger;
