//! Core building blocks for csv-release
//!
//! - **config**: release.toml loading and the built-in tool registry
//! - **error**: error types with contextual help messages
//! - **logging**: tracing subscriber setup
//! - **process**: strict/lenient external command execution
//! - **vcs**: git operations over the process runner

pub mod config;
pub mod error;
pub mod logging;
pub mod process;
pub mod vcs;
