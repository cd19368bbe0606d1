//! Terminal interaction

pub mod prompt;

pub use prompt::{AssumeYes, Confirm, StdinPrompt};
