//! Integration tests for csv-release
//!
//! Each test builds a throwaway git repository with a local bare `origin`
//! and drives the compiled binary against it.

mod helpers;

#[cfg(unix)]
mod test_publish;
