//! Error types for csv-release with contextual messages and exit codes
//!
//! Every failure in a release run is fatal: it is printed once to stderr
//! (with a help hint when one applies) and the process exits with code 1.
//! Best-effort commands never produce one of these errors for a non-zero exit.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit code for any failed run
///
/// Success, operator abort and dry runs all exit 0.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Main error type for csv-release
#[derive(Debug)]
pub enum ReleaseError {
  /// A tool manifest could not be read or has no version
  Manifest(ManifestError),

  /// release.toml is malformed or invalid
  Config(ConfigError),

  /// An external command failed (strict mode) or could not be spawned
  Command(CommandError),

  /// I/O errors (stdin prompt, working directory)
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: format!("{}: {}", ctx_str, err),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the process exit code for this error
  pub fn exit_code(&self) -> i32 {
    FAILURE_EXIT_CODE
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Manifest(e) => e.help_message(),
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Command(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      ReleaseError::Io(_) => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Manifest(e) => write!(f, "{}", e),
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Command(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      ReleaseError::Command(CommandError::Spawn { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<ManifestError> for ReleaseError {
  fn from(err: ManifestError) -> Self {
    ReleaseError::Manifest(err)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<CommandError> for ReleaseError {
  fn from(err: CommandError) -> Self {
    ReleaseError::Command(err)
  }
}

/// Tool manifest errors (always raised before any tag is touched)
#[derive(Debug)]
pub enum ManifestError {
  /// Manifest missing, unreadable, or not valid TOML
  Parse { path: PathBuf, reason: String },

  /// No string at `package.version`
  MissingVersionField { path: PathBuf },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::Parse { .. } => {
        Some("Run from the repository root, or pass `-C <dir>` pointing at it.".to_string())
      }
      ManifestError::MissingVersionField { .. } => Some(
        "Add a literal `version = \"x.y.z\"` under [package]; inherited workspace versions cannot be tagged."
          .to_string(),
      ),
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::Parse { path, reason } => {
        write!(f, "Failed to parse manifest {}: {}", path.display(), reason)
      }
      ManifestError::MissingVersionField { path } => {
        write!(f, "Could not find version in {}", path.display())
      }
    }
  }
}

/// Configuration (release.toml) errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file unreadable or malformed
  Parse { path: PathBuf, reason: String },

  /// No tools registered
  EmptyRegistry,

  /// Tool entry with a bad name or manifest path
  InvalidTool { name: String, reason: String },

  /// The same tool name registered twice
  DuplicateTool { name: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::EmptyRegistry => Some("Add at least one [[tools]] entry, or drop the key to use the defaults.".to_string()),
      ConfigError::DuplicateTool { name } => Some(format!("Remove the second [[tools]] entry named '{}'.", name)),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Parse { path, reason } => {
        write!(f, "Failed to load config from {}: {}", path.display(), reason)
      }
      ConfigError::EmptyRegistry => write!(f, "No tools registered for release"),
      ConfigError::InvalidTool { name, reason } => write!(f, "Invalid tool '{}': {}", name, reason),
      ConfigError::DuplicateTool { name } => write!(f, "Tool '{}' is registered more than once", name),
    }
  }
}

/// External command errors
#[derive(Debug)]
pub enum CommandError {
  /// Command ran and exited non-zero
  Failed {
    command: String,
    code: Option<i32>,
    stderr: String,
  },

  /// Program could not be started at all
  Spawn { command: String, source: io::Error },
}

impl CommandError {
  fn help_message(&self) -> Option<String> {
    match self {
      CommandError::Failed { command, stderr, .. } => {
        if stderr.contains("already exists") && command.starts_with("git tag") {
          Some("A tag with this name already exists locally. Delete it with `git tag -d <tag>` and re-run.".to_string())
        } else if command.starts_with("git push") && (stderr.contains("Permission denied") || stderr.contains("403")) {
          Some("Check your push access to the remote.".to_string())
        } else if stderr.contains("gh auth login") || stderr.contains("authentication") {
          Some("Authenticate the GitHub CLI with `gh auth login`.".to_string())
        } else if command.contains("workflow run") {
          Some(
            "Tags are already pushed. Trigger the remaining workflows by hand; re-running may build a tool twice."
              .to_string(),
          )
        } else {
          None
        }
      }
      CommandError::Spawn { command, .. } => {
        let program = command.split_whitespace().next().unwrap_or_default();
        Some(format!("Make sure `{}` is installed and on PATH.", program))
      }
    }
  }
}

impl fmt::Display for CommandError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CommandError::Failed { command, code, stderr } => {
        write!(f, "Error running command: {}", command)?;
        if let Some(code) = code {
          write!(f, " (exit code {})", code)?;
        }
        write!(f, "\nstderr: {}", stderr.trim_end())
      }
      CommandError::Spawn { command, source } => {
        write!(f, "Failed to start command: {}: {}", command, source)
      }
    }
  }
}

/// Result type alias for csv-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
