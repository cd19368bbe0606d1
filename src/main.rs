mod commands;
mod core;
mod release;
mod ui;

use clap::{Parser, Subcommand};
use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt, print_error};
use std::path::PathBuf;

/// Tag every csv-tools binary at HEAD and trigger its release workflow
#[derive(Parser)]
#[command(name = "csv-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Repository root (manifests, release.toml and git all resolve here)
  #[arg(short = 'C', long = "repo", global = true, value_name = "DIR")]
  repo: Option<PathBuf>,

  /// Print debug diagnostics (every command run) to stderr
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the version, tag and workflow each tool would be released with
  Versions {
    /// Output the release plan in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Delete, recreate and push release tags, then trigger CI workflows
  Publish {
    /// Answer yes to the confirmation prompt
    #[arg(short, long)]
    yes: bool,
    /// Print the commands that would run without running them
    #[arg(long)]
    dry_run: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();
  crate::core::logging::init(cli.verbose);

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn run(cli: Cli) -> ReleaseResult<()> {
  // Load the registry once; every command receives it by reference
  let repo_root = match cli.repo {
    Some(dir) => dir,
    None => std::env::current_dir().context("Failed to get current directory")?,
  };
  let config = ReleaseConfig::load(&repo_root)?;

  match cli.command {
    Commands::Versions { json } => commands::run_versions(&repo_root, &config, json),
    Commands::Publish { yes, dry_run } => commands::run_publish(
      &repo_root,
      &config,
      commands::PublishOptions {
        assume_yes: yes,
        dry_run,
      },
    ),
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code());
}
