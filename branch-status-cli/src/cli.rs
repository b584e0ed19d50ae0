//! # Command Line Interface
//!
//! Defines the CLI surface for git-branch-status and drives the
//! enumerate → compare → render pipeline.

use anyhow::Result;
use clap::{ArgAction, Parser};

use crate::git;
use crate::status::SortMode;
use crate::table;

/// Top-level CLI command for git-branch-status
#[derive(Parser)]
#[command(name = "git-branch-status")]
#[command(about = "Show how far each local branch has diverged from its upstream")]
#[command(
  long_about = "Show, for every local branch, how many commits it is ahead of and behind\n\
        its configured upstream. With a ref argument, every branch is compared\n\
        against that ref instead. Branches with no upstream are skipped unless a\n\
        ref argument is given.\n\n\
        Install on your PATH as git-branch-status and git will also run it as\n\
        `git branch-status`."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
pub struct Cli {
  /// Ref to compare every branch against instead of its configured upstream
  pub compare_ref: Option<String>,

  /// How to sort branches
  #[arg(
    long,
    value_enum,
    default_value_t = SortMode::Name,
    long_help = "How to sort branches (name | left | right)\n\n\
             name: Sort by name of branch (left side branch)\n\
             left: Sort by number of commits in left branch and not right\n\
             right: Sort by number of commits in right branch and not left"
  )]
  pub sort: SortMode,

  /// Show all branches including branches with no commit differences
  #[arg(short = 'a', long = "all")]
  pub show_all: bool,

  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,
}

/// Immutable configuration handed to the pipeline stages.
///
/// Carried as an explicit value rather than process-wide state so each stage
/// stays independently testable.
#[derive(Debug, Clone)]
pub struct Options {
  /// Override ref every branch is compared against; `None` means each
  /// branch's configured upstream.
  pub compare_ref: Option<String>,
  /// Ordering of the output table.
  pub sort: SortMode,
  /// Keep branches with zero divergence in both directions.
  pub show_all: bool,
}

impl Cli {
  /// Extract the pipeline configuration from the parsed arguments.
  pub fn options(&self) -> Options {
    Options {
      compare_ref: self.compare_ref.clone(),
      sort: self.sort,
      show_all: self.show_all,
    }
  }
}

/// Run the full pipeline: enumerate branches, count divergence per pair,
/// render the table on stdout.
pub fn handle_cli(cli: Cli) -> Result<()> {
  let options = cli.options();
  let statuses = git::collect_statuses(&options)?;
  print!("{}", table::render(statuses, options.sort, options.show_all));
  Ok(())
}
