//! # Git Plumbing
//!
//! Spawns the two git sub-processes the tool is built on: `for-each-ref` to
//! enumerate local branches paired with their upstreams, and `rev-list
//! --left-right` to count the divergent commits of each pair. Output is
//! streamed line by line, and any line that does not match the expected
//! shape aborts the whole run; a partial table would be misleading.

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, ensure};
use thiserror::Error;
use tracing::debug;

use crate::cli::Options;
use crate::status::BranchStatus;

/// Platform-specific Git executable name
#[cfg(windows)]
pub const GIT_EXECUTABLE: &str = "git.exe";

/// Platform-specific Git executable name
#[cfg(not(windows))]
pub const GIT_EXECUTABLE: &str = "git";

/// A line from one of the git sub-processes that does not match the shape
/// this tool relies on.
#[derive(Debug, Error)]
pub enum PlumbingError {
  /// `for-each-ref` printed something other than one or two fields.
  #[error("unexpected ref line: {0:?}")]
  UnexpectedRefLine(String),
  /// `rev-list --left-right` printed a line without a `<` or `>` marker.
  #[error("unexpected revision line: {0:?}")]
  UnexpectedRevLine(String),
}

/// Classification of a `rev-list --left-right` output line by its leading
/// marker character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevLine {
  /// Commit reachable only from the left ref (`<` marker).
  Left,
  /// Commit reachable only from the right ref (`>` marker).
  Right,
  /// Any other leading character, including an empty line.
  Unexpected,
}

impl RevLine {
  /// Classify a raw `rev-list --left-right` output line.
  pub const fn classify(line: &str) -> Self {
    match line.as_bytes().first() {
      Some(&b'<') => RevLine::Left,
      Some(&b'>') => RevLine::Right,
      _ => RevLine::Unexpected,
    }
  }
}

/// Parse one `for-each-ref` line into a (branch, comparison ref) pair.
///
/// A single field means the branch has no upstream and no override ref was
/// given; such branches are skipped. Any field count other than one or two
/// is an error.
fn parse_ref_line(line: &str) -> Result<Option<(String, String)>, PlumbingError> {
  let fields: Vec<&str> = line.split_whitespace().collect();
  match fields.as_slice() {
    [_] => Ok(None),
    [left, right] => Ok(Some(((*left).to_string(), (*right).to_string()))),
    _ => Err(PlumbingError::UnexpectedRefLine(line.to_string())),
  }
}

/// Enumerate every local branch with its comparison ref and count the
/// divergence of each pair.
///
/// Runs `git for-each-ref` over `refs/heads`, asking for each branch's short
/// name followed by either its configured upstream or the override ref from
/// the command line. Each pair is handed to [`compare_refs`] synchronously,
/// one sub-process at a time. The child's stderr is inherited so git's own
/// diagnostics pass through untouched.
pub fn collect_statuses(options: &Options) -> Result<Vec<BranchStatus>> {
  let right = match &options.compare_ref {
    Some(compare_ref) => compare_ref.as_str(),
    None => "%(upstream:short)",
  };
  let format = format!("--format=%(refname:short) {right}");

  let mut child = Command::new(GIT_EXECUTABLE)
    .args(["for-each-ref", &format, "refs/heads"])
    .stdout(Stdio::piped())
    .stderr(Stdio::inherit())
    .spawn()
    .context("failed to run git for-each-ref")?;
  let stdout = child
    .stdout
    .take()
    .context("failed to capture git for-each-ref output")?;

  let mut statuses = Vec::new();
  for line in BufReader::new(stdout).lines() {
    let line = line.context("failed to read git for-each-ref output")?;
    if let Some((left, right)) = parse_ref_line(&line)? {
      statuses.push(compare_refs(&left, &right)?);
    }
  }

  let exit = child.wait().context("failed to wait for git for-each-ref")?;
  ensure!(exit.success(), "git for-each-ref failed with {exit}");

  Ok(statuses)
}

/// Count the commits on each side of the symmetric difference
/// `left...right`.
///
/// Runs `git rev-list --left-right`, which prints one commit per line
/// prefixed with `<` or `>` depending on which ref it is reachable from.
pub fn compare_refs(left: &str, right: &str) -> Result<BranchStatus> {
  debug!("comparing {left}...{right}");

  let range = format!("{left}...{right}");
  let mut child = Command::new(GIT_EXECUTABLE)
    .args(["rev-list", "--left-right", &range, "--"])
    .stdout(Stdio::piped())
    .stderr(Stdio::inherit())
    .spawn()
    .context("failed to run git rev-list")?;
  let stdout = child
    .stdout
    .take()
    .context("failed to capture git rev-list output")?;

  let mut status = BranchStatus {
    left: left.to_string(),
    right: right.to_string(),
    left_count: 0,
    right_count: 0,
  };
  for line in BufReader::new(stdout).lines() {
    let line = line.context("failed to read git rev-list output")?;
    match RevLine::classify(&line) {
      RevLine::Left => status.left_count += 1,
      RevLine::Right => status.right_count += 1,
      RevLine::Unexpected => return Err(PlumbingError::UnexpectedRevLine(line).into()),
    }
  }

  let exit = child.wait().context("failed to wait for git rev-list")?;
  ensure!(exit.success(), "git rev-list failed with {exit}");

  Ok(status)
}
