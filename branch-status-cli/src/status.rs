//! # Branch Divergence Records
//!
//! The data model for branch comparison results and the total orderings
//! used to sort the output table.

use std::cmp::Ordering;

use clap::ValueEnum;

/// Commit-count divergence between a local branch and its comparison ref.
///
/// `left_count` is the number of commits reachable from `left` but not from
/// `right`; `right_count` is the reverse. A record is built once by the
/// comparator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStatus {
  /// Short name of the local branch.
  pub left: String,
  /// Short name of the ref the branch was compared against.
  pub right: String,
  /// Commits on `left` that are not on `right`.
  pub left_count: usize,
  /// Commits on `right` that are not on `left`.
  pub right_count: usize,
}

impl BranchStatus {
  /// Whether the branch has not diverged from its comparison ref in either
  /// direction.
  pub const fn is_even(&self) -> bool {
    self.left_count == 0 && self.right_count == 0
  }
}

/// Orderings available for the output table.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
  /// Sort by branch name.
  #[default]
  Name,
  /// Sort by the number of commits only on the branch.
  Left,
  /// Sort by the number of commits only on the comparison ref.
  Right,
}

impl SortMode {
  /// Compare two records under this mode.
  ///
  /// Each mode is a strict total order: the primary key is followed by a
  /// fixed tie-break chain, so two distinct records only compare equal when
  /// every keyed field matches.
  ///
  /// - `name`: branch name, then left count, then right count.
  /// - `left`: left count, then right count, then branch name.
  /// - `right`: right count, then left count, then branch name.
  pub fn compare(self, a: &BranchStatus, b: &BranchStatus) -> Ordering {
    match self {
      SortMode::Name => a
        .left
        .cmp(&b.left)
        .then_with(|| a.left_count.cmp(&b.left_count))
        .then_with(|| a.right_count.cmp(&b.right_count)),
      SortMode::Left => a
        .left_count
        .cmp(&b.left_count)
        .then_with(|| a.right_count.cmp(&b.right_count))
        .then_with(|| a.left.cmp(&b.left)),
      SortMode::Right => a
        .right_count
        .cmp(&b.right_count)
        .then_with(|| a.left_count.cmp(&b.left_count))
        .then_with(|| a.left.cmp(&b.left)),
    }
  }
}

/// Sort records in place under the given mode.
pub fn sort_statuses(statuses: &mut [BranchStatus], mode: SortMode) {
  statuses.sort_by(|a, b| mode.compare(a, b));
}
