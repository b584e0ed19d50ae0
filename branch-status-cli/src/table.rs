//! # Table Rendering
//!
//! Filters, sorts, and lays out branch divergence records as the aligned
//! table printed on stdout.

use unicode_width::UnicodeWidthStr;

use crate::status::{BranchStatus, SortMode, sort_statuses};

/// Render the divergence table.
///
/// Unless `show_all` is set, branches that are even with their comparison
/// ref are dropped; every pair was still compared, the filter is
/// presentation only. The kept records are sorted under `mode` and each row
/// is laid out as the branch name left-justified to the widest kept name, a
/// right-justified left count (width 5), a literal `|`, a left-justified
/// right count (width 5), then the comparison ref. The layout is stable
/// byte-for-byte so downstream consumers can rely on fixed columns.
pub fn render(statuses: Vec<BranchStatus>, mode: SortMode, show_all: bool) -> String {
  let mut kept: Vec<BranchStatus> = if show_all {
    statuses
  } else {
    statuses.into_iter().filter(|s| !s.is_even()).collect()
  };
  sort_statuses(&mut kept, mode);

  // Column width is the maximum display width among kept records only.
  let name_width = kept.iter().map(|s| s.left.width()).max().unwrap_or(0);

  let mut out = String::new();
  for status in &kept {
    out.push_str(&status.left);
    out.push_str(&" ".repeat(name_width - status.left.width()));
    out.push_str(&format!(
      " {:>5}|{:<5} {}\n",
      status.left_count, status.right_count, status.right
    ));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn status(left: &str, left_count: usize, right_count: usize) -> BranchStatus {
    BranchStatus {
      left: left.to_string(),
      right: "origin/main".to_string(),
      left_count,
      right_count,
    }
  }

  #[test]
  fn renders_exact_column_layout() {
    let statuses = vec![status("main", 0, 0), status("feature", 3, 1)];

    let out = render(statuses, SortMode::Name, false);
    assert_eq!(out, "feature     3|1     origin/main\n");
  }

  #[test]
  fn show_all_keeps_even_branches() {
    let statuses = vec![status("main", 0, 0), status("feature", 3, 1)];

    let out = render(statuses, SortMode::Name, true);
    assert_eq!(
      out,
      "feature     3|1     origin/main\n\
       main        0|0     origin/main\n"
    );
  }

  #[test]
  fn even_branches_never_appear_by_default() {
    let statuses = vec![status("a", 0, 0), status("b", 0, 1), status("c", 0, 0)];

    let out = render(statuses, SortMode::Name, false);
    assert!(!out.contains("a "));
    assert!(!out.contains("c "));
    assert_eq!(out, "b     0|1     origin/main\n");
  }

  #[test]
  fn column_width_ignores_filtered_records() {
    // The long branch name is even with its upstream and dropped, so it must
    // not widen the name column.
    let statuses = vec![status("extremely-long-branch-name", 0, 0), status("ab", 2, 0)];

    let out = render(statuses, SortMode::Name, false);
    assert_eq!(out, "ab     2|0     origin/main\n");
  }

  #[test]
  fn counts_wider_than_the_column_shift_the_row() {
    let statuses = vec![status("big", 123456, 7)];

    let out = render(statuses, SortMode::Name, false);
    assert_eq!(out, "big 123456|7     origin/main\n");
  }

  #[test]
  fn empty_input_renders_nothing() {
    assert_eq!(render(Vec::new(), SortMode::Name, false), "");
    assert_eq!(render(Vec::new(), SortMode::Name, true), "");
  }

  #[test]
  fn rows_follow_the_requested_sort_mode() {
    let statuses = vec![status("a", 5, 0), status("b", 1, 2), status("c", 3, 1)];

    let out = render(statuses, SortMode::Left, false);
    assert_eq!(
      out,
      "b     1|2     origin/main\n\
       c     3|1     origin/main\n\
       a     5|0     origin/main\n"
    );
  }
}
