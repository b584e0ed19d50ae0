//! # git-branch-status Library
//!
//! Library modules backing the `git-branch-status` binary: the CLI surface,
//! the git sub-process plumbing that enumerates branches and counts
//! divergent commits, and the table renderer.

pub mod cli;
pub mod git;
pub mod status;
pub mod table;
