//! Temporary git repositories for testing
//!
//! This module provides a throwaway repository fixture with helpers for
//! building commit graphs, branches, and upstream configuration.

use std::fs;
use std::path::Path;

use anyhow::Result;
use git2::{BranchType, Repository, Signature};
use tempfile::TempDir;

/// A temporary git repository that is deleted on drop.
///
/// The repository starts with `HEAD` pointing at an unborn `main` branch;
/// the first [`commit`](TestRepo::commit) call creates it.
pub struct TestRepo {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl TestRepo {
  /// Create a new empty test repository with user configuration set.
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let repo = Repository::init(temp_dir.path()).expect("Failed to initialize git repository");

    {
      let mut config = repo.config().expect("Failed to get repository config");
      config
        .set_str("user.name", "Branch Status Test User")
        .expect("Failed to set user.name");
      config
        .set_str("user.email", "branch-status-test@example.com")
        .expect("Failed to set user.email");
    }

    // Pin the default branch name regardless of the host git configuration.
    repo
      .set_head("refs/heads/main")
      .expect("Failed to point HEAD at main");

    Self { temp_dir, repo }
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Write `content` to `file_name`, stage it, and commit it on HEAD.
  pub fn commit(&self, file_name: &str, content: &str, message: &str) -> Result<()> {
    fs::write(self.path().join(file_name), content)?;

    let mut index = self.repo.index()?;
    index.add_path(Path::new(file_name))?;
    index.write()?;
    let tree = self.repo.find_tree(index.write_tree()?)?;

    let signature = Signature::now("Branch Status Test User", "branch-status-test@example.com")?;

    // An unborn HEAD means this is the root commit.
    match self.repo.head() {
      Ok(head) => {
        let parent = head.peel_to_commit()?;
        self
          .repo
          .commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?;
      }
      Err(_) => {
        self
          .repo
          .commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?;
      }
    }

    Ok(())
  }

  /// Create branch `name` at `start_point` (default: current HEAD).
  pub fn branch(&self, name: &str, start_point: Option<&str>) -> Result<()> {
    let target = match start_point {
      Some(start) => self
        .repo
        .find_branch(start, BranchType::Local)?
        .into_reference()
        .peel_to_commit()?,
      None => self.repo.head()?.peel_to_commit()?,
    };

    self.repo.branch(name, &target, false)?;
    Ok(())
  }

  /// Check out branch `name` and point HEAD at it.
  pub fn checkout(&self, name: &str) -> Result<()> {
    let commit = self
      .repo
      .revparse_single(&format!("refs/heads/{name}"))?
      .peel_to_commit()?;

    self.repo.checkout_tree(&commit.into_object(), None)?;
    self.repo.set_head(&format!("refs/heads/{name}"))?;

    Ok(())
  }

  /// Configure local branch `upstream` as the upstream of `branch`.
  ///
  /// Uses git's `.` remote, so `%(upstream:short)` resolves to the local
  /// branch name without any network remote being configured.
  pub fn set_upstream(&self, branch: &str, upstream: &str) -> Result<()> {
    let mut config = self.repo.config()?;
    config.set_str(&format!("branch.{branch}.remote"), ".")?;
    config.set_str(&format!("branch.{branch}.merge"), &format!("refs/heads/{upstream}"))?;
    Ok(())
  }
}

impl Default for TestRepo {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_creates_a_git_repo() {
    let repo = TestRepo::new();
    assert!(repo.path().join(".git").exists());
  }

  #[test]
  fn first_commit_creates_main() {
    let repo = TestRepo::new();
    repo.commit("a.txt", "a", "initial").expect("commit failed");

    let head = repo.repo.head().expect("HEAD should exist");
    assert_eq!(head.shorthand(), Some("main"));
  }

  #[test]
  fn set_upstream_writes_branch_config() {
    let repo = TestRepo::new();
    repo.commit("a.txt", "a", "initial").expect("commit failed");
    repo.branch("feature", None).expect("branch failed");
    repo.set_upstream("feature", "main").expect("set_upstream failed");

    let config = repo.repo.config().expect("config should open");
    assert_eq!(
      config.get_string("branch.feature.merge").expect("merge should be set"),
      "refs/heads/main"
    );
    assert_eq!(
      config.get_string("branch.feature.remote").expect("remote should be set"),
      "."
    );
  }
}
