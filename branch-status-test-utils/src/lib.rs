//! Test utilities for the branch-status workspace
//!
//! Provides temporary git repositories with deterministic branch and
//! upstream layouts for integration tests.
//!
//! The dead_code lint is disabled because test utilities may not be used by
//! every test, and the compiler cannot detect usage across crate boundaries
//! in development dependencies.

#![allow(dead_code)]

pub mod git;

pub use git::TestRepo;
