//! Version-control abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control
//! backend, allowing for multiple implementations including real Git
//! repositories and mock implementations for testing.
//!
//! The primary abstraction is the [Vcs] trait. Absence and failure are
//! modelled as absent/empty return values rather than errors: "no tag" and
//! "no repository" are expected, common outcomes for the compute engine, not
//! exceptional ones. The `Result`-based plumbing stays inside the concrete
//! implementations.
//!
//! Implementations:
//!
//! - [repository::GitRepository]: a real implementation using the `git2` crate
//! - [mock::MockVcs]: a scripted in-memory implementation for tests

pub mod mock;
pub mod repository;

pub use mock::MockVcs;
pub use repository::GitRepository;

use std::fmt;

/// Commit range queried for a release decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRange {
    /// Commits after the named tag, up to HEAD
    SinceTag(String),
    /// The full history reachable from HEAD
    FullHistory,
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitRange::SinceTag(tag) => write!(f, "{}..HEAD", tag),
            CommitRange::FullHistory => write!(f, "HEAD"),
        }
    }
}

/// Version-control operations consumed by the compute engine.
///
/// Each record returned by [Vcs::commits] is one commit encoded as
/// `hash\x1fsubject\x1fbody` (unit-separator-delimited, fixed arity 3);
/// decoding is the job of [crate::domain::Commit::decode].
///
/// ```
/// use autover::git::{CommitRange, MockVcs, Vcs};
///
/// let vcs = MockVcs::new().with_tag("v1.0.0");
/// assert_eq!(vcs.last_tag().as_deref(), Some("v1.0.0"));
/// assert!(vcs.commits(&CommitRange::FullHistory).is_empty());
/// ```
pub trait Vcs {
    /// Latest tag reachable from HEAD.
    ///
    /// Returns `None` when no tag exists or no repository is present.
    fn last_tag(&self) -> Option<String>;

    /// Raw commit records in the given range, newest first.
    ///
    /// Returns an empty vector when the range has no commits or the backend
    /// fails; the engine treats both the same way.
    fn commits(&self, range: &CommitRange) -> Vec<String>;
}
