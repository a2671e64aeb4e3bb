//! Version compute engine
//!
//! Orchestrates the release decision: resolve the base version, query the
//! commit range, classify, resolve the aggregate bump, and project the base
//! version forward. The engine is pure with respect to process state; all
//! I/O is delegated to the injected [Vcs] and [Manifest] collaborators.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::classifier;
use crate::domain::{resolve, Commit, Version, VersionBump};
use crate::git::{CommitRange, Vcs};
use crate::manifest::Manifest;

/// Why no release is warranted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoReleaseReason {
    /// The queried range contained no commits at all
    NoCommits,
    /// Commits exist but none carried a bump signal
    NoBumpDetected,
}

impl NoReleaseReason {
    /// Reason code used in JSON output and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            NoReleaseReason::NoCommits => "no-commits",
            NoReleaseReason::NoBumpDetected => "no-bump-detected",
        }
    }
}

/// Outcome of one engine invocation.
///
/// `Release` is produced iff at least one analyzed commit carried a
/// non-`none` signal; `commits_analyzed` always reflects the full count of
/// commits in the queried range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputeResult {
    Release {
        base_version: String,
        next_version: String,
        bump: VersionBump,
        commits_analyzed: usize,
    },
    NoRelease {
        base_version: String,
        reason: NoReleaseReason,
        commits_analyzed: usize,
    },
}

impl ComputeResult {
    /// Whether a release is warranted
    pub fn has_release(&self) -> bool {
        matches!(self, ComputeResult::Release { .. })
    }

    /// The base version the decision was made against
    pub fn base_version(&self) -> &str {
        match self {
            ComputeResult::Release { base_version, .. } => base_version,
            ComputeResult::NoRelease { base_version, .. } => base_version,
        }
    }

    /// Count of commits in the queried range
    pub fn commits_analyzed(&self) -> usize {
        match self {
            ComputeResult::Release {
                commits_analyzed, ..
            } => *commits_analyzed,
            ComputeResult::NoRelease {
                commits_analyzed, ..
            } => *commits_analyzed,
        }
    }
}

impl Serialize for ComputeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ComputeResult::Release {
                base_version,
                next_version,
                bump,
                commits_analyzed,
            } => {
                let mut state = serializer.serialize_struct("ComputeResult", 5)?;
                state.serialize_field("hasRelease", &true)?;
                state.serialize_field("baseVersion", base_version)?;
                state.serialize_field("nextVersion", next_version)?;
                state.serialize_field("bump", bump.as_str())?;
                state.serialize_field("commitsAnalyzed", commits_analyzed)?;
                state.end()
            }
            ComputeResult::NoRelease {
                base_version,
                reason,
                commits_analyzed,
            } => {
                let mut state = serializer.serialize_struct("ComputeResult", 4)?;
                state.serialize_field("hasRelease", &false)?;
                state.serialize_field("baseVersion", base_version)?;
                state.serialize_field("reason", reason.as_str())?;
                state.serialize_field("commitsAnalyzed", commits_analyzed)?;
                state.end()
            }
        }
    }
}

/// Deterministic release-decision engine.
///
/// Holds its configuration explicitly; nothing is read from ambient process
/// state, so concurrent invocations against different working directories
/// are independent.
pub struct ComputeEngine {
    preview: bool,
}

impl ComputeEngine {
    /// Create an engine with explicit configuration
    pub fn new(preview: bool) -> Self {
        ComputeEngine { preview }
    }

    /// Whether the caller asked for preview semantics.
    ///
    /// Version computation itself is unaffected; the renderer paths use this
    /// to suppress writes.
    pub fn preview(&self) -> bool {
        self.preview
    }

    /// Commit range for the next release decision
    fn release_range(last_tag: Option<&str>) -> CommitRange {
        match last_tag {
            Some(tag) => CommitRange::SinceTag(tag.to_string()),
            None => CommitRange::FullHistory,
        }
    }

    /// Decoded commits in the current release range, newest first
    pub fn commits<V: Vcs>(&self, vcs: &V) -> Vec<Commit> {
        let last_tag = vcs.last_tag();
        let range = Self::release_range(last_tag.as_deref());

        vcs.commits(&range)
            .iter()
            .map(|record| Commit::decode(record))
            .collect()
    }

    /// Compute the next version decision.
    ///
    /// The base version comes from the latest reachable tag (one leading `v`
    /// stripped), falling back to the manifest version when no tag exists.
    /// Absence conditions resolve to `NoRelease` reason codes, never errors.
    pub fn compute<V: Vcs, M: Manifest>(&self, vcs: &V, manifest: &M) -> ComputeResult {
        let last_tag = vcs.last_tag();

        let base_version = match last_tag.as_deref() {
            Some(tag) => strip_tag_prefix(tag).to_string(),
            None => manifest.version(),
        };

        let range = Self::release_range(last_tag.as_deref());
        let records = vcs.commits(&range);

        if records.is_empty() {
            return ComputeResult::NoRelease {
                base_version,
                reason: NoReleaseReason::NoCommits,
                commits_analyzed: 0,
            };
        }

        let commits: Vec<Commit> = records.iter().map(|record| Commit::decode(record)).collect();
        let aggregate = resolve(commits.iter().map(classifier::classify));

        match aggregate.into_bump() {
            None => ComputeResult::NoRelease {
                base_version,
                reason: NoReleaseReason::NoBumpDetected,
                commits_analyzed: commits.len(),
            },
            Some(bump) => {
                let next_version = Version::parse(&base_version).bump(bump);
                ComputeResult::Release {
                    base_version,
                    next_version: next_version.to_string(),
                    bump,
                    commits_analyzed: commits.len(),
                }
            }
        }
    }
}

/// Strip one leading `v`/`V` from a tag name
fn strip_tag_prefix(tag: &str) -> &str {
    tag.strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockVcs;
    use crate::manifest::MockManifest;

    #[test]
    fn test_base_version_from_tag() {
        let vcs = MockVcs::new()
            .with_tag("v1.4.2")
            .with_commit("a", "chore: x", "");
        let manifest = MockManifest::new("9.9.9");

        let result = ComputeEngine::new(false).compute(&vcs, &manifest);
        assert_eq!(result.base_version(), "1.4.2");
    }

    #[test]
    fn test_base_version_from_manifest_without_tag() {
        let vcs = MockVcs::new().with_commit("a", "chore: x", "");
        let manifest = MockManifest::new("0.3.1");

        let result = ComputeEngine::new(false).compute(&vcs, &manifest);
        assert_eq!(result.base_version(), "0.3.1");
    }

    #[test]
    fn test_no_commits() {
        let vcs = MockVcs::new().with_tag("v1.4.2");
        let result = ComputeEngine::new(false).compute(&vcs, &MockManifest::new("0.0.0"));

        assert_eq!(
            result,
            ComputeResult::NoRelease {
                base_version: "1.4.2".to_string(),
                reason: NoReleaseReason::NoCommits,
                commits_analyzed: 0,
            }
        );
    }

    #[test]
    fn test_no_bump_detected() {
        let mut vcs = MockVcs::new().with_tag("v1.4.2");
        for i in 0..5 {
            vcs = vcs.with_commit(&format!("h{}", i), "chore: routine", "");
        }

        let result = ComputeEngine::new(false).compute(&vcs, &MockManifest::new("0.0.0"));
        assert_eq!(
            result,
            ComputeResult::NoRelease {
                base_version: "1.4.2".to_string(),
                reason: NoReleaseReason::NoBumpDetected,
                commits_analyzed: 5,
            }
        );
    }

    #[test]
    fn test_release_minor() {
        let vcs = MockVcs::new()
            .with_tag("v1.4.2")
            .with_commit("a", "feat: a", "")
            .with_commit("b", "fix: b", "")
            .with_commit("c", "chore: c", "");

        let result = ComputeEngine::new(false).compute(&vcs, &MockManifest::new("0.0.0"));
        assert_eq!(
            result,
            ComputeResult::Release {
                base_version: "1.4.2".to_string(),
                next_version: "1.5.0".to_string(),
                bump: VersionBump::Minor,
                commits_analyzed: 3,
            }
        );
    }

    #[test]
    fn test_release_major_from_breaking_body() {
        let vcs = MockVcs::new()
            .with_tag("v1.4.2")
            .with_commit("a", "fix: x", "BREAKING CHANGE: y");

        let result = ComputeEngine::new(false).compute(&vcs, &MockManifest::new("0.0.0"));
        match result {
            ComputeResult::Release {
                next_version, bump, ..
            } => {
                assert_eq!(bump, VersionBump::Major);
                assert_eq!(next_version, "2.0.0");
            }
            other => panic!("expected release, got {:?}", other),
        }
    }

    #[test]
    fn test_determinism() {
        let vcs = MockVcs::new()
            .with_tag("v2.0.0")
            .with_commit("a", "feat: a", "")
            .with_commit("b", "fix: b", "");
        let manifest = MockManifest::new("0.0.0");
        let engine = ComputeEngine::new(false);

        let first = engine.compute(&vcs, &manifest);
        for _ in 0..10 {
            assert_eq!(engine.compute(&vcs, &manifest), first);
        }
    }

    #[test]
    fn test_has_release_iff_non_none_signal() {
        let none_only = MockVcs::new().with_commit("a", "docs: readme", "");
        let result = ComputeEngine::new(false).compute(&none_only, &MockManifest::new("1.0.0"));
        assert!(!result.has_release());

        let with_fix = MockVcs::new()
            .with_commit("a", "docs: readme", "")
            .with_commit("b", "fix: bug", "");
        let result = ComputeEngine::new(false).compute(&with_fix, &MockManifest::new("1.0.0"));
        assert!(result.has_release());
    }

    #[test]
    fn test_commits_analyzed_always_full_count() {
        let vcs = MockVcs::new()
            .with_commit("a", "docs: readme", "")
            .with_commit("b", "style: fmt", "");
        let result = ComputeEngine::new(false).compute(&vcs, &MockManifest::new("1.0.0"));
        assert_eq!(result.commits_analyzed(), 2);
    }

    #[test]
    fn test_commits_helper_decodes_range() {
        let vcs = MockVcs::new()
            .with_tag("v1.0.0")
            .with_commit("a", "feat: x", "body");

        let commits = ComputeEngine::new(false).commits(&vcs);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].subject, "feat: x");
    }

    #[test]
    fn test_json_shape_release() {
        let result = ComputeResult::Release {
            base_version: "1.4.2".to_string(),
            next_version: "1.5.0".to_string(),
            bump: VersionBump::Minor,
            commits_analyzed: 3,
        };

        let json: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(json["hasRelease"], serde_json::json!(true));
        assert_eq!(json["baseVersion"], serde_json::json!("1.4.2"));
        assert_eq!(json["nextVersion"], serde_json::json!("1.5.0"));
        assert_eq!(json["bump"], serde_json::json!("minor"));
        assert_eq!(json["commitsAnalyzed"], serde_json::json!(3));
    }

    #[test]
    fn test_json_shape_no_release() {
        let result = ComputeResult::NoRelease {
            base_version: "1.4.2".to_string(),
            reason: NoReleaseReason::NoCommits,
            commits_analyzed: 0,
        };

        let json: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(json["hasRelease"], serde_json::json!(false));
        assert_eq!(json["reason"], serde_json::json!("no-commits"));
        assert_eq!(json["commitsAnalyzed"], serde_json::json!(0));
        assert!(json.get("nextVersion").is_none());
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(NoReleaseReason::NoCommits.as_str(), "no-commits");
        assert_eq!(NoReleaseReason::NoBumpDetected.as_str(), "no-bump-detected");
    }

    #[test]
    fn test_strip_tag_prefix() {
        assert_eq!(strip_tag_prefix("v1.2.3"), "1.2.3");
        assert_eq!(strip_tag_prefix("V1.2.3"), "1.2.3");
        assert_eq!(strip_tag_prefix("1.2.3"), "1.2.3");
    }
}
