use std::collections::HashMap;
use std::path::Path;

use git2::{Oid, Repository};

use crate::domain::commit::FIELD_SEPARATOR;
use crate::error::Result;
use crate::git::{CommitRange, Vcs};

/// Git-backed implementation of the [Vcs] trait.
///
/// Discovery failure is not an error: a `GitRepository` created outside any
/// repository answers every query with `None`/empty, which the engine
/// resolves to its documented defaults.
pub struct GitRepository {
    repo: Option<Repository>,
}

impl GitRepository {
    /// Discover the repository containing `path` (or any parent directory).
    pub fn discover(path: &Path) -> Self {
        GitRepository {
            repo: Repository::discover(path).ok(),
        }
    }

    /// Commit timestamp of a tag, as a UTC calendar date (`YYYY-MM-DD`).
    ///
    /// Used to scope the pull-request listing; absent when the tag cannot be
    /// resolved.
    pub fn tag_date(&self, tag_name: &str) -> Option<String> {
        let repo = self.repo.as_ref()?;
        let reference = repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .ok()?;
        let commit = reference.peel_to_commit().ok()?;
        let timestamp = chrono::DateTime::from_timestamp(commit.time().seconds(), 0)?;
        Some(timestamp.format("%Y-%m-%d").to_string())
    }

    fn try_last_tag(&self) -> Result<Option<String>> {
        let repo = match self.repo.as_ref() {
            Some(repo) => repo,
            None => return Ok(None),
        };

        let head = repo.head()?.peel_to_commit()?.id();

        // Map tag target OIDs to tag names (handles both lightweight and
        // annotated tags).
        let mut tag_oids: HashMap<Oid, String> = HashMap::new();
        for tag_name in repo.tag_names(None)?.iter().flatten() {
            if let Ok(tag_ref) = repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                if let Ok(tag_obj) = tag_ref.peel(git2::ObjectType::Any) {
                    tag_oids.insert(tag_obj.id(), tag_name.to_string());
                }
            }
        }

        // Walk from HEAD backwards; the first tagged commit is the latest
        // reachable tag.
        let mut revwalk = repo.revwalk()?;
        revwalk.push(head)?;

        for oid in revwalk {
            let oid = match oid {
                Ok(oid) => oid,
                Err(_) => continue,
            };
            if let Some(tag_name) = tag_oids.get(&oid) {
                return Ok(Some(tag_name.clone()));
            }
        }

        Ok(None)
    }

    fn try_commits(&self, range: &CommitRange) -> Result<Vec<String>> {
        let repo = match self.repo.as_ref() {
            Some(repo) => repo,
            None => return Ok(Vec::new()),
        };

        let head = repo.head()?.peel_to_commit()?.id();

        let stop_oid = match range {
            CommitRange::SinceTag(tag_name) => repo
                .find_reference(&format!("refs/tags/{}", tag_name))
                .ok()
                .and_then(|r| r.peel(git2::ObjectType::Any).ok())
                .map(|obj| obj.id()),
            CommitRange::FullHistory => None,
        };

        let mut revwalk = repo.revwalk()?;
        revwalk.push(head)?;

        // Revwalk order from HEAD is newest first, which is the record order
        // the engine expects.
        let mut records = Vec::new();
        for oid in revwalk {
            let oid = oid?;

            if stop_oid == Some(oid) {
                break;
            }

            if let Ok(commit) = repo.find_commit(oid) {
                records.push(encode_record(
                    &oid.to_string(),
                    commit.summary().unwrap_or(""),
                    commit.body().unwrap_or(""),
                ));
            }
        }

        Ok(records)
    }
}

/// Encode one commit as a unit-separator-delimited wire record.
fn encode_record(hash: &str, subject: &str, body: &str) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        hash,
        subject,
        body,
        sep = FIELD_SEPARATOR
    )
}

impl Vcs for GitRepository {
    fn last_tag(&self) -> Option<String> {
        self.try_last_tag().ok().flatten()
    }

    fn commits(&self, range: &CommitRange) -> Vec<String> {
        self.try_commits(range).unwrap_or_default()
    }
}
