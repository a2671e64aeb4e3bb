//! Release notes renderer
//!
//! Lists the pull requests merged since the last release and appends a
//! compare-link footer. Pull-request retrieval is an external collaborator
//! (the `gh` CLI); a failed listing degrades to an empty one.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use crate::error::Result;

/// One merged pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub url: String,
}

/// Source of merged pull requests for the release-notes renderer.
///
/// `since` is a calendar date (`YYYY-MM-DD`, typically the last tag's commit
/// date); `None` lists all merged pull requests.
pub trait PullRequestSource {
    fn merged_since(&self, since: Option<&str>) -> Vec<PullRequest>;
}

#[derive(Debug, Deserialize)]
struct GhPullRequest {
    number: u64,
    title: String,
    url: String,
    author: GhAuthor,
}

#[derive(Debug, Deserialize)]
struct GhAuthor {
    login: String,
}

/// [PullRequestSource] backed by the `gh` CLI.
///
/// Invokes `gh pr list --state merged --json ...`; any spawn, exit, or parse
/// failure yields an empty listing.
pub struct GhCli {
    cwd: PathBuf,
}

impl GhCli {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        GhCli { cwd: cwd.into() }
    }

    fn try_merged_since(&self, since: Option<&str>) -> Option<Vec<PullRequest>> {
        let mut command = Command::new("gh");
        command
            .current_dir(&self.cwd)
            .args(["pr", "list", "--state", "merged", "--limit", "200"])
            .args(["--json", "number,title,url,author"]);

        if let Some(date) = since {
            let search = format!("merged:>={}", date);
            command.args(["--search", search.as_str()]);
        }

        let output = command.output().ok()?;
        if !output.status.success() {
            return None;
        }

        let listed: Vec<GhPullRequest> = serde_json::from_slice(&output.stdout).ok()?;
        Some(
            listed
                .into_iter()
                .map(|pr| PullRequest {
                    number: pr.number,
                    title: pr.title,
                    author: pr.author.login,
                    url: pr.url,
                })
                .collect(),
        )
    }
}

impl PullRequestSource for GhCli {
    fn merged_since(&self, since: Option<&str>) -> Vec<PullRequest> {
        self.try_merged_since(since).unwrap_or_default()
    }
}

/// Scripted [PullRequestSource] for tests
#[derive(Debug, Default)]
pub struct MockPullRequests {
    pull_requests: Vec<PullRequest>,
}

impl MockPullRequests {
    pub fn new() -> Self {
        MockPullRequests::default()
    }

    pub fn with_pull_request(
        mut self,
        number: u64,
        title: &str,
        author: &str,
        url: &str,
    ) -> Self {
        self.pull_requests.push(PullRequest {
            number,
            title: title.to_string(),
            author: author.to_string(),
            url: url.to_string(),
        });
        self
    }
}

impl PullRequestSource for MockPullRequests {
    fn merged_since(&self, _since: Option<&str>) -> Vec<PullRequest> {
        self.pull_requests.clone()
    }
}

/// Compare link between two release tags, when a repository URL is known
pub fn compare_link(
    repository: Option<&str>,
    tag_prefix: &str,
    base_version: &str,
    next_version: &str,
) -> Option<String> {
    let repository = repository?;
    Some(format!(
        "{}/compare/{prefix}{}...{prefix}{}",
        repository.trim_end_matches('/'),
        base_version,
        next_version,
        prefix = tag_prefix
    ))
}

/// Render the release-notes document for one version.
pub fn render(version: &str, pull_requests: &[PullRequest], compare: Option<&str>) -> String {
    let mut output = String::new();
    _ = writeln!(output, "## {}\n", version);
    _ = writeln!(output, "### What's Changed\n");

    if pull_requests.is_empty() {
        _ = writeln!(output, "No merged pull requests since the last release.");
    } else {
        for pr in pull_requests {
            _ = writeln!(output, "- {} by @{} in {}", pr.title, pr.author, pr.url);
        }
    }

    if let Some(link) = compare {
        _ = writeln!(output, "\n**Full Changelog**: {}", link);
    }

    output
}

/// Write the rendered notes document to disk
pub fn write_to_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
