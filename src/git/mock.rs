use crate::domain::commit::FIELD_SEPARATOR;
use crate::git::{CommitRange, Vcs};

/// Scripted in-memory [Vcs] for testing without a real repository
#[derive(Debug, Default)]
pub struct MockVcs {
    tag: Option<String>,
    records: Vec<String>,
}

impl MockVcs {
    /// Create an empty mock with no tag and no commits
    pub fn new() -> Self {
        MockVcs::default()
    }

    /// Set the latest reachable tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Append one commit, encoded into the wire record format
    pub fn with_commit(mut self, hash: &str, subject: &str, body: &str) -> Self {
        self.records.push(format!(
            "{}{sep}{}{sep}{}",
            hash,
            subject,
            body,
            sep = FIELD_SEPARATOR
        ));
        self
    }

    /// Append one pre-encoded raw record verbatim
    pub fn with_record(mut self, record: impl Into<String>) -> Self {
        self.records.push(record.into());
        self
    }
}

impl Vcs for MockVcs {
    fn last_tag(&self) -> Option<String> {
        self.tag.clone()
    }

    fn commits(&self, _range: &CommitRange) -> Vec<String> {
        self.records.clone()
    }
}
