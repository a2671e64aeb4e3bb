/// Field separator used in raw commit records (ASCII unit separator).
///
/// The version-control collaborator emits one record per commit in the form
/// `hash\x1fsubject\x1fbody`; this is the wire format between commit
/// retrieval and classification.
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// A single commit as seen by the classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub subject: String,
    pub body: String,
}

impl Commit {
    /// Create a commit from its parts
    pub fn new(
        hash: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Commit {
            hash: hash.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Decode one unit-separator-delimited record into a commit.
    ///
    /// The record has a fixed arity of three fields (hash, subject, body);
    /// missing trailing fields default to the empty string. Extra separators
    /// beyond the third field are kept as part of the body.
    pub fn decode(record: &str) -> Self {
        let mut fields = record.splitn(3, FIELD_SEPARATOR);
        let hash = fields.next().unwrap_or_default();
        let subject = fields.next().unwrap_or_default();
        let body = fields.next().unwrap_or_default();

        Commit::new(hash, subject, body)
    }
}
