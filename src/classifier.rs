//! Commit classification - maps one commit to a bump signal and a
//! changelog category.
//!
//! Classification is total: any string input resolves to a signal, never an
//! error. Ambiguous or unrecognized subjects resolve to `BumpSignal::None`.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{BumpSignal, Commit};

/// Closed set of commit types recognized in conventional headers.
const KNOWN_TYPES: &[&str] = &[
    "feat", "fix", "refactor", "docs", "chore", "style", "test", "build", "perf", "ci", "cleanup",
    "remove",
];

/// Changelog category for a single commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Breaking,
    Feat,
    Fix,
    Refactor,
    Chore,
    Docs,
    Style,
    Test,
    Build,
    Perf,
    Ci,
    Raw,
    Cleanup,
    Remove,
}

impl Category {
    /// Fixed display order for changelog subsections
    pub const DISPLAY_ORDER: [Category; 14] = [
        Category::Breaking,
        Category::Feat,
        Category::Fix,
        Category::Refactor,
        Category::Chore,
        Category::Docs,
        Category::Style,
        Category::Test,
        Category::Build,
        Category::Perf,
        Category::Ci,
        Category::Raw,
        Category::Cleanup,
        Category::Remove,
    ];

    /// Subsection heading used in the rendered changelog
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Breaking => "Breaking Changes",
            Category::Feat => "Features",
            Category::Fix => "Bug Fixes",
            Category::Refactor => "Refactoring",
            Category::Chore => "Chores",
            Category::Docs => "Documentation",
            Category::Style => "Styling",
            Category::Test => "Tests",
            Category::Build => "Build",
            Category::Perf => "Performance",
            Category::Ci => "CI",
            Category::Raw => "Other",
            Category::Cleanup => "Cleanup",
            Category::Remove => "Removed",
        }
    }

    fn from_type(commit_type: &str) -> Option<Category> {
        match commit_type {
            "feat" => Some(Category::Feat),
            "fix" => Some(Category::Fix),
            "refactor" => Some(Category::Refactor),
            "chore" => Some(Category::Chore),
            "docs" => Some(Category::Docs),
            "style" => Some(Category::Style),
            "test" => Some(Category::Test),
            "build" => Some(Category::Build),
            "perf" => Some(Category::Perf),
            "ci" => Some(Category::Ci),
            "cleanup" => Some(Category::Cleanup),
            "remove" => Some(Category::Remove),
            _ => None,
        }
    }
}

/// Structural conventional-commit header match
struct Header {
    /// Lowercased type token
    commit_type: String,
    /// Trailing `!` before the colon
    bang: bool,
}

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([A-Za-z]+)(\([^)]*\))?(!)?:").unwrap())
}

fn revert_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^revert\b").unwrap())
}

/// Match a cleaned subject against the conventional header shape.
///
/// Any alphabetic type token counts as a structural match; whether the type
/// belongs to the closed set is decided by the caller. Scope content is free
/// text and ignored.
fn match_header(subject: &str) -> Option<Header> {
    let captures = header_pattern().captures(subject)?;
    let commit_type = captures.get(1)?.as_str().to_lowercase();
    let bang = captures.get(3).is_some();

    Some(Header { commit_type, bang })
}

/// Strip at most one leading marker block from a subject.
///
/// A marker is either a colon-delimited shortcode token (`:word:`) or a
/// leading run of Unicode emoji characters, followed by optional whitespace.
/// Text after the first block is left intact even if it also looks like a
/// marker.
pub fn strip_marker(subject: &str) -> &str {
    if let Some(rest) = strip_shortcode(subject) {
        return rest.trim_start();
    }
    if let Some(rest) = strip_emoji_run(subject) {
        return rest.trim_start();
    }
    subject
}

fn strip_shortcode(subject: &str) -> Option<&str> {
    let after_colon = subject.strip_prefix(':')?;
    let end = after_colon.find(':')?;
    let token = &after_colon[..end];

    if token.is_empty()
        || !token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'))
    {
        return None;
    }

    Some(&after_colon[end + 1..])
}

fn strip_emoji_run(subject: &str) -> Option<&str> {
    let first = subject.chars().next()?;
    if !is_emoji_char(first) {
        return None;
    }

    let mut end = 0;
    for c in subject.chars() {
        if is_emoji_char(c) || is_emoji_modifier(c) {
            end += c.len_utf8();
        } else {
            break;
        }
    }

    Some(&subject[end..])
}

/// Checks if a character falls in the common emoji blocks.
fn is_emoji_char(c: char) -> bool {
    let code = c as u32;
    (0x1F300..=0x1F9FF).contains(&code) // pictographs, emoticons, transport
        || (0x1FA70..=0x1FAFF).contains(&code) // symbols extended-A
        || (0x2600..=0x26FF).contains(&code) // misc symbols
        || (0x2700..=0x27BF).contains(&code) // dingbats
        || (0x2300..=0x23FF).contains(&code) // misc technical
        || code == 0x2B50 // star
        || code == 0x2714 // check mark
        || code == 0x2716 // x mark
}

/// Checks if a character extends an emoji (variation selector, ZWJ, skin tone).
fn is_emoji_modifier(c: char) -> bool {
    let code = c as u32;
    code == 0xFE0F
        || code == 0xFE0E
        || code == 0x200D
        || (0x1F3FB..=0x1F3FF).contains(&code)
}

fn body_has_breaking_marker(body: &str) -> bool {
    body.to_uppercase().contains("BREAKING CHANGE")
}

/// Classify one commit into a bump signal.
///
/// Reverts never drive a bump, breaking markers always force a major bump,
/// and anything outside the recognized header shape resolves to `None`.
pub fn classify(commit: &Commit) -> BumpSignal {
    let subject = strip_marker(&commit.subject);

    if revert_pattern().is_match(subject) {
        return BumpSignal::None;
    }

    let header = match_header(subject);
    let bang = header.as_ref().map_or(false, |h| h.bang);

    if body_has_breaking_marker(&commit.body) || bang {
        return BumpSignal::Major;
    }

    match header {
        Some(h) if KNOWN_TYPES.contains(&h.commit_type.as_str()) => match h.commit_type.as_str() {
            "feat" => BumpSignal::Minor,
            "fix" => BumpSignal::Patch,
            _ => BumpSignal::None,
        },
        _ => BumpSignal::None,
    }
}

/// Map one commit to its changelog category.
///
/// Breaking commits land under `Breaking`; recognized types map to their own
/// subsection; everything else (reverts included) is kept under `Raw`.
pub fn categorize(commit: &Commit) -> Category {
    let subject = strip_marker(&commit.subject);
    let header = match_header(subject);
    let bang = header.as_ref().map_or(false, |h| h.bang);

    if body_has_breaking_marker(&commit.body) || bang {
        return Category::Breaking;
    }

    header
        .and_then(|h| Category::from_type(&h.commit_type))
        .unwrap_or(Category::Raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(subject: &str) -> Commit {
        Commit::new("abc123", subject, "")
    }

    fn commit_with_body(subject: &str, body: &str) -> Commit {
        Commit::new("abc123", subject, body)
    }

    #[test]
    fn test_classify_feat() {
        assert_eq!(classify(&commit("feat: add login")), BumpSignal::Minor);
    }

    #[test]
    fn test_classify_fix() {
        assert_eq!(classify(&commit("fix: null check")), BumpSignal::Patch);
    }

    #[test]
    fn test_classify_with_scope() {
        assert_eq!(
            classify(&commit("feat(auth): add oauth")),
            BumpSignal::Minor
        );
        assert_eq!(classify(&commit("fix(ui): alignment")), BumpSignal::Patch);
    }

    #[test]
    fn test_classify_case_insensitive_type() {
        assert_eq!(classify(&commit("FEAT: shouting")), BumpSignal::Minor);
        assert_eq!(classify(&commit("Fix: quiet")), BumpSignal::Patch);
    }

    #[test]
    fn test_classify_neutral_types() {
        for subject in [
            "chore: update deps",
            "docs: readme",
            "style: fmt",
            "test: add cases",
            "build: bump toolchain",
            "perf: cache",
            "ci: matrix",
            "refactor: extract module",
            "cleanup: tidy imports",
            "remove: drop legacy flag",
        ] {
            assert_eq!(classify(&commit(subject)), BumpSignal::None, "{}", subject);
        }
    }

    #[test]
    fn test_classify_unknown_type() {
        assert_eq!(classify(&commit("wip: half done")), BumpSignal::None);
        assert_eq!(classify(&commit("Update readme")), BumpSignal::None);
    }

    #[test]
    fn test_classify_breaking_bang() {
        assert_eq!(classify(&commit("feat!: redesign")), BumpSignal::Major);
        assert_eq!(
            classify(&commit("fix(api)!: drop field")),
            BumpSignal::Major
        );
    }

    #[test]
    fn test_classify_breaking_bang_unknown_type() {
        // The bang fires even when the type is outside the closed set.
        assert_eq!(classify(&commit("wip!: rewrite")), BumpSignal::Major);
    }

    #[test]
    fn test_classify_breaking_body_overrides_fix() {
        let c = commit_with_body("fix: x", "BREAKING CHANGE: y");
        assert_eq!(classify(&c), BumpSignal::Major);
    }

    #[test]
    fn test_classify_breaking_body_case_insensitive() {
        let c = commit_with_body("chore: x", "breaking change: renamed field");
        assert_eq!(classify(&c), BumpSignal::Major);
    }

    #[test]
    fn test_classify_revert_suppression() {
        assert_eq!(
            classify(&commit("revert: feat: add thing")),
            BumpSignal::None
        );
        assert_eq!(
            classify(&commit("Revert \"feat: add thing\"")),
            BumpSignal::None
        );
    }

    #[test]
    fn test_classify_revert_beats_breaking_body() {
        let c = commit_with_body("revert: feat!: x", "BREAKING CHANGE: y");
        assert_eq!(classify(&c), BumpSignal::None);
    }

    #[test]
    fn test_classify_revert_word_boundary() {
        // "reverted"/"reverts" are whole different words
        assert_eq!(classify(&commit("fix: reverted logic")), BumpSignal::Patch);
    }

    #[test]
    fn test_shortcode_prefix_stripped() {
        assert_eq!(
            classify(&commit(":sparkles: feat: add x")),
            BumpSignal::Minor
        );
    }

    #[test]
    fn test_emoji_prefix_stripped() {
        assert_eq!(classify(&commit("\u{1F680} feat: add x")), BumpSignal::Minor);
    }

    #[test]
    fn test_emoji_run_stripped() {
        assert_eq!(
            classify(&commit("\u{1F680}\u{1F525} fix: hot path")),
            BumpSignal::Patch
        );
    }

    #[test]
    fn test_emoji_with_variation_selector() {
        assert_eq!(
            classify(&commit("\u{26A0}\u{FE0F} fix: warning path")),
            BumpSignal::Patch
        );
    }

    #[test]
    fn test_only_one_marker_block_stripped() {
        // After the shortcode is stripped the remaining text still starts
        // with a marker, which stays intact and defeats the header match.
        assert_eq!(
            classify(&commit(":sparkles: :fire: feat: x")),
            BumpSignal::None
        );
    }

    #[test]
    fn test_marker_equivalence() {
        let plain = classify(&commit("feat: add x"));
        assert_eq!(classify(&commit(":sparkles: feat: add x")), plain);
        assert_eq!(classify(&commit("\u{1F680} feat: add x")), plain);
    }

    #[test]
    fn test_strip_marker_leaves_plain_subjects() {
        assert_eq!(strip_marker("feat: add x"), "feat: add x");
        assert_eq!(strip_marker(": not a shortcode"), ": not a shortcode");
        assert_eq!(strip_marker(""), "");
    }

    #[test]
    fn test_categorize_known_types() {
        assert_eq!(categorize(&commit("feat: x")), Category::Feat);
        assert_eq!(categorize(&commit("fix: x")), Category::Fix);
        assert_eq!(categorize(&commit("chore: x")), Category::Chore);
        assert_eq!(categorize(&commit("remove: x")), Category::Remove);
    }

    #[test]
    fn test_categorize_breaking() {
        assert_eq!(categorize(&commit("feat!: x")), Category::Breaking);
        let c = commit_with_body("fix: x", "BREAKING CHANGE: y");
        assert_eq!(categorize(&c), Category::Breaking);
    }

    #[test]
    fn test_categorize_raw() {
        assert_eq!(categorize(&commit("random text")), Category::Raw);
        assert_eq!(categorize(&commit("revert: feat: x")), Category::Raw);
        assert_eq!(categorize(&commit("wip: thing")), Category::Raw);
    }

    #[test]
    fn test_display_order_covers_all_categories() {
        assert_eq!(Category::DISPLAY_ORDER.len(), 14);
        assert_eq!(Category::DISPLAY_ORDER[0], Category::Breaking);
        assert_eq!(Category::DISPLAY_ORDER[11], Category::Raw);
    }
}
