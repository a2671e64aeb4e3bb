//! Changelog renderer
//!
//! Renders one `##`-headed section per released version, with category
//! subsections in a fixed display order. The renderer consumes commits the
//! classifier already categorized; the bump decision itself always comes
//! from the engine.

use std::collections::HashMap;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use crate::classifier::{self, Category};
use crate::domain::Commit;
use crate::error::Result;

/// Group commits by changelog category
fn group_by_category(commits: &[Commit]) -> HashMap<Category, Vec<&Commit>> {
    let mut groups: HashMap<Category, Vec<&Commit>> = HashMap::new();

    for commit in commits {
        groups
            .entry(classifier::categorize(commit))
            .or_default()
            .push(commit);
    }

    groups
}

/// One entry line: cleaned subject plus a short hash when available
fn entry_line(commit: &Commit) -> String {
    let subject = classifier::strip_marker(&commit.subject);

    if commit.hash.is_empty() {
        format!("- {}", subject)
    } else {
        let short = &commit.hash[..7.min(commit.hash.len())];
        format!("- {} ({})", subject, short)
    }
}

/// Render the changelog section for one version.
///
/// Subsections appear in [Category::DISPLAY_ORDER]; categories with no
/// commits are omitted. Entries keep the order the commits were supplied in
/// (newest first).
pub fn render_section(version: &str, commits: &[Commit]) -> String {
    let mut output = String::new();
    _ = writeln!(output, "## {}\n", version);

    let groups = group_by_category(commits);

    for category in Category::DISPLAY_ORDER {
        if let Some(commits) = groups.get(&category) {
            _ = writeln!(output, "### {}\n", category.heading());

            for commit in commits {
                _ = writeln!(output, "{}", entry_line(commit));
            }

            output.push('\n');
        }
    }

    output
}

/// Insert a new version section into an existing changelog document.
///
/// The new section lands directly above the previous one, below the document
/// title; an empty document gets the title first.
pub fn update_document(existing: &str, section: &str, title: &str) -> String {
    if existing.trim().is_empty() {
        return format!("# {}\n\n{}", title, section);
    }

    match existing.find("\n## ") {
        Some(idx) => {
            let (head, tail) = existing.split_at(idx + 1);
            format!("{}{}{}", head, section, tail)
        }
        None => format!("{}\n\n{}", existing.trim_end(), section),
    }
}

/// Render the section for `version` and prepend it into the changelog file.
///
/// A missing file is treated as an empty document; other I/O failures
/// propagate to the CLI boundary.
pub fn apply_to_file(
    path: &Path,
    title: &str,
    version: &str,
    commits: &[Commit],
) -> Result<String> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let section = render_section(version, commits);
    let updated = update_document(&existing, &section, title);
    fs::write(path, &updated)?;

    Ok(updated)
}
