//! Per-section rewrites for advisory text.

use std::sync::LazyLock;

use regex::Regex;

use crate::links::LinkCleaner;

const SECURITY_FIXES: &str = "Security Fix(es):";
const SECURITY_FIXES_REWRITE: &str = "This update fixes the following security issues:";
const SECURITY_DETAILS_PREFIX: &str = "For more details about the security issue";
const SOLUTION_BOILERPLATE: &str = "For details on how to apply this update";
const BUGZILLA_HEADER: &str = "This update fixes the these bugs:";

static BUGZILLA_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Reword the security-fix heading and drop the "more details" pointer.
#[must_use]
pub fn clean_description(content: &str) -> String {
    let content = content.replace(SECURITY_FIXES, SECURITY_FIXES_REWRITE);
    content
        .lines()
        .filter(|line| !line.starts_with(SECURITY_DETAILS_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Flatten links in the solution, joining the boilerplate paragraphs first.
#[must_use]
pub fn clean_solution(content: &str) -> String {
    clean_solution_with(content, &LinkCleaner::default())
}

/// [`clean_solution`] with an explicit link cleaner.
#[must_use]
pub fn clean_solution_with(content: &str, links: &LinkCleaner) -> String {
    if content.starts_with(SOLUTION_BOILERPLATE) {
        links.clean(&content.replace("\n\n", " "))
    } else {
        links.clean(content)
    }
}

/// Bug reference pulled out of a link in the fixes section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugzillaRef {
    pub id: String,
    pub url: String,
}

/// Every `[label](url)` in `content`, left to right.
pub fn bugzilla_refs(content: &str) -> Vec<BugzillaRef> {
    BUGZILLA_LINK_RE
        .captures_iter(content)
        .map(|caps| BugzillaRef {
            id: caps[1].replace(" - ", " "),
            url: caps[2].to_string(),
        })
        .collect()
}

/// Render the fixes section as a plain bug list.
///
/// With no links at all only the header line is returned.
#[must_use]
pub fn clean_bugzillas(content: &str) -> String {
    let lines: Vec<String> = bugzilla_refs(content)
        .into_iter()
        .map(|bz| format!("- {} found at {}", bz.id, bz.url))
        .collect();

    if lines.is_empty() {
        return BUGZILLA_HEADER.to_string();
    }
    format!("{BUGZILLA_HEADER}\n\n{}", lines.join("\n"))
}
