//! Flatten markdown links into plain text.
//!
//! Rules run in a fixed order, and the whole set is reapplied until the
//! text stops changing, so cleaned text is already clean:
//! 1. `[label](https://url)` becomes `label (https://url)`
//! 2. `[label][ref]` becomes `label`
//! 3. a `[ref]: https://url` definition line folds onto the text before it
//!    as ` (https://url)`
//! 4. `<https://url>` becomes `https://url` (optional)
//!
//! Only `http` and `https` targets are rewritten by rules 1, 3 and 4.
//! Labels never contain brackets, so an image link nested in a link is
//! flattened from the inside out.

use std::sync::LazyLock;

use regex::Regex;

static INLINE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]\((https?://[^)]+)\)").unwrap());
static REFERENCE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]\[[^\[\]]+\]").unwrap());
static REFERENCE_DEFINITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\[[^\]]+\]:\s*(https?://\S+)").unwrap());
static ANGLE_URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(https?://[^>]+)>").unwrap());

/// Link flattening with a switch for the angle-bracket rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkCleaner {
    pub strip_angle_brackets: bool,
}

impl Default for LinkCleaner {
    fn default() -> Self {
        Self {
            strip_angle_brackets: true,
        }
    }
}

impl LinkCleaner {
    #[must_use]
    pub fn new(strip_angle_brackets: bool) -> Self {
        Self {
            strip_angle_brackets,
        }
    }

    /// Apply the link rules to `content` and trim the result.
    #[must_use]
    pub fn clean(&self, content: &str) -> String {
        let mut cleaned = self.apply_rules(content);
        // Every rewrite shortens the text, so this terminates.
        loop {
            let next = self.apply_rules(&cleaned);
            if next == cleaned {
                return cleaned;
            }
            cleaned = next;
        }
    }

    fn apply_rules(&self, content: &str) -> String {
        let content = INLINE_LINK_RE.replace_all(content, "${1} (${2})");
        let content = REFERENCE_LINK_RE.replace_all(&content, "${1}");
        let content = REFERENCE_DEFINITION_RE.replace_all(&content, " (${1})");

        if self.strip_angle_brackets {
            ANGLE_URL_RE.replace_all(&content, "${1}").trim().to_string()
        } else {
            content.trim().to_string()
        }
    }
}

/// Flatten links with the default rules (angle brackets stripped).
#[must_use]
pub fn clean_links(content: &str) -> String {
    LinkCleaner::default().clean(content)
}
