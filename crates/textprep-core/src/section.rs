//! Section type: one header-delimited chunk of a markdown body.

use std::fmt;

use serde::Serialize;

/// Placeholder advisories use for a section that has nothing in it.
pub const EMPTY_PLACEHOLDER: &str = "(none)";

/// ATX header depth, `#` through `######`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HeaderLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeaderLevel {
    /// Level for a run of `count` marker characters, if it is a valid depth.
    pub fn from_marker_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    pub fn depth(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for HeaderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A header-delimited chunk of body text.
///
/// `headers` holds the chain of open headers, shallowest first. Sections
/// never own each other; nesting lives only in this path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub headers: Vec<(HeaderLevel, String)>,
    pub content: String,
}

impl Section {
    pub fn new(headers: Vec<(HeaderLevel, String)>, content: impl Into<String>) -> Self {
        Self {
            headers,
            content: content.into(),
        }
    }

    /// Effective name of the section: the text of its deepest header.
    pub fn name(&self) -> Option<&str> {
        self.headers.last().map(|(_, text)| text.as_str())
    }

    /// Header text recorded at `level`, if that level is open.
    pub fn header(&self, level: HeaderLevel) -> Option<&str> {
        self.headers
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, text)| text.as_str())
    }

    /// True when the trimmed content is blank or the `(none)` placeholder.
    pub fn is_empty(&self) -> bool {
        let content = self.content.trim();
        content.is_empty() || content == EMPTY_PLACEHOLDER
    }
}

/// Drop empty sections, keeping the order of the rest.
pub fn remove_empty_sections(sections: Vec<Section>) -> Vec<Section> {
    sections.into_iter().filter(|s| !s.is_empty()).collect()
}

/// Content of the first section named `name`, or `""` when none matches.
pub fn get_section_content<'a>(sections: &'a [Section], name: &str) -> &'a str {
    match sections.iter().find(|s| s.name() == Some(name)) {
        Some(section) => &section.content,
        None => {
            tracing::warn!(section = name, "section not found");
            ""
        }
    }
}
