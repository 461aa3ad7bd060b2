//! ParsedDocument - a raw advisory split into frontmatter and sections.

use serde::Serialize;

use crate::error::ParseError;
use crate::frontmatter::{parse_frontmatter, split_frontmatter, Frontmatter};
use crate::section::{get_section_content, remove_empty_sections, Section};
use crate::splitter::split_markdown_by_headers;

/// A document after splitting. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    pub sections: Vec<Section>,
}

impl ParsedDocument {
    /// Content of the first section named `name`, or `""`.
    pub fn section(&self, name: &str) -> &str {
        get_section_content(&self.sections, name)
    }

    /// Consume the document, dropping empty and `(none)` sections.
    #[must_use]
    pub fn without_empty_sections(self) -> Self {
        Self {
            frontmatter: self.frontmatter,
            sections: remove_empty_sections(self.sections),
        }
    }
}

/// Split raw advisory text into frontmatter and header-delimited sections.
///
/// # Errors
///
/// Returns [`ParseError::MissingDelimiter`] if the `+++` pair cannot be found
/// and [`ParseError::Frontmatter`] if the frontmatter is not valid TOML.
pub fn parse_markdown(content: &str) -> Result<ParsedDocument, ParseError> {
    let (frontmatter, body) = split_frontmatter(content)?;

    Ok(ParsedDocument {
        frontmatter: parse_frontmatter(frontmatter)?,
        sections: split_markdown_by_headers(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::HeaderLevel;

    #[test]
    fn parse_markdown_splits_frontmatter_and_body() {
        let content = r#"+++
key = "value"
+++

## Markdown header
First.

Second.
"#;
        let doc = parse_markdown(content).unwrap();
        assert_eq!(doc.frontmatter.str_field("key").unwrap(), "value");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(
            doc.sections[0].header(HeaderLevel::H2),
            Some("Markdown header")
        );
        assert_eq!(doc.sections[0].content, "First.\n\nSecond.");
    }

    #[test]
    fn parse_markdown_propagates_frontmatter_errors() {
        let content = "+++\nkey = value\n+++\n\n## Header\nbody\n";
        assert!(matches!(
            parse_markdown(content),
            Err(ParseError::Frontmatter(_))
        ));
    }

    #[test]
    fn parse_markdown_requires_delimiters() {
        let content = "# Just markdown\n\nNo frontmatter here.\n";
        assert!(matches!(
            parse_markdown(content),
            Err(ParseError::MissingDelimiter)
        ));
    }

    #[test]
    fn parse_markdown_allows_empty_body() {
        let doc = parse_markdown("+++\ntitle = 'x'\n+++\n").unwrap();
        assert!(doc.sections.is_empty());
        assert_eq!(doc.section("Description"), "");
    }

    #[test]
    fn without_empty_sections_filters_placeholders() {
        let content = "+++\n+++\n## Keep\nyes\n## Drop\n(none)\n";
        let doc = parse_markdown(content).unwrap().without_empty_sections();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.section("Keep"), "yes");
    }

    #[test]
    fn serializes_to_json() {
        let doc = parse_markdown("+++\ntitle = 'x'\n+++\n## A\nbody").unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["frontmatter"]["title"], "x");
        assert_eq!(json["sections"][0]["content"], "body");
        assert_eq!(json["sections"][0]["headers"][0][0], "H2");
    }
}
