//! Assemble a plain-text advisory summary.
//!
//! The summary is a fixed sequence of blocks separated by blank lines:
//! title, publish date, portal URL, summary, cleaned description, cleaned
//! solution, affected products and fixed bugs.

use std::path::Path;

use textprep_core::{FieldError, Frontmatter, ParsedDocument, Result};

use crate::cleaner::{clean_bugzillas, clean_description, clean_solution_with};
use crate::config::ErrataConfig;
use crate::loader::load_errata;
use crate::products::get_affected_products;

/// Load the advisory at `path` and render its summary with default settings.
///
/// # Errors
///
/// Returns [`textprep_core::TextprepError::NotFound`] for a missing file,
/// [`textprep_core::TextprepError::Parse`] for a malformed document, and
/// field or product errors when metadata is missing or inconsistent.
pub fn parse(path: &Path) -> Result<String> {
    parse_with(path, &ErrataConfig::default())
}

/// [`parse`] with an explicit configuration.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_with(path: &Path, config: &ErrataConfig) -> Result<String> {
    let doc = load_errata(path)?;
    tracing::debug!(path = %path.display(), sections = doc.sections.len(), "assembling errata");
    assemble(&doc, config)
}

/// Render the summary of an already split advisory.
///
/// Metadata comes from the nested table named by
/// [`ErrataConfig::metadata_table`]; a field missing there, or every field
/// when the table itself is absent, is looked up at the top level of the
/// frontmatter. Missing sections render as empty text.
///
/// # Errors
///
/// Returns [`textprep_core::TextprepError::Field`] if a required field is
/// missing or has the wrong shape, and
/// [`textprep_core::TextprepError::Product`] if the product lists do not
/// line up.
pub fn assemble(doc: &ParsedDocument, config: &ErrataConfig) -> Result<String> {
    let metadata = Metadata::new(&doc.frontmatter, &config.metadata_table)?;
    let fields = &config.fields;
    let sections = &config.sections;

    let blocks = [
        metadata.str_field(&fields.title)?.to_string(),
        format!("Published: {}", metadata.str_field(&fields.issued)?),
        format!(
            "Access this document at this URL: {}{}",
            config.portal_url,
            metadata.str_field(&fields.path)?
        ),
        metadata.str_field(&fields.summary)?.trim().to_string(),
        clean_description(doc.section(&sections.description)),
        clean_solution_with(doc.section(&sections.solution), &config.link_cleaner()),
        get_affected_products(
            metadata.list_field(&fields.product_names)?,
            metadata.list_field(&fields.product_details)?,
        )?,
        clean_bugzillas(doc.section(&sections.fixes)),
    ];

    Ok(blocks.join("\n\n"))
}

/// Field lookup over the metadata table with a top-level fallback.
struct Metadata<'a> {
    table: Option<&'a Frontmatter>,
    top: &'a Frontmatter,
}

impl<'a> Metadata<'a> {
    fn new(frontmatter: &'a Frontmatter, table: &str) -> std::result::Result<Self, FieldError> {
        let table = match frontmatter.table(table) {
            Ok(found) => Some(found),
            Err(FieldError::Missing { .. }) => {
                tracing::debug!(table, "no metadata table, reading top-level fields");
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            table,
            top: frontmatter,
        })
    }

    fn str_field(&self, key: &str) -> std::result::Result<&'a str, FieldError> {
        match self.table.map(|t| t.str_field(key)) {
            None | Some(Err(FieldError::Missing { .. })) => self.top.str_field(key),
            Some(found) => found,
        }
    }

    fn list_field(&self, key: &str) -> std::result::Result<&'a [String], FieldError> {
        match self.table.map(|t| t.list_field(key)) {
            None | Some(Err(FieldError::Missing { .. })) => self.top.list_field(key),
            Some(found) => found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textprep_core::{parse_markdown, TextprepError};

    const DOC: &str = r#"+++
title = "RHSA-0000:0001 - Low: example security update"

[extra]
portal_publication_date = "2024-01-02T03:04:05Z"
path = "/errata/RHSA-0000:0001"
portal_summary = '''
An update for example is now available.
'''
portal_product_names = ["Example Server"]
portal_product_filter = ["Example|Example Server|9|x86_64", "Example|Example Server|9.2|x86_64"]
+++

## Description

Example fixes things.

Security Fix(es):

- example: a flaw (CVE-2024-0001)

For more details about the security issue(s), see the References section.

## Solution

Apply the update.

## Fixes

- [BZ - 1](https://bugzilla.redhat.com/show_bug.cgi?id=1)
"#;

    #[test]
    fn assembles_blocks_in_order() {
        let doc = parse_markdown(DOC).unwrap();
        let result = assemble(&doc, &ErrataConfig::default()).unwrap();
        let expected = "RHSA-0000:0001 - Low: example security update

Published: 2024-01-02T03:04:05Z

Access this document at this URL: https://access.redhat.com/errata/RHSA-0000:0001

An update for example is now available.

Example fixes things.

This update fixes the following security issues:

- example: a flaw (CVE-2024-0001)

Apply the update.

This errata affects the following products:

- Example Server versions 9 and 9.2

This update fixes the these bugs:

- BZ 1 found at https://bugzilla.redhat.com/show_bug.cgi?id=1";
        assert_eq!(result, expected);
    }

    #[test]
    fn missing_metadata_table_reads_top_level_fields() {
        let content = DOC.replace("[extra]\n", "");
        let doc = parse_markdown(&content).unwrap();
        assert!(doc.frontmatter.get("extra").is_none());

        let flat = assemble(&doc, &ErrataConfig::default()).unwrap();
        let nested = assemble(&parse_markdown(DOC).unwrap(), &ErrataConfig::default()).unwrap();
        assert_eq!(flat, nested);
    }

    #[test]
    fn missing_metadata_table_still_requires_fields() {
        let doc = parse_markdown("+++\ntitle = 'x'\n+++\n## Description\nd\n").unwrap();
        let err = assemble(&doc, &ErrataConfig::default()).unwrap_err();
        assert!(
            matches!(err, TextprepError::Field(FieldError::Missing { field }) if field == "portal_publication_date")
        );
    }

    #[test]
    fn metadata_key_holding_a_string_is_a_field_error() {
        let content = DOC.replace("[extra]\n", "extra = 'flat'\n[meta]\n");
        let doc = parse_markdown(&content).unwrap();
        let err = assemble(&doc, &ErrataConfig::default()).unwrap_err();
        assert!(matches!(err, TextprepError::Field(FieldError::WrongType { .. })));
    }

    #[test]
    fn missing_field_names_the_field() {
        let content = DOC.replace("path = \"/errata/RHSA-0000:0001\"\n", "");
        let doc = parse_markdown(&content).unwrap();
        let err = assemble(&doc, &ErrataConfig::default()).unwrap_err();
        assert!(err.to_string().contains("'path'"));
    }

    #[test]
    fn product_without_rows_fails() {
        let content = DOC.replace(
            "portal_product_names = [\"Example Server\"]",
            "portal_product_names = [\"Example Server\", \"Example Desktop\"]",
        );
        let doc = parse_markdown(&content).unwrap();
        let err = assemble(&doc, &ErrataConfig::default()).unwrap_err();
        assert!(matches!(err, TextprepError::Product(_)));
    }

    #[test]
    fn custom_section_names_are_used() {
        let content = DOC.replace("## Fixes", "## Bugzillas");
        let doc = parse_markdown(&content).unwrap();

        let default = assemble(&doc, &ErrataConfig::default()).unwrap();
        assert!(default.ends_with("This update fixes the these bugs:"));

        let mut config = ErrataConfig::default();
        config.sections.fixes = "Bugzillas".to_string();
        let custom = assemble(&doc, &config).unwrap();
        assert!(custom.ends_with("- BZ 1 found at https://bugzilla.redhat.com/show_bug.cgi?id=1"));
    }
}
