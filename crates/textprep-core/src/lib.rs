//! # textprep-core
//!
//! Document model and splitting for textprep.
//!
//! This crate turns a raw advisory (TOML frontmatter between `+++` lines,
//! followed by a markdown body) into structured parts:
//! - [`Frontmatter`] and [`FrontmatterValue`] - parsed metadata
//! - [`Section`] and [`HeaderLevel`] - header-delimited body chunks
//! - [`ParsedDocument`] - both of the above, from [`parse_markdown`]
//! - Error hierarchy ([`TextprepError`], [`ParseError`], [`FieldError`], [`ProductError`])

pub mod document;
pub mod error;
pub mod frontmatter;
pub mod section;
pub mod splitter;

pub use document::{parse_markdown, ParsedDocument};
pub use error::{FieldError, ParseError, ProductError, Result, TextprepError};
pub use frontmatter::{Frontmatter, FrontmatterValue};
pub use section::{get_section_content, remove_empty_sections, HeaderLevel, Section};
pub use splitter::split_markdown_by_headers;
