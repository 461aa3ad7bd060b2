//! Error types for textprep.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level result type for textprep operations.
pub type Result<T> = std::result::Result<T, TextprepError>;

/// Top-level error type for textprep.
#[derive(Debug, Error)]
pub enum TextprepError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("field error: {0}")]
    Field(#[from] FieldError),

    #[error("product error: {0}")]
    Product(#[from] ProductError),
}

/// Errors raised while splitting a raw document into frontmatter and body.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no '+++' frontmatter delimiter pair found")]
    MissingDelimiter,

    #[error("invalid frontmatter: {0}")]
    Frontmatter(#[from] toml::de::Error),

    #[error("unsupported frontmatter value for '{key}': {kind}")]
    UnsupportedValue { key: String, kind: String },
}

/// Errors related to reading named frontmatter fields.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("missing frontmatter field '{field}'")]
    Missing { field: String },

    #[error("frontmatter field '{field}' is not a {expected}")]
    WrongType { field: String, expected: String },
}

/// Errors related to the affected-products listing.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("no product detail rows for '{key}'")]
    NoDetailRows { key: String },

    #[error("malformed product detail row '{row}': expected 'parent|name|version|arch'")]
    MalformedRow { row: String },
}
