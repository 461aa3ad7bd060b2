//! TOML frontmatter splitting and parsing.
//!
//! Handles the `+++` delimited TOML frontmatter in advisory files.
//! Format:
//! ```markdown
//! +++
//! title = '''RHSA-2022:0886 - Moderate: virt:rhel security update'''
//! [extra]
//! portal_product_names = ["Red Hat Enterprise Linux for x86_64"]
//! +++
//!
//! ## Body content here
//! ```
//!
//! Only three value shapes survive parsing: strings, string lists and
//! nested tables. Other TOML scalars are recovered as their textual form.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{FieldError, ParseError};

const DELIMITER: &str = "\n+++\n";

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    String(String),
    List(Vec<String>),
    Table(Frontmatter),
}

impl FrontmatterValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Frontmatter> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// Parsed frontmatter: an immutable key/value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter {
    entries: BTreeMap<String, FrontmatterValue>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontmatterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a string field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Missing`] if the key is absent and
    /// [`FieldError::WrongType`] if it holds a list or table.
    pub fn str_field(&self, key: &str) -> Result<&str, FieldError> {
        self.field(key)?
            .as_str()
            .ok_or_else(|| wrong_type(key, "string"))
    }

    /// Look up a string-list field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Missing`] or [`FieldError::WrongType`].
    pub fn list_field(&self, key: &str) -> Result<&[String], FieldError> {
        self.field(key)?
            .as_list()
            .ok_or_else(|| wrong_type(key, "list of strings"))
    }

    /// Look up a nested table.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Missing`] or [`FieldError::WrongType`].
    pub fn table(&self, key: &str) -> Result<&Frontmatter, FieldError> {
        self.field(key)?
            .as_table()
            .ok_or_else(|| wrong_type(key, "table"))
    }

    fn field(&self, key: &str) -> Result<&FrontmatterValue, FieldError> {
        self.entries.get(key).ok_or_else(|| FieldError::Missing {
            field: key.to_string(),
        })
    }
}

impl FromIterator<(String, FrontmatterValue)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (String, FrontmatterValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn wrong_type(key: &str, expected: &str) -> FieldError {
    FieldError::WrongType {
        field: key.to_string(),
        expected: expected.to_string(),
    }
}

/// Split a raw document into its frontmatter and body.
///
/// The split happens at the first `\n+++\n`. Surrounding `+` and whitespace
/// are stripped from the frontmatter, surrounding `-` and whitespace from the
/// body (a horizontal rule right after the frontmatter is common).
///
/// # Errors
///
/// Returns [`ParseError::MissingDelimiter`] if no delimiter line is found.
pub fn split_frontmatter(content: &str) -> Result<(&str, &str), ParseError> {
    let pos = content
        .find(DELIMITER)
        .ok_or(ParseError::MissingDelimiter)?;

    let frontmatter = content[..pos].trim_matches('+').trim();
    let body = content[pos + DELIMITER.len()..]
        .trim()
        .trim_matches('-')
        .trim();

    Ok((frontmatter, body))
}

/// Parse a frontmatter block (delimiters already stripped).
///
/// # Errors
///
/// Returns [`ParseError::Frontmatter`] if the text is not valid TOML and
/// [`ParseError::UnsupportedValue`] for arrays of tables or nested arrays.
pub fn parse_frontmatter(frontmatter: &str) -> Result<Frontmatter, ParseError> {
    let table: toml::Table = toml::from_str(frontmatter)?;
    let parsed = convert_table(table, None)?;
    tracing::debug!(keys = parsed.len(), "parsed frontmatter");
    Ok(parsed)
}

/// Split a raw document and parse only its frontmatter.
///
/// # Errors
///
/// Same as [`split_frontmatter`] and [`parse_frontmatter`].
pub fn read_frontmatter(content: &str) -> Result<Frontmatter, ParseError> {
    let (frontmatter, _) = split_frontmatter(content)?;
    parse_frontmatter(frontmatter)
}

fn convert_table(table: toml::Table, prefix: Option<&str>) -> Result<Frontmatter, ParseError> {
    table
        .into_iter()
        .map(|(key, value)| {
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{key}"),
                None => key.clone(),
            };
            convert_value(&path, value).map(|value| (key, value))
        })
        .collect()
}

fn convert_value(path: &str, value: toml::Value) -> Result<FrontmatterValue, ParseError> {
    match value {
        toml::Value::Table(table) => Ok(FrontmatterValue::Table(convert_table(table, Some(path))?)),
        toml::Value::Array(items) => items
            .into_iter()
            .map(|item| {
                scalar_text(&item).ok_or_else(|| ParseError::UnsupportedValue {
                    key: path.to_string(),
                    kind: format!("array containing {}", item.type_str()),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FrontmatterValue::List),
        scalar => scalar_text(&scalar)
            .map(FrontmatterValue::String)
            .ok_or_else(|| ParseError::UnsupportedValue {
                key: path.to_string(),
                kind: scalar.type_str().to_string(),
            }),
    }
}

fn scalar_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(dt) => Some(dt.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}
