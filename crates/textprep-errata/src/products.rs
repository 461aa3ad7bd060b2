//! Affected-products listing.
//!
//! Product detail rows look like `parent|name|version|arch`. Rows are
//! joined against the advisory's product names on `name`, and the versions
//! found for each name are rendered on one line.

use std::collections::{BTreeMap, BTreeSet};

use textprep_core::ProductError;

const PRODUCTS_HEADER: &str = "This errata affects the following products:";

/// One affected product and every version it ships in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    pub key: String,
    pub versions: BTreeSet<String>,
}

impl ProductEntry {
    fn render(&self) -> String {
        let versions: Vec<&str> = self.versions.iter().map(String::as_str).collect();
        match versions.as_slice() {
            [version] => format!("- {} version {version}", self.key),
            _ => format!("- {} versions {}", self.key, versions.join(" and ")),
        }
    }
}

/// Group detail rows by product name.
///
/// # Errors
///
/// Returns [`ProductError::MalformedRow`] for rows without exactly four
/// `|`-separated fields.
fn versions_by_name<D: AsRef<str>>(
    product_details: &[D],
) -> Result<BTreeMap<&str, BTreeSet<String>>, ProductError> {
    let mut by_name: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    for row in product_details {
        let row = row.as_ref();
        match row.split('|').collect::<Vec<_>>().as_slice() {
            [_, name, version, _] => {
                by_name
                    .entry(*name)
                    .or_default()
                    .insert((*version).to_string());
            }
            _ => {
                return Err(ProductError::MalformedRow {
                    row: row.to_string(),
                })
            }
        }
    }
    Ok(by_name)
}

/// Build a [`ProductEntry`] per product key.
///
/// # Errors
///
/// Returns [`ProductError::NoDetailRows`] if a key has no matching row and
/// [`ProductError::MalformedRow`] for unparseable rows.
pub fn product_entries<K: AsRef<str>, D: AsRef<str>>(
    product_keys: &[K],
    product_details: &[D],
) -> Result<Vec<ProductEntry>, ProductError> {
    let by_name = versions_by_name(product_details)?;

    product_keys
        .iter()
        .map(|key| {
            let key = key.as_ref();
            by_name
                .get(key)
                .map(|versions| ProductEntry {
                    key: key.to_string(),
                    versions: versions.clone(),
                })
                .ok_or_else(|| ProductError::NoDetailRows {
                    key: key.to_string(),
                })
        })
        .collect()
}

/// Render the affected-products block, one sorted line per product.
///
/// # Errors
///
/// Same as [`product_entries`].
pub fn get_affected_products<K: AsRef<str>, D: AsRef<str>>(
    product_keys: &[K],
    product_details: &[D],
) -> Result<String, ProductError> {
    let lines: BTreeSet<String> = product_entries(product_keys, product_details)?
        .iter()
        .map(ProductEntry::render)
        .collect();
    tracing::debug!(products = lines.len(), "rendered affected products");

    let lines: Vec<String> = lines.into_iter().collect();
    Ok(format!("{PRODUCTS_HEADER}\n\n{}", lines.join("\n")))
}
