//! Reading advisories from disk.

use std::io;
use std::path::Path;

use textprep_core::frontmatter::{read_frontmatter, Frontmatter};
use textprep_core::{parse_markdown, ParsedDocument, Result, TextprepError};

use crate::config::ErrataConfig;

const RHEL_MARKER: &str = "Red Hat Enterprise Linux";

/// Read a document's raw text.
///
/// # Errors
///
/// Returns [`TextprepError::NotFound`] if `path` does not exist and
/// [`TextprepError::Io`] for any other read failure.
pub fn load_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => TextprepError::NotFound(path.to_path_buf()),
        _ => TextprepError::Io(e),
    })
}

/// Read and split an advisory.
///
/// # Errors
///
/// Returns the loader error from [`load_document`], or the
/// [`TextprepError::Parse`] raised while splitting the document. Parse
/// failures are logged with the offending path before being returned.
pub fn load_errata(path: &Path) -> Result<ParsedDocument> {
    let content = load_document(path)?;
    parse_markdown(&content).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to parse errata");
        e.into()
    })
}

/// Does the advisory list any Red Hat Enterprise Linux product?
///
/// Only the frontmatter is parsed. The product-name list is read from the
/// top level first, then from the metadata table; a document without the
/// list affects nothing.
///
/// # Errors
///
/// Same as [`load_errata`].
pub fn affects_rhel(path: &Path) -> Result<bool> {
    affects_rhel_with(path, &ErrataConfig::default())
}

/// [`affects_rhel`] with explicit field names.
///
/// # Errors
///
/// Same as [`load_errata`].
pub fn affects_rhel_with(path: &Path, config: &ErrataConfig) -> Result<bool> {
    let content = load_document(path)?;
    let frontmatter = read_frontmatter(&content).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to parse frontmatter");
        TextprepError::from(e)
    })?;
    Ok(lists_rhel(&frontmatter, config))
}

fn lists_rhel(frontmatter: &Frontmatter, config: &ErrataConfig) -> bool {
    let key = config.fields.product_names.as_str();
    let names = frontmatter.list_field(key).ok().or_else(|| {
        frontmatter
            .table(&config.metadata_table)
            .ok()
            .and_then(|metadata| metadata.list_field(key).ok())
    });

    names.is_some_and(|names| names.iter().any(|name| name.contains(RHEL_MARKER)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let sub = dir.path().join("sub");
        std::fs::create_dir_all(&sub).unwrap();
        let path = sub.join("errata.md");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_errata_reads_valid_markdown() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "+++\ntitle = '''Super important errata right here'''\n+++\n\n# Most important heading\n\nFirst bit of content.\n",
        );

        let doc = load_errata(&path).unwrap();
        assert_eq!(
            doc.frontmatter.str_field("title").unwrap(),
            "Super important errata right here"
        );
        assert_eq!(doc.sections[0].content, "First bit of content.");
    }

    #[test]
    fn load_errata_rejects_json() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"key": "Wait a minute, this is JSON!}"#);
        assert!(matches!(load_errata(&path), Err(TextprepError::Parse(_))));
    }

    #[test]
    fn load_errata_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "+++\n+++\n");
        std::fs::remove_file(&path).unwrap();

        match load_errata(&path) {
            Err(TextprepError::NotFound(missing)) => assert_eq!(missing, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn affects_rhel_detects_rhel_products() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"+++
portal_product_names=["Red Hat Enterprise Linux Server - Extended Life Cycle Support","Red Hat Enterprise Linux for x86_64 - Update Services for SAP Solutions","Red Hat Enterprise Linux Server - AUS","Red Hat Enterprise Linux Workstation"]
+++

# Heading

Content.
"#,
        );
        assert!(affects_rhel(&path).unwrap());
    }

    #[test]
    fn affects_rhel_ignores_other_products() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"+++
portal_product_names=["Red Hat OpenShift Enterprise Infrastructure","Red Hat OpenShift Enterprise Application Node","Red Hat OpenShift Enterprise JBoss EAP add-on","Red Hat OpenShift Enterprise Client Tools"]
+++

# Heading

Content.
"#,
        );
        assert!(!affects_rhel(&path).unwrap());
    }

    #[test]
    fn affects_rhel_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "+++\nportal_product_names = [\"red hat enterprise linux server\"]\n+++\n",
        );
        assert!(!affects_rhel(&path).unwrap());
    }

    #[test]
    fn affects_rhel_falls_back_to_metadata_table() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "+++\n[extra]\nportal_product_names = [\"Red Hat Enterprise Linux for ARM 64\"]\n+++\n",
        );
        assert!(affects_rhel(&path).unwrap());
    }

    #[test]
    fn affects_rhel_without_product_list_is_false() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "+++\ntitle = \"x\"\n+++\n");
        assert!(!affects_rhel(&path).unwrap());
    }

    #[test]
    fn affects_rhel_propagates_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "no frontmatter at all");
        assert!(matches!(affects_rhel(&path), Err(TextprepError::Parse(_))));
    }
}
