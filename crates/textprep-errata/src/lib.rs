//! # textprep-errata
//!
//! Turns a split advisory into a clean plain-text summary.
//!
//! - [`links`] - markdown link flattening ([`clean_links`], [`LinkCleaner`])
//! - [`cleaner`] - description, solution and bug-list rewrites
//! - [`products`] - the affected-products block
//! - [`errata`] - summary assembly ([`parse`], [`assemble`])
//! - [`loader`] - reading advisories from disk ([`load_errata`], [`affects_rhel`])
//! - [`config`] - field names and cleaning switches ([`ErrataConfig`])

pub mod cleaner;
pub mod config;
pub mod errata;
pub mod links;
pub mod loader;
pub mod products;

pub use cleaner::{clean_bugzillas, clean_description, clean_solution, clean_solution_with};
pub use config::{ConfigError, ErrataConfig};
pub use errata::{assemble, parse, parse_with};
pub use links::{clean_links, LinkCleaner};
pub use loader::{affects_rhel, affects_rhel_with, load_document, load_errata};
pub use products::get_affected_products;
