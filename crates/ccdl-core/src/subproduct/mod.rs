//! Sub-product index: canonical code → per-major-version release records.
//!
//! Built by walking every major-version bucket of a family, normalizing each
//! raw entry and merging it under its canonical code. Dual-licensed families
//! additionally get a derived `_le` sibling (see [`license_tier`]).

mod build;
pub mod license_tier;

pub use build::build_index;

use std::collections::BTreeMap;

use crate::error::{CatalogError, Result};
use crate::source::CatalogEntry;

/// A purchasable item within a family, across all of its major versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubProduct {
    pub code: String,
    pub name: String,
    /// Major-version bucket → release record. One record per bucket.
    pub releases: BTreeMap<String, CatalogEntry>,
}

impl SubProduct {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            releases: BTreeMap::new(),
        }
    }

    /// Release record for one bucket.
    pub fn release(&self, major_version: &str) -> Result<&CatalogEntry> {
        self.releases
            .get(major_version)
            .ok_or(CatalogError::InvalidSubProductMajorVersion)
    }
}

/// Canonical code → sub-product, iterated in code order.
pub type SubProductIndex = BTreeMap<String, SubProduct>;

/// Creates the entry for `code` on first sighting (keeping the first display
/// name) and records `record` under `major_version`, replacing any earlier
/// record for that bucket.
pub fn upsert(
    index: &mut SubProductIndex,
    code: &str,
    name: &str,
    major_version: &str,
    record: CatalogEntry,
) {
    index
        .entry(code.to_string())
        .or_insert_with(|| SubProduct::new(code, name))
        .releases
        .insert(major_version.to_string(), record);
}
