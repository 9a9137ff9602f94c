//! Version index: display version → release code and major-version bucket.
//!
//! Ordering is plain reverse string order, not semantic versioning: `"9.0"`
//! sorts above `"10.0"`. "Newest" selection by glob depends on this exact
//! rule, so it must not be swapped for a numeric-aware comparison without
//! checking the catalog data it is applied to.

mod resolve;

pub use resolve::{resolve, resolve_glob, GLOB};

use std::collections::BTreeMap;

use crate::error::Result;
use crate::fanout::fan_out;
use crate::source::{CatalogEntry, CatalogSource};
use crate::subproduct::{license_tier, SubProduct};

/// One release of a sub-product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    /// Upstream release code (download group) of this version.
    pub code: String,
    pub name: String,
    pub major_version: String,
}

/// Display version → record, merged across all buckets of a sub-product.
pub type VersionIndex = BTreeMap<String, VersionRecord>;

/// Outcome of resolving a version specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub code: String,
    pub major_version: String,
    /// The index key that matched (equal to the spec for literal lookups).
    pub version: String,
}

/// Fetches the release listing for every bucket of `sub_product` and merges
/// them, applying the license-tier partition filter.
///
/// Buckets are merged in ascending bucket order, so when two buckets list
/// the same display version the later bucket's record is kept.
pub fn build_version_index<S: CatalogSource + ?Sized>(
    source: &S,
    sub_product: &SubProduct,
    max_workers: usize,
) -> Result<VersionIndex> {
    let buckets: Vec<(&String, &CatalogEntry)> = sub_product.releases.iter().collect();
    let listings = fan_out(&buckets, max_workers, |(major_version, record)| {
        tracing::debug!(
            sub_product = %sub_product.code,
            major_version = %major_version,
            code = %record.code,
            "fetching release listing"
        );
        source.list_releases(&record.code, &record.product_id)
    })?;

    let mut index = VersionIndex::new();
    for ((major_version, _), releases) in buckets.iter().zip(listings) {
        for release in releases {
            if !license_tier::include_release(&sub_product.code, &release.id) {
                continue;
            }
            index.insert(
                release.name.clone(),
                VersionRecord {
                    code: release.id,
                    name: release.name,
                    major_version: major_version.to_string(),
                },
            );
        }
    }
    Ok(index)
}

/// Display versions, highest first by reverse string order.
pub fn sorted_versions(index: &VersionIndex) -> Vec<String> {
    index.keys().rev().cloned().collect()
}
