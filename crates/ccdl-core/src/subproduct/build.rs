//! Build the sub-product index for a family.

use crate::error::Result;
use crate::fanout::fan_out;
use crate::normalize::{normalize_code, normalize_name, EditionKind};
use crate::product::ProductFamily;
use crate::source::{CatalogSource, DlgType, EditionGroup};

use super::{license_tier, upsert, SubProductIndex};

/// Enumerates every major-version bucket of `family`, fetches its edition
/// listing (up to `max_workers` at a time) and merges all entries under their
/// canonical codes.
///
/// Buckets reporting `InvalidVersion` are deprecated and skipped. Any other
/// failure aborts the build; no partial index is returned. Buckets are merged
/// in catalog order regardless of fetch completion order.
pub fn build_index<S: CatalogSource + ?Sized>(
    source: &S,
    family: &ProductFamily,
    dlg_type: DlgType,
    max_workers: usize,
) -> Result<SubProductIndex> {
    let major_versions = source.list_major_versions(family)?;
    tracing::debug!(
        slug = %family.slug,
        buckets = major_versions.len(),
        "building sub-product index"
    );

    let listings = fan_out(&major_versions, max_workers, |major_version| {
        match source.list_editions(family, major_version, dlg_type) {
            Ok(groups) => Ok(Some(groups)),
            Err(e) if e.is_invalid_version() => {
                tracing::warn!(
                    slug = %family.slug,
                    major_version = %major_version,
                    "skipping deprecated major version"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    })?;

    let mut index = SubProductIndex::new();
    for (major_version, groups) in major_versions.iter().zip(listings) {
        let Some(groups) = groups else {
            continue;
        };
        merge_bucket(&mut index, &family.slug, major_version, dlg_type, &groups);
    }
    Ok(index)
}

fn merge_bucket(
    index: &mut SubProductIndex,
    slug: &str,
    major_version: &str,
    dlg_type: DlgType,
    groups: &[EditionGroup],
) {
    for group in groups {
        let kind = EditionKind::classify(dlg_type, &group.name);
        for entry in &group.entries {
            let code = normalize_code(&entry.code, slug, kind);
            let name = normalize_name(&entry.name, slug, kind);
            upsert(index, &code, &name, major_version, entry.clone());
            license_tier::expand(index, &code, &name, major_version, entry);
        }
    }
}
