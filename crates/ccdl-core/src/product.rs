//! Product family table: slug → category, display name and latest major version.
//!
//! Loaded once from the catalog's A-to-Z listing and kept for the lifetime of
//! the owning [`ProductCatalog`]. Concurrent first use is single-flight: the
//! load runs under the cache mutex so only one caller hits the source.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{CatalogError, Result};
use crate::source::CatalogSource;

/// A product family as identified by its catalog slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFamily {
    pub slug: String,
    pub category: String,
    pub display_name: String,
    /// Hint used for request validation only; resolution enumerates all buckets.
    pub latest_major_version: String,
}

/// Top-level entry of the A-to-Z listing (wire shape).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub actions: Vec<ProductAction>,
}

/// Link under a product group; internal links encode slug/category/version.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductAction {
    #[serde(default)]
    pub linkname: String,
    #[serde(default)]
    pub target: String,
}

/// Parses an internal link target of the form
/// `./info/slug/<category>/<slug>/<latestMajor>[#fragment]`.
///
/// Returns `None` for external (`http...`) links and malformed targets.
pub fn parse_target(display_name: &str, target: &str) -> Option<ProductFamily> {
    if target.contains("http") {
        return None;
    }
    let parts: Vec<&str> = target.split('/').collect();
    if parts.len() < 6 {
        return None;
    }
    let category = parts[3];
    let slug = parts[4];
    let latest = parts[5].split('#').next().unwrap_or_default();
    if category.is_empty() || slug.is_empty() {
        return None;
    }
    Some(ProductFamily {
        slug: slug.to_string(),
        category: category.to_string(),
        display_name: display_name.to_string(),
        latest_major_version: latest.to_string(),
    })
}

/// Builds the slug table from the raw listing. Later links for the same slug win.
pub fn families_from_groups(groups: &[ProductGroup]) -> BTreeMap<String, ProductFamily> {
    let mut families = BTreeMap::new();
    for group in groups {
        for action in &group.actions {
            if let Some(family) = parse_target(&group.name, &action.target) {
                families.insert(family.slug.clone(), family);
            }
        }
    }
    families
}

type FamilyTable = Arc<BTreeMap<String, ProductFamily>>;

/// Explicitly owned, lazily loaded product family cache.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    families: Mutex<Option<FamilyTable>>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with a known table (offline use and tests).
    pub fn with_families(families: impl IntoIterator<Item = ProductFamily>) -> Self {
        let table: BTreeMap<String, ProductFamily> = families
            .into_iter()
            .map(|f| (f.slug.clone(), f))
            .collect();
        Self {
            families: Mutex::new(Some(Arc::new(table))),
        }
    }

    /// Returns the family table, loading it from `source` on first use.
    ///
    /// An empty listing is returned but not cached, so the next call retries.
    pub fn load<S: CatalogSource + ?Sized>(&self, source: &S) -> Result<FamilyTable> {
        let mut guard = self
            .families
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = guard.as_ref() {
            return Ok(Arc::clone(table));
        }
        let groups = source.list_products()?;
        let table = Arc::new(families_from_groups(&groups));
        tracing::info!(families = table.len(), "loaded product family catalog");
        if !table.is_empty() {
            *guard = Some(Arc::clone(&table));
        }
        Ok(table)
    }

    /// Drops the cached table; the next lookup reloads it.
    pub fn invalidate(&self) {
        let mut guard = self
            .families
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    pub fn family<S: CatalogSource + ?Sized>(&self, source: &S, slug: &str) -> Result<ProductFamily> {
        self.load(source)?
            .get(slug)
            .cloned()
            .ok_or(CatalogError::InvalidSlug)
    }

    pub fn category<S: CatalogSource + ?Sized>(&self, source: &S, slug: &str) -> Result<String> {
        Ok(self.family(source, slug)?.category)
    }

    /// All families sorted by slug.
    pub fn families<S: CatalogSource + ?Sized>(&self, source: &S) -> Result<Vec<ProductFamily>> {
        Ok(self.load(source)?.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryCatalog;

    fn group(name: &str, targets: &[&str]) -> ProductGroup {
        ProductGroup {
            name: name.to_string(),
            actions: targets
                .iter()
                .map(|t| ProductAction {
                    linkname: "View Download Components".to_string(),
                    target: t.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn parse_target_extracts_fields() {
        let f = parse_target(
            "VMware vSphere",
            "./info/slug/datacenter_cloud_infrastructure/vmware_vsphere/8_0#product_downloads",
        )
        .unwrap();
        assert_eq!(f.slug, "vmware_vsphere");
        assert_eq!(f.category, "datacenter_cloud_infrastructure");
        assert_eq!(f.latest_major_version, "8_0");
        assert_eq!(f.display_name, "VMware vSphere");
    }

    #[test]
    fn parse_target_skips_external_and_short_links() {
        assert!(parse_target("x", "https://example.com/a/b/c/d/e").is_none());
        assert!(parse_target("x", "./info/slug/cat").is_none());
        assert!(parse_target("x", "").is_none());
    }

    #[test]
    fn families_from_groups_indexes_by_slug() {
        let groups = vec![
            group(
                "VMware vSphere",
                &["./info/slug/datacenter_cloud_infrastructure/vmware_vsphere/8_0"],
            ),
            group(
                "VMware Horizon",
                &[
                    "./info/slug/desktop_end_user_computing/vmware_horizon/2306",
                    "https://docs.vmware.com/horizon",
                ],
            ),
        ];
        let families = families_from_groups(&groups);
        assert_eq!(families.len(), 2);
        assert_eq!(families["vmware_horizon"].latest_major_version, "2306");
    }

    #[test]
    fn load_is_cached_until_invalidated() {
        let source = MemoryCatalog::new().with_family(
            "vmware_tools",
            "datacenter_cloud_infrastructure",
            "12_x",
        );
        let catalog = ProductCatalog::new();
        catalog.family(&source, "vmware_tools").unwrap();
        catalog.family(&source, "vmware_tools").unwrap();
        assert_eq!(source.calls().list_products, 1);

        catalog.invalidate();
        catalog.category(&source, "vmware_tools").unwrap();
        assert_eq!(source.calls().list_products, 2);
    }

    #[test]
    fn unknown_slug_is_invalid() {
        let source = MemoryCatalog::new().with_family("vmware_tools", "dc", "12_x");
        let catalog = ProductCatalog::new();
        let err = catalog.family(&source, "vsphere").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSlug));
    }

    #[test]
    fn preloaded_catalog_never_calls_source() {
        let source = MemoryCatalog::new();
        let catalog = ProductCatalog::with_families([ProductFamily {
            slug: "vmware_nsx".to_string(),
            category: "networking_security".to_string(),
            display_name: "VMware NSX".to_string(),
            latest_major_version: "4_x".to_string(),
        }]);
        let families = catalog.families(&source).unwrap();
        assert_eq!(families.len(), 1);
        assert_eq!(source.calls().list_products, 0);
    }
}
