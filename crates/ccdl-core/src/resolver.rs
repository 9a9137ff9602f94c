//! Resolver facade: family slug + sub-product + version spec → download ids.
//!
//! Owns the catalog source, the product family cache and the fetch pool
//! size. Every call rebuilds the indices it needs from the source; only the
//! family table is cached.

use crate::download::DEFAULT_LOCALE;
use crate::error::{CatalogError, Result};
use crate::product::{ProductCatalog, ProductFamily};
use crate::source::{CatalogEntry, CatalogSource, DlgType};
use crate::subproduct::{build_index, SubProduct, SubProductIndex};
use crate::versions::{self, build_version_index, ResolvedVersion, VersionIndex};

/// Default number of concurrent catalog reads.
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Identifiers the download and entitlement endpoints need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDownload {
    /// Release code of the resolved version.
    pub download_group: String,
    pub product_id: String,
    pub major_version: String,
    /// Display version that matched the request.
    pub version: String,
}

pub struct CatalogResolver<S> {
    source: S,
    products: ProductCatalog,
    max_workers: usize,
    locale: String,
}

impl<S> CatalogResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            products: ProductCatalog::new(),
            max_workers: DEFAULT_MAX_WORKERS,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Replaces the family cache (e.g. with a preloaded table).
    pub fn with_products(mut self, products: ProductCatalog) -> Self {
        self.products = products;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn products(&self) -> &ProductCatalog {
        &self.products
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl<S: CatalogSource> CatalogResolver<S> {
    pub fn family(&self, slug: &str) -> Result<ProductFamily> {
        self.products.family(&self.source, slug)
    }

    /// All product families, sorted by slug.
    pub fn families(&self) -> Result<Vec<ProductFamily>> {
        self.products.families(&self.source)
    }

    pub fn major_versions(&self, slug: &str) -> Result<Vec<String>> {
        let family = self.family(slug)?;
        self.source.list_major_versions(&family)
    }

    /// Canonical code → sub-product for a family. `InvalidSlug` if unknown.
    pub fn sub_products_map(&self, slug: &str, dlg_type: DlgType) -> Result<SubProductIndex> {
        let family = self.family(slug)?;
        build_index(&self.source, &family, dlg_type, self.max_workers)
    }

    /// All sub-products of a family, sorted by canonical code.
    pub fn sub_products(&self, slug: &str, dlg_type: DlgType) -> Result<Vec<SubProduct>> {
        Ok(self.sub_products_map(slug, dlg_type)?.into_values().collect())
    }

    pub fn sub_product(&self, slug: &str, code: &str, dlg_type: DlgType) -> Result<SubProduct> {
        self.sub_products_map(slug, dlg_type)?
            .remove(code)
            .ok_or(CatalogError::InvalidSubProduct)
    }

    /// Release record of a sub-product for one major-version bucket.
    pub fn sub_product_details(
        &self,
        slug: &str,
        code: &str,
        major_version: &str,
        dlg_type: DlgType,
    ) -> Result<CatalogEntry> {
        let sub_product = self.sub_product(slug, code, dlg_type)?;
        sub_product.release(major_version).cloned()
    }

    /// Display version → release for a sub-product. `InvalidSubProduct` if
    /// the code is not in the family's index.
    pub fn version_map(&self, slug: &str, code: &str, dlg_type: DlgType) -> Result<VersionIndex> {
        let sub_product = self.sub_product(slug, code, dlg_type)?;
        build_version_index(&self.source, &sub_product, self.max_workers)
    }

    /// Display versions of a sub-product, highest first.
    pub fn versions(&self, slug: &str, code: &str, dlg_type: DlgType) -> Result<Vec<String>> {
        Ok(versions::sorted_versions(&self.version_map(slug, code, dlg_type)?))
    }

    /// Resolves a literal or single-wildcard version spec.
    pub fn find_version(
        &self,
        slug: &str,
        code: &str,
        spec: &str,
        dlg_type: DlgType,
    ) -> Result<ResolvedVersion> {
        versions::resolve(&self.version_map(slug, code, dlg_type)?, spec)
    }

    /// Resolves a request to the download group and product id.
    ///
    /// The product id comes from the sub-product's record for the bucket the
    /// resolved version belongs to.
    pub fn dlg_product(
        &self,
        slug: &str,
        code: &str,
        spec: &str,
        dlg_type: DlgType,
    ) -> Result<ResolvedDownload> {
        let sub_product = self.sub_product(slug, code, dlg_type)?;
        let index = build_version_index(&self.source, &sub_product, self.max_workers)?;
        let resolved = versions::resolve(&index, spec)?;
        let record = sub_product.release(&resolved.major_version)?;
        tracing::debug!(
            slug,
            sub_product = code,
            version = %resolved.version,
            download_group = %resolved.code,
            "resolved download"
        );
        Ok(ResolvedDownload {
            download_group: resolved.code,
            product_id: record.product_id.clone(),
            major_version: resolved.major_version,
            version: resolved.version,
        })
    }
}
