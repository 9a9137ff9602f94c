//! Catalog data source interface.
//!
//! The resolution engine only depends on this trait and does not know about
//! HTTP, sessions or JSON. [`crate::http::HttpCatalog`] is the production
//! implementation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, Result};
use crate::product::{ProductFamily, ProductGroup};

/// Catalog view requested from the edition listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DlgType {
    #[default]
    ProductBinary,
    DriversTools,
    CustomIso,
    Addons,
}

impl DlgType {
    pub fn as_str(self) -> &'static str {
        match self {
            DlgType::ProductBinary => "PRODUCT_BINARY",
            DlgType::DriversTools => "DRIVERS_TOOLS",
            DlgType::CustomIso => "CUSTOM_ISO",
            DlgType::Addons => "ADDONS",
        }
    }
}

impl fmt::Display for DlgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DlgType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PRODUCT_BINARY" => Ok(DlgType::ProductBinary),
            "DRIVERS_TOOLS" => Ok(DlgType::DriversTools),
            "CUSTOM_ISO" => Ok(DlgType::CustomIso),
            "ADDONS" => Ok(DlgType::Addons),
            _ => Err(CatalogError::InvalidDlgType(s.to_string())),
        }
    }
}

/// One download-group entry as listed under an edition group.
///
/// Stored verbatim as the per-bucket release record of a sub-product; only
/// the license-tier expander rewrites `name` and `code`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub release_package_id: String,
    #[serde(default)]
    pub release_date: String,
}

/// Edition group ("VMware vSphere", "Driver CDs", ...) inside one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "dlgList")]
    pub entries: Vec<CatalogEntry>,
}

/// One release in a release listing: upstream id plus display version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub id: String,
    pub name: String,
}

/// Read-only catalog operations the engine consumes.
///
/// Implementations must be shareable across the fetch worker pool.
pub trait CatalogSource: Send + Sync {
    /// Raw A-to-Z product listing used to build the family table.
    fn list_products(&self) -> Result<Vec<ProductGroup>>;

    /// Major-version bucket ids for a family, in catalog order.
    fn list_major_versions(&self, family: &ProductFamily) -> Result<Vec<String>>;

    /// Edition groups for one bucket. Deprecated buckets fail `InvalidVersion`.
    fn list_editions(
        &self,
        family: &ProductFamily,
        major_version: &str,
        dlg_type: DlgType,
    ) -> Result<Vec<EditionGroup>>;

    /// Release listing for an upstream download-group code.
    fn list_releases(&self, code: &str, product_id: &str) -> Result<Vec<ReleaseEntry>>;
}

impl<S: CatalogSource + ?Sized> CatalogSource for &S {
    fn list_products(&self) -> Result<Vec<ProductGroup>> {
        (**self).list_products()
    }

    fn list_major_versions(&self, family: &ProductFamily) -> Result<Vec<String>> {
        (**self).list_major_versions(family)
    }

    fn list_editions(
        &self,
        family: &ProductFamily,
        major_version: &str,
        dlg_type: DlgType,
    ) -> Result<Vec<EditionGroup>> {
        (**self).list_editions(family, major_version, dlg_type)
    }

    fn list_releases(&self, code: &str, product_id: &str) -> Result<Vec<ReleaseEntry>> {
        (**self).list_releases(code, product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dlg_type_parses_case_insensitively() {
        assert_eq!("product_binary".parse::<DlgType>().unwrap(), DlgType::ProductBinary);
        assert_eq!("DRIVERS-TOOLS".parse::<DlgType>().unwrap(), DlgType::DriversTools);
        assert_eq!("Custom_Iso".parse::<DlgType>().unwrap(), DlgType::CustomIso);
        assert_eq!("addons".parse::<DlgType>().unwrap(), DlgType::Addons);
    }

    #[test]
    fn dlg_type_rejects_unknown() {
        let err = "firmware".parse::<DlgType>().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDlgType(ref s) if s == "firmware"));
    }

    #[test]
    fn edition_group_decodes_dlg_list() {
        let json = r#"{
            "name": "VMware vSphere",
            "orderId": 1,
            "dlgList": [
                { "name": "VMware vCenter Server 8.0U2", "code": "VC80U2", "productId": "1345",
                  "releaseDate": "2023-09-21", "releasePackageId": "11" }
            ]
        }"#;
        let group: EditionGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.name, "VMware vSphere");
        assert_eq!(group.entries.len(), 1);
        assert_eq!(group.entries[0].code, "VC80U2");
        assert_eq!(group.entries[0].product_id, "1345");
        assert_eq!(group.entries[0].release_package_id, "11");
    }
}
