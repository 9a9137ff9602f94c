//! Response envelopes of the public catalog endpoints.

use serde::Deserialize;

use crate::product::ProductGroup;
use crate::source::EditionGroup;

/// `getProductsAtoZ`: all families live in the first category.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(default)]
    pub product_category_list: Vec<ProductCategory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    #[serde(default)]
    pub product_list: Vec<ProductGroup>,
}

impl ProductResponse {
    pub fn into_groups(self) -> Vec<ProductGroup> {
        self.product_category_list
            .into_iter()
            .next()
            .map(|c| c.product_list)
            .unwrap_or_default()
    }
}

/// `getProductHeader`: the family's major-version buckets.
#[derive(Debug, Default, Deserialize)]
pub struct ProductHeader {
    #[serde(default)]
    pub versions: Vec<MajorVersion>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MajorVersion {
    #[serde(default)]
    pub id: String,
}

/// `getRelatedDLGList`: edition groups of one bucket.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DlgEditions {
    #[serde(default)]
    pub dlg_editions_lists: Vec<EditionGroup>,
}
