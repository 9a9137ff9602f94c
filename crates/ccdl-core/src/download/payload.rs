//! Download payload generation for a resolved sub-product version.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::resolver::CatalogResolver;
use crate::source::{CatalogSource, DlgType};

use super::{find_files, DownloadSource};

pub const DEFAULT_LOCALE: &str = "en_US";

/// Body of the download-link request, one per file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadPayload {
    pub locale: String,
    #[serde(rename = "downloadGroup")]
    pub download_group: String,
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "md5checksum")]
    pub md5_checksum: String,
    #[serde(rename = "tagId")]
    pub tag_id: i64,
    #[serde(rename = "uUId")]
    pub uuid: String,
    #[serde(rename = "dlgType")]
    pub dlg_type: String,
    #[serde(rename = "productFamily")]
    pub product_family: String,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    #[serde(rename = "dlgVersion")]
    pub dlg_version: String,
    #[serde(rename = "isBetaFlow")]
    pub is_beta_flow: bool,
    /// Expected SHA-256 of the file; not part of the request body.
    #[serde(skip)]
    pub sha256_checksum: String,
    /// File name as listed in the release details; not part of the request body.
    #[serde(skip)]
    pub file_name: String,
}

/// The header reports HTML-escaped download types; the download endpoint
/// expects the plain form, and files every OEM add-on under drivers & tools.
pub fn normalize_download_type(header_type: &str) -> String {
    if header_type == "OEM Addons" {
        "Drivers & Tools".to_string()
    } else {
        header_type.replacen("amp;", "", 1)
    }
}

impl<S: CatalogSource + DownloadSource> CatalogResolver<S> {
    /// Non-empty file names of the resolved release.
    pub fn files(
        &self,
        slug: &str,
        sub_product: &str,
        version: &str,
        dlg_type: DlgType,
    ) -> Result<Vec<String>> {
        let target = self.dlg_product(slug, sub_product, version, dlg_type)?;
        let details = self
            .source()
            .dlg_details(&target.download_group, &target.product_id)?;
        Ok(details
            .files
            .into_iter()
            .map(|f| f.file_name)
            .filter(|name| !name.is_empty())
            .collect())
    }

    /// EULA link of the resolved release. Requires a session.
    pub fn eula_url(
        &self,
        slug: &str,
        sub_product: &str,
        version: &str,
        dlg_type: DlgType,
    ) -> Result<String> {
        self.source().check_logged_in()?;
        let target = self.dlg_product(slug, sub_product, version, dlg_type)?;
        let details = self
            .source()
            .dlg_details(&target.download_group, &target.product_id)?;
        Ok(details.eula_response.eula_url)
    }

    /// Builds one download payload per file of the resolved release whose
    /// name matches `file_glob`.
    ///
    /// Fails `NotEntitled` when the account may not download the release and
    /// `EulaUnaccepted` when the EULA is pending and `accept_eula` is false;
    /// with `accept_eula` the EULA is accepted first.
    pub fn generate_payloads(
        &self,
        slug: &str,
        sub_product: &str,
        version: &str,
        file_glob: &str,
        dlg_type: DlgType,
        accept_eula: bool,
    ) -> Result<Vec<DownloadPayload>> {
        let source = self.source();
        source.check_logged_in()?;
        let target = self.dlg_product(slug, sub_product, version, dlg_type)?;
        let header = source.dlg_header(&target.download_group, &target.product_id)?;
        let download_type = normalize_download_type(&header.dlg.dlg_type);

        let found = find_files(source, &target.download_group, &target.product_id, file_glob)?;
        if !found.eligible_to_download {
            return Err(CatalogError::NotEntitled);
        }
        if !found.eula_accepted {
            if !accept_eula {
                return Err(CatalogError::EulaUnaccepted);
            }
            tracing::info!(download_group = %target.download_group, "accepting EULA");
            source.accept_eula(&target.download_group, &target.product_id)?;
        }

        Ok(found
            .files
            .into_iter()
            .map(|file| DownloadPayload {
                locale: self.locale().to_string(),
                download_group: target.download_group.clone(),
                product_id: target.product_id.clone(),
                md5_checksum: file.md5_checksum,
                tag_id: header.dlg.tag_id,
                uuid: file.uuid,
                dlg_type: download_type.clone(),
                product_family: header.product.name.clone(),
                release_date: file.release_date,
                dlg_version: file.version,
                is_beta_flow: false,
                sha256_checksum: file.sha256_checksum,
                file_name: file.file_name,
            })
            .collect())
    }

    /// Exchanges a payload for a signed download link. Requires a session.
    pub fn fetch_download_link(
        &self,
        payload: &DownloadPayload,
    ) -> Result<super::AuthorizedDownload> {
        self.source().check_logged_in()?;
        self.source().fetch_download_link(payload)
    }
}
