//! Download details, EULA handling and download payloads.
//!
//! These flows sit on top of version resolution: once a sub-product and
//! version resolve to a download group and product id, the entitlement
//! endpoints describe the files, their checksums and whether the EULA has
//! been accepted.

mod payload;

pub use payload::{normalize_download_type, DownloadPayload, DEFAULT_LOCALE};

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::account::{AccountInfo, CurrentUser};
use crate::error::{CatalogError, Result};
use crate::source::ReleaseEntry;

/// Release header: the release listing plus product and download-group metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DlgHeader {
    #[serde(default)]
    pub versions: Vec<ReleaseEntry>,
    #[serde(default)]
    pub product: HeaderProduct,
    #[serde(default)]
    pub dlg: HeaderDlg,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderProduct {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub release_package_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderDlg {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, rename = "type")]
    pub dlg_type: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub tag_id: i64,
    #[serde(default)]
    pub is_free_product: bool,
}

/// Files and entitlement state of one download group.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DlgDetails {
    #[serde(default, rename = "downloadFiles")]
    pub files: Vec<DownloadFile>,
    #[serde(default)]
    pub eligibility_response: EligibilityResponse,
    #[serde(default)]
    pub eula_response: EulaResponse,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFile {
    #[serde(default)]
    pub file_name: String,
    #[serde(default, rename = "sha256checksum")]
    pub sha256_checksum: String,
    #[serde(default, rename = "md5checksum")]
    pub md5_checksum: String,
    #[serde(default)]
    pub build: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file_size: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub uuid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResponse {
    #[serde(default)]
    pub eligible_to_download: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EulaResponse {
    #[serde(default)]
    pub eula_accepted: bool,
    #[serde(default, rename = "eulaURL")]
    pub eula_url: String,
}

/// Signed link returned for a download payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedDownload {
    #[serde(rename = "downloadURL")]
    pub download_url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
}

/// Files of a download group matching a file-name pattern.
#[derive(Debug, Clone, Default)]
pub struct FoundDownload {
    pub files: Vec<DownloadFile>,
    pub eula_accepted: bool,
    pub eligible_to_download: bool,
}

/// Entitlement-side operations. Most require an established session.
pub trait DownloadSource: Send + Sync {
    fn dlg_header(&self, code: &str, product_id: &str) -> Result<DlgHeader>;

    /// Uses the authenticated endpoint when a session is present, else the
    /// public one (which omits entitlement and EULA state).
    fn dlg_details(&self, code: &str, product_id: &str) -> Result<DlgDetails>;

    /// Account details of the session. `NotAuthenticated` without one.
    fn account_info(&self) -> Result<AccountInfo>;

    /// Name of the logged-in user.
    fn current_user(&self) -> Result<CurrentUser>;

    /// `NotAuthenticated` unless the session is usable.
    fn check_logged_in(&self) -> Result<()> {
        self.account_info().map(|_| ())
    }

    fn accept_eula(&self, code: &str, product_id: &str) -> Result<()>;

    fn fetch_download_link(&self, payload: &DownloadPayload) -> Result<AuthorizedDownload>;
}

/// Matches `pattern` (shell glob) against the file names of a download
/// group. Requires a session; `NoMatchingFiles` when nothing matches.
pub fn find_files<D: DownloadSource + ?Sized>(
    source: &D,
    code: &str,
    product_id: &str,
    pattern: &str,
) -> Result<FoundDownload> {
    source.check_logged_in()?;
    let details = source.dlg_details(code, product_id)?;
    let matcher =
        glob::Pattern::new(pattern).map_err(|_| CatalogError::NoMatchingFiles)?;
    let files: Vec<DownloadFile> = details
        .files
        .into_iter()
        .filter(|f| matcher.matches(&f.file_name))
        .collect();
    if files.is_empty() {
        return Err(CatalogError::NoMatchingFiles);
    }
    Ok(FoundDownload {
        files,
        eula_accepted: details.eula_response.eula_accepted,
        eligible_to_download: details.eligibility_response.eligible_to_download,
    })
}

/// Path inside `dir` for a file name reported by the portal.
///
/// The name must be a single plain path component; anything that would
/// resolve outside `dir` (absolute paths, `..`, separators) is refused.
pub fn local_path(dir: &Path, file_name: &str) -> Result<PathBuf> {
    match Path::new(file_name).file_name() {
        Some(base) if base == OsStr::new(file_name) => Ok(dir.join(base)),
        _ => Err(CatalogError::UnsafeFileName(file_name.to_string())),
    }
}
