//! In-memory catalog double for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::account::{AccountInfo, CurrentUser, EntitlementAccount};
use crate::download::{
    AuthorizedDownload, DlgDetails, DlgHeader, DownloadFile, DownloadPayload, DownloadSource,
    EligibilityResponse, EulaResponse, HeaderDlg, HeaderProduct,
};
use crate::error::{CatalogError, Result};
use crate::product::{ProductAction, ProductFamily, ProductGroup};
use crate::source::{CatalogEntry, CatalogSource, DlgType, EditionGroup, ReleaseEntry};

/// Number of calls per collaborator operation.
#[derive(Debug, Clone, Default)]
pub struct Calls {
    pub list_products: usize,
    pub list_major_versions: usize,
    pub list_editions: usize,
    pub list_releases: usize,
    pub accept_eula: usize,
    pub fetch_download_link: usize,
}

type BucketKey = (String, String);

#[derive(Default)]
pub struct MemoryCatalog {
    groups: Vec<ProductGroup>,
    major_versions: HashMap<String, Vec<String>>,
    editions: HashMap<(String, String, DlgType), Vec<EditionGroup>>,
    deprecated: HashSet<BucketKey>,
    failing: HashSet<BucketKey>,
    releases: HashMap<String, Vec<ReleaseEntry>>,
    headers: HashMap<String, DlgHeader>,
    details: HashMap<String, DlgDetails>,
    logged_in: bool,
    calls: Mutex<Calls>,
    accepted: Mutex<Vec<String>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_family(mut self, slug: &str, category: &str, latest: &str) -> Self {
        self.groups.push(ProductGroup {
            name: slug.replace('_', " "),
            actions: vec![ProductAction {
                linkname: "View Download Components".to_string(),
                target: format!("./info/slug/{category}/{slug}/{latest}"),
            }],
        });
        self.major_versions.entry(slug.to_string()).or_default();
        self
    }

    pub fn with_major_versions(mut self, slug: &str, buckets: &[&str]) -> Self {
        self.major_versions.insert(
            slug.to_string(),
            buckets.iter().map(|b| b.to_string()).collect(),
        );
        self
    }

    pub fn with_edition(
        mut self,
        slug: &str,
        bucket: &str,
        dlg_type: DlgType,
        group: &str,
        entries: Vec<CatalogEntry>,
    ) -> Self {
        self.editions
            .entry((slug.to_string(), bucket.to_string(), dlg_type))
            .or_default()
            .push(EditionGroup {
                name: group.to_string(),
                entries,
            });
        self
    }

    /// Bucket whose edition listing fails `InvalidVersion`.
    pub fn with_deprecated_bucket(mut self, slug: &str, bucket: &str) -> Self {
        self.deprecated.insert((slug.to_string(), bucket.to_string()));
        self
    }

    /// Bucket whose edition listing fails `ServerError`.
    pub fn with_failing_bucket(mut self, slug: &str, bucket: &str) -> Self {
        self.failing.insert((slug.to_string(), bucket.to_string()));
        self
    }

    /// Release listing for `code`, as `(id, display name)` pairs.
    pub fn with_releases(mut self, code: &str, releases: &[(&str, &str)]) -> Self {
        self.releases.insert(
            code.to_string(),
            releases
                .iter()
                .map(|(id, name)| ReleaseEntry {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        );
        self
    }

    pub fn with_header(mut self, code: &str, header: DlgHeader) -> Self {
        self.headers.insert(code.to_string(), header);
        self
    }

    pub fn with_details(mut self, code: &str, details: DlgDetails) -> Self {
        self.details.insert(code.to_string(), details);
        self
    }

    pub fn logged_in(mut self, logged_in: bool) -> Self {
        self.logged_in = logged_in;
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }

    pub fn accepted_eulas(&self) -> Vec<String> {
        self.accepted.lock().unwrap().clone()
    }

    fn count(&self, f: impl FnOnce(&mut Calls)) {
        f(&mut self.calls.lock().unwrap());
    }
}

impl CatalogSource for MemoryCatalog {
    fn list_products(&self) -> Result<Vec<ProductGroup>> {
        self.count(|c| c.list_products += 1);
        Ok(self.groups.clone())
    }

    fn list_major_versions(&self, family: &ProductFamily) -> Result<Vec<String>> {
        self.count(|c| c.list_major_versions += 1);
        self.major_versions
            .get(&family.slug)
            .cloned()
            .ok_or(CatalogError::InvalidSlug)
    }

    fn list_editions(
        &self,
        family: &ProductFamily,
        major_version: &str,
        dlg_type: DlgType,
    ) -> Result<Vec<EditionGroup>> {
        self.count(|c| c.list_editions += 1);
        let key = (family.slug.clone(), major_version.to_string());
        if self.deprecated.contains(&key) {
            return Err(CatalogError::InvalidVersion);
        }
        if self.failing.contains(&key) {
            return Err(CatalogError::ServerError);
        }
        Ok(self
            .editions
            .get(&(key.0, key.1, dlg_type))
            .cloned()
            .unwrap_or_default())
    }

    fn list_releases(&self, code: &str, _product_id: &str) -> Result<Vec<ReleaseEntry>> {
        self.count(|c| c.list_releases += 1);
        self.releases.get(code).cloned().ok_or(CatalogError::DlgHeader)
    }
}

impl DownloadSource for MemoryCatalog {
    fn dlg_header(&self, code: &str, _product_id: &str) -> Result<DlgHeader> {
        self.headers.get(code).cloned().ok_or(CatalogError::DlgHeader)
    }

    fn dlg_details(&self, code: &str, _product_id: &str) -> Result<DlgDetails> {
        self.details
            .get(code)
            .cloned()
            .ok_or(CatalogError::DlgDetailsInputs)
    }

    fn account_info(&self) -> Result<AccountInfo> {
        if !self.logged_in {
            return Err(CatalogError::NotAuthenticated);
        }
        Ok(AccountInfo {
            user_type: "Customer".to_string(),
            accounts: vec![EntitlementAccount {
                ea_number: "110011".to_string(),
                ea_name: "Example Corp".to_string(),
                is_default: "true".to_string(),
            }],
        })
    }

    fn current_user(&self) -> Result<CurrentUser> {
        self.check_logged_in()?;
        Ok(CurrentUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        })
    }

    fn accept_eula(&self, code: &str, _product_id: &str) -> Result<()> {
        self.count(|c| c.accept_eula += 1);
        self.accepted.lock().unwrap().push(code.to_string());
        Ok(())
    }

    fn fetch_download_link(&self, payload: &DownloadPayload) -> Result<AuthorizedDownload> {
        self.count(|c| c.fetch_download_link += 1);
        Ok(AuthorizedDownload {
            download_url: format!(
                "https://download.example.com/{}/{}",
                payload.download_group, payload.uuid
            ),
            file_name: payload.file_name.clone(),
        })
    }
}

/// Catalog entry with the fields the engine reads.
pub fn entry(name: &str, code: &str, product_id: &str) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        code: code.to_string(),
        product_id: product_id.to_string(),
        release_package_id: format!("rp-{product_id}"),
        release_date: "2023-09-21".to_string(),
    }
}

/// Release details listing `files`, each with a uuid and checksums derived
/// from its name.
pub fn details(files: &[&str], eligible: bool, eula_accepted: bool) -> DlgDetails {
    DlgDetails {
        files: files
            .iter()
            .map(|name| DownloadFile {
                file_name: name.to_string(),
                sha256_checksum: format!("sha256-{name}"),
                md5_checksum: format!("md5-{name}"),
                uuid: format!("uuid-{name}"),
                version: "12.3.0".to_string(),
                release_date: "2023-09-21".to_string(),
                ..Default::default()
            })
            .collect(),
        eligibility_response: EligibilityResponse {
            eligible_to_download: eligible,
        },
        eula_response: EulaResponse {
            eula_accepted,
            eula_url: "https://example.com/eula/vmtools".to_string(),
        },
    }
}

/// Release header with a download type and tag id.
pub fn header(product_name: &str, dlg_type: &str, tag_id: i64) -> DlgHeader {
    DlgHeader {
        versions: Vec::new(),
        product: HeaderProduct {
            name: product_name.to_string(),
            ..Default::default()
        },
        dlg: HeaderDlg {
            dlg_type: dlg_type.to_string(),
            tag_id,
            ..Default::default()
        },
    }
}
