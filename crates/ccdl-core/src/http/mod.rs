//! curl-backed catalog collaborator for the vendor portal's JSON API.
//!
//! Implements [`CatalogSource`] and [`DownloadSource`] over the public
//! product endpoints and the session-bound entitlement endpoints. Every
//! request goes through the retry module; status codes are mapped to
//! [`CatalogError`] per endpoint.

mod request;
pub mod session;
mod transfer;
mod wire;

pub use session::Session;

use std::time::Duration;
use url::Url;

use crate::account::{AccountInfo, CurrentUser};
use crate::config::CcdlConfig;
use crate::download::{AuthorizedDownload, DlgDetails, DlgHeader, DownloadPayload, DownloadSource};
use crate::error::{CatalogError, Result};
use crate::product::{ProductFamily, ProductGroup};
use crate::retry::RetryPolicy;
use crate::source::{CatalogSource, DlgType, EditionGroup, ReleaseEntry};

use request::Method;

pub(crate) const USER_AGENT: &str = concat!("ccdl/", env!("CARGO_PKG_VERSION"));

const PRODUCTS_PATH: &str = "/channel/public/api/v1.0/products/getProductsAtoZ";
const MAJOR_VERSIONS_PATH: &str = "/channel/public/api/v1.0/products/getProductHeader";
const EDITIONS_PATH: &str = "/channel/public/api/v1.0/products/getRelatedDLGList";
const DLG_HEADER_PATH: &str = "/channel/public/api/v1.0/products/getDLGHeader";
const DETAILS_PUBLIC_PATH: &str = "/channel/public/api/v1.0/dlg/details";
const DETAILS_PATH: &str = "/channel/api/v1.0/dlg/details";
const EULA_ACCEPT_PATH: &str = "/channel/api/v1.0/dlg/eula/accept";
const DOWNLOAD_PATH: &str = "/channel/api/v1.0/dlg/download";
const ACCOUNT_INFO_PATH: &str = "/channel/api/v1.0/ems/accountinfo";
const CURRENT_USER_PATH: &str = "/vmwauth/loggedinuser";
const ACCOUNT_INFO_BODY: &[u8] = br#"{"rowLimit": 1000}"#;

#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base: Url,
    connect_timeout: Duration,
    timeout: Duration,
    retry: RetryPolicy,
    session: Option<Session>,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: Url::parse(base_url)?,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
            session: None,
        })
    }

    /// Builds the client from config, loading the cookie jar when set.
    pub fn from_config(cfg: &CcdlConfig) -> Result<Self> {
        let retry = cfg.retry.as_ref().map(RetryPolicy::from).unwrap_or_default();
        let mut catalog = Self::new(&cfg.base_url)?
            .with_timeouts(cfg.connect_timeout(), cfg.timeout())
            .with_retry(retry);
        if let Some(path) = &cfg.cookie_file {
            catalog = catalog.with_session(Session::load(path)?);
        }
        Ok(catalog)
    }

    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn release_query<'a>(code: &'a str, product_id: &'a str) -> [(&'static str, &'a str); 2] {
        [("downloadGroup", code), ("productId", product_id)]
    }

    fn fetch_header(&self, code: &str, product_id: &str) -> Result<DlgHeader> {
        let url = self.endpoint(DLG_HEADER_PATH, &Self::release_query(code, product_id))?;
        self.send(&url, Method::Get)?
            .expect_ok(|| CatalogError::DlgHeader)?
            .json()
    }
}

impl CatalogSource for HttpCatalog {
    fn list_products(&self) -> Result<Vec<ProductGroup>> {
        let url = self.endpoint(PRODUCTS_PATH, &[("isPrivate", "true")])?;
        let resp = self.send(&url, Method::Get)?;
        let resp = resp.expect_ok(|| CatalogError::UnexpectedStatus(400))?;
        Ok(resp.json::<wire::ProductResponse>()?.into_groups())
    }

    fn list_major_versions(&self, family: &ProductFamily) -> Result<Vec<String>> {
        let url = self.endpoint(
            MAJOR_VERSIONS_PATH,
            &[
                ("category", family.category.as_str()),
                ("product", family.slug.as_str()),
                ("version", family.latest_major_version.as_str()),
            ],
        )?;
        let resp = self.send(&url, Method::Get)?;
        let header: wire::ProductHeader = resp.expect_ok(|| CatalogError::InvalidSlug)?.json()?;
        Ok(header.versions.into_iter().map(|v| v.id).collect())
    }

    fn list_editions(
        &self,
        family: &ProductFamily,
        major_version: &str,
        dlg_type: DlgType,
    ) -> Result<Vec<EditionGroup>> {
        let url = self.endpoint(
            EDITIONS_PATH,
            &[
                ("category", family.category.as_str()),
                ("product", family.slug.as_str()),
                ("version", major_version),
                ("dlgType", dlg_type.as_str()),
            ],
        )?;
        let resp = self.send(&url, Method::Get)?;
        let editions: wire::DlgEditions = resp
            .expect_ok(|| {
                if family.latest_major_version != major_version {
                    CatalogError::InvalidVersion
                } else {
                    CatalogError::InvalidCategory
                }
            })?
            .json()?;
        Ok(editions.dlg_editions_lists)
    }

    fn list_releases(&self, code: &str, product_id: &str) -> Result<Vec<ReleaseEntry>> {
        Ok(self.fetch_header(code, product_id)?.versions)
    }
}

impl DownloadSource for HttpCatalog {
    fn dlg_header(&self, code: &str, product_id: &str) -> Result<DlgHeader> {
        self.fetch_header(code, product_id)
    }

    fn dlg_details(&self, code: &str, product_id: &str) -> Result<DlgDetails> {
        let path = if self.session.is_some() && self.check_logged_in().is_ok() {
            DETAILS_PATH
        } else {
            DETAILS_PUBLIC_PATH
        };
        let url = self.endpoint(path, &Self::release_query(code, product_id))?;
        let resp = self.send(&url, Method::Get)?;
        if resp.status == 401 {
            return Err(CatalogError::NotAuthenticated);
        }
        resp.expect_ok(|| CatalogError::DlgDetailsInputs)?.json()
    }

    fn account_info(&self) -> Result<AccountInfo> {
        if self.session.is_none() {
            return Err(CatalogError::NotAuthenticated);
        }
        let url = self.endpoint(ACCOUNT_INFO_PATH, &[])?;
        self.send(&url, Method::PostJson(ACCOUNT_INFO_BODY))?
            .expect_session_ok()?
            .json()
    }

    fn current_user(&self) -> Result<CurrentUser> {
        self.check_logged_in()?;
        let url = self.endpoint(CURRENT_USER_PATH, &[])?;
        self.send(&url, Method::Get)?.expect_session_ok()?.json()
    }

    fn accept_eula(&self, code: &str, product_id: &str) -> Result<()> {
        let url = self.endpoint(EULA_ACCEPT_PATH, &Self::release_query(code, product_id))?;
        self.send(&url, Method::Get)?
            .expect_ok(|| CatalogError::EulaInputs)?;
        Ok(())
    }

    fn fetch_download_link(&self, payload: &DownloadPayload) -> Result<AuthorizedDownload> {
        let body = serde_json::to_vec(payload)?;
        let url = self.endpoint(DOWNLOAD_PATH, &[])?;
        self.send(&url, Method::PostJson(&body))?
            .expect_ok(|| CatalogError::InvalidDownloadPayload)?
            .json()
    }
}
