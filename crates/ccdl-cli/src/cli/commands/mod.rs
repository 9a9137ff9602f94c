//! CLI command handlers, one file per command.
//!
//! The catalog client is blocking (curl), so every catalog call runs on
//! tokio's blocking pool against a shared resolver.

mod account;
mod catalog;
mod checksum;
mod docs;
mod download;
mod eula;

pub use account::run_account;
pub use catalog::{run_files, run_products, run_resolve, run_subproducts, run_versions};
pub use checksum::run_checksum;
pub use docs::{run_completions, run_man};
pub use download::{run_download, DownloadRequest};
pub use eula::run_eula;

use anyhow::{Context, Result};
use ccdl_core::config::CcdlConfig;
use ccdl_core::http::HttpCatalog;
use ccdl_core::{CatalogResolver, DlgType};
use std::sync::Arc;

pub type Resolver = Arc<CatalogResolver<HttpCatalog>>;

pub fn open_resolver(cfg: &CcdlConfig) -> Result<Resolver> {
    let catalog = HttpCatalog::from_config(cfg).context("catalog client")?;
    Ok(Arc::new(
        CatalogResolver::new(catalog)
            .with_max_workers(cfg.max_parallel_fetches)
            .with_locale(cfg.locale.clone()),
    ))
}

/// Family slug + sub-product + version spec, as given on the command line.
#[derive(Debug, Clone)]
pub struct Target {
    pub slug: String,
    pub subproduct: String,
    pub version: String,
    pub dlg_type: DlgType,
}

impl Target {
    pub fn new(slug: String, subproduct: String, version: String, dlg_type: DlgType) -> Self {
        Self {
            slug,
            subproduct,
            version,
            dlg_type,
        }
    }
}

/// Runs `f` against the resolver on the blocking pool.
async fn blocking<T, F>(resolver: &Resolver, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&CatalogResolver<HttpCatalog>) -> Result<T> + Send + 'static,
{
    let resolver = Arc::clone(resolver);
    tokio::task::spawn_blocking(move || f(&resolver))
        .await
        .context("catalog task join")?
}
