//! `ccdl download` – resolve, authorize and fetch matching files.

use anyhow::{Context, Result};
use ccdl_core::download;
use std::fs;
use std::path::PathBuf;

use super::{blocking, Resolver, Target};

#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub target: Target,
    pub file_glob: String,
    pub accept_eula: bool,
    /// Directory the files are written into.
    pub output: PathBuf,
}

/// Downloads every file matching the glob, verifying each against the
/// catalog's SHA-256 before it appears under its final name. Stops at the
/// first failure.
pub async fn run_download(resolver: &Resolver, req: DownloadRequest) -> Result<()> {
    fs::create_dir_all(&req.output)
        .with_context(|| format!("create {}", req.output.display()))?;

    let saved = blocking(resolver, move |r| {
        let t = &req.target;
        let payloads = r.generate_payloads(
            &t.slug,
            &t.subproduct,
            &t.version,
            &req.file_glob,
            t.dlg_type,
            req.accept_eula,
        )?;
        let mut saved = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let link = r.fetch_download_link(&payload)?;
            let name = if link.file_name.is_empty() {
                &payload.file_name
            } else {
                &link.file_name
            };
            let dest = download::local_path(&req.output, name)?;
            tracing::info!(file = %name, "downloading");
            let bytes = r
                .source()
                .download_verified(&link.download_url, &dest, &payload.sha256_checksum)
                .with_context(|| format!("download {name}"))?;
            saved.push((dest, bytes));
        }
        Ok(saved)
    })
    .await?;

    for (path, bytes) in saved {
        println!("{}  ({} bytes, sha256 ok)", path.display(), bytes);
    }
    Ok(())
}
