//! Streaming file download from a signed link.

use curl::easy::Easy;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::checksum;
use crate::error::{CatalogError, Result};

use super::HttpCatalog;

impl HttpCatalog {
    /// Streams `url` into `dest`, returning the number of bytes written.
    ///
    /// Only the connect timeout applies; transfers of large images are not
    /// bounded in total time. The partial file is removed on failure.
    pub fn download_file(&self, url: &str, dest: &Path) -> Result<u64> {
        let result = self.fetch_to(url, dest);
        if result.is_err() {
            let _ = fs::remove_file(dest);
        }
        result
    }

    /// Downloads into `<dest>.part`, checks it against `sha256` and only then
    /// renames it to `dest`. On any failure nothing is left at either path.
    pub fn download_verified(&self, url: &str, dest: &Path, sha256: &str) -> Result<u64> {
        let part = part_path(dest);
        let bytes = self.download_file(url, &part)?;
        if let Err(e) = checksum::verify_sha256(&part, sha256) {
            let _ = fs::remove_file(&part);
            return Err(e);
        }
        fs::rename(&part, dest)?;
        Ok(bytes)
    }

    fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64> {
        let mut file = File::create(dest)?;
        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;

        let mut easy = Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.useragent(super::USER_AGENT)?;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    // Short count makes curl abort with a write error.
                    Ok(0)
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err {
            return Err(CatalogError::Io(e));
        }
        performed?;

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(CatalogError::UnexpectedStatus(status));
        }
        file.flush()?;
        tracing::info!(path = %dest.display(), bytes = written, "download complete");
        Ok(written)
    }
}

/// `file.iso` → `file.iso.part`, next to the final file.
pub fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
