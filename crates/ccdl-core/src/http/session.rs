//! Portal session loaded from a Netscape-format cookie jar.
//!
//! Login itself happens elsewhere (browser export, separate tool); this only
//! reads the jar curl will send and extracts the `XSRF-TOKEN` value that
//! state-changing POSTs must echo back as a header.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const XSRF_COOKIE: &str = "XSRF-TOKEN";
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Cookie jar handed to curl for every request.
    pub cookie_file: PathBuf,
    pub xsrf_token: Option<String>,
}

impl Session {
    pub fn load(cookie_file: &Path) -> Result<Self> {
        let jar = fs::read_to_string(cookie_file)?;
        let xsrf_token = cookie_value(&jar, XSRF_COOKIE);
        if xsrf_token.is_none() {
            tracing::warn!(path = %cookie_file.display(), "cookie jar has no {XSRF_COOKIE}");
        }
        Ok(Self {
            cookie_file: cookie_file.to_path_buf(),
            xsrf_token,
        })
    }
}

/// Value of the last cookie named `name` in a Netscape cookie jar.
///
/// Lines are `domain flag path secure expiry name value`, tab separated.
/// Comment lines are skipped except curl's `#HttpOnly_` domain prefix.
pub fn cookie_value(jar: &str, name: &str) -> Option<String> {
    jar.lines()
        .filter_map(|line| {
            let line = line.strip_prefix(HTTP_ONLY_PREFIX).unwrap_or(line);
            if line.starts_with('#') || line.trim().is_empty() {
                return None;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            match fields.as_slice() {
                [_, _, _, _, _, n, value] if *n == name => Some(value.trim().to_string()),
                _ => None,
            }
        })
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const JAR: &str = "# Netscape HTTP Cookie File\n\
# This file was generated by libcurl! Edit at your own risk.\n\
\n\
.customerconnect.vmware.com\tTRUE\t/\tTRUE\t0\tJSESSIONID\tabc\n\
#HttpOnly_customerconnect.vmware.com\tFALSE\t/\tTRUE\t0\tXSRF-TOKEN\tstale\n\
customerconnect.vmware.com\tFALSE\t/\tTRUE\t0\tXSRF-TOKEN\t 5f2c-91 \n";

    #[test]
    fn last_matching_cookie_wins() {
        assert_eq!(cookie_value(JAR, "XSRF-TOKEN").as_deref(), Some("5f2c-91"));
        assert_eq!(cookie_value(JAR, "JSESSIONID").as_deref(), Some("abc"));
        assert!(cookie_value(JAR, "missing").is_none());
    }

    #[test]
    fn http_only_lines_are_cookies() {
        let jar = "#HttpOnly_.example.com\tTRUE\t/\tFALSE\t0\tXSRF-TOKEN\ttok\n";
        assert_eq!(cookie_value(jar, XSRF_COOKIE).as_deref(), Some("tok"));
    }

    #[test]
    fn malformed_lines_ignored() {
        assert!(cookie_value("XSRF-TOKEN=tok\n", XSRF_COOKIE).is_none());
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(JAR.as_bytes()).unwrap();
        f.flush().unwrap();
        let session = Session::load(f.path()).unwrap();
        assert_eq!(session.xsrf_token.as_deref(), Some("5f2c-91"));
        assert_eq!(session.cookie_file, f.path());
    }
}
