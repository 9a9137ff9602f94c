//! Single curl request with retry.

use curl::easy::{Easy, List};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{CatalogError, Result};
use crate::retry::{classify_http_status, run_with_retry, ErrorKind};

use super::HttpCatalog;

/// Status and body of a completed request.
#[derive(Debug)]
pub(crate) struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

impl Response {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// `Ok` on 200, `on_400` on 400, `UnexpectedStatus` otherwise.
    pub fn expect_ok(&self, on_400: impl FnOnce() -> CatalogError) -> Result<&Self> {
        match self.status {
            200 => Ok(self),
            400 => Err(on_400()),
            other => Err(CatalogError::UnexpectedStatus(other)),
        }
    }

    /// Status mapping of the session-bound account endpoints.
    pub fn expect_session_ok(&self) -> Result<&Self> {
        match self.status {
            200 => Ok(self),
            401 => Err(CatalogError::NotAuthenticated),
            500 => Err(CatalogError::ServerError),
            other => Err(CatalogError::UnexpectedStatus(other)),
        }
    }
}

pub(crate) enum Method<'a> {
    Get,
    /// JSON body; the session's XSRF token is attached when present.
    PostJson(&'a [u8]),
}

impl HttpCatalog {
    /// Performs the request, retrying transport failures and throttling or
    /// server-side statuses. Once retries are exhausted the last status is
    /// returned as a response so each endpoint can map it.
    pub(crate) fn send(&self, url: &Url, method: Method<'_>) -> Result<Response> {
        let outcome = run_with_retry(&self.retry, || {
            let resp = self.perform(url, &method)?;
            if classify_http_status(resp.status) != ErrorKind::Other {
                return Err(CatalogError::UnexpectedStatus(resp.status));
            }
            Ok(resp)
        });
        match outcome {
            Err(CatalogError::UnexpectedStatus(status)) => Ok(Response {
                status,
                body: Vec::new(),
            }),
            other => other,
        }
    }

    fn perform(&self, url: &Url, method: &Method<'_>) -> Result<Response> {
        let mut easy = Easy::new();
        easy.url(url.as_str())?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        easy.useragent(super::USER_AGENT)?;
        if let Some(session) = &self.session {
            easy.cookie_file(&session.cookie_file)?;
        }

        let mut headers = List::new();
        headers.append("Accept: application/json")?;
        if let Method::PostJson(body) = method {
            easy.post(true)?;
            easy.post_fields_copy(body)?;
            headers.append("Content-Type: application/json")?;
            if let Some(token) = self.session.as_ref().and_then(|s| s.xsrf_token.as_deref()) {
                headers.append(&format!("X-XSRF-TOKEN: {token}"))?;
            }
        }
        easy.http_headers(headers)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }
        let status = easy.response_code()?;
        tracing::debug!(url = %url, status, bytes = body.len(), "catalog request");
        Ok(Response { status, body })
    }
}
